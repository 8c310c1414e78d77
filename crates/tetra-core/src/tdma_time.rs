use core::fmt;

/// TDMA time: 4 timeslots per frame, 18 frames per multiframe,
/// 60 multiframes per hyperframe. Hyperframe numbers are not tracked on a
/// monitored downlink; time wraps after 60 multiframes.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TdmaTime {
    /// Timeslot, 1 to 4
    pub t: u8,
    /// Frame number, 1 to 18
    pub f: u8,
    /// Multiframe number, 1 to 60
    pub m: u8,
}

/// Timeslots per hyperframe; integer time wraps here.
pub const TIME_INT_WRAP: i32 = 4 * 18 * 60;

impl Default for TdmaTime {
    fn default() -> TdmaTime {
        TdmaTime { t: 1, f: 1, m: 1 }
    }
}

impl TdmaTime {
    pub fn is_valid(self) -> bool {
        (1..=4).contains(&self.t) && (1..=18).contains(&self.f) && (1..=60).contains(&self.m)
    }

    /// Timeslot index since (1/1/1), in [0, TIME_INT_WRAP).
    pub fn to_int(self) -> i32 {
        (self.t as i32 - 1) + (self.f as i32 - 1) * 4 + (self.m as i32 - 1) * 4 * 18
    }

    pub fn from_int(time: i32) -> TdmaTime {
        let wrapped = time.rem_euclid(TIME_INT_WRAP);
        TdmaTime {
            t: (wrapped.rem_euclid(4) + 1) as u8,
            f: (wrapped.div_euclid(4).rem_euclid(18) + 1) as u8,
            m: (wrapped.div_euclid(4 * 18) + 1) as u8,
        }
    }

    /// Add a number of timeslots, wrapping at the hyperframe boundary.
    pub fn add_timeslots(self, num_slots: i32) -> TdmaTime {
        TdmaTime::from_int(self.to_int() + num_slots)
    }

    /// Signed distance to `b` in timeslots, shortest way around the wrap.
    pub fn diff(self, b: Self) -> i32 {
        let mut d = self.to_int() - b.to_int();
        if d < -TIME_INT_WRAP / 2 {
            d += TIME_INT_WRAP;
        }
        if d >= TIME_INT_WRAP / 2 {
            d -= TIME_INT_WRAP;
        }
        d
    }

    /// True when this downlink timeslot carries the mandatory BSCH (SYNC)
    /// broadcast, i.e. frame 18 with (m + t) mod 4 == 3.
    pub fn is_mandatory_bsch(&self) -> bool {
        self.f == 18 && (self.m + self.t) % 4 == 3
    }

    /// True when this downlink timeslot carries the mandatory BNCH
    /// (SYSINFO) broadcast, i.e. frame 18 with (m + t) mod 4 == 1.
    pub fn is_mandatory_bnch(&self) -> bool {
        self.f == 18 && (self.m + self.t) % 4 == 1
    }
}

impl fmt::Display for TdmaTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}/{}", self.m, self.f, self.t)
    }
}

impl fmt::Debug for TdmaTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}/{}", self.m, self.f, self.t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_hyperframe_wraps_back() {
        let mut time = TdmaTime::default();
        for _ in 0..TIME_INT_WRAP {
            time = time.add_timeslots(1);
            assert!(time.is_valid(), "invalid time {:?}", time);
        }
        assert_eq!(time, TdmaTime::default());
    }

    #[test]
    fn test_slot_to_frame_carry() {
        let t = TdmaTime { t: 4, f: 1, m: 1 };
        assert_eq!(t.add_timeslots(1), TdmaTime { t: 1, f: 2, m: 1 });
        let t = TdmaTime { t: 4, f: 18, m: 1 };
        assert_eq!(t.add_timeslots(1), TdmaTime { t: 1, f: 1, m: 2 });
        let t = TdmaTime { t: 4, f: 18, m: 60 };
        assert_eq!(t.add_timeslots(1), TdmaTime { t: 1, f: 1, m: 1 });
    }

    #[test]
    fn test_add_and_diff_agree() {
        let mut time = TdmaTime::default();
        let increment = 123;
        for _ in 0..1000 {
            let next = time.add_timeslots(increment);
            assert_eq!(next.diff(time), increment);
            assert_eq!(time.diff(next), -increment);
            time = next;
        }
    }

    #[test]
    fn test_from_int() {
        assert_eq!(TdmaTime::from_int(0), TdmaTime { t: 1, f: 1, m: 1 });
        assert_eq!(TdmaTime::from_int(1), TdmaTime { t: 2, f: 1, m: 1 });
        assert_eq!(TdmaTime::from_int(-1), TdmaTime { t: 4, f: 18, m: 60 });
    }

    #[test]
    fn test_broadcast_scheduling() {
        // frame 18, m + t == 3 mod 4 -> SB slot; m + t == 1 mod 4 -> BNCH
        assert!(TdmaTime { t: 2, f: 18, m: 1 }.is_mandatory_bsch());
        assert!(TdmaTime { t: 4, f: 18, m: 1 }.is_mandatory_bnch());
        assert!(!TdmaTime { t: 4, f: 17, m: 1 }.is_mandatory_bnch());
    }
}
