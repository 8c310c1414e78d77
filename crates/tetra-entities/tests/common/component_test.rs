use as_any::AsAny;

use tetra_config::{MonitorConfig, SharedConfig};
use tetra_core::{BurstType, PhyBlockNum, Sap, TdmaTime, TetraEntity};
use tetra_core::{BitBuffer, cell};
use tetra_entities::MessageRouter;
use tetra_entities::lmac::lmac_mon::LmacMon;
use tetra_entities::umac::umac_mon::UmacMon;
use tetra_saps::tmv::TmvUnitdataInd;
use tetra_saps::tmv::enums::logical_chans::LogicalChannel;
use tetra_saps::{SapMsg, SapMsgInner};

use super::sink::Sink;

/// Test cell identity used throughout the integration tests.
pub const TEST_MCC: u16 = 204;
pub const TEST_MNC: u16 = 1337;
pub const TEST_COLOUR_CODE: u8 = 1;

pub fn test_scrambling_code() -> u32 {
    cell::scrambling_word(TEST_MCC, TEST_MNC, TEST_COLOUR_CODE)
}

/// Monitor stack under test: lower MAC, upper MAC and a sink collecting
/// everything addressed to the report entity.
pub struct MonTest {
    pub config: SharedConfig,
    pub router: MessageRouter,
}

impl MonTest {
    pub fn new() -> Self {
        Self::with_config(MonitorConfig::default())
    }

    pub fn with_config(cfg: MonitorConfig) -> Self {
        let config = SharedConfig::from_config(cfg);
        let mut router = MessageRouter::new();
        router.register_entity(Box::new(LmacMon::new(config.clone())));
        router.register_entity(Box::new(UmacMon::new(config.clone())));
        router.register_entity(Box::new(Sink::new(TetraEntity::Report)));
        Self { config, router }
    }

    pub fn submit(&mut self, message: SapMsg) {
        self.router.submit_message(message);
        self.router.deliver_all_messages();
    }

    /// Everything the report sink collected so far.
    pub fn dump_sink(&mut self) -> Vec<SapMsg> {
        let entity = self.router.get_entity(TetraEntity::Report).expect("sink registered");
        let sink = entity.as_any_mut().downcast_mut::<Sink>().expect("sink type");
        sink.take_msgqueue()
    }

    pub fn umac(&mut self) -> &mut UmacMon {
        self.router
            .get_entity(TetraEntity::Umac)
            .expect("umac registered")
            .as_any_mut()
            .downcast_mut::<UmacMon>()
            .expect("umac type")
    }

    pub fn lmac(&mut self) -> &mut LmacMon {
        self.router
            .get_entity(TetraEntity::Lmac)
            .expect("lmac registered")
            .as_any_mut()
            .downcast_mut::<LmacMon>()
            .expect("lmac type")
    }
}

/// A type-1 block as the lower MAC would deliver it to the upper MAC.
pub fn tmv_ind(lchan: LogicalChannel, block_num: PhyBlockNum, pdu: BitBuffer, dltime: TdmaTime) -> SapMsg {
    SapMsg {
        sap: Sap::TmvSap,
        src: TetraEntity::Lmac,
        dest: TetraEntity::Umac,
        dltime,
        msg: SapMsgInner::TmvUnitdataInd(TmvUnitdataInd {
            pdu,
            logical_channel: lchan,
            block_num,
            burst_type: BurstType::Ndb,
            crc_pass: true,
            scrambling_code: test_scrambling_code(),
        }),
    }
}
