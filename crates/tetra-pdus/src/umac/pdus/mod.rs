pub mod access_assign;
pub mod access_define;
pub mod mac_d_blck;
pub mod mac_end;
pub mod mac_frag;
pub mod mac_resource;
pub mod mac_sync;
pub mod mac_sysinfo;
