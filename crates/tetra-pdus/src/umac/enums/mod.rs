pub mod broadcast_type;
pub mod chan_alloc;
pub mod downlink_usage;
pub mod mac_pdu_type;
pub mod mac_resource_addr_type;
pub mod sysinfo_opt_field_flag;
