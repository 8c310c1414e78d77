pub mod burst_consts;
pub mod phy_io_file;
pub mod train_consts;
