//! Configuration for the TETRA downlink monitor.
//!
//! The binary builds a `MonitorConfig` from its command line and hands a
//! `SharedConfig` to every entity constructor.

pub mod monitor_config;

pub use monitor_config::{MonitorConfig, SharedConfig};
