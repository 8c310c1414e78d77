//! Bit-exact parsers and serializers for the MAC and MLE PDUs seen on the
//! monitored downlink. Parsers consume a `BitBuffer` cursor; serializers
//! exist so the test suite can construct valid downlink blocks.

pub mod mle;
pub mod umac;
