pub mod pdus;
