//! Library side of the `onix-normalize` binary.

pub mod config;
pub mod logging;
