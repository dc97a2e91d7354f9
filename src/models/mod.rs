//! Data models

pub mod review;

pub use review::*;
