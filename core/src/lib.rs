pub mod config;
pub mod ids;
pub mod intake;
pub mod review;

pub mod error;
