pub mod config;
pub mod pipe;
pub mod status;
pub mod watch;
