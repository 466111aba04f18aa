pub mod batch;
pub mod colorize;
pub mod composite;
pub mod session;
