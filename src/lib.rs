pub mod snakes_ladders;

pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod session;
pub mod simulate;
pub mod timeline;
