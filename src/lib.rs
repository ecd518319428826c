pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod logging;
pub mod maze;
pub mod rng;
pub mod session;
pub mod terminal;
pub mod timer;
pub mod types;
