pub mod config;
pub mod engine;
pub mod error;
pub mod indicator;
pub mod model;
pub mod ports;
pub mod replay;
pub mod scheduler;
pub mod strategy;
