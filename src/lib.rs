// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod assess;
pub mod cli;
pub mod config;
pub mod core;
pub mod dom;
pub mod extract;
pub mod model;
pub mod progress;
pub mod runner;
pub mod store;
