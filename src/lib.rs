// src/lib.rs

#[macro_use]
pub mod log;

pub mod cli;
pub mod config;
pub mod core;
pub mod specs;

pub mod convert;
pub mod model;
pub mod normalize;
pub mod output;
pub mod progress;
pub mod reader;
pub mod runner;
pub mod store;
