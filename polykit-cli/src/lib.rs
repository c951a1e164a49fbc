//! Library half of the `polykit` command.
//!
//! Kept separate from `main.rs` so argument handling and configuration can
//! be tested without spawning the binary.

pub mod config;
pub mod demo;
pub mod input;

pub use config::{Config, GzipConfig};
pub use demo::describe_engine;
pub use input::{parse_value, parse_values, read_input, read_input_from};
