// devsan/src/lib.rs
//! # devsan CLI Application
//!
//! Thin command-line wrapper around `devsan-core`: reads a file, reads a
//! rules file, writes the sanitized text and reports any rule warnings.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
pub mod utils;
