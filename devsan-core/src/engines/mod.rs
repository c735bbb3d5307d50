// devsan-core/src/engines/mod.rs
//! Concrete implementations of the `SanitizationEngine` trait.
//!
//! To add a new engine, create a new file (e.g. `literal_engine.rs`),
//! implement the trait there, and declare it here with `pub mod <engine_name>;`.

pub mod regex_engine;
