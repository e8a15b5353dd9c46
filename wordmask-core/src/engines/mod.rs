// wordmask-core/src/engines/mod.rs
//! Concrete `SanitizationEngine` implementations.
//!
//! License: MIT OR APACHE 2.0

pub mod word_engine;
