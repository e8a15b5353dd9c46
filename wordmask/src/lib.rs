// wordmask/src/lib.rs
//! # Wordmask CLI
//!
//! Command line front end for the `wordmask-core` masking engine. The binary
//! in `main.rs` only parses arguments and dispatches to [`commands`].

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
