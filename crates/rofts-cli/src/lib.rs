//! Command-line front end for rofts.
//!
//! The binary in `main.rs` is a thin wrapper: argument definitions live in
//! [`cli`], file configuration in [`config`], and the command handlers in
//! [`commands`].

pub mod cli;
pub mod commands;
pub mod config;
