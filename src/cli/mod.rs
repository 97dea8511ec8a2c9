//! CLI module for mindcards - command-line interface and subcommands.

pub mod commands;

pub use commands::Cli;
