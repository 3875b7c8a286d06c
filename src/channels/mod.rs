//! Terminal front-end for the discovery chat.

pub mod cli;

pub use cli::CliChannel;
