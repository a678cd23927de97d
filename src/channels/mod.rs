//! Hosts that carry a conversation to a user.
//!
//! The HTTP widget API lives in `routes`; this module holds the terminal host.

pub mod cli;

pub use cli::CliChannel;
