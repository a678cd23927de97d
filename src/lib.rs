//! Abroad Assist — rule-based chat widget for a study-abroad consultancy.

pub mod channels;
pub mod config;
pub mod dialogue;
pub mod error;
pub mod routes;
pub mod session;
