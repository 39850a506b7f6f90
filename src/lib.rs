//! SWAPI Relay Library
//!
//! Cache-fronted access to the Star Wars API, console presenters for the
//! records it returns, and the HTTP server that drives processing cycles.

pub mod cache;
pub mod cli;
pub mod cycle;
pub mod data;
pub mod fetch;
pub mod present;
pub mod server;
pub mod stats;
