//! deeplucid: an MCP stdio server exposing the Unified Cognitive Processing
//! Framework as tools, backed by a bounded, expiring session store.

pub mod config;
pub mod daemon;
pub mod engine;
pub mod server;
pub mod session;
pub mod tools;
pub mod utils;
