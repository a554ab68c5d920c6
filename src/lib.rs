//! Switchboard - Minimal method-dispatch HTTP server
//!
//! Accepts TCP connections, incrementally parses each HTTP request as bytes
//! arrive, and hands completed requests to pluggable processors selected by
//! HTTP method.

pub mod config;
pub mod http;
pub mod server;
