//! HTTP protocol implementation.
//!
//! The request path is deliberately incremental: bytes are fed to the parser
//! one at a time as they arrive, so a request is reconstructed without ever
//! buffering ahead of the stream. Only the header section is parsed; bodies,
//! keep-alive, and response writing are out of scope.
//!
//! - **`request`**: the request representation built up during parsing
//! - **`parser`**: the byte-driven incremental request parser
//! - **`connection`**: pumps one accepted connection into one parser
//!
//! # Data flow
//!
//! ```text
//! socket bytes → RequestParser (byte by byte) → completed Request
//!              → RoutingTable → Processor
//! ```

pub mod connection;
pub mod parser;
pub mod request;
