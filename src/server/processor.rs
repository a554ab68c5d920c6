use crate::http::request::Request;

/// A pluggable handler for completed requests, selected by HTTP method.
///
/// The dispatcher invokes exactly one processor per completed request: the
/// one registered for the request's method, or the configured fallback. Side
/// effects (writing a response, logging, persistence) are entirely the
/// processor's concern.
///
/// Implementations are shared across connection tasks and must be `Send +
/// Sync`.
pub trait Processor: Send + Sync {
    fn process_request(&self, request: &Request);
}
