//! Server lifecycle: the dispatcher owning the accept loop and the routing
//! table, and the processor capability completed requests are routed to.

pub mod dispatcher;
pub mod processor;
