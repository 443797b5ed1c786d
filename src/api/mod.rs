//! API module for HTTP handlers, middleware, and routing.

pub mod handlers;
pub mod middleware;
pub mod routes;
