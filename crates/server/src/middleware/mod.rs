//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span with method, uri, status, latency)
//! 3. Request ID (add unique ID to each request, recorded on the span)
//! 4. CORS (per surface: `/store` and `/admin` each get their own origin list)

pub mod cors;
pub mod request_id;

pub use cors::cors_layer;
pub use request_id::request_id_middleware;
