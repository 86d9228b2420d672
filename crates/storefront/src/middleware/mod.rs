//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, transactions)
//! 2. CORS (credentialed requests from configured origins)
//! 3. `TraceLayer` (the `http_request` span)
//! 4. Request ID (recorded on the span opened by `TraceLayer`)

pub mod cors;
pub mod request_id;

pub use cors::cors_layer;
pub use request_id::{MAX_REQUEST_ID_LEN, REQUEST_ID_HEADER, request_id_middleware};
