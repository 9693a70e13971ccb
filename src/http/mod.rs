//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → middleware/cors.rs (preflight short-circuit, permissive headers)
//!     → request.rs (request ID, body extraction & validation)
//!     → routing::RouteTable (resolve action)
//!     → handlers.rs (store operation)
//!     → response.rs (status, headers, body)
//!     → Send to client
//! ```

pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use response::ApiError;
pub use server::{AppState, HttpServer};
