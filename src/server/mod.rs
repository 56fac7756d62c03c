//! HTTP surface of the service.
//!
//! Routes, request tracing, CORS and the mapping of errors to responses.

pub mod api;
pub mod app;
pub mod cors;
pub mod errors;
pub mod tracing;
