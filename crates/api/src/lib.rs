//! HTTP API: routing, the access pipeline, and request/response mapping.

pub mod app;
pub mod context;
pub mod middleware;
