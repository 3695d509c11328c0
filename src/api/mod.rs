//! REST API layer for HTTP request/response handling.
//!
//! This layer translates HTTP requests into application service calls and
//! formats responses according to API contracts.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Rate limiting and request tracing
//! - [`docs`] - OpenAPI document and Swagger UI
//! - [`routes`] - Route configuration and composition

pub mod docs;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
