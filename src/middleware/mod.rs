//! Middleware of the development server.

pub mod headers;
