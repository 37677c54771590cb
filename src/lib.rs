//! # building-files
//!
//! Core of the building and file management screens: creating building records,
//! listing, renaming and deleting a building's files, and uploading new ones.
//!
//! ## Architecture
//!
//! The crate is split so that all screen logic runs natively and in the browser alike:
//!
//! - **View models** ([`view`]): plain state machines driven by user actions
//! - **Gateway** ([`gateway`]): the async boundary to the backend, implemented over HTTP
//!   by the web UI and in memory by [`gateway::MemoryGateway`]
//! - **Development server** (feature `devserver`): axum router serving the built UI and an
//!   in-memory implementation of the backend contract
//!
//! ## Core Components
//!
//! - [`config`]: layered configuration (embedded defaults, file, environment)
//! - [`error`]: client error taxonomy and the development server's error envelope
//! - [`gateway`]: backend access trait, endpoint descriptors, in-memory implementation
//! - [`types`]: records and request bodies shared with the backend
//! - [`view`]: file list controller, selection, pagination, dismissal, forms
//! - `routes` / `state` / `middleware`: development server handlers, shared state and
//!   response headers

pub mod config;
pub mod error;
pub mod gateway;
pub mod types;
pub mod view;

#[cfg(feature = "devserver")]
pub mod middleware;
#[cfg(feature = "devserver")]
pub mod routes;
#[cfg(feature = "devserver")]
pub mod state;

#[cfg(test)]
mod tests;
