//! Unit and integration tests for building-files.
//!
//! ## Test Modules
//!
//! - **support**: recording prompt/navigator and seeded stores shared by the tests
//! - **pagination_tests**: search filter, page slicing, pager bounds
//! - **selection_tests**: detail panel state machine
//! - **dismissal_tests**: regions, pointer hub, subscription lifetime
//! - **file_list_tests**: the file list controller against the in-memory gateway
//! - **building_form_tests**: building form validation and submission
//! - **upload_tests**: upload widget
//! - **error_tests**: error display and classification
//! - **config_tests**: configuration loading and validation
//! - **api_tests**: development server routes (feature `devserver`)
//!
//! Individual modules can be run with e.g. `cargo test file_list_tests`.

pub mod support;

pub mod config_tests;
pub mod dismissal_tests;
pub mod error_tests;
