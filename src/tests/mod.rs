//! Unit and integration tests for the item listing service.
//!
//! - **support**: shared fixtures (temp database, image directory, JPEG bytes)
//! - **api_tests**: end-to-end tests through the router
//! - **repository_tests**: SQLite repository behaviour
//! - **image_tests**: content hashing, re-encoding and placeholder fallback
//! - **config_tests**: configuration defaults, layering and validation
//! - **error_tests**: error to HTTP response mapping

mod support;

mod image_tests;
