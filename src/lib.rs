//! # Item Listing Backend Library
//!
//! A small REST service for submitting, listing and searching named,
//! categorized items, each optionally carrying a JPEG image.
//!
//! ## Architecture
//!
//! - **Axum**: HTTP server and routing
//! - **SQLx**: asynchronous SQLite access for the `items` table
//! - **image** / **sha2**: JPEG re-encoding and content-hash file names
//! - **Tokio**: async runtime
//!
//! ## Core Components
//!
//! - [`config`]: layered configuration (embedded defaults, file, env, `FRONT_URL`)
//! - [`db`]: schema bootstrap
//! - [`error`]: centralized error handling and HTTP error responses
//! - [`images`]: content-addressed image directory with placeholder fallback
//! - [`metrics`]: request counters
//! - [`middleware`]: request validation
//! - [`repository`]: item persistence behind the [`repository::ItemRepository`] trait
//! - [`routes`]: HTTP handlers and the router
//! - [`state`]: shared application state
//! - [`types`]: request/response types

pub mod config;
pub mod db;
pub mod error;
pub mod images;
pub mod metrics;
pub mod middleware;
pub mod repository;
pub mod routes;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
