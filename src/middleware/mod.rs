//! Middleware applied in front of every route.
//!
//! CORS, tracing and panic recovery come from `tower-http`; this module holds
//! the request checks written for this service.

pub mod validation;
