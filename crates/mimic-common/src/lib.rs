//! Common utilities for the Mimic host-object engine.
//!
//! This crate provides shared infrastructure used by all Mimic components:
//! - **Warning System** - de-duplicated warnings for degraded behavior

pub mod warning;
