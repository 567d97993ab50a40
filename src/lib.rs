//! Deterministic QA checks for exported ad campaign structures.
//!
//! An ad export (CSV) is ingested into a `campaign -> ad set -> ad` hierarchy
//! and compared against one expected configuration.

pub mod cmd;
pub mod domain;
pub mod engine;
pub mod io;
