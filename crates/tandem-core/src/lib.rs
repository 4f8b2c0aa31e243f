//! # tandem-core
//!
//! Core types shared across all Tandem crates.
//!
//! This crate provides the data model the loader, aggregator and comparator
//! agree on:
//! - Capture records, sessions and corpora, plus flat-record provenance
//! - Payload tree paths and their textual form (`a.b[0]["x.y"]`)
//! - Per-path tree differences and their noise category
//! - Comparison reports and corpus summaries
//!
//! Payload trees themselves are plain `serde_json::Value`s.

pub mod diff;
pub mod enums;
pub mod path;
pub mod record;
pub mod report;
pub mod summary;
