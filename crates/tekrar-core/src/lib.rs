//! tekrar-core — results-log decoding and recency-decay scoring.
//!
//! This crate turns a raw quiz results log into a ranked review list:
//! CSV/JSON decoding, event normalization, exponential-decay scoring, and
//! top-N selection, plus the catalog and report documents around them.

pub mod alias;
pub mod config;
pub mod error;
pub mod events;
pub mod model;
pub mod report;
pub mod results;
pub mod score;
pub mod select;
