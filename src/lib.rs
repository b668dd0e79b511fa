//! casegen: generate structured test cases from a feature specification
//!
//! Reads a prompt template and a specification, asks a generative model for a
//! JSON array of test cases (with bounded exponential-backoff retry), validates
//! the shape of the answer, and renders a human-readable report.

pub mod cli;
pub mod config;
pub mod error;
pub mod generation;
pub mod logging;
pub mod pipeline;
pub mod prompt;
pub mod provider;
pub mod validate;
