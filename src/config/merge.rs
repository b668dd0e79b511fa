//! Merge rules shared by every load path.

pub mod merge_policy;
