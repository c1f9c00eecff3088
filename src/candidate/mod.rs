//! Candidate selection and pruning utilities.
//!
//! Includes confidence filtering and greedy merging of overlapping boxes.

pub(crate) mod filter;
pub(crate) mod merge;
