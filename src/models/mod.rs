//! Data models for provenance attribution.
//!
//! Attribute keys live in [`semconv`]; the values produced by the mining
//! steps live in this module's submodules.

mod attributes;
mod scm;
pub mod semconv;

pub use attributes::{Attribute, AttributeList, AttributeValue};
pub use scm::{ChangeSizeStats, CloneInfo, ContributorSet};
