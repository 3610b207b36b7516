//! Core types used throughout the gtmsel library.
//!
//! This module contains the serializable records handed back to callers:
//! - [`ElementSnapshot`] - Bounded description of one selected element
//! - [`SelectorCandidate`] - One proposed selector with its strategy and priority
//! - [`SelectorType`] - Strategy classification with its fixed priority
//! - [`ResourceKind`] - Input page classification

pub mod candidate;
pub mod resource;
pub mod snapshot;

pub use candidate::{SelectorCandidate, SelectorType};
pub use resource::ResourceKind;
pub use snapshot::ElementSnapshot;
