//! Safety policy engine for trans-affirming workout planning.
//!
//! The [`safety`] module turns a medical/physiological [`safety::SafetyProfile`]
//! and a candidate exercise pool into an [`safety::EvaluationResult`]. The
//! remaining modules carry the service plumbing around it.

pub mod catalog;
pub mod config;
pub mod error;
pub mod safety;
pub mod telemetry;
