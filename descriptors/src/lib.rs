//! Dependency descriptors for the startup gate.
//!
//! A descriptor names one cluster resource (`namespace/kind/name`) that has to
//! exist, and for some kinds become ready, before a workload may start.

mod descriptor;
mod kind;

pub use descriptor::{parse, Dependency};
pub use kind::ResourceKind;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("malformed dependency '{group}': {reason}")]
    MalformedGroup { group: String, reason: &'static str },

    #[error("unsupported resource kind '{0}'")]
    UnsupportedKind(String),
}
