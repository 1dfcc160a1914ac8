use crate::settings;
use descriptors::ResourceKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unable to resolve cluster credentials: {0}")]
    Config(String),

    #[error(transparent)]
    Settings(#[from] settings::config::Error),

    #[error("invalid dependency list: {0}")]
    Parse(#[from] descriptors::ParseError),

    #[error("unable to {operation} {kind} {target}: {source}")]
    RemoteCall {
        operation: &'static str,
        kind: ResourceKind,
        target: String,
        source: kube::Error,
    },

    #[error("gave up waiting for {dependency}: {reason}")]
    GaveUp { dependency: String, reason: String },

    #[error("unable to write status line: {0}")]
    Output(#[from] std::io::Error),
}

impl Error {
    pub fn remote(
        operation: &'static str,
        kind: ResourceKind,
        target: impl Into<String>,
        source: kube::Error,
    ) -> Self {
        Error::RemoteCall {
            operation,
            kind,
            target: target.into(),
            source,
        }
    }
}
