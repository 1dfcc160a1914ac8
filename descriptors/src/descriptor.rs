use crate::{ParseError, ResourceKind};
use std::fmt;

/// One `namespace/kind/name` entry of the dependency list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    namespace: String,
    kind: ResourceKind,
    name: String,
}

impl Dependency {
    pub fn new(namespace: impl Into<String>, kind: ResourceKind, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            kind,
            name: name.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.namespace, self.kind, self.name)
    }
}

/// Parses a comma separated list of `namespace/kind/name` groups.
///
/// Whitespace around groups and tokens is ignored and input order is kept.
/// Every group, including an empty or blank input, must name all three parts.
pub fn parse(input: &str) -> Result<Vec<Dependency>, ParseError> {
    input.split(',').map(parse_group).collect()
}

fn parse_group(raw: &str) -> Result<Dependency, ParseError> {
    let group = raw.trim();
    let malformed = |reason| ParseError::MalformedGroup {
        group: group.to_string(),
        reason,
    };

    let tokens: Vec<&str> = group.split('/').map(str::trim).collect();
    let [namespace, kind, name] = tokens[..] else {
        return Err(malformed("expected namespace/kind/name"));
    };
    if namespace.is_empty() || kind.is_empty() || name.is_empty() {
        return Err(malformed("namespace, kind and name must not be empty"));
    }

    Ok(Dependency::new(namespace, kind.parse()?, name))
}
