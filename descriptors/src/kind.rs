use crate::ParseError;
use std::fmt;
use std::str::FromStr;

/// Every resource kind the gate knows how to wait on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Deployment,
    DaemonSet,
    StatefulSet,
    Service,
    ConfigMap,
    Secret,
    Job,
    ServiceAccount,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 8] = [
        ResourceKind::Deployment,
        ResourceKind::DaemonSet,
        ResourceKind::StatefulSet,
        ResourceKind::Service,
        ResourceKind::ConfigMap,
        ResourceKind::Secret,
        ResourceKind::Job,
        ResourceKind::ServiceAccount,
    ];

    /// Identifier used in descriptor strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Deployment => "deployment",
            ResourceKind::DaemonSet => "daemonset",
            ResourceKind::StatefulSet => "statefulset",
            ResourceKind::Service => "service",
            ResourceKind::ConfigMap => "configmap",
            ResourceKind::Secret => "secret",
            ResourceKind::Job => "job",
            ResourceKind::ServiceAccount => "serviceaccount",
        }
    }

    /// Human readable label, as printed in status lines.
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Deployment => "Deployment",
            ResourceKind::DaemonSet => "DaemonSet",
            ResourceKind::StatefulSet => "StatefulSet",
            ResourceKind::Service => "Service",
            ResourceKind::ConfigMap => "ConfigMap",
            ResourceKind::Secret => "Secret",
            ResourceKind::Job => "Job",
            ResourceKind::ServiceAccount => "ServiceAccount",
        }
    }

    /// Status-bearing kinds report desired and ready replica counts. All other
    /// kinds are satisfied as soon as they exist.
    pub fn is_status_bearing(&self) -> bool {
        matches!(
            self,
            ResourceKind::Deployment | ResourceKind::DaemonSet | ResourceKind::StatefulSet
        )
    }
}

impl FromStr for ResourceKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::UnsupportedKind(s.to_string()))
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
