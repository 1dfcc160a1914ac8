use crate::k8s::ResourceSummary;
use descriptors::ResourceKind;

/// Decides from a namespace listing whether the named object is present.
pub type ExistsCheck = fn(&[ResourceSummary], &str) -> bool;

/// Decides from a fetched object whether it is operationally ready.
pub type ReadyCheck = fn(&ResourceSummary) -> bool;

#[derive(Copy, Clone)]
pub struct Predicates {
    pub exists: ExistsCheck,
    /// `None` when existence alone satisfies the kind.
    pub ready: Option<ReadyCheck>,
}

const WORKLOAD: Predicates = Predicates {
    exists: listed,
    ready: Some(counts_converged),
};

const PRESENCE: Predicates = Predicates {
    exists: listed,
    ready: None,
};

/// Supporting another kind only needs an entry here.
pub fn predicates(kind: ResourceKind) -> Predicates {
    match kind {
        ResourceKind::Deployment => WORKLOAD,
        ResourceKind::DaemonSet => WORKLOAD,
        ResourceKind::StatefulSet => WORKLOAD,
        ResourceKind::Service => PRESENCE,
        ResourceKind::ConfigMap => PRESENCE,
        ResourceKind::Secret => PRESENCE,
        ResourceKind::Job => PRESENCE,
        ResourceKind::ServiceAccount => PRESENCE,
    }
}

pub fn listed(listing: &[ResourceSummary], name: &str) -> bool {
    listing.iter().any(|resource| resource.name == name)
}

/// Ready only once desired and ready counts are equal. A scale-down still in
/// progress is not ready, and neither is an object without a status yet.
pub fn counts_converged(resource: &ResourceSummary) -> bool {
    matches!(resource.counts, Some(counts) if counts.desired == counts.ready)
}
