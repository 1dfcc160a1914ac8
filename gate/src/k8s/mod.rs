use crate::error::Error;
use async_trait::async_trait;
use descriptors::ResourceKind;
use k8s_openapi::api::apps::v1::{DaemonSet, Deployment, StatefulSet};
use k8s_openapi::api::batch::v1::Job;
use k8s_openapi::api::core::v1::{ConfigMap, Secret, Service, ServiceAccount};
use k8s_openapi::NamespaceResourceScope;
use kube::api::ListParams;
use kube::{Api, Resource, ResourceExt};
use log::trace;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

pub mod credentials;
#[cfg(test)]
pub mod fake;

pub trait Object:
    Resource<Scope = NamespaceResourceScope> + Clone + DeserializeOwned + Debug + Send + Sync + 'static
{
}

impl<T> Object for T where
    T: Resource<Scope = NamespaceResourceScope>
        + Clone
        + DeserializeOwned
        + Debug
        + Send
        + Sync
        + 'static
{
}

/// Desired and ready replica counts of a workload controller.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ReplicaCounts {
    pub desired: i32,
    pub ready: i32,
}

/// The parts of a listed or fetched object the gate looks at.
///
/// `counts` is only ever set for status-bearing kinds, and stays `None` until
/// the controller has published a status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSummary {
    pub name: String,
    pub counts: Option<ReplicaCounts>,
}

/// Read-only access to the cluster, one pair of calls per resource kind.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    async fn list(&self, kind: ResourceKind, namespace: &str)
        -> Result<Vec<ResourceSummary>, Error>;

    async fn get(
        &self,
        kind: ResourceKind,
        namespace: &str,
        name: &str,
    ) -> Result<ResourceSummary, Error>;
}

pub struct KubeClient {
    client: kube::Client,
}

impl KubeClient {
    pub fn new(client: kube::Client) -> Self {
        Self { client }
    }

    async fn list_as<K: Object>(
        &self,
        kind: ResourceKind,
        namespace: &str,
        counts: fn(&K) -> Option<ReplicaCounts>,
    ) -> Result<Vec<ResourceSummary>, Error>
    where
        <K as Resource>::DynamicType: Default,
    {
        let api: Api<K> = Api::namespaced(self.client.clone(), namespace);
        let list = api
            .list(&ListParams::default())
            .await
            .map_err(|e| Error::remote("list", kind, format!("in namespace '{}'", namespace), e))?;
        trace!("Listed {} {} objects in {}", list.items.len(), kind, namespace);
        Ok(list.items.iter().map(|obj| summarize(obj, counts)).collect())
    }

    async fn get_as<K: Object>(
        &self,
        kind: ResourceKind,
        namespace: &str,
        name: &str,
        counts: fn(&K) -> Option<ReplicaCounts>,
    ) -> Result<ResourceSummary, Error>
    where
        <K as Resource>::DynamicType: Default,
    {
        let api: Api<K> = Api::namespaced(self.client.clone(), namespace);
        let obj = api
            .get(name)
            .await
            .map_err(|e| Error::remote("get", kind, format!("'{}/{}'", namespace, name), e))?;
        Ok(summarize(&obj, counts))
    }
}

#[async_trait]
impl ResourceClient for KubeClient {
    async fn list(
        &self,
        kind: ResourceKind,
        namespace: &str,
    ) -> Result<Vec<ResourceSummary>, Error> {
        match kind {
            ResourceKind::Deployment => {
                self.list_as::<Deployment>(kind, namespace, deployment_counts)
                    .await
            }
            ResourceKind::DaemonSet => {
                self.list_as::<DaemonSet>(kind, namespace, daemon_set_counts)
                    .await
            }
            ResourceKind::StatefulSet => {
                self.list_as::<StatefulSet>(kind, namespace, stateful_set_counts)
                    .await
            }
            ResourceKind::Service => self.list_as::<Service>(kind, namespace, no_counts).await,
            ResourceKind::ConfigMap => self.list_as::<ConfigMap>(kind, namespace, no_counts).await,
            ResourceKind::Secret => self.list_as::<Secret>(kind, namespace, no_counts).await,
            ResourceKind::Job => self.list_as::<Job>(kind, namespace, no_counts).await,
            ResourceKind::ServiceAccount => {
                self.list_as::<ServiceAccount>(kind, namespace, no_counts)
                    .await
            }
        }
    }

    async fn get(
        &self,
        kind: ResourceKind,
        namespace: &str,
        name: &str,
    ) -> Result<ResourceSummary, Error> {
        match kind {
            ResourceKind::Deployment => {
                self.get_as::<Deployment>(kind, namespace, name, deployment_counts)
                    .await
            }
            ResourceKind::DaemonSet => {
                self.get_as::<DaemonSet>(kind, namespace, name, daemon_set_counts)
                    .await
            }
            ResourceKind::StatefulSet => {
                self.get_as::<StatefulSet>(kind, namespace, name, stateful_set_counts)
                    .await
            }
            ResourceKind::Service => {
                self.get_as::<Service>(kind, namespace, name, no_counts)
                    .await
            }
            ResourceKind::ConfigMap => {
                self.get_as::<ConfigMap>(kind, namespace, name, no_counts)
                    .await
            }
            ResourceKind::Secret => self.get_as::<Secret>(kind, namespace, name, no_counts).await,
            ResourceKind::Job => self.get_as::<Job>(kind, namespace, name, no_counts).await,
            ResourceKind::ServiceAccount => {
                self.get_as::<ServiceAccount>(kind, namespace, name, no_counts)
                    .await
            }
        }
    }
}

fn summarize<K: Object>(obj: &K, counts: fn(&K) -> Option<ReplicaCounts>) -> ResourceSummary {
    ResourceSummary {
        name: obj.name_any(),
        counts: counts(obj),
    }
}

fn no_counts<K>(_: &K) -> Option<ReplicaCounts> {
    None
}

// An unset spec.replicas means one replica, as defaulted by the API server.
fn deployment_counts(deployment: &Deployment) -> Option<ReplicaCounts> {
    let status = deployment.status.as_ref()?;
    Some(ReplicaCounts {
        desired: deployment
            .spec
            .as_ref()
            .and_then(|spec| spec.replicas)
            .unwrap_or(1),
        ready: status.ready_replicas.unwrap_or(0),
    })
}

fn stateful_set_counts(stateful_set: &StatefulSet) -> Option<ReplicaCounts> {
    let status = stateful_set.status.as_ref()?;
    Some(ReplicaCounts {
        desired: stateful_set
            .spec
            .as_ref()
            .and_then(|spec| spec.replicas)
            .unwrap_or(1),
        ready: status.ready_replicas.unwrap_or(0),
    })
}

fn daemon_set_counts(daemon_set: &DaemonSet) -> Option<ReplicaCounts> {
    daemon_set.status.as_ref().map(|status| ReplicaCounts {
        desired: status.desired_number_scheduled,
        ready: status.number_ready,
    })
}
