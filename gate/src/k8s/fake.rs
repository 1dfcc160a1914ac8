//! Scripted in-memory cluster for driving the poller in tests.

use crate::error::Error;
use crate::k8s::{ReplicaCounts, ResourceClient, ResourceSummary};
use async_trait::async_trait;
use descriptors::ResourceKind;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// A scripted reply; `None` stands for a failed API call.
pub type Reply<T> = Option<T>;

/// Replies are handed out in order and the last one repeats forever.
#[derive(Default)]
pub struct FakeClient {
    lists: Mutex<HashMap<(ResourceKind, String), VecDeque<Reply<Vec<ResourceSummary>>>>>,
    gets: Mutex<HashMap<(ResourceKind, String, String), VecDeque<Reply<ResourceSummary>>>>,
    calls: Mutex<Vec<String>>,
}

impl FakeClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_list(
        self,
        kind: ResourceKind,
        namespace: &str,
        replies: Vec<Reply<Vec<ResourceSummary>>>,
    ) -> Self {
        self.lists
            .lock()
            .unwrap()
            .insert((kind, namespace.to_string()), replies.into());
        self
    }

    pub fn on_get(
        self,
        kind: ResourceKind,
        namespace: &str,
        name: &str,
        replies: Vec<Reply<ResourceSummary>>,
    ) -> Self {
        self.gets.lock().unwrap().insert(
            (kind, namespace.to_string(), name.to_string()),
            replies.into(),
        );
        self
    }

    /// Calls made so far, as `list kind namespace` or `get kind namespace/name`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

pub fn listing(names: &[&str]) -> Vec<ResourceSummary> {
    names
        .iter()
        .map(|name| ResourceSummary {
            name: name.to_string(),
            counts: None,
        })
        .collect()
}

pub fn workload(name: &str, desired: i32, ready: i32) -> ResourceSummary {
    ResourceSummary {
        name: name.to_string(),
        counts: Some(ReplicaCounts { desired, ready }),
    }
}

pub fn api_error() -> kube::Error {
    kube::Error::Api(kube::error::ErrorResponse {
        status: "Failure".to_string(),
        message: "etcdserver: request timed out".to_string(),
        reason: "InternalError".to_string(),
        code: 500,
    })
}

fn next<K, T>(replies: &mut HashMap<K, VecDeque<Reply<T>>>, key: &K) -> Reply<T>
where
    K: std::hash::Hash + Eq,
    T: Clone,
{
    let queue = replies.get_mut(key)?;
    if queue.len() > 1 {
        queue.pop_front().flatten()
    } else {
        queue.front().cloned().flatten()
    }
}

#[async_trait]
impl ResourceClient for FakeClient {
    async fn list(
        &self,
        kind: ResourceKind,
        namespace: &str,
    ) -> Result<Vec<ResourceSummary>, Error> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("list {} {}", kind, namespace));
        let mut lists = self.lists.lock().unwrap();
        next(&mut lists, &(kind, namespace.to_string()))
            .ok_or_else(|| Error::remote("list", kind, namespace, api_error()))
    }

    async fn get(
        &self,
        kind: ResourceKind,
        namespace: &str,
        name: &str,
    ) -> Result<ResourceSummary, Error> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("get {} {}/{}", kind, namespace, name));
        let mut gets = self.gets.lock().unwrap();
        next(&mut gets, &(kind, namespace.to_string(), name.to_string()))
            .ok_or_else(|| Error::remote("get", kind, format!("{}/{}", namespace, name), api_error()))
    }
}
