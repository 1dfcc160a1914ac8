use crate::error::Error;
use crate::k8s::ResourceClient;
use crate::wait::{self, PollSettings};
use descriptors::Dependency;
use log::info;
use std::io::Write;

/// Waits on every dependency in order, writing one status line to `out` as
/// each is satisfied. The first error stops the run; later dependencies are
/// never polled.
pub async fn run<W: Write>(
    client: &dyn ResourceClient,
    dependencies: &[Dependency],
    settings: &PollSettings,
    out: &mut W,
) -> Result<(), Error> {
    let total = dependencies.len();
    info!("Waiting on {} dependencies", total);

    for (index, dependency) in dependencies.iter().enumerate() {
        info!("[{}/{}] Waiting for {}", index + 1, total, dependency);
        let satisfied = wait::wait_for(client, dependency, settings).await?;
        info!("[{}/{}] {} satisfied", index + 1, total, dependency);

        writeln!(out, "{}", satisfied.status_line(dependency.kind()))?;
        out.flush()?;
    }

    info!("All dependencies satisfied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::k8s::fake::{listing, workload, FakeClient};
    use descriptors::ResourceKind;

    async fn run_to_string(
        client: &FakeClient,
        dependencies: &[Dependency],
    ) -> (Result<(), Error>, String) {
        let mut out = Vec::new();
        let result = run(client, dependencies, &PollSettings::default(), &mut out).await;
        (result, String::from_utf8(out).unwrap())
    }

    #[tokio::test(start_paused = true)]
    async fn later_dependency_waits_for_earlier_one() {
        let client = FakeClient::new()
            .on_list(
                ResourceKind::ConfigMap,
                "a",
                vec![Some(listing(&[])), Some(listing(&[])), Some(listing(&["first"]))],
            )
            .on_list(ResourceKind::Secret, "b", vec![Some(listing(&["second"]))]);
        let dependencies = descriptors::parse("a/configmap/first, b/secret/second").unwrap();

        let (result, out) = run_to_string(&client, &dependencies).await;

        result.unwrap();
        assert_eq!(
            client.calls(),
            vec![
                "list configmap a",
                "list configmap a",
                "list configmap a",
                "list secret b"
            ]
        );
        assert_eq!(out, "ConfigMap exists\nSecret exists\n");
    }

    #[tokio::test(start_paused = true)]
    async fn status_bearing_kind_reports_ready() {
        let client = FakeClient::new()
            .on_list(ResourceKind::Deployment, "web", vec![Some(listing(&["api"]))])
            .on_get(ResourceKind::Deployment, "web", "api", vec![Some(workload("api", 2, 2))])
            .on_list(ResourceKind::Service, "web", vec![Some(listing(&["api"]))]);
        let dependencies = descriptors::parse("web/deployment/api,web/service/api").unwrap();

        let (result, out) = run_to_string(&client, &dependencies).await;

        result.unwrap();
        assert_eq!(out, "Deployment is ready\nService exists\n");
    }

    #[tokio::test(start_paused = true)]
    async fn remote_failure_stops_remaining_dependencies() {
        let client = FakeClient::new()
            .on_list(ResourceKind::Secret, "ns", vec![Some(listing(&["one"]))])
            .on_list(ResourceKind::ConfigMap, "ns", vec![None])
            .on_list(ResourceKind::Job, "ns", vec![Some(listing(&["three"]))])
            .on_list(ResourceKind::ServiceAccount, "ns", vec![Some(listing(&["four"]))]);
        let dependencies = descriptors::parse(
            "ns/secret/one,ns/configmap/two,ns/job/three,ns/serviceaccount/four",
        )
        .unwrap();

        let (result, out) = run_to_string(&client, &dependencies).await;

        assert!(matches!(result, Err(Error::RemoteCall { .. })));
        assert_eq!(client.calls(), vec!["list secret ns", "list configmap ns"]);
        assert_eq!(out, "Secret exists\n");
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_to_wait_on() {
        let client = FakeClient::new();

        let (result, out) = run_to_string(&client, &[]).await;

        result.unwrap();
        assert!(client.calls().is_empty());
        assert!(out.is_empty());
    }
}
