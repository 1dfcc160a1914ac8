use crate::error::Error;
use kube::config::{KubeConfigOptions, Kubeconfig};
use log::{debug, info};
use std::path::{Path, PathBuf};

pub const SERVICE_HOST_ENV: &str = "KUBERNETES_SERVICE_HOST";
pub const SERVICE_PORT_ENV: &str = "KUBERNETES_SERVICE_PORT";

/// Where cluster credentials are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// The pod's mounted service account.
    InCluster,
    Kubeconfig(PathBuf),
}

/// Picks the credential source from the process environment.
///
/// Both service variables have to be set for the in-cluster identity to be
/// used. Otherwise the explicit kubeconfig path wins, falling back to
/// `~/.kube/config`.
pub fn detect<F>(env: F, kubeconfig: Option<&Path>) -> Result<Source, Error>
where
    F: Fn(&str) -> Option<String>,
{
    let is_set = |key: &str| env(key).is_some_and(|value| !value.is_empty());
    if is_set(SERVICE_HOST_ENV) && is_set(SERVICE_PORT_ENV) {
        return Ok(Source::InCluster);
    }

    if let Some(path) = kubeconfig {
        return Ok(Source::Kubeconfig(path.to_path_buf()));
    }

    ["HOME", "USERPROFILE"]
        .into_iter()
        .filter_map(|key| env(key).filter(|home| !home.is_empty()))
        .next()
        .map(|home| Source::Kubeconfig(Path::new(&home).join(".kube").join("config")))
        .ok_or_else(|| {
            Error::Config("no home directory to find a kubeconfig in, pass --kubeconfig".into())
        })
}

/// Builds the single client shared by every poll.
pub async fn connect(source: &Source, context: Option<&str>) -> Result<kube::Client, Error> {
    let config = match source {
        Source::InCluster => {
            info!("Using in-cluster service account credentials");
            kube::Config::incluster()
                .map_err(|e| Error::Config(format!("in-cluster configuration: {}", e)))?
        }
        Source::Kubeconfig(path) => {
            info!("Using kubeconfig {}", path.display());
            if !path.is_file() {
                return Err(Error::Config(format!(
                    "kubeconfig {} does not exist",
                    path.display()
                )));
            }
            let kubeconfig = Kubeconfig::read_from(path).map_err(|e| {
                Error::Config(format!("failed to read kubeconfig {}: {}", path.display(), e))
            })?;
            let options = KubeConfigOptions {
                context: context.map(str::to_string),
                ..Default::default()
            };
            kube::Config::from_custom_kubeconfig(kubeconfig, &options)
                .await
                .map_err(|e| Error::Config(format!("failed to load kubeconfig: {}", e)))?
        }
    };

    debug!("Connecting to cluster API at {}", config.cluster_url);
    kube::Client::try_from(config)
        .map_err(|e| Error::Config(format!("failed to create client: {}", e)))
}
