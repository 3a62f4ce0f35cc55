use kube::{Client, Config};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to load KUBECONFIG: {0}")]
    Infer(#[from] kube::config::InferConfigError),

    #[error("failed to create client: {0}")]
    Client(#[from] kube::Error),
}

/// Creates a client for the current cluster, using `KUBECONFIG` when it is
/// set and the in-cluster service account otherwise.
pub async fn new() -> Result<Client, Error> {
    let config = Config::infer().await?;
    log::debug!("using cluster {} as {}", config.cluster_url, config.default_namespace);

    Client::try_from(config).map_err(Error::Client)
}
