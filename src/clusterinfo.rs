use kube::{Api, Client};
use openshift_api::{
    config::{Infrastructure, PlatformStatus, INFRASTRUCTURE_NAME},
    machine::Machine,
    operator::{Network, NETWORK_NAME},
};
use thiserror::Error;

/// Namespace the machine API objects live in.
pub const MACHINE_API_NAMESPACE: &str = "openshift-machine-api";

/// Secret holding the user data handed to new Windows instances.
pub const USER_DATA_SECRET_NAME: &str = "windows-user-data";

pub const MACHINE_OS_ID_LABEL: &str = "machine.openshift.io/os-id";
pub const MACHINE_SET_LABEL: &str = "machine.openshift.io/cluster-api-machineset";
pub const MACHINE_ROLE_LABEL: &str = "machine.openshift.io/cluster-api-machine-role";
pub const MACHINE_TYPE_LABEL: &str = "machine.openshift.io/cluster-api-machine-type";

#[derive(Debug, Error)]
pub enum Error {
    #[error("error creating the client: {0}")]
    Client(#[from] crate::kube::Error),

    #[error(transparent)]
    Kubernetes(#[from] kube::Error),

    #[error("infrastructure status is nil")]
    MissingInfrastructureStatus,

    #[error("error getting infrastructure status")]
    MissingPlatformStatus,
}

/// Client used for everything that interacts with the OpenShift cluster
/// under test.
#[derive(Clone)]
pub struct OpenShift {
    client: Client,
}

impl OpenShift {
    /// Creates a client for the current cluster. `KUBECONFIG` is used when it
    /// is set, the in-cluster configuration otherwise.
    pub async fn new() -> Result<Self, Error> {
        let client = crate::kube::new().await?;

        Ok(Self { client })
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Returns the infrastructure identifier of the cluster.
    pub async fn cluster_id(&self) -> Result<String, Error> {
        let status = self
            .infrastructure()
            .await?
            .status
            .filter(|status| !status.is_empty())
            .ok_or(Error::MissingInfrastructureStatus)?;

        if status.infrastructure_name.is_empty() {
            return Err(Error::MissingInfrastructureStatus);
        }

        Ok(status.infrastructure_name)
    }

    /// Returns the status of the platform the cluster is running on.
    pub async fn platform_status(&self) -> Result<PlatformStatus, Error> {
        self.infrastructure()
            .await?
            .status
            .and_then(|status| status.platform_status)
            .ok_or(Error::MissingPlatformStatus)
    }

    /// Tells whether a custom VXLAN port is configured for the hybrid overlay.
    pub async fn has_custom_vxlan_port(&self) -> Result<bool, Error> {
        log::debug!("fetching network {}", NETWORK_NAME);

        let api: Api<Network> = Api::all(self.client.clone());
        let network = api.get(NETWORK_NAME).await?;

        Ok(network.hybrid_overlay_vxlan_port().is_some())
    }

    pub async fn machine(&self, name: &str) -> Result<Machine, Error> {
        log::debug!("fetching machine {}/{}", MACHINE_API_NAMESPACE, name);

        let api: Api<Machine> = Api::namespaced(self.client.clone(), MACHINE_API_NAMESPACE);
        Ok(api.get(name).await?)
    }

    async fn infrastructure(&self) -> Result<Infrastructure, Error> {
        log::debug!("fetching infrastructure {}", INFRASTRUCTURE_NAME);

        let api: Api<Infrastructure> = Api::all(self.client.clone());
        Ok(api.get(INFRASTRUCTURE_NAME).await?)
    }
}
