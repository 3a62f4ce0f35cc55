pub mod aws;
pub mod azure;
pub mod machine_set;

use crate::{clusterinfo, clusterinfo::OpenShift, settings::ProviderSettings};
use openshift_api::{
    config::PlatformType,
    machine::{Machine, MachineSet},
};
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("creating OpenShift client failed: {0}")]
    CreateClient(#[source] clusterinfo::Error),

    #[error("getting cloud provider type: {0}")]
    PlatformType(#[source] clusterinfo::Error),

    #[error("the '{0}' platform type is not supported")]
    UnsupportedPlatform(PlatformType),

    #[error("unable to get cluster id: {0}")]
    ClusterId(#[source] clusterinfo::Error),

    #[error("unable to get {0} platform status: {1}")]
    PlatformStatus(PlatformType, #[source] clusterinfo::Error),

    #[error("platform status is nil")]
    MissingPlatformStatus,

    #[error("aws platform status is nil")]
    MissingAwsPlatformStatus,

    #[error("azure platform status is nil")]
    MissingAzurePlatformStatus,

    #[error("azure network resource group name is empty")]
    EmptyNetworkResourceGroup,

    #[error("clusterID is empty")]
    EmptyClusterId,

    #[error("custom VXLAN port is not supported on current Azure image")]
    CustomVxlanUnsupported,

    #[error("an SSH key pair name is required on AWS")]
    MissingSshKeyPair,

    #[error("no Windows AMI configured")]
    MissingAmi,

    #[error("no Windows AMI configured for clusters with a custom VXLAN port")]
    MissingCustomVxlanAmi,

    #[error("failed to get {0} machine resource: {1}")]
    GetMachine(String, #[source] clusterinfo::Error),

    #[error("machine {0} has no provider spec")]
    MissingProviderSpec(String),

    #[error("machine {0} has no zone set")]
    MissingZone(String),

    #[error("failed to unmarshal {0} machine provider spec: {1}")]
    DecodeProviderSpec(String, #[source] serde_json::Error),

    #[error("failed to marshal machine provider spec: {0}")]
    EncodeProviderSpec(#[from] serde_json::Error),
}

/// A cloud the test Windows nodes can be provisioned on.
pub trait CloudProvider {
    /// Generates a machine set for Windows workers, optionally labelled with
    /// the Windows OS ID so that the operator picks the machines up.
    async fn generate_machine_set(
        &self,
        with_windows_label: bool,
        replicas: i32,
    ) -> Result<MachineSet, Error>;
}

pub enum Provider {
    AWS(aws::Provider),
    Azure(azure::Provider),
}

impl CloudProvider for Provider {
    async fn generate_machine_set(
        &self,
        with_windows_label: bool,
        replicas: i32,
    ) -> Result<MachineSet, Error> {
        match self {
            Provider::AWS(provider) => {
                provider
                    .generate_machine_set(with_windows_label, replicas)
                    .await
            }
            Provider::Azure(provider) => {
                provider
                    .generate_machine_set(with_windows_label, replicas)
                    .await
            }
        }
    }
}

/// Returns the provider for the platform the current cluster runs on.
pub async fn new_cloud_provider(settings: &ProviderSettings) -> Result<Provider, Error> {
    let openshift = OpenShift::new().await.map_err(Error::CreateClient)?;

    cloud_provider_for(openshift, settings).await
}

/// Same as [`new_cloud_provider`] for an already connected cluster.
pub async fn cloud_provider_for(
    openshift: OpenShift,
    settings: &ProviderSettings,
) -> Result<Provider, Error> {
    let platform_status = openshift
        .platform_status()
        .await
        .map_err(Error::PlatformType)?;

    log::info!("cluster is running on {}", platform_status.type_);

    match platform_status.type_ {
        PlatformType::AWS => {
            let region = platform_status
                .aws
                .ok_or(Error::MissingAwsPlatformStatus)?
                .region;

            // The test nodes are set up in the same region as the cluster.
            Ok(Provider::AWS(aws::Provider::new(openshift, region, settings)?))
        }
        PlatformType::Azure => Ok(Provider::Azure(azure::Provider::new(openshift, settings)?)),
        other => Err(Error::UnsupportedPlatform(other)),
    }
}

/// Name of the first control plane machine, which is used as the reference
/// for where new instances are placed.
pub(crate) fn master_machine_name(cluster_id: &str) -> String {
    format!("{}-master-0", cluster_id)
}

/// Decodes the provider spec embedded in a machine.
pub(crate) fn machine_provider_spec<T: DeserializeOwned>(machine: Machine) -> Result<T, Error> {
    let name = machine.metadata.name.unwrap_or_default();
    let value = machine
        .spec
        .provider_spec
        .value
        .ok_or_else(|| Error::MissingProviderSpec(name.clone()))?;

    serde_json::from_value(value).map_err(|e| Error::DecodeProviderSpec(name, e))
}
