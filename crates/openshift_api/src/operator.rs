use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Name of the singleton operator `Network` object.
pub const NETWORK_NAME: &str = "cluster";

/// Cluster network configuration as managed by the cluster network operator.
#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "operator.openshift.io",
    version = "v1",
    kind = "Network",
    plural = "networks",
    derive = "Default",
    derive = "PartialEq"
)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSpec {
    #[serde(default)]
    pub default_network: DefaultNetworkDefinition,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DefaultNetworkDefinition {
    #[serde(default, rename = "type")]
    pub type_: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ovn_kubernetes_config: Option<OVNKubernetesConfig>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OVNKubernetesConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtu: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hybrid_overlay_config: Option<HybridOverlayConfig>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HybridOverlayConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hybrid_cluster_network: Vec<ClusterNetworkEntry>,

    #[serde(default, skip_serializing_if = "Option::is_none", rename = "hybridOverlayVXLANPort")]
    pub hybrid_overlay_vxlan_port: Option<u32>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterNetworkEntry {
    pub cidr: String,

    #[serde(default)]
    pub host_prefix: u32,
}

impl Network {
    /// Returns the VXLAN port configured for the hybrid overlay, if any.
    pub fn hybrid_overlay_vxlan_port(&self) -> Option<u32> {
        self.spec
            .default_network
            .ovn_kubernetes_config
            .as_ref()
            .and_then(|config| config.hybrid_overlay_config.as_ref())
            .and_then(|config| config.hybrid_overlay_vxlan_port)
    }
}
