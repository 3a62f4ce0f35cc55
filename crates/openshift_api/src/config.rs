use kube::CustomResource;
use schemars::{gen::SchemaGenerator, schema::Schema, JsonSchema};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the singleton `Infrastructure` object describing the cluster.
pub const INFRASTRUCTURE_NAME: &str = "cluster";

#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "config.openshift.io",
    version = "v1",
    kind = "Infrastructure",
    plural = "infrastructures",
    status = "InfrastructureStatus",
    derive = "Default",
    derive = "PartialEq"
)]
#[serde(rename_all = "camelCase")]
pub struct InfrastructureSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_spec: Option<serde_json::Value>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InfrastructureStatus {
    /// Uniquely identifies the cluster and is used to name and tag the
    /// cloud resources it owns.
    #[serde(default)]
    pub infrastructure_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_status: Option<PlatformStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none", rename = "apiServerURL")]
    pub api_server_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_plane_topology: Option<String>,
}

impl InfrastructureStatus {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStatus {
    #[serde(rename = "type")]
    pub type_: PlatformType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws: Option<AWSPlatformStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure: Option<AzurePlatformStatus>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AWSPlatformStatus {
    #[serde(default)]
    pub region: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AzurePlatformStatus {
    #[serde(default)]
    pub resource_group_name: String,

    #[serde(default)]
    pub network_resource_group_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_name: Option<String>,
}

impl AzurePlatformStatus {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// The underlying infrastructure provider of the cluster.
///
/// Platforms that are not listed here are kept verbatim in
/// [`PlatformType::Other`] so that they can still be reported.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum PlatformType {
    AWS,
    Azure,
    BareMetal,
    GCP,
    IBMCloud,
    Nutanix,
    OpenStack,
    VSphere,
    #[default]
    None,
    Other(String),
}

impl PlatformType {
    pub fn as_str(&self) -> &str {
        match self {
            PlatformType::AWS => "AWS",
            PlatformType::Azure => "Azure",
            PlatformType::BareMetal => "BareMetal",
            PlatformType::GCP => "GCP",
            PlatformType::IBMCloud => "IBMCloud",
            PlatformType::Nutanix => "Nutanix",
            PlatformType::OpenStack => "OpenStack",
            PlatformType::VSphere => "VSphere",
            PlatformType::None => "None",
            PlatformType::Other(name) => name,
        }
    }
}

impl From<String> for PlatformType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "AWS" => PlatformType::AWS,
            "Azure" => PlatformType::Azure,
            "BareMetal" => PlatformType::BareMetal,
            "GCP" => PlatformType::GCP,
            "IBMCloud" => PlatformType::IBMCloud,
            "Nutanix" => PlatformType::Nutanix,
            "OpenStack" => PlatformType::OpenStack,
            "VSphere" => PlatformType::VSphere,
            "None" => PlatformType::None,
            _ => PlatformType::Other(value),
        }
    }
}

impl From<PlatformType> for String {
    fn from(value: PlatformType) -> Self {
        value.as_str().to_owned()
    }
}

impl fmt::Display for PlatformType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl JsonSchema for PlatformType {
    fn schema_name() -> String {
        "PlatformType".to_owned()
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        String::json_schema(gen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("AWS", PlatformType::AWS)]
    #[case("Azure", PlatformType::Azure)]
    #[case("VSphere", PlatformType::VSphere)]
    #[case("None", PlatformType::None)]
    #[case("PowerVS", PlatformType::Other("PowerVS".into()))]
    fn test_platform_type_from_wire_name(#[case] name: &str, #[case] expected: PlatformType) {
        let platform: PlatformType = serde_json::from_value(json!(name)).unwrap();

        assert_eq!(platform, expected);
        assert_eq!(platform.to_string(), name);
    }

    #[test]
    fn test_infrastructure_status_from_api_response() {
        let infra: Infrastructure = serde_json::from_value(json!({
            "apiVersion": "config.openshift.io/v1",
            "kind": "Infrastructure",
            "metadata": { "name": "cluster" },
            "spec": { "platformSpec": { "type": "Azure" } },
            "status": {
                "infrastructureName": "ci-ln-abc12-xyz",
                "apiServerURL": "https://api.example.com:6443",
                "platform": "Azure",
                "platformStatus": {
                    "type": "Azure",
                    "azure": {
                        "resourceGroupName": "ci-ln-abc12-xyz-rg",
                        "networkResourceGroupName": "ci-ln-abc12-xyz-rg",
                        "cloudName": "AzurePublicCloud"
                    }
                }
            }
        }))
        .unwrap();

        let status = infra.status.unwrap();
        assert_eq!(status.infrastructure_name, "ci-ln-abc12-xyz");

        let platform_status = status.platform_status.unwrap();
        assert_eq!(platform_status.type_, PlatformType::Azure);
        assert_eq!(
            platform_status.azure.unwrap().network_resource_group_name,
            "ci-ln-abc12-xyz-rg"
        );
    }

    #[test]
    fn test_empty_status() {
        assert!(InfrastructureStatus::default().is_empty());
        assert!(!InfrastructureStatus {
            infrastructure_name: "cluster-abc".into(),
            ..Default::default()
        }
        .is_empty());
    }
}
