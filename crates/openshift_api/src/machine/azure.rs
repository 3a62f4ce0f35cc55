use k8s_openapi::api::core::v1::SecretReference;
use serde::{Deserialize, Serialize};

pub const KIND: &str = "AzureMachineProviderSpec";

/// Provider spec understood by the Azure machine actuator.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AzureMachineProviderSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_data_secret: Option<SecretReference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials_secret: Option<SecretReference>,

    pub location: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,

    pub vm_size: String,

    pub image: Image,

    #[serde(rename = "osDisk")]
    pub os_disk: OSDisk,

    #[serde(rename = "publicIP")]
    pub public_ip: bool,

    pub subnet: String,

    pub managed_identity: String,

    pub vnet: String,

    pub resource_group: String,

    pub network_resource_group: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Image {
    pub publisher: String,

    pub offer: String,

    pub sku: String,

    pub version: String,

    #[serde(rename = "resourceID")]
    pub resource_id: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct OSDisk {
    pub os_type: String,

    #[serde(rename = "diskSizeGB")]
    pub disk_size_gb: i32,

    pub managed_disk: ManagedDisk,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ManagedDisk {
    pub storage_account_type: String,
}
