use k8s_openapi::api::core::v1::SecretReference;
use serde::{Deserialize, Serialize};

pub const KIND: &str = "AWSMachineProviderConfig";

/// Provider spec understood by the AWS machine actuator.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AWSMachineProviderConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    pub ami: AWSResourceReference,

    pub instance_type: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<TagSpecification>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub iam_instance_profile: Option<AWSResourceReference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_data_secret: Option<SecretReference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials_secret: Option<SecretReference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_name: Option<String>,

    pub device_index: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_ip: Option<bool>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub security_groups: Vec<AWSResourceReference>,

    pub subnet: AWSResourceReference,

    pub placement: Placement,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub block_devices: Vec<BlockDeviceMappingSpec>,
}

/// Reference to an AWS resource, either directly by ID/ARN or through a set
/// of filters resolved by the actuator.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AWSResourceReference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<Filter>,
}

impl AWSResourceReference {
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    pub fn by_tag_name(name: impl Into<String>) -> Self {
        Self {
            filters: vec![Filter {
                name: "tag:Name".into(),
                values: vec![name.into()],
            }],
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Filter {
    pub name: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Placement {
    pub region: String,

    pub availability_zone: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TagSpecification {
    pub name: String,

    pub value: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct BlockDeviceMappingSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ebs: Option<EBSBlockDeviceSpec>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct EBSBlockDeviceSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encrypted: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_size: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_type: Option<String>,
}
