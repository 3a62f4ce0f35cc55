use super::{machine_provider_spec, machine_set, master_machine_name, CloudProvider, Error};
use crate::{
    clusterinfo::{OpenShift, USER_DATA_SECRET_NAME},
    settings::ProviderSettings,
};
use k8s_openapi::api::core::v1::SecretReference;
use openshift_api::machine::{
    aws::{
        AWSMachineProviderConfig, AWSResourceReference, BlockDeviceMappingSpec,
        EBSBlockDeviceSpec, Placement, TagSpecification, KIND,
    },
    MachineSet, ProviderSpec, API_VERSION,
};

const DEFAULT_CREDENTIALS_SECRET_NAME: &str = "aws-cloud-credentials";
const DEFAULT_INSTANCE_TYPE: &str = "m5a.large";
const DEFAULT_ROOT_VOLUME_SIZE_GB: i64 = 120;
const DEFAULT_ROOT_VOLUME_TYPE: &str = "gp2";

const INFRA_ID_TAG_KEY_PREFIX: &str = "kubernetes.io/cluster/";
const INFRA_ID_TAG_VALUE: &str = "owned";

const MACHINE_SET_NAME: &str = "e2e-wmco-machineset";

pub struct Provider {
    openshift: OpenShift,
    region: String,
    image_id: String,
    instance_type: String,
    ssh_key_pair: String,
}

impl Provider {
    pub fn new(
        openshift: OpenShift,
        region: String,
        settings: &ProviderSettings,
    ) -> Result<Self, Error> {
        let ssh_key_pair = settings
            .ssh_key_pair
            .clone()
            .ok_or(Error::MissingSshKeyPair)?;

        // The hybrid overlay only works on a custom VXLAN port with images
        // that support it.
        let image_id = if settings.has_custom_vxlan_port {
            settings
                .aws_custom_vxlan_ami_id
                .clone()
                .ok_or(Error::MissingCustomVxlanAmi)?
        } else {
            settings.aws_ami_id.clone().ok_or(Error::MissingAmi)?
        };

        Ok(Self {
            openshift,
            region,
            image_id,
            instance_type: settings
                .aws_instance_type
                .clone()
                .unwrap_or_else(|| DEFAULT_INSTANCE_TYPE.to_owned()),
            ssh_key_pair,
        })
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    fn provider_config(&self, cluster_id: &str, availability_zone: &str) -> AWSMachineProviderConfig {
        AWSMachineProviderConfig {
            api_version: Some(API_VERSION.to_owned()),
            kind: Some(KIND.to_owned()),
            ami: AWSResourceReference::by_id(&self.image_id),
            instance_type: self.instance_type.clone(),
            tags: vec![TagSpecification {
                name: format!("{}{}", INFRA_ID_TAG_KEY_PREFIX, cluster_id),
                value: INFRA_ID_TAG_VALUE.to_owned(),
            }],
            iam_instance_profile: Some(AWSResourceReference::by_id(format!(
                "{}-worker-profile",
                cluster_id
            ))),
            user_data_secret: Some(SecretReference {
                name: Some(USER_DATA_SECRET_NAME.to_owned()),
                ..Default::default()
            }),
            credentials_secret: Some(SecretReference {
                name: Some(DEFAULT_CREDENTIALS_SECRET_NAME.to_owned()),
                ..Default::default()
            }),
            key_name: Some(self.ssh_key_pair.clone()),
            device_index: 0,
            public_ip: Some(false),
            security_groups: vec![AWSResourceReference::by_tag_name(format!(
                "{}-worker-sg",
                cluster_id
            ))],
            subnet: AWSResourceReference::by_tag_name(format!(
                "{}-private-{}",
                cluster_id, availability_zone
            )),
            placement: Placement {
                region: self.region.clone(),
                availability_zone: availability_zone.to_owned(),
            },
            block_devices: vec![BlockDeviceMappingSpec {
                ebs: Some(EBSBlockDeviceSpec {
                    encrypted: Some(true),
                    volume_size: Some(DEFAULT_ROOT_VOLUME_SIZE_GB),
                    volume_type: Some(DEFAULT_ROOT_VOLUME_TYPE.to_owned()),
                }),
                ..Default::default()
            }],
        }
    }

    /// Availability zone of master-0, or the first zone of the region when
    /// the master does not state one.
    async fn availability_zone(&self, cluster_id: &str) -> Result<String, Error> {
        let master_name = master_machine_name(cluster_id);
        let master = self
            .openshift
            .machine(&master_name)
            .await
            .map_err(|e| Error::GetMachine(master_name, e))?;
        let master_config: AWSMachineProviderConfig = machine_provider_spec(master)?;

        if master_config.placement.availability_zone.is_empty() {
            log::warn!("master-0 has no availability zone, defaulting to {}a", self.region);
            return Ok(format!("{}a", self.region));
        }

        Ok(master_config.placement.availability_zone)
    }
}

impl CloudProvider for Provider {
    async fn generate_machine_set(
        &self,
        with_windows_label: bool,
        replicas: i32,
    ) -> Result<MachineSet, Error> {
        let cluster_id = self.openshift.cluster_id().await.map_err(Error::ClusterId)?;
        if cluster_id.is_empty() {
            return Err(Error::EmptyClusterId);
        }
        let availability_zone = self.availability_zone(&cluster_id).await?;

        log::info!(
            "generating AWS machine set in {} for cluster {} with image {}",
            availability_zone,
            cluster_id,
            self.image_id
        );

        let provider_config = self.provider_config(&cluster_id, &availability_zone);

        Ok(machine_set::build(
            MACHINE_SET_NAME,
            &cluster_id,
            ProviderSpec::from_value(&provider_config)?,
            with_windows_label,
            replicas,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clusterinfo::{fixtures::*, MACHINE_SET_LABEL},
        test_utils::{mock_client, ApiServerVerifier},
    };
    use http::Method;
    use openshift_api::machine::MACHINE_CLUSTER_ID_LABEL;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::{json, Value};

    fn settings() -> ProviderSettings {
        ProviderSettings::builder()
            .ssh_key_pair("openshift-dev")
            .aws_ami_id("ami-0a1b2c3d4e5f")
            .aws_custom_vxlan_ami_id("ami-0f9e8d7c6b5a")
            .build()
    }

    fn provider(client: kube::Client, settings: &ProviderSettings) -> Provider {
        Provider::new(OpenShift::from_client(client), "us-east-2".into(), settings).unwrap()
    }

    async fn generate(master_spec: Value, with_windows_label: bool) -> MachineSet {
        let (client, handle) = mock_client();
        let server = tokio::spawn(async move {
            let mut verifier = ApiServerVerifier::new(handle);
            verifier
                .expect(Method::GET, INFRASTRUCTURE_PATH, (200, aws_infrastructure()))
                .await;
            verifier
                .expect(
                    Method::GET,
                    &machine_path("ci-ln-aws-q9m4r-master-0"),
                    (200, machine("ci-ln-aws-q9m4r-master-0", master_spec)),
                )
                .await;
        });

        let machine_set = provider(client, &settings())
            .generate_machine_set(with_windows_label, 1)
            .await
            .unwrap();
        server.await.unwrap();

        machine_set
    }

    #[rstest]
    #[case(false, "ami-0a1b2c3d4e5f")]
    #[case(true, "ami-0f9e8d7c6b5a")]
    #[tokio::test]
    async fn test_image_selection(#[case] has_custom_vxlan_port: bool, #[case] expected: &str) {
        let (client, _handle) = mock_client();
        let mut settings = settings();
        settings.has_custom_vxlan_port = has_custom_vxlan_port;

        assert_eq!(provider(client, &settings).image_id, expected);
    }

    #[tokio::test]
    async fn test_missing_ssh_key_pair() {
        let (client, _handle) = mock_client();
        let settings = ProviderSettings::builder().aws_ami_id("ami-0a1b2c3d4e5f").build();

        let result = Provider::new(OpenShift::from_client(client), "us-east-2".into(), &settings);

        assert!(matches!(result, Err(Error::MissingSshKeyPair)));
    }

    #[tokio::test]
    async fn test_missing_ami() {
        let (client, _handle) = mock_client();
        let settings = ProviderSettings::builder().ssh_key_pair("openshift-dev").build();

        let result = Provider::new(OpenShift::from_client(client), "us-east-2".into(), &settings);

        assert!(matches!(result, Err(Error::MissingAmi)));
    }

    #[tokio::test]
    async fn test_missing_custom_vxlan_ami() {
        let (client, _handle) = mock_client();
        let settings = ProviderSettings::builder()
            .ssh_key_pair("openshift-dev")
            .aws_ami_id("ami-0a1b2c3d4e5f")
            .has_custom_vxlan_port(true)
            .build();

        let result = Provider::new(OpenShift::from_client(client), "us-east-2".into(), &settings);

        assert!(matches!(result, Err(Error::MissingCustomVxlanAmi)));
    }

    #[tokio::test]
    async fn test_generate_machine_set() {
        let machine_set = generate(
            json!({
                "apiVersion": "machine.openshift.io/v1beta1",
                "kind": "AWSMachineProviderConfig",
                "placement": { "availabilityZone": "us-east-2b", "region": "us-east-2" }
            }),
            false,
        )
        .await;

        assert_eq!(
            machine_set.spec.selector.match_labels,
            Some(maplit::btreemap! {
                MACHINE_CLUSTER_ID_LABEL.to_owned() => "ci-ln-aws-q9m4r".to_owned(),
                MACHINE_SET_LABEL.to_owned() => "e2e-wmco-machineset".to_owned(),
            })
        );

        let config: AWSMachineProviderConfig =
            serde_json::from_value(machine_set.spec.template.spec.provider_spec.value.unwrap())
                .unwrap();

        assert_eq!(
            config,
            AWSMachineProviderConfig {
                api_version: Some("machine.openshift.io/v1beta1".into()),
                kind: Some("AWSMachineProviderConfig".into()),
                ami: AWSResourceReference::by_id("ami-0a1b2c3d4e5f"),
                instance_type: "m5a.large".into(),
                tags: vec![TagSpecification {
                    name: "kubernetes.io/cluster/ci-ln-aws-q9m4r".into(),
                    value: "owned".into(),
                }],
                iam_instance_profile: Some(AWSResourceReference::by_id(
                    "ci-ln-aws-q9m4r-worker-profile"
                )),
                user_data_secret: Some(SecretReference {
                    name: Some("windows-user-data".into()),
                    namespace: None,
                }),
                credentials_secret: Some(SecretReference {
                    name: Some("aws-cloud-credentials".into()),
                    namespace: None,
                }),
                key_name: Some("openshift-dev".into()),
                device_index: 0,
                public_ip: Some(false),
                security_groups: vec![AWSResourceReference::by_tag_name(
                    "ci-ln-aws-q9m4r-worker-sg"
                )],
                subnet: AWSResourceReference::by_tag_name("ci-ln-aws-q9m4r-private-us-east-2b"),
                placement: Placement {
                    region: "us-east-2".into(),
                    availability_zone: "us-east-2b".into(),
                },
                block_devices: vec![BlockDeviceMappingSpec {
                    device_name: None,
                    ebs: Some(EBSBlockDeviceSpec {
                        encrypted: Some(true),
                        volume_size: Some(120),
                        volume_type: Some("gp2".into()),
                    }),
                }],
            }
        );
    }

    #[tokio::test]
    async fn test_generate_machine_set_defaults_zone() {
        let machine_set = generate(json!({ "instanceType": "m6i.xlarge" }), true).await;

        assert!(machine_set
            .metadata
            .name
            .unwrap()
            .starts_with("e2e-wmco-machineset-with-windows-label"));

        let config: AWSMachineProviderConfig =
            serde_json::from_value(machine_set.spec.template.spec.provider_spec.value.unwrap())
                .unwrap();
        assert_eq!(config.placement.availability_zone, "us-east-2a");
        assert_eq!(
            config.subnet,
            AWSResourceReference::by_tag_name("ci-ln-aws-q9m4r-private-us-east-2a")
        );
    }
}
