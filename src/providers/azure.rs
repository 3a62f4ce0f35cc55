use super::{machine_provider_spec, machine_set, master_machine_name, CloudProvider, Error};
use crate::{
    clusterinfo::{OpenShift, MACHINE_API_NAMESPACE, USER_DATA_SECRET_NAME},
    settings::ProviderSettings,
};
use k8s_openapi::api::core::v1::SecretReference;
use openshift_api::{
    config::{PlatformStatus, PlatformType},
    machine::{
        azure::{AzureMachineProviderSpec, Image, ManagedDisk, OSDisk, KIND},
        MachineSet, ProviderSpec, API_VERSION,
    },
};

const DEFAULT_CREDENTIALS_SECRET_NAME: &str = "azure-cloud-credentials";
const DEFAULT_IMAGE_OFFER: &str = "WindowsServer";
const DEFAULT_IMAGE_PUBLISHER: &str = "MicrosoftWindowsServer";
const DEFAULT_IMAGE_SKU: &str = "2019-Datacenter";
const DEFAULT_IMAGE_VERSION: &str = "latest";
const DEFAULT_OS_DISK_SIZE_GB: i32 = 128;
const DEFAULT_STORAGE_ACCOUNT_TYPE: &str = "Premium_LRS";
const DEFAULT_VM_SIZE: &str = "Standard_D4s_V3";

const MACHINE_SET_NAME: &str = "e2e-wmco-azure-machineset";

pub struct Provider {
    openshift: OpenShift,
    vm_size: String,
}

impl Provider {
    pub fn new(openshift: OpenShift, settings: &ProviderSettings) -> Result<Self, Error> {
        if settings.has_custom_vxlan_port {
            return Err(Error::CustomVxlanUnsupported);
        }

        Ok(Self {
            openshift,
            vm_size: settings
                .azure_vm_size
                .clone()
                .unwrap_or_else(|| DEFAULT_VM_SIZE.to_owned()),
        })
    }
}

pub fn new_azure_machine_provider_spec(
    cluster_id: &str,
    status: Option<&PlatformStatus>,
    location: &str,
    zone: &str,
    vm_size: &str,
) -> Result<AzureMachineProviderSpec, Error> {
    if cluster_id.is_empty() {
        return Err(Error::EmptyClusterId);
    }
    let status = status
        .filter(|status| *status != &PlatformStatus::default())
        .ok_or(Error::MissingPlatformStatus)?;
    let azure = status
        .azure
        .as_ref()
        .filter(|azure| !azure.is_empty())
        .ok_or(Error::MissingAzurePlatformStatus)?;
    if azure.network_resource_group_name.is_empty() {
        return Err(Error::EmptyNetworkResourceGroup);
    }

    Ok(AzureMachineProviderSpec {
        api_version: Some(API_VERSION.to_owned()),
        kind: Some(KIND.to_owned()),
        user_data_secret: Some(SecretReference {
            name: Some(USER_DATA_SECRET_NAME.to_owned()),
            ..Default::default()
        }),
        credentials_secret: Some(SecretReference {
            name: Some(DEFAULT_CREDENTIALS_SECRET_NAME.to_owned()),
            namespace: Some(MACHINE_API_NAMESPACE.to_owned()),
        }),
        location: location.to_owned(),
        zone: Some(zone.to_owned()),
        vm_size: vm_size.to_owned(),
        image: Image {
            publisher: DEFAULT_IMAGE_PUBLISHER.to_owned(),
            offer: DEFAULT_IMAGE_OFFER.to_owned(),
            sku: DEFAULT_IMAGE_SKU.to_owned(),
            version: DEFAULT_IMAGE_VERSION.to_owned(),
            ..Default::default()
        },
        os_disk: OSDisk {
            os_type: "Windows".to_owned(),
            disk_size_gb: DEFAULT_OS_DISK_SIZE_GB,
            managed_disk: ManagedDisk {
                storage_account_type: DEFAULT_STORAGE_ACCOUNT_TYPE.to_owned(),
            },
        },
        public_ip: false,
        subnet: format!("{}-worker-subnet", cluster_id),
        managed_identity: format!("{}-identity", cluster_id),
        vnet: format!("{}-worker-vnet", cluster_id),
        resource_group: azure.resource_group_name.clone(),
        network_resource_group: azure.network_resource_group_name.clone(),
    })
}

impl CloudProvider for Provider {
    async fn generate_machine_set(
        &self,
        with_windows_label: bool,
        replicas: i32,
    ) -> Result<MachineSet, Error> {
        let cluster_id = self.openshift.cluster_id().await.map_err(Error::ClusterId)?;
        let status = self
            .openshift
            .platform_status()
            .await
            .map_err(|e| Error::PlatformStatus(PlatformType::Azure, e))?;

        // New instances go to the same location and zone as master-0.
        let master_name = master_machine_name(&cluster_id);
        let master = self
            .openshift
            .machine(&master_name)
            .await
            .map_err(|e| Error::GetMachine(master_name.clone(), e))?;
        let master_spec: AzureMachineProviderSpec = machine_provider_spec(master)?;
        let zone = master_spec
            .zone
            .as_deref()
            .ok_or_else(|| Error::MissingZone(master_name.clone()))?;

        let provider_spec = new_azure_machine_provider_spec(
            &cluster_id,
            Some(&status),
            &master_spec.location,
            zone,
            &self.vm_size,
        )?;

        log::info!(
            "generating Azure machine set in {} zone {} for cluster {}",
            master_spec.location,
            zone,
            cluster_id
        );

        Ok(machine_set::build(
            MACHINE_SET_NAME,
            &cluster_id,
            ProviderSpec::from_value(&provider_spec)?,
            with_windows_label,
            replicas,
        ))
    }
}
