use crate::clusterinfo::{
    MACHINE_API_NAMESPACE, MACHINE_OS_ID_LABEL, MACHINE_ROLE_LABEL, MACHINE_SET_LABEL,
    MACHINE_TYPE_LABEL,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;
use kube::api::ObjectMeta;
use maplit::btreemap;
use openshift_api::machine::{
    MachineObjectMeta, MachineSet, MachineSetSpec, MachineSpec, MachineTemplateSpec,
    ProviderSpec, MACHINE_CLUSTER_ID_LABEL,
};
use rand::Rng;

/// Characters used by Kubernetes for random name suffixes, vowels and
/// look-alike characters are left out to avoid accidental words.
const SUFFIX_ALPHABET: &[u8] = b"bcdfghjklmnpqrstvwxz2456789";

const SUFFIX_LENGTH: usize = 4;

const WINDOWS_LABEL_SUFFIX: &str = "-with-windows-label";

pub fn random_suffix(length: usize) -> String {
    let mut rng = rand::thread_rng();

    (0..length)
        .map(|_| SUFFIX_ALPHABET[rng.gen_range(0..SUFFIX_ALPHABET.len())] as char)
        .collect()
}

/// Returns the name used in the selector of the machine set and the labels
/// matched by it.
pub fn selector_name(base_name: &str, with_windows_label: bool) -> String {
    if with_windows_label {
        format!("{}{}", base_name, WINDOWS_LABEL_SUFFIX)
    } else {
        base_name.to_owned()
    }
}

/// Assembles a worker machine set around an already rendered provider spec.
pub fn build(
    base_name: &str,
    cluster_id: &str,
    provider_spec: ProviderSpec,
    with_windows_label: bool,
    replicas: i32,
) -> MachineSet {
    let machine_set_name = selector_name(base_name, with_windows_label);

    let mut match_labels = btreemap! {
        MACHINE_CLUSTER_ID_LABEL.to_owned() => cluster_id.to_owned(),
        MACHINE_SET_LABEL.to_owned() => machine_set_name.clone(),
    };
    if with_windows_label {
        match_labels.insert(MACHINE_OS_ID_LABEL.to_owned(), "Windows".to_owned());
    }

    MachineSet {
        metadata: ObjectMeta {
            name: Some(format!("{}{}", machine_set_name, random_suffix(SUFFIX_LENGTH))),
            namespace: Some(MACHINE_API_NAMESPACE.to_owned()),
            labels: Some(btreemap! {
                MACHINE_CLUSTER_ID_LABEL.to_owned() => cluster_id.to_owned(),
            }),
            ..Default::default()
        },
        spec: MachineSetSpec {
            replicas: Some(replicas),
            selector: LabelSelector {
                match_labels: Some(match_labels.clone()),
                match_expressions: None,
            },
            template: MachineTemplateSpec {
                metadata: MachineObjectMeta {
                    labels: Some(
                        btreemap! {
                            MACHINE_ROLE_LABEL.to_owned() => "worker".to_owned(),
                            MACHINE_TYPE_LABEL.to_owned() => "worker".to_owned(),
                        }
                        .into_iter()
                        .chain(match_labels)
                        .collect(),
                    ),
                    ..Default::default()
                },
                spec: MachineSpec {
                    metadata: MachineObjectMeta {
                        labels: Some(btreemap! {
                            "node-role.kubernetes.io/worker".to_owned() => "".to_owned(),
                        }),
                        ..Default::default()
                    },
                    provider_spec,
                    ..Default::default()
                },
            },
        },
    }
}
