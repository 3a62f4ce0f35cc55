use typed_builder::TypedBuilder;

/// Knobs the cloud providers need beyond what can be discovered from the
/// cluster itself.
#[derive(Clone, Debug, Default, TypedBuilder, PartialEq)]
pub struct ProviderSettings {
    /// Name of the cloud key pair injected into new instances.
    #[builder(default, setter(into, strip_option))]
    pub ssh_key_pair: Option<String>,

    /// Whether the cluster hybrid overlay uses a custom VXLAN port. Images
    /// used for the test nodes have to support it.
    #[builder(default = false)]
    pub has_custom_vxlan_port: bool,

    /// Windows AMI used on AWS.
    #[builder(default, setter(into, strip_option))]
    pub aws_ami_id: Option<String>,

    /// Windows AMI used on AWS when a custom VXLAN port is configured.
    #[builder(default, setter(into, strip_option))]
    pub aws_custom_vxlan_ami_id: Option<String>,

    /// VM size override for Azure.
    #[builder(default, setter(into, strip_option))]
    pub azure_vm_size: Option<String>,

    /// Instance type override for AWS.
    #[builder(default, setter(into, strip_option))]
    pub aws_instance_type: Option<String>,
}
