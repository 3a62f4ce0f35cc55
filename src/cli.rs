use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use wmco_e2e::settings::ProviderSettings;

/// Discovers the OpenShift cluster under test and manages the machine sets
/// used to provision Windows test nodes
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub(crate) struct Cli {
    /// Maximum level of the log records printed to stderr
    #[clap(long, default_value = "info", env = "WMCO_LOG_LEVEL")]
    pub(crate) log_level: LevelFilter,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Print the cluster ID, platform type and hybrid overlay configuration
    Info,

    /// Print a Windows machine set for the current platform as YAML
    Generate(MachineSetArgs),

    /// Create or update a Windows machine set for the current platform
    Apply(MachineSetArgs),

    /// Delete a machine set from the machine API namespace
    Delete {
        /// Name of the machine set
        #[clap(long)]
        name: String,
    },
}

#[derive(Args)]
pub(crate) struct MachineSetArgs {
    /// Number of machines in the machine set
    #[clap(long, default_value_t = 1)]
    pub(crate) replicas: i32,

    /// Label the machines with the Windows OS ID so the operator configures them
    #[clap(long)]
    pub(crate) with_windows_label: bool,

    /// Cloud key pair injected into the instances
    #[clap(long, env = "WMCO_SSH_KEY_PAIR")]
    pub(crate) ssh_key_pair: Option<String>,

    /// Windows AMI used on AWS
    #[clap(long, env = "WMCO_AWS_AMI_ID")]
    pub(crate) aws_ami_id: Option<String>,

    /// Windows AMI used on AWS when the hybrid overlay uses a custom VXLAN port
    #[clap(long, env = "WMCO_AWS_CUSTOM_VXLAN_AMI_ID")]
    pub(crate) aws_custom_vxlan_ami_id: Option<String>,

    /// Instance type used on AWS
    #[clap(long)]
    pub(crate) aws_instance_type: Option<String>,

    /// VM size used on Azure
    #[clap(long)]
    pub(crate) azure_vm_size: Option<String>,

    /// Skip detection and state whether a custom VXLAN port is configured
    #[clap(long)]
    pub(crate) custom_vxlan_port: Option<bool>,
}

impl MachineSetArgs {
    pub(crate) fn settings(&self, has_custom_vxlan_port: bool) -> ProviderSettings {
        ProviderSettings {
            ssh_key_pair: self.ssh_key_pair.clone(),
            has_custom_vxlan_port,
            aws_ami_id: self.aws_ami_id.clone(),
            aws_custom_vxlan_ami_id: self.aws_custom_vxlan_ami_id.clone(),
            azure_vm_size: self.azure_vm_size.clone(),
            aws_instance_type: self.aws_instance_type.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_generate_args() {
        let cli = Cli::try_parse_from([
            "wmco-e2e",
            "--log-level",
            "debug",
            "generate",
            "--replicas",
            "3",
            "--with-windows-label",
            "--ssh-key-pair",
            "openshift-dev",
            "--aws-ami-id",
            "ami-0a1b2c3d4e5f",
        ])
        .unwrap();

        assert_eq!(cli.log_level, LevelFilter::Debug);
        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.replicas, 3);
                assert!(args.with_windows_label);
                assert_eq!(
                    args.settings(false),
                    ProviderSettings::builder()
                        .ssh_key_pair("openshift-dev")
                        .aws_ami_id("ami-0a1b2c3d4e5f")
                        .build()
                );
            }
            _ => panic!("expected the generate command"),
        }
    }

    #[test]
    fn test_invalid_log_level() {
        assert!(Cli::try_parse_from(["wmco-e2e", "--log-level", "verbose", "info"]).is_err());
    }

    #[test]
    fn test_delete_requires_name() {
        assert!(Cli::try_parse_from(["wmco-e2e", "delete"]).is_err());
    }
}
