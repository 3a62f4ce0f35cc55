use anyhow::{Context, Result};
use clap::Parser;
use kube::Api;
use openshift_api::machine::MachineSet;
use wmco_e2e::{
    clients::kubernetes::ClientHelpers,
    clusterinfo::{OpenShift, MACHINE_API_NAMESPACE},
    logging,
    providers::{self, CloudProvider},
};

mod cli;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();
    logging::init(args.log_level).context("initializing logging")?;

    let openshift = OpenShift::new().await.context("creating OpenShift client")?;

    match args.command {
        cli::Command::Info => info(&openshift).await,
        cli::Command::Generate(machine_set_args) => {
            let machine_set = generate(&openshift, &machine_set_args).await?;
            print!(
                "{}",
                serde_yaml::to_string(&machine_set).context("serializing machine set")?
            );

            Ok(())
        }
        cli::Command::Apply(machine_set_args) => {
            let machine_set = generate(&openshift, &machine_set_args).await?;
            let machine_set = openshift
                .client()
                .create_or_update_namespaced_resource(MACHINE_API_NAMESPACE, machine_set)
                .await
                .context("applying machine set")?;

            log::info!(
                "applied machine set {}/{}",
                MACHINE_API_NAMESPACE,
                machine_set.metadata.name.unwrap_or_default()
            );

            Ok(())
        }
        cli::Command::Delete { name } => {
            let api: Api<MachineSet> =
                Api::namespaced(openshift.client().clone(), MACHINE_API_NAMESPACE);
            openshift
                .client()
                .delete_resource(api, &name)
                .await
                .with_context(|| format!("deleting machine set {}", name))?;

            log::info!("deleted machine set {}/{}", MACHINE_API_NAMESPACE, name);

            Ok(())
        }
    }
}

async fn info(openshift: &OpenShift) -> Result<()> {
    let cluster_id = openshift.cluster_id().await.context("getting cluster id")?;
    let platform_status = openshift
        .platform_status()
        .await
        .context("getting platform status")?;
    let has_custom_vxlan_port = openshift
        .has_custom_vxlan_port()
        .await
        .context("getting network configuration")?;

    println!("cluster id:        {}", cluster_id);
    println!("platform:          {}", platform_status.type_);
    println!("custom VXLAN port: {}", has_custom_vxlan_port);

    Ok(())
}

async fn generate(openshift: &OpenShift, args: &cli::MachineSetArgs) -> Result<MachineSet> {
    let has_custom_vxlan_port = match args.custom_vxlan_port {
        Some(value) => value,
        None => openshift
            .has_custom_vxlan_port()
            .await
            .context("getting network configuration")?,
    };

    let settings = args.settings(has_custom_vxlan_port);
    let provider = providers::cloud_provider_for(openshift.clone(), &settings)
        .await
        .context("setting up cloud provider")?;

    provider
        .generate_machine_set(args.with_windows_label, args.replicas)
        .await
        .context("generating machine set")
}
