use backoff::{future::retry, ExponentialBackoff};
use k8s_openapi::serde::{de::DeserializeOwned, Serialize};
use kube::{
    api::{Api, DeleteParams, PostParams},
    core::{NamespaceResourceScope, Resource},
    Client, ResourceExt,
};
use std::fmt::Debug;
use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(#[from] kube::Error);

pub trait ClientHelpers {
    async fn create_or_update_resource<T>(&self, api: Api<T>, resource: T) -> Result<T, Error>
    where
        T: Resource + Clone + Debug + DeserializeOwned + Serialize;

    async fn create_or_update_namespaced_resource<T>(
        &self,
        namespace: &str,
        resource: T,
    ) -> Result<T, Error>
    where
        T: Resource<Scope = NamespaceResourceScope, DynamicType = ()>
            + Clone
            + Debug
            + DeserializeOwned
            + Serialize;

    async fn delete_resource<T>(&self, api: Api<T>, name: &str) -> Result<(), Error>
    where
        T: Resource + Clone + Debug + DeserializeOwned + Serialize;
}

impl ClientHelpers for Client {
    async fn create_or_update_resource<T>(&self, api: Api<T>, resource: T) -> Result<T, Error>
    where
        T: Resource + Clone + Debug + DeserializeOwned + Serialize,
    {
        let name = resource.name_any();

        match api.get(&name).await {
            Ok(..) => {
                log::debug!("replacing existing resource {}", name);

                Ok(retry(ExponentialBackoff::default(), || async {
                    let mut new_resource = resource.clone();

                    let server_object = api.get(&name).await?;
                    new_resource.meta_mut().resource_version = server_object.resource_version();

                    match api.replace(&name, &Default::default(), &new_resource).await {
                        Ok(result) => Ok(result),
                        Err(e) => match e {
                            kube::Error::Api(ref err) if err.code == 409 => {
                                log::debug!("conflict while replacing {}, retrying", name);
                                Err(backoff::Error::transient(e))
                            }
                            _ => Err(backoff::Error::Permanent(e)),
                        },
                    }
                })
                .await?)
            }
            Err(kube::Error::Api(ref err)) if err.code == 404 => {
                log::debug!("creating resource {}", name);
                Ok(api.create(&PostParams::default(), &resource).await?)
            }
            Err(e) => Err(e)?,
        }
    }

    async fn create_or_update_namespaced_resource<T>(
        &self,
        namespace: &str,
        resource: T,
    ) -> Result<T, Error>
    where
        T: Resource<Scope = NamespaceResourceScope, DynamicType = ()>
            + Clone
            + Debug
            + DeserializeOwned
            + Serialize,
    {
        let api: Api<T> = Api::namespaced(self.clone(), namespace);
        self.create_or_update_resource(api, resource).await
    }

    async fn delete_resource<T>(&self, api: Api<T>, name: &str) -> Result<(), Error>
    where
        T: Resource + Clone + Debug + DeserializeOwned + Serialize,
    {
        match api.delete(name, &DeleteParams::default()).await {
            Ok(_) => Ok(()),
            Err(kube::Error::Api(ref err)) if err.code == 404 => {
                log::debug!("resource {} already deleted", name);
                Ok(())
            }
            Err(e) => Err(e)?,
        }
    }
}
