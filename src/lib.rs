pub mod clients;
pub mod clusterinfo;
pub mod kube;
pub mod logging;
pub mod providers;
pub mod settings;

#[cfg(test)]
mod test_utils;
