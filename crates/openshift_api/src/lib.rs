//! Typed subset of the OpenShift APIs consumed by the end-to-end tooling.
//!
//! Only the fields that are read from or written to the cluster are modelled,
//! everything else is ignored on deserialization.

pub mod config;
pub mod machine;
pub mod operator;
