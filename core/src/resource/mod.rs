//! Remote file-index access over a JSON-RPC resource service

pub mod client;

pub use client::{ResourceClient, ResourceRef, RESOURCES_LIST};
