//! JSON-RPC resource service client
//!
//! The service exposes a file index through a single `resources/list`
//! method. Transport and protocol failures are recovered to an empty
//! listing so the interactive session keeps running; only calling an
//! unsupported method is a hard error, since that is a client bug.

use crate::error::{ResourceError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::warn;

/// The single method the resource service supports
pub const RESOURCES_LIST: &str = "resources/list";

/// URI scheme the service uses for indexed files
const FILE_SCHEME: &str = "file:///";

/// A single entry in the remote file index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    /// Display name of the resource
    #[serde(default)]
    pub name: String,

    /// URI of the resource, expected to use the `file://` scheme
    #[serde(default)]
    pub uri: String,
}

/// The shapes the service is permitted to answer with, resolved once here
/// and never re-inspected downstream.
#[derive(Debug)]
enum ListReply {
    /// `result` is a bare array of resources
    Flat(Vec<ResourceRef>),
    /// `result` is an object keyed by `resources`
    Keyed(Vec<ResourceRef>),
    /// Body carries an `error` payload
    Faulted(Value),
    /// Anything else
    Unrecognized,
}

/// Client for the resource-listing service
pub struct ResourceClient {
    http: reqwest::Client,
    base_url: String,
    virtual_root: String,
}

impl ResourceClient {
    /// Create a new client for the given endpoint
    pub fn new(
        base_url: impl Into<String>,
        virtual_root: impl Into<String>,
        timeout_seconds: u64,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            virtual_root: virtual_root.into(),
        })
    }

    /// Call a listing method on the resource service.
    ///
    /// Returns the ordered resource list, or an empty list when the service
    /// is unreachable or answers with an error payload. Only an unsupported
    /// method name fails, before any network I/O.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Vec<ResourceRef>> {
        if method != RESOURCES_LIST {
            return Err(ResourceError::UnsupportedMethod {
                method: method.to_string(),
            }
            .into());
        }

        let payload = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params.unwrap_or_else(|| json!({})),
        });

        let response = match self.http.post(&self.base_url).json(&payload).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("resource service unreachable: {}", e);
                return Ok(Vec::new());
            }
        };

        if !response.status().is_success() {
            warn!(
                status = %response.status(),
                "resource service answered with non-success status"
            );
            return Ok(Vec::new());
        }

        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                warn!("resource service answered with an unparseable body: {}", e);
                return Ok(Vec::new());
            }
        };

        match Self::classify_reply(body) {
            ListReply::Flat(resources) | ListReply::Keyed(resources) => Ok(resources),
            ListReply::Faulted(error) => {
                warn!("resource service reported an error: {}", error);
                Ok(Vec::new())
            }
            ListReply::Unrecognized => {
                warn!("resource service answered in an unrecognized shape");
                Ok(Vec::new())
            }
        }
    }

    /// Search the index by case-insensitive filename substring.
    ///
    /// Matches are canonicalized under the virtual root, producing the path
    /// strings the rest of the session operates on.
    pub async fn search_files(&self, pattern: &str) -> Result<Vec<String>> {
        let params = json!({ "pattern": pattern });
        let resources = self.call(RESOURCES_LIST, Some(params)).await?;
        Ok(self.canonicalize(resources, pattern))
    }

    /// Resolve the service's reply into one of the three permitted shapes
    fn classify_reply(mut body: Value) -> ListReply {
        if let Some(error) = body.get_mut("error") {
            return ListReply::Faulted(error.take());
        }

        match body.get_mut("result") {
            Some(Value::Array(entries)) => ListReply::Flat(Self::collect_refs(entries)),
            Some(Value::Object(map)) => match map.get_mut("resources") {
                Some(Value::Array(entries)) => ListReply::Keyed(Self::collect_refs(entries)),
                _ => ListReply::Keyed(Vec::new()),
            },
            _ => ListReply::Unrecognized,
        }
    }

    /// Deserialize index entries, skipping anything that is not an object
    fn collect_refs(entries: &mut [Value]) -> Vec<ResourceRef> {
        entries
            .iter_mut()
            .filter_map(|entry| serde_json::from_value(entry.take()).ok())
            .collect()
    }

    /// Filter resources by name substring and `file://` scheme, mapping the
    /// survivors to canonical paths under the virtual root
    fn canonicalize(&self, resources: Vec<ResourceRef>, pattern: &str) -> Vec<String> {
        let needle = pattern.to_lowercase();
        resources
            .into_iter()
            .filter(|r| r.name.to_lowercase().contains(&needle))
            .filter_map(|r| {
                r.uri
                    .strip_prefix(FILE_SCHEME)
                    .map(|rest| format!("{}/{}", self.virtual_root, rest))
            })
            .collect()
    }
}
