//! S3 storages and buckets

use super::{Reference, Tag};
use serde::{Deserialize, Serialize};

/// An S3-compatible object storage.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct S3Storage {
    /// Storage id
    pub id: String,
    /// Storage name
    pub name: String,
    /// Busy with a server-side operation
    pub locked: bool,
    /// Last job id
    pub job_id: Option<String>,
    /// Endpoint for S3 clients
    pub client_endpoint: String,
    /// Access key
    pub access_key: String,
    /// Secret key
    pub secret_key: String,
    /// Storage backend
    pub backend: String,
    /// Owning project
    pub project: Option<Reference>,
    /// Labels
    pub tags: Vec<Tag>,
}

/// A bucket in an S3 storage.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct S3Bucket {
    /// Bucket id
    pub id: String,
    /// Bucket name
    pub name: String,
    /// Name as seen by S3 clients
    pub external_name: String,
    /// Storage the bucket belongs to
    #[serde(skip)]
    pub storage_id: String,
}
