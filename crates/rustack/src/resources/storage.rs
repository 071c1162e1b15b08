//! S3 storages and buckets

use super::{Resource, required, scoped};
use crate::{
    args::Arguments,
    client::Client,
    error::Result,
    http::Request,
    types::{S3Bucket, S3Storage, tag_names},
};
use serde_json::json;

/// S3 storages.
#[derive(Clone)]
pub struct S3Storages {
    client: Client,
}

impl S3Storages {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Every storage.
    pub async fn list(&self, extra: Arguments) -> Result<Vec<S3Storage>> {
        self.client.get_all_pages("v1/s3_storage", extra).await
    }

    /// Storages of one project.
    pub async fn list_for_project(&self, project_id: &str, extra: Arguments) -> Result<Vec<S3Storage>> {
        self.list(scoped("project", project_id, extra)).await
    }

    /// One storage.
    pub async fn get(&self, id: &str) -> Result<S3Storage> {
        self.client
            .get(&format!("v1/s3_storage/{}", id), Arguments::defaults())
            .await
    }

    /// Create a storage in a project.
    pub async fn create(
        &self,
        project_id: &str,
        name: &str,
        backend: &str,
        tags: &[&str],
    ) -> Result<S3Storage> {
        let request = Request::post("v1/s3_storage").json(&json!({
            "name": name,
            "project": project_id,
            "backend": backend,
            "tags": tags,
        }))?;
        required(self.client.execute_and_wait(request).await?, "v1/s3_storage")
    }

    /// Save a storage's name and tags, then wait for it to unlock.
    pub async fn update(&self, storage: &S3Storage) -> Result<S3Storage> {
        let path = format!("v1/s3_storage/{}", storage.id);
        let request = Request::put(&path).json(&json!({
            "name": storage.name,
            "tags": tag_names(&storage.tags),
        }))?;
        let updated = required(self.client.execute_and_wait(request).await?, &path)?;
        self.client.await_unlocked(&path).await?;
        Ok(updated)
    }

    /// Delete a storage.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .execute_unit_and_wait(Request::delete(format!("v1/s3_storage/{}", id)))
            .await
    }

    /// Wait until the storage is no longer locked.
    pub async fn wait_unlocked(&self, id: &str) -> Result<()> {
        self.client.await_unlocked(&format!("v1/s3_storage/{}", id)).await
    }

    /// Buckets of one storage.
    pub fn buckets(&self, storage_id: impl Into<String>) -> S3Buckets {
        S3Buckets::new(self.client.clone(), storage_id.into())
    }
}

impl Resource for S3Storages {
    fn client(&self) -> &Client {
        &self.client
    }
}

/// Buckets of one S3 storage.
#[derive(Clone)]
pub struct S3Buckets {
    client: Client,
    storage_id: String,
}

impl S3Buckets {
    pub(crate) fn new(client: Client, storage_id: String) -> Self {
        Self { client, storage_id }
    }

    /// The storage these buckets belong to.
    pub fn storage_id(&self) -> &str {
        &self.storage_id
    }

    fn collection(&self) -> String {
        format!("v1/s3_storage/{}/bucket", self.storage_id)
    }

    fn item(&self, id: &str) -> String {
        format!("v1/s3_storage/{}/bucket/{}", self.storage_id, id)
    }

    fn adopt(&self, mut bucket: S3Bucket) -> S3Bucket {
        bucket.storage_id = self.storage_id.clone();
        bucket
    }

    /// Every bucket.
    pub async fn list(&self) -> Result<Vec<S3Bucket>> {
        let buckets: Vec<S3Bucket> = self
            .client
            .get_all_pages(&self.collection(), Arguments::defaults())
            .await?;
        Ok(buckets.into_iter().map(|b| self.adopt(b)).collect())
    }

    /// One bucket.
    pub async fn get(&self, id: &str) -> Result<S3Bucket> {
        let bucket = self.client.get(&self.item(id), Arguments::defaults()).await?;
        Ok(self.adopt(bucket))
    }

    /// Create a bucket.
    pub async fn create(&self, name: &str) -> Result<S3Bucket> {
        let path = self.collection();
        let request = Request::post(&path).json(&json!({ "name": name }))?;
        let bucket = required(self.client.execute_and_wait(request).await?, &path)?;
        Ok(self.adopt(bucket))
    }

    /// Save a bucket's name.
    pub async fn update(&self, bucket: &S3Bucket) -> Result<S3Bucket> {
        let path = self.item(&bucket.id);
        let request = Request::put(&path).json(&json!({ "name": bucket.name }))?;
        let updated = required(self.client.execute_and_wait(request).await?, &path)?;
        Ok(self.adopt(updated))
    }

    /// Delete a bucket.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .execute_unit_and_wait(Request::delete(self.item(id)))
            .await
    }
}

impl Resource for S3Buckets {
    fn client(&self) -> &Client {
        &self.client
    }
}
