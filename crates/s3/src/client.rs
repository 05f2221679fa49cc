//! S3 store implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectStore trait from bkt-core.
//! Credentials come from the SDK's default chain (environment variables,
//! profiles, IMDS); only the endpoint, region, and addressing style can be
//! overridden, for S3-compatible backends such as MinIO or RustFS.

use async_trait::async_trait;

use bkt_core::config::RemoteConfig;
use bkt_core::{Error, ListOptions, ListPage, ObjectStore, ObjectSummary, Result};

/// S3 client wrapper
pub struct S3Store {
    inner: aws_sdk_s3::Client,
}

impl S3Store {
    /// Create a new store from the ambient SDK config plus the given overrides
    pub async fn new(remote: &RemoteConfig) -> Result<Self> {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

        if let Some(region) = &remote.region {
            loader = loader.region(aws_config::Region::new(region.clone()));
        }
        if let Some(endpoint) = &remote.endpoint {
            tracing::debug!(endpoint, "using endpoint override");
            loader = loader.endpoint_url(endpoint);
        }

        let config = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(remote.force_path_style)
            .build();

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
        })
    }

    /// Get the underlying aws-sdk-s3 client
    pub fn inner(&self) -> &aws_sdk_s3::Client {
        &self.inner
    }
}

/// Map an SDK failure onto the core error type.
///
/// `context` names the bucket or bucket/key the call concerned, so
/// NotFound and Auth failures carry the address they are about.
fn classify_error(context: &str, message: String) -> Error {
    if message.contains("NoSuchKey")
        || message.contains("NoSuchBucket")
        || message.contains("NotFound")
    {
        Error::NotFound(context.to_string())
    } else if message.contains("AccessDenied")
        || message.contains("InvalidAccessKeyId")
        || message.contains("SignatureDoesNotMatch")
    {
        Error::Auth(format!("{context}: {message}"))
    } else {
        Error::Network(message)
    }
}

fn timestamp_from(datetime: &aws_smithy_types::DateTime) -> Option<jiff::Timestamp> {
    jiff::Timestamp::from_second(datetime.secs()).ok()
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn list_objects(&self, bucket: &str, options: ListOptions) -> Result<ListPage> {
        let mut request = self.inner.list_objects_v2().bucket(bucket);

        if let Some(prefix) = &options.prefix {
            request = request.prefix(prefix);
        }
        if let Some(max) = options.max_keys {
            request = request.max_keys(max);
        }
        if let Some(token) = &options.continuation_token {
            request = request.continuation_token(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| classify_error(bucket, e.to_string()))?;

        let mut objects = Vec::new();
        for object in response.contents() {
            let key = object.key().unwrap_or_default().to_string();
            let size = object.size().unwrap_or(0);
            let mut summary = ObjectSummary::new(&key, size);

            if let Some(modified) = object.last_modified() {
                summary.last_modified = timestamp_from(modified);
            }
            if let Some(etag) = object.e_tag() {
                summary.etag = Some(etag.trim_matches('"').to_string());
            }
            if let Some(sc) = object.storage_class() {
                summary.storage_class = Some(sc.as_str().to_string());
            }

            objects.push(summary);
        }

        Ok(ListPage {
            objects,
            truncated: response.is_truncated().unwrap_or(false),
            continuation_token: response.next_continuation_token().map(|s| s.to_string()),
        })
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: Option<String>,
    ) -> Result<ObjectSummary> {
        let size = data.len() as i64;
        let body = aws_sdk_s3::primitives::ByteStream::from(data);

        let mut request = self
            .inner
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body);

        if let Some(ct) = content_type {
            request = request.content_type(ct);
        }

        let response = request
            .send()
            .await
            .map_err(|e| classify_error(&format!("{bucket}/{key}"), e.to_string()))?;

        let mut summary = ObjectSummary::new(key, size);
        if let Some(etag) = response.e_tag() {
            summary.etag = Some(etag.trim_matches('"').to_string());
        }
        summary.last_modified = Some(jiff::Timestamp::now());

        Ok(summary)
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let response = self
            .inner
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| classify_error(&format!("{bucket}/{key}"), e.to_string()))?;

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| Error::Network(e.to_string()))?
            .into_bytes()
            .to_vec();

        Ok(data)
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()> {
        self.inner
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| classify_error(&format!("{bucket}/{key}"), e.to_string()))?;

        Ok(())
    }
}
