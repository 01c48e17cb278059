// S3Kit Rust Library for Amazon S3 Compatible Cloud Storage
// Copyright 2025 the S3Kit authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Endpoint resolution: mapping call parameters to a request URI

use crate::s3::error::Error;
use crate::s3::types::CallContext;
use async_trait::async_trait;
use lazy_static::lazy_static;
use std::sync::Arc;

#[derive(Clone, Debug, Default)]
pub struct EndpointParameters {
    pub bucket: String,
    pub key: String,
    pub host: String,
    pub use_ssl: bool,
    pub use_path_style: bool,
}

#[derive(Clone, Debug)]
pub struct Endpoint {
    pub url: String,
}

#[async_trait]
pub trait EndpointResolver: Send + Sync {
    async fn resolve_endpoint(
        &self,
        ctx: &CallContext,
        params: &EndpointParameters,
    ) -> Result<Endpoint, Error>;
}

/// Deterministic URL builder: virtual-hosted style places the bucket as a
/// subdomain of the endpoint host, path style as the first path segment.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultEndpointResolver;

#[async_trait]
impl EndpointResolver for DefaultEndpointResolver {
    async fn resolve_endpoint(
        &self,
        _ctx: &CallContext,
        params: &EndpointParameters,
    ) -> Result<Endpoint, Error> {
        let mut url = String::from(if params.use_ssl { "https" } else { "http" });
        url.push_str("://");

        if !params.use_path_style && !params.bucket.is_empty() {
            url.push_str(&params.bucket);
            url.push('.');
        }

        url.push_str(&params.host);

        if params.use_path_style && !params.bucket.is_empty() {
            url.push('/');
            url.push_str(&params.bucket);
        }

        if !params.key.is_empty() {
            url.push('/');
            url.push_str(&params.key);
        }

        Ok(Endpoint { url })
    }
}

lazy_static! {
    static ref DEFAULT_ENDPOINT_RESOLVER: Arc<DefaultEndpointResolver> =
        Arc::new(DefaultEndpointResolver);
}

/// Process-wide default resolver, immutable after initialization.
pub fn default_endpoint_resolver() -> Arc<dyn EndpointResolver> {
    DEFAULT_ENDPOINT_RESOLVER.clone()
}
