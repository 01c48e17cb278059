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

//! Client and configuration for S3 operations

use crate::s3::args::{
    CreateBucketInput, DeleteBucketInput, GetBucketLocationInput, GetObjectInput, HeadBucketInput,
    HeadObjectInput, ListBucketsInput, PutObjectInput,
};
use crate::s3::creds::Credentials;
use crate::s3::endpoint::{EndpointResolver, default_endpoint_resolver};
use crate::s3::error::Error;
use crate::s3::http::{HttpTransport, default_transport};
use crate::s3::pipeline::{Metadata, perform_call};
use crate::s3::response::{
    CreateBucketOutput, DeleteBucketOutput, GetBucketLocationOutput, GetObjectOutput,
    HeadBucketOutput, HeadObjectOutput, ListBucketsOutput, PutObjectOutput,
};
use crate::s3::signer::Signer;
use crate::s3::types::CallContext;
use crate::s3::utils::match_hostname;
use std::sync::Arc;
use typed_builder::TypedBuilder;

/// User-Agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = "s3kit";

/// Per-client configuration, value-cloned into every call so per-call
/// overrides never leak into shared state.
#[derive(Clone, TypedBuilder)]
pub struct Options {
    /// Controls the `User-Agent` header. `None` is replaced by
    /// [`DEFAULT_USER_AGENT`] when the client is built; an empty string
    /// sends no header at all; anything else is sent as given.
    #[builder(default, setter(strip_option, into))]
    pub user_agent: Option<String>,

    /// Bucket as first path segment instead of as a subdomain.
    #[builder(default)]
    pub use_path_style: bool,

    /// Endpoint host, as `hostname` or `hostname:port`.
    #[builder(setter(into))]
    pub endpoint_host: String,

    #[builder(default)]
    pub use_ssl: bool,

    #[builder(default = default_endpoint_resolver())]
    pub endpoint_resolver: Arc<dyn EndpointResolver>,

    #[builder(setter(into))]
    pub signing_region: String,

    pub signer: Arc<dyn Signer>,

    #[builder(default, setter(strip_option))]
    pub credentials: Option<Credentials>,

    #[builder(default = default_transport())]
    pub transport: Arc<dyn HttpTransport>,
}

impl Options {
    fn set_defaults(&mut self) {
        if self.user_agent.is_none() {
            self.user_agent = Some(DEFAULT_USER_AGENT.to_string());
        }
    }

    /// Fails fast on options a call could not run with.
    pub fn validate(&self) -> Result<(), Error> {
        let host = match self.endpoint_host.rsplit_once(':') {
            Some((host, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => {
                port.parse::<u16>().map_err(|_| {
                    Error::InvalidConfig(format!(
                        "invalid endpoint port in {:?}",
                        self.endpoint_host
                    ))
                })?;
                host
            }
            _ => self.endpoint_host.as_str(),
        };

        if !match_hostname(host) {
            return Err(Error::InvalidConfig(format!(
                "invalid endpoint host {:?}",
                self.endpoint_host
            )));
        }

        if self.signing_region.is_empty() {
            return Err(Error::InvalidConfig(
                "signing region must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// S3 client: a validated options set plus one method per operation. All
/// calls run through the same pipeline; the client itself holds no per-call
/// state and is cheap to clone.
#[derive(Clone)]
pub struct Client {
    options: Options,
}

impl Client {
    pub fn new(mut options: Options) -> Result<Client, Error> {
        options.set_defaults();
        options.validate()?;
        Ok(Client { options })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Returns a client with the given transformations applied to a copy of
    /// the options. The original client is untouched.
    pub fn with_options(&self, apply: impl FnOnce(&mut Options)) -> Result<Client, Error> {
        let mut options = self.options.clone();
        apply(&mut options);
        Client::new(options)
    }

    pub async fn head_bucket(
        &self,
        ctx: &CallContext,
        input: HeadBucketInput,
    ) -> Result<(HeadBucketOutput, Metadata), Error> {
        perform_call(ctx, self.options.clone(), input).await
    }

    pub async fn create_bucket(
        &self,
        ctx: &CallContext,
        input: CreateBucketInput,
    ) -> Result<(CreateBucketOutput, Metadata), Error> {
        perform_call(ctx, self.options.clone(), input).await
    }

    pub async fn delete_bucket(
        &self,
        ctx: &CallContext,
        input: DeleteBucketInput,
    ) -> Result<(DeleteBucketOutput, Metadata), Error> {
        perform_call(ctx, self.options.clone(), input).await
    }

    pub async fn get_bucket_location(
        &self,
        ctx: &CallContext,
        input: GetBucketLocationInput,
    ) -> Result<(GetBucketLocationOutput, Metadata), Error> {
        perform_call(ctx, self.options.clone(), input).await
    }

    pub async fn list_buckets(
        &self,
        ctx: &CallContext,
        input: ListBucketsInput,
    ) -> Result<(ListBucketsOutput, Metadata), Error> {
        perform_call(ctx, self.options.clone(), input).await
    }

    pub async fn head_object(
        &self,
        ctx: &CallContext,
        input: HeadObjectInput,
    ) -> Result<(HeadObjectOutput, Metadata), Error> {
        perform_call(ctx, self.options.clone(), input).await
    }

    pub async fn get_object(
        &self,
        ctx: &CallContext,
        input: GetObjectInput,
    ) -> Result<(GetObjectOutput, Metadata), Error> {
        perform_call(ctx, self.options.clone(), input).await
    }

    pub async fn put_object(
        &self,
        ctx: &CallContext,
        input: PutObjectInput,
    ) -> Result<(PutObjectOutput, Metadata), Error> {
        perform_call(ctx, self.options.clone(), input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::s3::signer::AnonymousSigner;

    fn options() -> Options {
        Options::builder()
            .endpoint_host("s3.dev-local-1.example.local")
            .signing_region("dev-local-1")
            .signer(Arc::new(AnonymousSigner))
            .build()
    }

    #[test]
    fn new_defaults_the_user_agent() {
        let client = Client::new(options()).unwrap();
        assert_eq!(
            client.options().user_agent.as_deref(),
            Some(DEFAULT_USER_AGENT)
        );
    }

    #[test]
    fn explicit_user_agent_survives() {
        let mut opts = options();
        opts.user_agent = Some("custom/1.0".to_string());
        let client = Client::new(opts).unwrap();
        assert_eq!(client.options().user_agent.as_deref(), Some("custom/1.0"));
    }

    #[test]
    fn validates_host_and_region() {
        let mut opts = options();
        opts.endpoint_host = "not a host".to_string();
        assert!(matches!(opts.validate(), Err(Error::InvalidConfig(_))));

        let mut opts = options();
        opts.endpoint_host = "localhost:9000".to_string();
        assert!(opts.validate().is_ok());

        let mut opts = options();
        opts.endpoint_host = "localhost:99999".to_string();
        assert!(opts.validate().is_err());

        let mut opts = options();
        opts.signing_region = String::new();
        assert!(opts.validate().is_err());
    }

    #[test]
    fn with_options_does_not_touch_the_original() {
        let client = Client::new(options()).unwrap();
        let other = client
            .with_options(|opts| opts.use_path_style = true)
            .unwrap();

        assert!(other.options().use_path_style);
        assert!(!client.options().use_path_style);
    }
}
