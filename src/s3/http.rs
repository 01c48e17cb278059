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

//! HTTP request/response handles and the transport seam

use crate::s3::error::Error;
use crate::s3::header_constants::CONTENT_LENGTH;
use crate::s3::multimap::{Multimap, MultimapExt};
use async_trait::async_trait;
use bytes::Bytes;
use http::{Method, StatusCode};
use lazy_static::lazy_static;
use percent_encoding::percent_decode_str;
use std::fmt;
use std::sync::Arc;

/// Represents HTTP URL
#[derive(Clone, Debug, Default)]
pub struct Url {
    pub https: bool,
    pub host: String,
    pub port: u16,
    pub path: String,
}

impl Url {
    pub fn host_header_value(&self) -> String {
        if self.port > 0 {
            return format!("{}:{}", self.host, self.port);
        }
        self.host.clone()
    }

    /// Parses an absolute URL into its parts. Parsing is deliberately
    /// lenient about the path: a resolver may hand over an object key that
    /// is not percent-encoded yet, and signing re-encodes the path anyway.
    pub fn parse(value: &str) -> Result<Url, Error> {
        let (https, rest) = if let Some(rest) = value.strip_prefix("https://") {
            (true, rest)
        } else if let Some(rest) = value.strip_prefix("http://") {
            (false, rest)
        } else {
            return Err(Error::InvalidEndpoint(format!(
                "scheme must be http or https: {value:?}"
            )));
        };

        let (authority, path) = match rest.find('/') {
            Some(i) => (&rest[..i], &rest[i..]),
            None => (rest, ""),
        };
        if authority.is_empty() {
            return Err(Error::InvalidEndpoint(format!(
                "valid host must be provided: {value:?}"
            )));
        }

        let (host, port) = match authority.rsplit_once(':') {
            Some((host, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => {
                let port = port.parse::<u16>().map_err(|_| {
                    Error::InvalidEndpoint(format!("invalid port in {value:?}"))
                })?;
                (host.to_string(), port)
            }
            _ => (authority.to_string(), 0),
        };

        // Default ports collapse so the host header stays canonical.
        let port = if (https && port == 443) || (!https && port == 80) {
            0
        } else {
            port
        };

        Ok(Url {
            https,
            host,
            port,
            path: path.to_string(),
        })
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.host.is_empty() {
            return Err(std::fmt::Error);
        }

        if self.https {
            f.write_str("https://")?;
        } else {
            f.write_str("http://")?;
        }

        f.write_str(&self.host_header_value())?;

        if !self.path.starts_with('/') {
            f.write_str("/")?;
        }
        f.write_str(&self.path)?;

        Ok(())
    }
}

/// Outgoing request handle, exclusively owned by one call for its duration.
#[derive(Clone, Debug, Default)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub query: Multimap,
    pub headers: Multimap,
    pub body: Bytes,
}

impl HttpRequest {
    /// Sets the request target from an absolute URI. Any query string is
    /// split off into the query multimap.
    pub fn set_uri(&mut self, uri: &str) -> Result<(), Error> {
        let (base, query) = match uri.split_once('?') {
            Some((base, query)) => (base, Some(query)),
            None => (uri, None),
        };

        self.url = Url::parse(base)?;

        if let Some(query) = query {
            for pair in query.split('&').filter(|p| !p.is_empty()) {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                self.query.add(percent_decode(key)?, percent_decode(value)?);
            }
        }

        Ok(())
    }

    /// Sets the request body and the matching `Content-Length` header.
    pub fn set_body(&mut self, body: Bytes) {
        self.headers.set(CONTENT_LENGTH, body.len().to_string());
        self.body = body;
    }

    pub fn host_header_value(&self) -> String {
        self.url.host_header_value()
    }

    /// Full request URL including the query string, as handed to the
    /// transport.
    pub fn full_url(&self) -> String {
        let mut url = self.url.to_string();
        if !self.query.is_empty() {
            url.push('?');
            url.push_str(&self.query.to_query_string());
        }
        url
    }
}

fn percent_decode(value: &str) -> Result<String, Error> {
    percent_decode_str(value)
        .decode_utf8()
        .map(|v| v.to_string())
        .map_err(|e| Error::InvalidEndpoint(format!("invalid query encoding: {e}")))
}

/// Incoming response handle, populated by the transport.
#[derive(Clone, Debug, Default)]
pub struct HttpResponse {
    pub status_code: StatusCode,
    pub headers: Multimap,
    pub body: Bytes,
}

/// Abstract "send request, receive response" capability. Implementations
/// must be safe for concurrent use; retry behavior belongs here, not in the
/// pipeline.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(
        &self,
        request: &HttpRequest,
        response: &mut HttpResponse,
    ) -> Result<(), Error>;
}

/// Transport backed by [`reqwest`], with no default user-agent and no
/// automatic retry.
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> ReqwestTransport {
        ReqwestTransport {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(
        &self,
        request: &HttpRequest,
        response: &mut HttpResponse,
    ) -> Result<(), Error> {
        let mut builder = self
            .client
            .request(request.method.clone(), request.full_url());
        for (key, values) in request.headers.iter_all() {
            for value in values {
                builder = builder.header(key.as_str(), value.as_str());
            }
        }
        if !request.body.is_empty() {
            builder = builder.body(request.body.clone());
        }

        let resp = builder.send().await?;

        response.status_code = resp.status();
        for (key, value) in resp.headers() {
            response
                .headers
                .add(key.as_str(), String::from_utf8_lossy(value.as_bytes()));
        }
        response.body = resp.bytes().await?;

        Ok(())
    }
}

lazy_static! {
    static ref DEFAULT_TRANSPORT: Arc<ReqwestTransport> = Arc::new(ReqwestTransport::new());
}

/// Process-wide default transport, immutable after initialization.
pub fn default_transport() -> Arc<dyn HttpTransport> {
    DEFAULT_TRANSPORT.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_absolute_url() {
        let url = Url::parse("https://examplebucket.s3.amazonaws.com/test.txt").unwrap();
        assert!(url.https);
        assert_eq!(url.host, "examplebucket.s3.amazonaws.com");
        assert_eq!(url.port, 0);
        assert_eq!(url.path, "/test.txt");
        assert_eq!(url.to_string(), "https://examplebucket.s3.amazonaws.com/test.txt");
    }

    #[test]
    fn parse_strips_default_ports() {
        assert_eq!(Url::parse("https://host:443/a").unwrap().port, 0);
        assert_eq!(Url::parse("http://host:80/a").unwrap().port, 0);
        assert_eq!(Url::parse("http://host:9000/a").unwrap().port, 9000);
        assert_eq!(
            Url::parse("http://host:9000").unwrap().host_header_value(),
            "host:9000"
        );
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(Url::parse("ftp://host/a").is_err());
        assert!(Url::parse("https:///a").is_err());
        assert!(Url::parse("https://host:99999/a").is_err());
    }

    #[test]
    fn parse_keeps_raw_object_keys() {
        let url = Url::parse("http://host/bucket/some key/with spaces").unwrap();
        assert_eq!(url.path, "/bucket/some key/with spaces");
    }

    #[test]
    fn empty_path_renders_as_root() {
        let url = Url::parse("http://the-bucket.s3.example.local").unwrap();
        assert_eq!(url.path, "");
        assert_eq!(url.to_string(), "http://the-bucket.s3.example.local/");
    }

    #[test]
    fn set_uri_splits_query() {
        let mut req = HttpRequest::default();
        req.set_uri("https://host/test.txt?x-id=PutObject&marker=a%2Fb")
            .unwrap();
        assert_eq!(req.url.path, "/test.txt");
        assert_eq!(req.query.value_of("x-id"), Some(&"PutObject".to_string()));
        assert_eq!(req.query.value_of("marker"), Some(&"a/b".to_string()));
    }

    #[test]
    fn set_body_tracks_content_length() {
        let mut req = HttpRequest::default();
        req.set_body(Bytes::from_static(b"Welcome to S3."));
        assert_eq!(req.headers.value_of(CONTENT_LENGTH), Some(&"14".to_string()));
    }
}
