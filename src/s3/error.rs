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

//! Error definitions for S3 operations

use crate::s3::header_constants::{LOCATION, X_AMZ_REQUEST_ID};
use crate::s3::http::HttpResponse;
use crate::s3::multimap::MultimapExt;
use crate::s3::utils::{get_default_text, get_option_text};
use bytes::Buf;
use http::StatusCode;
use std::fmt;
use xmltree::Element;

/// Fault reported by the server, built from a non-success response. The raw
/// response is retained for inspection.
#[derive(Clone, Debug, Default)]
pub struct ServerSideError {
    pub code: String,
    pub message: String,
    pub request_id: String,
    pub host_id: String,
    pub status_code: u16,
    pub response: HttpResponse,
}

impl ServerSideError {
    /// Builds an error from the response. The status line and the
    /// `x-amz-request-id` header always populate the defaults; an S3
    /// `<Error>` XML body overrides them when one parses. A body that fails
    /// to parse is recorded in the message instead of failing construction.
    pub fn new(resp: &HttpResponse) -> ServerSideError {
        let status_code = resp.status_code.as_u16();

        let mut ret = ServerSideError {
            code: format!("HTTP {status_code}"),
            request_id: resp
                .headers
                .value_of(X_AMZ_REQUEST_ID)
                .cloned()
                .unwrap_or_default(),
            status_code,
            response: resp.clone(),
            ..Default::default()
        };

        if resp.status_code.is_redirection() {
            let location = resp
                .headers
                .value_of(LOCATION)
                .map(String::as_str)
                .unwrap_or_default();
            ret.message = format!("Please redirect to: {location:?}");
        } else if resp.status_code.is_informational() {
            ret.message = String::from("informational status code received");
        } else if resp.status_code == StatusCode::NO_CONTENT {
            ret.message = String::from("No content from the server");
        } else {
            match Element::parse(resp.body.clone().reader()) {
                Ok(root) => {
                    if let Some(code) = get_option_text(&root, "Code") {
                        ret.code = code;
                    }
                    ret.message = get_default_text(&root, "Message");
                    if let Some(request_id) = get_option_text(&root, "RequestId") {
                        ret.request_id = request_id;
                    }
                    ret.host_id = get_default_text(&root, "HostId");
                }
                Err(e) => ret.message = format!("unparsable error document: {e}"),
            }
        }

        ret
    }
}

impl fmt::Display for ServerSideError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "server-side error occurred")?;
        if !self.code.is_empty() {
            write!(f, " (Code:{})", self.code)?;
        }
        if !self.request_id.is_empty() {
            write!(f, " (RequestID:{})", self.request_id)?;
        }
        if !self.host_id.is_empty() {
            write!(f, " (HostID:{})", self.host_id)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for ServerSideError {}

/// Error definitions
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("client-side error occurred: {0}")]
    ClientSide(#[source] Box<Error>),
    #[error(transparent)]
    ServerSide(Box<ServerSideError>),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("bucket is mandatory")]
    BucketMandatory,
    #[error("object key is mandatory")]
    ObjectKeyMandatory,
    #[error("cannot resolve endpoint: {0}")]
    ResolveEndpoint(#[source] Box<Error>),
    #[error("invalid endpoint URL: {0}")]
    InvalidEndpoint(String),
    #[error("cannot sign the request: {0}")]
    Sign(#[source] Box<Error>),
    #[error("credentials with a non-empty access key and secret key are required")]
    CredentialsRequired,
    #[error("cannot stream an unsigned payload without trailer")]
    UnsignedStreamingWithoutTrailer,
    #[error("no value set for trailer: {0:?}")]
    TrailerValueMissing(String),
    #[error("cannot set both header and trailer for {0:?}")]
    HeaderTrailerConflict(String),
    #[error("trailer already set: {0:?}")]
    TrailerAlreadySet(String),
    #[error("{0}")]
    XmlError(String),
    #[error("operation canceled")]
    Canceled,
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    Internal(String),
}

impl From<ServerSideError> for Error {
    fn from(err: ServerSideError) -> Self {
        Error::ServerSide(Box::new(err))
    }
}

impl Error {
    /// Every error leaving the pipeline is either server-side or wrapped as
    /// client-side; anything else gets the client-side wrapper here.
    pub(crate) fn classify(self) -> Error {
        match self {
            Error::ClientSide(_) | Error::ServerSide(_) => self,
            err => Error::ClientSide(Box::new(err)),
        }
    }

    /// The server fault carried by this error, if it is one.
    pub fn server_side(&self) -> Option<&ServerSideError> {
        match self {
            Error::ServerSide(e) => Some(e),
            _ => None,
        }
    }

    /// The wrapped cause, when this is a client-side wrapper.
    pub fn client_side_cause(&self) -> Option<&Error> {
        match self {
            Error::ClientSide(e) => Some(e),
            _ => None,
        }
    }
}
