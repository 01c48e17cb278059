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

//! Operation traits, call context and wire payload types

use crate::s3::error::Error;
use crate::s3::http::{HttpRequest, HttpResponse};
use crate::s3::utils::get_option_text;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use xmltree::Element;

/// Cooperative cancellation handle threaded through every middleware of a
/// call. Cancelling after the response has been read has no effect.
#[derive(Clone, Debug, Default)]
pub struct CallContext {
    canceled: Arc<AtomicBool>,
}

impl CallContext {
    pub fn new() -> CallContext {
        CallContext::default()
    }

    pub fn cancel(&self) {
        self.canceled.store(true, Ordering::SeqCst);
    }

    pub fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::SeqCst)
    }
}

/// Typed input of an operation. `marshal_http` renders method, query
/// arguments, headers and body onto a request whose URI has already been
/// resolved. The `bucket`/`key` accessors advertise which location pieces
/// the operation requires; the pipeline validates them and feeds them to the
/// endpoint resolver.
pub trait OperationInput: Send + Sync {
    fn marshal_http(&self, req: &mut HttpRequest) -> Result<(), Error>;

    fn bucket(&self) -> Option<&str> {
        None
    }

    fn key(&self) -> Option<&str> {
        None
    }
}

/// Typed output of an operation. `unmarshal_http` is the sole judge of
/// whether the server call succeeded: implementations return a
/// [`ServerSideError`](crate::s3::error::ServerSideError) for unexpected
/// statuses and extract headers/body into the typed output otherwise.
pub trait OperationOutput: Send + Sync {
    fn unmarshal_http(&mut self, resp: &HttpResponse) -> Result<(), Error>;
}

#[derive(Clone, Debug, Default)]
pub struct Bucket {
    pub name: Option<String>,
    pub creation_date: Option<String>,
    pub bucket_region: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct Owner {
    pub id: Option<String>,
    pub display_name: Option<String>,
}

/// Payload of the ListBuckets response.
#[derive(Clone, Debug, Default)]
pub struct ListAllMyBucketsResult {
    pub buckets: Vec<Bucket>,
    pub owner: Option<Owner>,
    pub continuation_token: Option<String>,
    pub prefix: Option<String>,
}

impl ListAllMyBucketsResult {
    pub fn from_xml(root: &Element) -> ListAllMyBucketsResult {
        let mut ret = ListAllMyBucketsResult {
            continuation_token: get_option_text(root, "ContinuationToken"),
            prefix: get_option_text(root, "Prefix"),
            ..Default::default()
        };

        if let Some(buckets) = root.get_child("Buckets") {
            for child in buckets.children.iter().filter_map(|c| c.as_element()) {
                if child.name != "Bucket" {
                    continue;
                }
                ret.buckets.push(Bucket {
                    name: get_option_text(child, "Name"),
                    creation_date: get_option_text(child, "CreationDate"),
                    bucket_region: get_option_text(child, "BucketRegion"),
                });
            }
        }

        if let Some(owner) = root.get_child("Owner") {
            ret.owner = Some(Owner {
                id: get_option_text(owner, "ID"),
                display_name: get_option_text(owner, "DisplayName"),
            });
        }

        ret
    }
}

/// Bucket creation parameters carried as the CreateBucket request body.
#[derive(Clone, Debug, Default)]
pub struct CreateBucketConfiguration {
    pub location_constraint: Option<String>,
}

impl CreateBucketConfiguration {
    pub fn to_xml(&self) -> String {
        let mut ret = String::from("<CreateBucketConfiguration>");
        if let Some(v) = &self.location_constraint {
            ret.push_str("<LocationConstraint>");
            ret.push_str(v);
            ret.push_str("</LocationConstraint>");
        }
        ret.push_str("</CreateBucketConfiguration>");
        ret
    }
}
