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

//! Output structs of every supported S3 operation, with their HTTP
//! unmarshaling. Unmarshaling is the sole judge of server success: an
//! unexpected status yields a [`ServerSideError`] directly.

use crate::s3::error::{Error, ServerSideError};
use crate::s3::header_constants::*;
use crate::s3::http::HttpResponse;
use crate::s3::multimap::{Multimap, MultimapExt};
use crate::s3::types::{ListAllMyBucketsResult, OperationOutput};
use bytes::{Buf, Bytes};
use http::StatusCode;
use xmltree::Element;

fn extract_header(headers: &Multimap, key: &str) -> Option<String> {
    headers.value_of(key).cloned()
}

#[derive(Clone, Debug, Default)]
pub struct HeadBucketOutput {
    pub access_point_alias: Option<String>,
    pub bucket_region: Option<String>,
}

impl OperationOutput for HeadBucketOutput {
    fn unmarshal_http(&mut self, resp: &HttpResponse) -> Result<(), Error> {
        if resp.status_code != StatusCode::OK {
            return Err(ServerSideError::new(resp).into());
        }

        self.bucket_region = extract_header(&resp.headers, X_AMZ_BUCKET_REGION);
        self.access_point_alias = extract_header(&resp.headers, X_AMZ_ACCESS_POINT_ALIAS);

        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
pub struct CreateBucketOutput {
    pub location: Option<String>,
}

impl OperationOutput for CreateBucketOutput {
    fn unmarshal_http(&mut self, resp: &HttpResponse) -> Result<(), Error> {
        if resp.status_code != StatusCode::OK {
            return Err(ServerSideError::new(resp).into());
        }

        self.location = extract_header(&resp.headers, LOCATION);

        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
pub struct DeleteBucketOutput;

impl OperationOutput for DeleteBucketOutput {
    fn unmarshal_http(&mut self, resp: &HttpResponse) -> Result<(), Error> {
        if resp.status_code != StatusCode::NO_CONTENT {
            return Err(ServerSideError::new(resp).into());
        }

        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
pub struct GetBucketLocationOutput {
    pub location_constraint: Option<String>,
}

impl OperationOutput for GetBucketLocationOutput {
    fn unmarshal_http(&mut self, resp: &HttpResponse) -> Result<(), Error> {
        if resp.status_code != StatusCode::OK {
            return Err(ServerSideError::new(resp).into());
        }

        let root = Element::parse(resp.body.clone().reader())
            .map_err(|e| Error::XmlError(format!("GetBucketLocation: cannot parse response body: {e}")))?;
        if root.name != "LocationConstraint" {
            return Err(Error::XmlError(format!(
                "GetBucketLocation: unexpected root element <{}>",
                root.name
            )));
        }
        self.location_constraint = root.get_text().map(|v| v.to_string());

        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
pub struct ListBucketsOutput {
    pub payload: Option<ListAllMyBucketsResult>,
}

impl OperationOutput for ListBucketsOutput {
    fn unmarshal_http(&mut self, resp: &HttpResponse) -> Result<(), Error> {
        if resp.status_code != StatusCode::OK {
            return Err(ServerSideError::new(resp).into());
        }

        let root = Element::parse(resp.body.clone().reader())
            .map_err(|e| Error::XmlError(format!("ListBuckets: cannot parse response body: {e}")))?;
        self.payload = Some(ListAllMyBucketsResult::from_xml(&root));

        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
pub struct HeadObjectOutput {
    pub accept_ranges: Option<String>,
    pub cache_control: Option<String>,
    pub content_disposition: Option<String>,
    pub content_encoding: Option<String>,
    pub content_language: Option<String>,
    pub content_length: Option<String>,
    pub content_range: Option<String>,
    pub content_type: Option<String>,
    pub etag: Option<String>,
    pub expires: Option<String>,
    pub last_modified: Option<String>,

    pub checksum_crc32: Option<String>,
    pub checksum_crc32c: Option<String>,
    pub checksum_crc64nvme: Option<String>,
    pub checksum_sha1: Option<String>,
    pub checksum_sha256: Option<String>,
    pub checksum_type: Option<String>,
    pub delete_marker: Option<String>,
    pub expiration: Option<String>,
    pub missing_meta: Option<String>,
    pub parts_count: Option<String>,
    pub object_lock_legal_hold_status: Option<String>,
    pub object_lock_mode: Option<String>,
    pub object_lock_retain_until_date: Option<String>,
    pub replication_status: Option<String>,
    pub request_charged: Option<String>,
    pub restore: Option<String>,
    pub sse_kms_key_id: Option<String>,
    pub bucket_key_enabled: Option<String>,
    pub sse_customer_algorithm: Option<String>,
    pub sse_customer_key_md5: Option<String>,
    pub server_side_encryption: Option<String>,
    pub storage_class: Option<String>,
    pub version_id: Option<String>,
    pub website_redirect_location: Option<String>,
}

impl HeadObjectOutput {
    fn extract_common(&mut self, headers: &Multimap) {
        self.accept_ranges = extract_header(headers, ACCEPT_RANGES);
        self.cache_control = extract_header(headers, CACHE_CONTROL);
        self.content_disposition = extract_header(headers, CONTENT_DISPOSITION);
        self.content_encoding = extract_header(headers, CONTENT_ENCODING);
        self.content_language = extract_header(headers, CONTENT_LANGUAGE);
        self.content_length = extract_header(headers, CONTENT_LENGTH);
        self.content_range = extract_header(headers, CONTENT_RANGE);
        self.content_type = extract_header(headers, CONTENT_TYPE);
        self.etag = extract_header(headers, ETAG);
        self.expires = extract_header(headers, EXPIRES);
        self.last_modified = extract_header(headers, LAST_MODIFIED);

        self.checksum_crc32 = extract_header(headers, X_AMZ_CHECKSUM_CRC32);
        self.checksum_crc32c = extract_header(headers, X_AMZ_CHECKSUM_CRC32C);
        self.checksum_crc64nvme = extract_header(headers, X_AMZ_CHECKSUM_CRC64NVME);
        self.checksum_sha1 = extract_header(headers, X_AMZ_CHECKSUM_SHA1);
        self.checksum_sha256 = extract_header(headers, X_AMZ_CHECKSUM_SHA256);
        self.checksum_type = extract_header(headers, X_AMZ_CHECKSUM_TYPE);
        self.delete_marker = extract_header(headers, X_AMZ_DELETE_MARKER);
        self.expiration = extract_header(headers, X_AMZ_EXPIRATION);
        self.missing_meta = extract_header(headers, X_AMZ_MISSING_META);
        self.parts_count = extract_header(headers, X_AMZ_MP_PARTS_COUNT);
        self.object_lock_legal_hold_status = extract_header(headers, X_AMZ_OBJECT_LOCK_LEGAL_HOLD);
        self.object_lock_mode = extract_header(headers, X_AMZ_OBJECT_LOCK_MODE);
        self.object_lock_retain_until_date =
            extract_header(headers, X_AMZ_OBJECT_LOCK_RETAIN_UNTIL_DATE);
        self.replication_status = extract_header(headers, X_AMZ_REPLICATION_STATUS);
        self.request_charged = extract_header(headers, X_AMZ_REQUEST_CHARGED);
        self.restore = extract_header(headers, X_AMZ_RESTORE);
        self.sse_kms_key_id = extract_header(headers, X_AMZ_SSE_KMS_KEY_ID);
        self.bucket_key_enabled = extract_header(headers, X_AMZ_SSE_BUCKET_KEY_ENABLED);
        self.sse_customer_algorithm = extract_header(headers, X_AMZ_SSE_CUSTOMER_ALGORITHM);
        self.sse_customer_key_md5 = extract_header(headers, X_AMZ_SSE_CUSTOMER_KEY_MD5);
        self.server_side_encryption = extract_header(headers, X_AMZ_SSE);
        self.storage_class = extract_header(headers, X_AMZ_STORAGE_CLASS);
        self.version_id = extract_header(headers, X_AMZ_VERSION_ID);
        self.website_redirect_location = extract_header(headers, X_AMZ_WEBSITE_REDIRECT_LOCATION);
    }
}

impl OperationOutput for HeadObjectOutput {
    fn unmarshal_http(&mut self, resp: &HttpResponse) -> Result<(), Error> {
        if resp.status_code != StatusCode::OK {
            return Err(ServerSideError::new(resp).into());
        }

        self.extract_common(&resp.headers);

        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
pub struct GetObjectOutput {
    pub body: Bytes,
    pub metadata: HeadObjectOutput,
    pub tagging_count: Option<String>,
}

impl OperationOutput for GetObjectOutput {
    fn unmarshal_http(&mut self, resp: &HttpResponse) -> Result<(), Error> {
        if resp.status_code != StatusCode::OK {
            return Err(ServerSideError::new(resp).into());
        }

        self.body = resp.body.clone();
        self.metadata.extract_common(&resp.headers);
        self.tagging_count = extract_header(&resp.headers, X_AMZ_TAGGING_COUNT);

        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
pub struct PutObjectOutput {
    pub etag: Option<String>,
    pub checksum_crc32: Option<String>,
    pub checksum_crc32c: Option<String>,
    pub checksum_crc64nvme: Option<String>,
    pub checksum_sha1: Option<String>,
    pub checksum_sha256: Option<String>,
    pub checksum_type: Option<String>,
    pub expiration: Option<String>,
    pub size: Option<String>,
    pub request_charged: Option<String>,
    pub sse_kms_key_id: Option<String>,
    pub bucket_key_enabled: Option<String>,
    pub sse_kms_encryption_context: Option<String>,
    pub sse_customer_algorithm: Option<String>,
    pub sse_customer_key_md5: Option<String>,
    pub server_side_encryption: Option<String>,
    pub version_id: Option<String>,
}

impl OperationOutput for PutObjectOutput {
    fn unmarshal_http(&mut self, resp: &HttpResponse) -> Result<(), Error> {
        if resp.status_code != StatusCode::OK {
            return Err(ServerSideError::new(resp).into());
        }

        self.etag = extract_header(&resp.headers, ETAG);
        self.checksum_crc32 = extract_header(&resp.headers, X_AMZ_CHECKSUM_CRC32);
        self.checksum_crc32c = extract_header(&resp.headers, X_AMZ_CHECKSUM_CRC32C);
        self.checksum_crc64nvme = extract_header(&resp.headers, X_AMZ_CHECKSUM_CRC64NVME);
        self.checksum_sha1 = extract_header(&resp.headers, X_AMZ_CHECKSUM_SHA1);
        self.checksum_sha256 = extract_header(&resp.headers, X_AMZ_CHECKSUM_SHA256);
        self.checksum_type = extract_header(&resp.headers, X_AMZ_CHECKSUM_TYPE);
        self.expiration = extract_header(&resp.headers, X_AMZ_EXPIRATION);
        self.size = extract_header(&resp.headers, X_AMZ_OBJECT_SIZE);
        self.request_charged = extract_header(&resp.headers, X_AMZ_REQUEST_CHARGED);
        self.sse_kms_key_id = extract_header(&resp.headers, X_AMZ_SSE_KMS_KEY_ID);
        self.bucket_key_enabled = extract_header(&resp.headers, X_AMZ_SSE_BUCKET_KEY_ENABLED);
        self.sse_kms_encryption_context =
            extract_header(&resp.headers, X_AMZ_SSE_KMS_ENCRYPTION_CONTEXT);
        self.sse_customer_algorithm = extract_header(&resp.headers, X_AMZ_SSE_CUSTOMER_ALGORITHM);
        self.sse_customer_key_md5 = extract_header(&resp.headers, X_AMZ_SSE_CUSTOMER_KEY_MD5);
        self.server_side_encryption = extract_header(&resp.headers, X_AMZ_SSE);
        self.version_id = extract_header(&resp.headers, X_AMZ_VERSION_ID);

        Ok(())
    }
}
