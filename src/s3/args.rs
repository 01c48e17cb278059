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

//! Argument structs of every supported S3 operation, with their HTTP
//! marshaling.

use crate::s3::error::Error;
use crate::s3::header_constants::*;
use crate::s3::http::HttpRequest;
use crate::s3::multimap::{Multimap, MultimapExt};
use crate::s3::types::{CreateBucketConfiguration, OperationInput};
use bytes::Bytes;
use http::Method;
use typed_builder::TypedBuilder;

fn set_header(headers: &mut Multimap, key: &str, value: Option<&String>) {
    if let Some(value) = value {
        headers.set(key, value.clone());
    }
}

fn set_query(query: &mut Multimap, name: &str, value: Option<&String>) {
    if let Some(value) = value {
        query.add(name, value.clone());
    }
}

/// Places a checksum either as a direct header or as a declared trailer.
/// Asking for both on the same header, or declaring a second trailer, is a
/// programmer error and fails loudly.
fn set_header_or_trailer(
    headers: &mut Multimap,
    key: &str,
    header: Option<&String>,
    trailer: Option<&String>,
) -> Result<(), Error> {
    match (header, trailer) {
        (Some(_), Some(_)) => Err(Error::HeaderTrailerConflict(key.to_string())),
        (Some(value), None) => {
            headers.set(key, value.clone());
            Ok(())
        }
        (None, Some(value)) => {
            if let Some(actual) = headers.value_of(X_AMZ_TRAILER) {
                return Err(Error::TrailerAlreadySet(actual.clone()));
            }
            headers.set(X_AMZ_TRAILER, key);
            headers.set(key, value.clone());
            Ok(())
        }
        (None, None) => Ok(()),
    }
}

#[derive(Clone, Debug, Default, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct HeadBucketInput {
    /// Bucket is mandatory
    #[builder(!default, setter(!strip_option))]
    pub bucket: String,

    pub expected_bucket_owner: Option<String>,
}

impl OperationInput for HeadBucketInput {
    fn marshal_http(&self, req: &mut HttpRequest) -> Result<(), Error> {
        req.method = Method::HEAD;

        set_header(
            &mut req.headers,
            X_AMZ_EXPECTED_BUCKET_OWNER,
            self.expected_bucket_owner.as_ref(),
        );

        Ok(())
    }

    fn bucket(&self) -> Option<&str> {
        Some(&self.bucket)
    }
}

#[derive(Clone, Debug, Default, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct CreateBucketInput {
    /// Bucket is mandatory
    #[builder(!default, setter(!strip_option))]
    pub bucket: String,

    pub acl: Option<String>,
    pub grant_full_control: Option<String>,
    pub grant_read: Option<String>,
    pub grant_read_acp: Option<String>,
    pub grant_write: Option<String>,
    pub grant_write_acp: Option<String>,
    pub object_lock_enabled_for_bucket: Option<String>,
    pub object_ownership: Option<String>,

    #[builder(setter(!into))]
    pub create_bucket_configuration: Option<CreateBucketConfiguration>,
}

impl OperationInput for CreateBucketInput {
    fn marshal_http(&self, req: &mut HttpRequest) -> Result<(), Error> {
        req.method = Method::PUT;

        set_header(&mut req.headers, X_AMZ_ACL, self.acl.as_ref());
        set_header(
            &mut req.headers,
            X_AMZ_GRANT_FULL_CONTROL,
            self.grant_full_control.as_ref(),
        );
        set_header(&mut req.headers, X_AMZ_GRANT_READ, self.grant_read.as_ref());
        set_header(
            &mut req.headers,
            X_AMZ_GRANT_READ_ACP,
            self.grant_read_acp.as_ref(),
        );
        set_header(&mut req.headers, X_AMZ_GRANT_WRITE, self.grant_write.as_ref());
        set_header(
            &mut req.headers,
            X_AMZ_GRANT_WRITE_ACP,
            self.grant_write_acp.as_ref(),
        );
        set_header(
            &mut req.headers,
            X_AMZ_BUCKET_OBJECT_LOCK_ENABLED,
            self.object_lock_enabled_for_bucket.as_ref(),
        );
        set_header(
            &mut req.headers,
            X_AMZ_OBJECT_OWNERSHIP,
            self.object_ownership.as_ref(),
        );

        if let Some(config) = &self.create_bucket_configuration {
            req.set_body(Bytes::from(config.to_xml()));
        }

        Ok(())
    }

    fn bucket(&self) -> Option<&str> {
        Some(&self.bucket)
    }
}

#[derive(Clone, Debug, Default, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct DeleteBucketInput {
    /// Bucket is mandatory
    #[builder(!default, setter(!strip_option))]
    pub bucket: String,

    pub expected_bucket_owner: Option<String>,
}

impl OperationInput for DeleteBucketInput {
    fn marshal_http(&self, req: &mut HttpRequest) -> Result<(), Error> {
        req.method = Method::DELETE;

        set_header(
            &mut req.headers,
            X_AMZ_EXPECTED_BUCKET_OWNER,
            self.expected_bucket_owner.as_ref(),
        );

        Ok(())
    }

    fn bucket(&self) -> Option<&str> {
        Some(&self.bucket)
    }
}

#[derive(Clone, Debug, Default, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct GetBucketLocationInput {
    /// Bucket is mandatory
    #[builder(!default, setter(!strip_option))]
    pub bucket: String,

    pub expected_bucket_owner: Option<String>,
}

impl OperationInput for GetBucketLocationInput {
    fn marshal_http(&self, req: &mut HttpRequest) -> Result<(), Error> {
        req.method = Method::GET;

        req.query.add(QUERY_LOCATION, "");

        set_header(
            &mut req.headers,
            X_AMZ_EXPECTED_BUCKET_OWNER,
            self.expected_bucket_owner.as_ref(),
        );

        Ok(())
    }

    fn bucket(&self) -> Option<&str> {
        Some(&self.bucket)
    }
}

#[derive(Clone, Debug, Default, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct ListBucketsInput {
    pub bucket_region: Option<String>,
    pub continuation_token: Option<String>,
    pub max_buckets: Option<String>,
    pub prefix: Option<String>,
}

impl OperationInput for ListBucketsInput {
    fn marshal_http(&self, req: &mut HttpRequest) -> Result<(), Error> {
        req.method = Method::GET;

        set_query(&mut req.query, QUERY_BUCKET_REGION, self.bucket_region.as_ref());
        set_query(
            &mut req.query,
            QUERY_CONTINUATION_TOKEN,
            self.continuation_token.as_ref(),
        );
        set_query(&mut req.query, QUERY_MAX_BUCKETS, self.max_buckets.as_ref());
        set_query(&mut req.query, QUERY_PREFIX, self.prefix.as_ref());

        Ok(())
    }
}

#[derive(Clone, Debug, Default, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct HeadObjectInput {
    /// Bucket is mandatory
    #[builder(!default, setter(!strip_option))]
    pub bucket: String,

    /// Key is mandatory
    #[builder(!default, setter(!strip_option))]
    pub key: String,

    pub part_number: Option<String>,
    pub version_id: Option<String>,

    pub if_match: Option<String>,
    pub if_modified_since: Option<String>,
    pub if_none_match: Option<String>,
    pub if_unmodified_since: Option<String>,
    pub range: Option<String>,
    pub sse_customer_algorithm: Option<String>,
    pub sse_customer_key: Option<String>,
    pub sse_customer_key_md5: Option<String>,
    pub request_payer: Option<String>,
    pub expected_bucket_owner: Option<String>,
    pub checksum_mode: Option<String>,
}

impl OperationInput for HeadObjectInput {
    fn marshal_http(&self, req: &mut HttpRequest) -> Result<(), Error> {
        req.method = Method::HEAD;

        set_query(&mut req.query, QUERY_PART_NUMBER, self.part_number.as_ref());
        set_query(&mut req.query, QUERY_VERSION_ID, self.version_id.as_ref());

        set_header(&mut req.headers, IF_MATCH, self.if_match.as_ref());
        set_header(
            &mut req.headers,
            IF_MODIFIED_SINCE,
            self.if_modified_since.as_ref(),
        );
        set_header(&mut req.headers, IF_NONE_MATCH, self.if_none_match.as_ref());
        set_header(
            &mut req.headers,
            IF_UNMODIFIED_SINCE,
            self.if_unmodified_since.as_ref(),
        );
        set_header(&mut req.headers, RANGE, self.range.as_ref());
        set_header(
            &mut req.headers,
            X_AMZ_SSE_CUSTOMER_ALGORITHM,
            self.sse_customer_algorithm.as_ref(),
        );
        set_header(
            &mut req.headers,
            X_AMZ_SSE_CUSTOMER_KEY,
            self.sse_customer_key.as_ref(),
        );
        set_header(
            &mut req.headers,
            X_AMZ_SSE_CUSTOMER_KEY_MD5,
            self.sse_customer_key_md5.as_ref(),
        );
        set_header(&mut req.headers, X_AMZ_REQUEST_PAYER, self.request_payer.as_ref());
        set_header(
            &mut req.headers,
            X_AMZ_EXPECTED_BUCKET_OWNER,
            self.expected_bucket_owner.as_ref(),
        );
        set_header(&mut req.headers, X_AMZ_CHECKSUM_MODE, self.checksum_mode.as_ref());

        Ok(())
    }

    fn bucket(&self) -> Option<&str> {
        Some(&self.bucket)
    }

    fn key(&self) -> Option<&str> {
        Some(&self.key)
    }
}

#[derive(Clone, Debug, Default, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct GetObjectInput {
    /// Bucket is mandatory
    #[builder(!default, setter(!strip_option))]
    pub bucket: String,

    /// Key is mandatory
    #[builder(!default, setter(!strip_option))]
    pub key: String,

    pub part_number: Option<String>,
    pub response_cache_control: Option<String>,
    pub response_content_disposition: Option<String>,
    pub response_content_encoding: Option<String>,
    pub response_content_language: Option<String>,
    pub response_content_type: Option<String>,
    pub response_expires: Option<String>,
    pub version_id: Option<String>,

    pub if_match: Option<String>,
    pub if_modified_since: Option<String>,
    pub if_none_match: Option<String>,
    pub if_unmodified_since: Option<String>,
    pub range: Option<String>,
    pub sse_customer_algorithm: Option<String>,
    pub sse_customer_key: Option<String>,
    pub sse_customer_key_md5: Option<String>,
    pub request_payer: Option<String>,
    pub expected_bucket_owner: Option<String>,
    pub checksum_mode: Option<String>,
}

impl OperationInput for GetObjectInput {
    fn marshal_http(&self, req: &mut HttpRequest) -> Result<(), Error> {
        req.method = Method::GET;

        set_query(&mut req.query, QUERY_PART_NUMBER, self.part_number.as_ref());
        set_query(
            &mut req.query,
            QUERY_RESPONSE_CACHE_CONTROL,
            self.response_cache_control.as_ref(),
        );
        set_query(
            &mut req.query,
            QUERY_RESPONSE_CONTENT_DISPOSITION,
            self.response_content_disposition.as_ref(),
        );
        set_query(
            &mut req.query,
            QUERY_RESPONSE_CONTENT_ENCODING,
            self.response_content_encoding.as_ref(),
        );
        set_query(
            &mut req.query,
            QUERY_RESPONSE_CONTENT_LANGUAGE,
            self.response_content_language.as_ref(),
        );
        set_query(
            &mut req.query,
            QUERY_RESPONSE_CONTENT_TYPE,
            self.response_content_type.as_ref(),
        );
        set_query(
            &mut req.query,
            QUERY_RESPONSE_EXPIRES,
            self.response_expires.as_ref(),
        );
        set_query(&mut req.query, QUERY_VERSION_ID, self.version_id.as_ref());

        set_header(&mut req.headers, IF_MATCH, self.if_match.as_ref());
        set_header(
            &mut req.headers,
            IF_MODIFIED_SINCE,
            self.if_modified_since.as_ref(),
        );
        set_header(&mut req.headers, IF_NONE_MATCH, self.if_none_match.as_ref());
        set_header(
            &mut req.headers,
            IF_UNMODIFIED_SINCE,
            self.if_unmodified_since.as_ref(),
        );
        set_header(&mut req.headers, RANGE, self.range.as_ref());
        set_header(
            &mut req.headers,
            X_AMZ_SSE_CUSTOMER_ALGORITHM,
            self.sse_customer_algorithm.as_ref(),
        );
        set_header(
            &mut req.headers,
            X_AMZ_SSE_CUSTOMER_KEY,
            self.sse_customer_key.as_ref(),
        );
        set_header(
            &mut req.headers,
            X_AMZ_SSE_CUSTOMER_KEY_MD5,
            self.sse_customer_key_md5.as_ref(),
        );
        set_header(&mut req.headers, X_AMZ_REQUEST_PAYER, self.request_payer.as_ref());
        set_header(
            &mut req.headers,
            X_AMZ_EXPECTED_BUCKET_OWNER,
            self.expected_bucket_owner.as_ref(),
        );
        set_header(&mut req.headers, X_AMZ_CHECKSUM_MODE, self.checksum_mode.as_ref());

        Ok(())
    }

    fn bucket(&self) -> Option<&str> {
        Some(&self.bucket)
    }

    fn key(&self) -> Option<&str> {
        Some(&self.key)
    }
}

#[derive(Clone, Debug, Default, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct PutObjectInput {
    /// Bucket is mandatory
    #[builder(!default, setter(!strip_option))]
    pub bucket: String,

    /// Key is mandatory
    #[builder(!default, setter(!strip_option))]
    pub key: String,

    #[builder(setter(!into))]
    pub body: Option<Bytes>,

    pub cache_control: Option<String>,
    pub content_disposition: Option<String>,
    pub content_encoding: Option<String>,
    pub content_language: Option<String>,
    pub content_md5: Option<String>,
    pub content_type: Option<String>,
    pub expires: Option<String>,
    pub if_match: Option<String>,
    pub if_none_match: Option<String>,

    pub acl: Option<String>,
    pub checksum_crc32: Option<String>,
    pub checksum_crc32c: Option<String>,
    pub checksum_crc64nvme: Option<String>,
    pub checksum_sha1: Option<String>,
    pub checksum_sha256: Option<String>,
    pub expected_bucket_owner: Option<String>,
    pub grant_full_control: Option<String>,
    pub grant_read: Option<String>,
    pub grant_read_acp: Option<String>,
    pub grant_write_acp: Option<String>,
    pub object_lock_legal_hold_status: Option<String>,
    pub object_lock_mode: Option<String>,
    pub object_lock_retain_until_date: Option<String>,
    pub request_payer: Option<String>,
    pub checksum_algorithm: Option<String>,
    pub sse_kms_key_id: Option<String>,
    pub bucket_key_enabled: Option<String>,
    pub sse_kms_encryption_context: Option<String>,
    pub sse_customer_algorithm: Option<String>,
    pub sse_customer_key_md5: Option<String>,
    pub sse_customer_key: Option<String>,
    pub server_side_encryption: Option<String>,
    pub storage_class: Option<String>,
    pub tagging: Option<String>,
    pub website_redirect_location: Option<String>,
    pub write_offset_bytes: Option<String>,

    pub trailer_checksum_crc32: Option<String>,
    pub trailer_checksum_crc32c: Option<String>,
    pub trailer_checksum_crc64nvme: Option<String>,
    pub trailer_checksum_sha1: Option<String>,
    pub trailer_checksum_sha256: Option<String>,
}

impl OperationInput for PutObjectInput {
    fn marshal_http(&self, req: &mut HttpRequest) -> Result<(), Error> {
        req.method = Method::PUT;

        if let Some(body) = &self.body {
            req.set_body(body.clone());
        }

        set_header(&mut req.headers, CACHE_CONTROL, self.cache_control.as_ref());
        set_header(
            &mut req.headers,
            CONTENT_DISPOSITION,
            self.content_disposition.as_ref(),
        );
        set_header(&mut req.headers, CONTENT_ENCODING, self.content_encoding.as_ref());
        set_header(&mut req.headers, CONTENT_LANGUAGE, self.content_language.as_ref());
        set_header(&mut req.headers, CONTENT_MD5, self.content_md5.as_ref());
        set_header(&mut req.headers, CONTENT_TYPE, self.content_type.as_ref());
        set_header(&mut req.headers, EXPIRES, self.expires.as_ref());
        set_header(&mut req.headers, IF_MATCH, self.if_match.as_ref());
        set_header(&mut req.headers, IF_NONE_MATCH, self.if_none_match.as_ref());

        set_header(&mut req.headers, X_AMZ_ACL, self.acl.as_ref());
        set_header_or_trailer(
            &mut req.headers,
            X_AMZ_CHECKSUM_CRC32,
            self.checksum_crc32.as_ref(),
            self.trailer_checksum_crc32.as_ref(),
        )?;
        set_header_or_trailer(
            &mut req.headers,
            X_AMZ_CHECKSUM_CRC32C,
            self.checksum_crc32c.as_ref(),
            self.trailer_checksum_crc32c.as_ref(),
        )?;
        set_header_or_trailer(
            &mut req.headers,
            X_AMZ_CHECKSUM_CRC64NVME,
            self.checksum_crc64nvme.as_ref(),
            self.trailer_checksum_crc64nvme.as_ref(),
        )?;
        set_header_or_trailer(
            &mut req.headers,
            X_AMZ_CHECKSUM_SHA1,
            self.checksum_sha1.as_ref(),
            self.trailer_checksum_sha1.as_ref(),
        )?;
        set_header_or_trailer(
            &mut req.headers,
            X_AMZ_CHECKSUM_SHA256,
            self.checksum_sha256.as_ref(),
            self.trailer_checksum_sha256.as_ref(),
        )?;
        set_header(
            &mut req.headers,
            X_AMZ_EXPECTED_BUCKET_OWNER,
            self.expected_bucket_owner.as_ref(),
        );
        set_header(
            &mut req.headers,
            X_AMZ_GRANT_FULL_CONTROL,
            self.grant_full_control.as_ref(),
        );
        set_header(&mut req.headers, X_AMZ_GRANT_READ, self.grant_read.as_ref());
        set_header(
            &mut req.headers,
            X_AMZ_GRANT_READ_ACP,
            self.grant_read_acp.as_ref(),
        );
        set_header(
            &mut req.headers,
            X_AMZ_GRANT_WRITE_ACP,
            self.grant_write_acp.as_ref(),
        );
        set_header(
            &mut req.headers,
            X_AMZ_OBJECT_LOCK_LEGAL_HOLD,
            self.object_lock_legal_hold_status.as_ref(),
        );
        set_header(
            &mut req.headers,
            X_AMZ_OBJECT_LOCK_MODE,
            self.object_lock_mode.as_ref(),
        );
        set_header(
            &mut req.headers,
            X_AMZ_OBJECT_LOCK_RETAIN_UNTIL_DATE,
            self.object_lock_retain_until_date.as_ref(),
        );
        set_header(&mut req.headers, X_AMZ_REQUEST_PAYER, self.request_payer.as_ref());
        set_header(
            &mut req.headers,
            X_AMZ_CHECKSUM_ALGORITHM,
            self.checksum_algorithm.as_ref(),
        );
        set_header(&mut req.headers, X_AMZ_SSE_KMS_KEY_ID, self.sse_kms_key_id.as_ref());
        set_header(
            &mut req.headers,
            X_AMZ_SSE_BUCKET_KEY_ENABLED,
            self.bucket_key_enabled.as_ref(),
        );
        set_header(
            &mut req.headers,
            X_AMZ_SSE_KMS_ENCRYPTION_CONTEXT,
            self.sse_kms_encryption_context.as_ref(),
        );
        set_header(
            &mut req.headers,
            X_AMZ_SSE_CUSTOMER_ALGORITHM,
            self.sse_customer_algorithm.as_ref(),
        );
        set_header(
            &mut req.headers,
            X_AMZ_SSE_CUSTOMER_KEY_MD5,
            self.sse_customer_key_md5.as_ref(),
        );
        set_header(
            &mut req.headers,
            X_AMZ_SSE_CUSTOMER_KEY,
            self.sse_customer_key.as_ref(),
        );
        set_header(&mut req.headers, X_AMZ_SSE, self.server_side_encryption.as_ref());
        set_header(&mut req.headers, X_AMZ_STORAGE_CLASS, self.storage_class.as_ref());
        set_header(&mut req.headers, X_AMZ_TAGGING, self.tagging.as_ref());
        set_header(
            &mut req.headers,
            X_AMZ_WEBSITE_REDIRECT_LOCATION,
            self.website_redirect_location.as_ref(),
        );
        set_header(
            &mut req.headers,
            X_AMZ_WRITE_OFFSET_BYTES,
            self.write_offset_bytes.as_ref(),
        );

        Ok(())
    }

    fn bucket(&self) -> Option<&str> {
        Some(&self.bucket)
    }

    fn key(&self) -> Option<&str> {
        Some(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_object_marshals_body_and_checksum_header() {
        let input = PutObjectInput::builder()
            .bucket("the-bucket")
            .key("test.txt")
            .body(Bytes::from_static(b"Welcome to S3."))
            .checksum_crc64nvme("ntuPBsmdl18=")
            .build();

        let mut req = HttpRequest::default();
        input.marshal_http(&mut req).unwrap();

        assert_eq!(req.method, Method::PUT);
        assert_eq!(req.body, Bytes::from_static(b"Welcome to S3."));
        assert_eq!(req.headers.value_of(CONTENT_LENGTH), Some(&"14".to_string()));
        assert_eq!(
            req.headers.value_of(X_AMZ_CHECKSUM_CRC64NVME),
            Some(&"ntuPBsmdl18=".to_string())
        );
        assert_eq!(req.headers.value_of(X_AMZ_TRAILER), None);
    }

    #[test]
    fn put_object_declares_trailer_checksum() {
        let input = PutObjectInput::builder()
            .bucket("the-bucket")
            .key("test.txt")
            .body(Bytes::from_static(b"Welcome to S3."))
            .trailer_checksum_crc64nvme("ntuPBsmdl18=")
            .build();

        let mut req = HttpRequest::default();
        input.marshal_http(&mut req).unwrap();

        assert_eq!(
            req.headers.value_of(X_AMZ_TRAILER),
            Some(&X_AMZ_CHECKSUM_CRC64NVME.to_string())
        );
        assert_eq!(
            req.headers.value_of(X_AMZ_CHECKSUM_CRC64NVME),
            Some(&"ntuPBsmdl18=".to_string())
        );
    }

    #[test]
    fn put_object_rejects_header_and_trailer_for_same_checksum() {
        let input = PutObjectInput::builder()
            .bucket("the-bucket")
            .key("test.txt")
            .checksum_crc32("sK4Y7A==")
            .trailer_checksum_crc32("sK4Y7A==")
            .build();

        let mut req = HttpRequest::default();
        let err = input.marshal_http(&mut req).unwrap_err();
        assert!(matches!(err, Error::HeaderTrailerConflict(key) if key == X_AMZ_CHECKSUM_CRC32));
    }

    #[test]
    fn put_object_rejects_two_trailers() {
        let input = PutObjectInput::builder()
            .bucket("the-bucket")
            .key("test.txt")
            .trailer_checksum_crc32("sK4Y7A==")
            .trailer_checksum_sha256("2jmj7l5rSw0yVb/vlWAYkK/YBwk=")
            .build();

        let mut req = HttpRequest::default();
        let err = input.marshal_http(&mut req).unwrap_err();
        assert!(matches!(err, Error::TrailerAlreadySet(name) if name == X_AMZ_CHECKSUM_CRC32));
    }

    #[test]
    fn get_object_marshals_query_and_headers() {
        let input = GetObjectInput::builder()
            .bucket("the-bucket")
            .key("the-key")
            .version_id("v1")
            .range("bytes=0-9")
            .build();

        let mut req = HttpRequest::default();
        input.marshal_http(&mut req).unwrap();

        assert_eq!(req.method, Method::GET);
        assert_eq!(req.query.value_of(QUERY_VERSION_ID), Some(&"v1".to_string()));
        assert_eq!(req.headers.value_of(RANGE), Some(&"bytes=0-9".to_string()));
    }

    #[test]
    fn get_bucket_location_marshals_location_query() {
        let input = GetBucketLocationInput::builder().bucket("the-bucket").build();

        let mut req = HttpRequest::default();
        input.marshal_http(&mut req).unwrap();

        assert_eq!(req.query.value_of(QUERY_LOCATION), Some(&"".to_string()));
        assert_eq!(req.query.get_canonical_query_string(), "location=");
    }

    #[test]
    fn create_bucket_marshals_configuration_body() {
        use crate::s3::types::CreateBucketConfiguration;

        let input = CreateBucketInput::builder()
            .bucket("the-bucket")
            .acl("private")
            .create_bucket_configuration(CreateBucketConfiguration {
                location_constraint: Some("eu-west-3".to_string()),
            })
            .build();

        let mut req = HttpRequest::default();
        input.marshal_http(&mut req).unwrap();

        assert_eq!(req.method, Method::PUT);
        assert_eq!(req.headers.value_of(X_AMZ_ACL), Some(&"private".to_string()));
        assert_eq!(
            req.body,
            Bytes::from_static(
                b"<CreateBucketConfiguration><LocationConstraint>eu-west-3</LocationConstraint></CreateBucketConfiguration>"
            )
        );
    }

    #[test]
    fn capability_accessors() {
        let head = HeadBucketInput::builder().bucket("b").build();
        assert_eq!(head.bucket(), Some("b"));
        assert_eq!(head.key(), None);

        let get = GetObjectInput::builder().bucket("b").key("k").build();
        assert_eq!(get.bucket(), Some("b"));
        assert_eq!(get.key(), Some("k"));

        let list = ListBucketsInput::default();
        assert_eq!(list.bucket(), None);
        assert_eq!(list.key(), None);
    }
}
