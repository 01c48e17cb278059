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

pub const ACCEPT_RANGES: &str = "Accept-Ranges";
pub const AUTHORIZATION: &str = "Authorization";
pub const CACHE_CONTROL: &str = "Cache-Control";
pub const CONTENT_DISPOSITION: &str = "Content-Disposition";
pub const CONTENT_ENCODING: &str = "Content-Encoding";
pub const CONTENT_LANGUAGE: &str = "Content-Language";
pub const CONTENT_LENGTH: &str = "Content-Length";
pub const CONTENT_MD5: &str = "Content-MD5";
pub const CONTENT_RANGE: &str = "Content-Range";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const ETAG: &str = "ETag";
pub const EXPIRES: &str = "Expires";
pub const HOST: &str = "Host";
pub const IF_MATCH: &str = "If-Match";
pub const IF_MODIFIED_SINCE: &str = "If-Modified-Since";
pub const IF_NONE_MATCH: &str = "If-None-Match";
pub const IF_UNMODIFIED_SINCE: &str = "If-Unmodified-Since";
pub const LAST_MODIFIED: &str = "Last-Modified";
pub const LOCATION: &str = "Location";
pub const RANGE: &str = "Range";
pub const USER_AGENT: &str = "User-Agent";

// The x-amz family is kept lowercase: the signer and the trailer machinery
// compare these names literally against canonicalized header keys.
pub const X_AMZ_ACCESS_POINT_ALIAS: &str = "x-amz-access-point-alias";
pub const X_AMZ_ACL: &str = "x-amz-acl";
pub const X_AMZ_BUCKET_OBJECT_LOCK_ENABLED: &str = "x-amz-bucket-object-lock-enabled";
pub const X_AMZ_BUCKET_REGION: &str = "x-amz-bucket-region";
pub const X_AMZ_CHECKSUM_ALGORITHM: &str = "x-amz-sdk-checksum-algorithm";
pub const X_AMZ_CHECKSUM_CRC32: &str = "x-amz-checksum-crc32";
pub const X_AMZ_CHECKSUM_CRC32C: &str = "x-amz-checksum-crc32c";
pub const X_AMZ_CHECKSUM_CRC64NVME: &str = "x-amz-checksum-crc64nvme";
pub const X_AMZ_CHECKSUM_MODE: &str = "x-amz-checksum-mode";
pub const X_AMZ_CHECKSUM_SHA1: &str = "x-amz-checksum-sha1";
pub const X_AMZ_CHECKSUM_SHA256: &str = "x-amz-checksum-sha256";
pub const X_AMZ_CHECKSUM_TYPE: &str = "x-amz-checksum-type";
pub const X_AMZ_CONTENT_SHA256: &str = "x-amz-content-sha256";
pub const X_AMZ_DATE: &str = "x-amz-date";
pub const X_AMZ_DECODED_CONTENT_LENGTH: &str = "x-amz-decoded-content-length";
pub const X_AMZ_DELETE_MARKER: &str = "x-amz-delete-marker";
pub const X_AMZ_EXPECTED_BUCKET_OWNER: &str = "x-amz-expected-bucket-owner";
pub const X_AMZ_EXPIRATION: &str = "x-amz-expiration";
pub const X_AMZ_GRANT_FULL_CONTROL: &str = "x-amz-grant-full-control";
pub const X_AMZ_GRANT_READ: &str = "x-amz-grant-read";
pub const X_AMZ_GRANT_READ_ACP: &str = "x-amz-grant-read-acp";
pub const X_AMZ_GRANT_WRITE: &str = "x-amz-grant-write";
pub const X_AMZ_GRANT_WRITE_ACP: &str = "x-amz-grant-write-acp";
pub const X_AMZ_MISSING_META: &str = "x-amz-missing-meta";
pub const X_AMZ_MP_PARTS_COUNT: &str = "x-amz-mp-parts-count";
pub const X_AMZ_OBJECT_LOCK_LEGAL_HOLD: &str = "x-amz-object-lock-legal-hold";
pub const X_AMZ_OBJECT_LOCK_MODE: &str = "x-amz-object-lock-mode";
pub const X_AMZ_OBJECT_LOCK_RETAIN_UNTIL_DATE: &str = "x-amz-object-lock-retain-until-date";
pub const X_AMZ_OBJECT_OWNERSHIP: &str = "x-amz-object-ownership";
pub const X_AMZ_OBJECT_SIZE: &str = "x-amz-object-size";
pub const X_AMZ_REPLICATION_STATUS: &str = "x-amz-replication-status";
pub const X_AMZ_REQUEST_CHARGED: &str = "x-amz-request-charged";
pub const X_AMZ_REQUEST_ID: &str = "x-amz-request-id";
pub const X_AMZ_REQUEST_PAYER: &str = "x-amz-request-payer";
pub const X_AMZ_RESTORE: &str = "x-amz-restore";
pub const X_AMZ_SSE: &str = "x-amz-server-side-encryption";
pub const X_AMZ_SSE_BUCKET_KEY_ENABLED: &str = "x-amz-server-side-encryption-bucket-key-enabled";
pub const X_AMZ_SSE_CUSTOMER_ALGORITHM: &str = "x-amz-server-side-encryption-customer-algorithm";
pub const X_AMZ_SSE_CUSTOMER_KEY: &str = "x-amz-server-side-encryption-customer-key";
pub const X_AMZ_SSE_CUSTOMER_KEY_MD5: &str = "x-amz-server-side-encryption-customer-key-MD5";
pub const X_AMZ_SSE_KMS_ENCRYPTION_CONTEXT: &str = "x-amz-server-side-encryption-context";
pub const X_AMZ_SSE_KMS_KEY_ID: &str = "x-amz-server-side-encryption-aws-kms-key-id";
pub const X_AMZ_STORAGE_CLASS: &str = "x-amz-storage-class";
pub const X_AMZ_TAGGING: &str = "x-amz-tagging";
pub const X_AMZ_TAGGING_COUNT: &str = "x-amz-tagging-count";
pub const X_AMZ_TRAILER: &str = "x-amz-trailer";
pub const X_AMZ_VERSION_ID: &str = "x-amz-version-id";
pub const X_AMZ_WEBSITE_REDIRECT_LOCATION: &str = "x-amz-website-redirect-location";
pub const X_AMZ_WRITE_OFFSET_BYTES: &str = "x-amz-write-offset-bytes";

pub const QUERY_BUCKET_REGION: &str = "bucket-region";
pub const QUERY_CONTINUATION_TOKEN: &str = "continuation-token";
pub const QUERY_LOCATION: &str = "location";
pub const QUERY_MAX_BUCKETS: &str = "max-buckets";
pub const QUERY_PART_NUMBER: &str = "partNumber";
pub const QUERY_PREFIX: &str = "prefix";
pub const QUERY_RESPONSE_CACHE_CONTROL: &str = "response-cache-control";
pub const QUERY_RESPONSE_CONTENT_DISPOSITION: &str = "response-content-disposition";
pub const QUERY_RESPONSE_CONTENT_ENCODING: &str = "response-content-encoding";
pub const QUERY_RESPONSE_CONTENT_LANGUAGE: &str = "response-content-language";
pub const QUERY_RESPONSE_CONTENT_TYPE: &str = "response-content-type";
pub const QUERY_RESPONSE_EXPIRES: &str = "response-expires";
pub const QUERY_VERSION_ID: &str = "versionId";
