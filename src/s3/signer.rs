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

//! Signature V4 for S3 API

use crate::s3::aws_chunked::PayloadTransformer;
use crate::s3::creds::Credentials;
use crate::s3::error::Error;
use crate::s3::header_constants::{AUTHORIZATION, X_AMZ_CONTENT_SHA256, X_AMZ_DATE};
use crate::s3::http::HttpRequest;
use crate::s3::multimap::MultimapExt;
use crate::s3::utils::{
    EMPTY_SHA256, UtcTime, hmac_hash, hmac_hash_hex, sha256_hash, to_amz_date, to_signer_date,
    uri_encode,
};
use log::trace;

/// Canonical artifacts of a signing, returned for diagnostics and tests.
#[derive(Clone, Debug, Default)]
pub struct SigningArtifacts {
    pub canonical_request: String,
    pub string_to_sign: String,
}

/// Request signing strategy. Implementations may mutate the request
/// (headers, body, content length); downstream observers see the final
/// authorized request.
pub trait Signer: Send + Sync {
    fn sign(
        &self,
        req: &mut HttpRequest,
        credentials: Option<&Credentials>,
        region: &str,
        now: UtcTime,
    ) -> Result<SigningArtifacts, Error>;
}

/// Signer that leaves the request untouched, for anonymous access.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnonymousSigner;

impl Signer for AnonymousSigner {
    fn sign(
        &self,
        _req: &mut HttpRequest,
        _credentials: Option<&Credentials>,
        _region: &str,
        _now: UtcTime,
    ) -> Result<SigningArtifacts, Error> {
        Ok(SigningArtifacts::default())
    }
}

/// Returns scope value of given date and region
fn get_scope(date: UtcTime, region: &str) -> String {
    format!("{}/{}/s3/aws4_request", to_signer_date(date), region)
}

/// Returns signing key of given secret key, date and region
fn get_signing_key(secret_key: &str, date: UtcTime, region: &str) -> Vec<u8> {
    let mut key: Vec<u8> = b"AWS4".to_vec();
    key.extend(secret_key.as_bytes());

    let date_key = hmac_hash(key.as_slice(), to_signer_date(date).as_bytes());
    let date_region_key = hmac_hash(date_key.as_slice(), region.as_bytes());
    let date_region_service_key = hmac_hash(date_region_key.as_slice(), b"s3");
    hmac_hash(date_region_service_key.as_slice(), b"aws4_request")
}

/// Returns string-to-sign value of given date, scope and canonical request hash
fn get_string_to_sign(date: UtcTime, scope: &str, canonical_request_hash: &str) -> String {
    format!(
        "AWS4-HMAC-SHA256\n{}\n{}\n{}",
        to_amz_date(date),
        scope,
        canonical_request_hash
    )
}

/// Returns authorization value for given access key, scope, signed headers and signature
fn get_authorization(access_key: &str, scope: &str, signed_headers: &str, signature: &str) -> String {
    format!(
        "AWS4-HMAC-SHA256 Credential={access_key}/{scope}, SignedHeaders={signed_headers}, Signature={signature}",
    )
}

fn get_canonical_request(
    req: &HttpRequest,
    canonical_headers: &str,
    signed_headers: &str,
) -> String {
    let path = if req.url.path.is_empty() {
        "/"
    } else {
        req.url.path.as_str()
    };

    format!(
        "{}\n{}\n{}\n{}\n\n{}\n{}",
        req.method,
        uri_encode(path, true),
        req.query.get_canonical_query_string(),
        canonical_headers,
        signed_headers,
        req.headers
            .value_of(X_AMZ_CONTENT_SHA256)
            .map(String::as_str)
            .unwrap_or_default(),
    )
}

/// Signs one aws-chunked body chunk, chaining from the previous signature.
pub(crate) fn sign_chunk(
    signing_key: &[u8],
    date_time: &str,
    scope: &str,
    previous_signature: &str,
    chunk_hash: &str,
) -> String {
    let string_to_sign = format!(
        "AWS4-HMAC-SHA256-PAYLOAD\n{date_time}\n{scope}\n{previous_signature}\n{EMPTY_SHA256}\n{chunk_hash}",
    );
    hmac_hash_hex(signing_key, string_to_sign.as_bytes())
}

/// Signs the trailer block closing a signed aws-chunked body.
pub(crate) fn sign_trailer(
    signing_key: &[u8],
    date_time: &str,
    scope: &str,
    previous_signature: &str,
    trailer_hash: &str,
) -> String {
    let string_to_sign = format!(
        "AWS4-HMAC-SHA256-TRAILER\n{date_time}\n{scope}\n{previous_signature}\n{trailer_hash}",
    );
    hmac_hash_hex(signing_key, string_to_sign.as_bytes())
}

/// Authorization-header SigV4 signer, optionally forcing the aws-chunked
/// streaming representation of the payload.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeaderSigner {
    sign_body: bool,
    force_streaming: bool,
}

impl HeaderSigner {
    pub fn new(sign_body: bool, force_streaming: bool) -> HeaderSigner {
        HeaderSigner {
            sign_body,
            force_streaming,
        }
    }
}

impl Signer for HeaderSigner {
    fn sign(
        &self,
        req: &mut HttpRequest,
        credentials: Option<&Credentials>,
        region: &str,
        now: UtcTime,
    ) -> Result<SigningArtifacts, Error> {
        let credentials = match credentials {
            Some(c) if !c.access_key.is_empty() && !c.secret_key.is_empty() => c,
            _ => return Err(Error::CredentialsRequired),
        };

        // `UtcTime` is UTC by construction, as S3 requires.
        let scope = get_scope(now, region);
        let transformer = PayloadTransformer::for_request(req, self.sign_body, self.force_streaming)?;

        // Sanitize the request before canonicalization.
        req.headers.delete(AUTHORIZATION);
        req.headers.delete(X_AMZ_CONTENT_SHA256);
        req.headers.set(X_AMZ_DATE, to_amz_date(now));

        transformer.prepare(req)?;

        let (signed_headers, canonical_headers) =
            req.headers.get_canonical_headers(&req.host_header_value());

        let canonical_request = get_canonical_request(req, &canonical_headers, &signed_headers);
        let string_to_sign =
            get_string_to_sign(now, &scope, &sha256_hash(canonical_request.as_bytes()));
        let signing_key = get_signing_key(&credentials.secret_key, now, region);
        let signature = hmac_hash_hex(signing_key.as_slice(), string_to_sign.as_bytes());

        req.headers.set(
            AUTHORIZATION,
            get_authorization(&credentials.access_key, &scope, &signed_headers, &signature),
        );

        transformer.transform(req, &signature, &to_amz_date(now), &scope, &signing_key);

        trace!("signed {} {} with scope {scope}", req.method, req.url.path);

        Ok(SigningArtifacts {
            canonical_request,
            string_to_sign,
        })
    }
}
