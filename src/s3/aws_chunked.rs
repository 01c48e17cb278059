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

//! Payload representations for Signature V4, including the `aws-chunked`
//! content encoding used by S3 for streaming uploads.
//!
//! # Unsigned streaming format (STREAMING-UNSIGNED-PAYLOAD-TRAILER)
//!
//! ```text
//! <hex-chunk-size>\r\n
//! <chunk-data>\r\n
//! ...
//! 0\r\n
//! <trailer-name>:<trailer-value>\r\n
//! \r\n
//! ```
//!
//! # Signed streaming format (STREAMING-AWS4-HMAC-SHA256-PAYLOAD[-TRAILER])
//!
//! ```text
//! <hex-chunk-size>;chunk-signature=<sig>\r\n
//! <chunk-data>\r\n
//! ...
//! 0;chunk-signature=<final-sig>\r\n
//! <trailer-name>:<trailer-value>\r\n
//! x-amz-trailer-signature:<trailer-sig>\r\n
//! \r\n
//! ```
//!
//! The wire format uses CRLF line endings, but the canonical form hashed for
//! the trailer signature uses a single LF, per the SigV4 specification.

use crate::s3::error::Error;
use crate::s3::header_constants::{
    CONTENT_ENCODING, CONTENT_LENGTH, X_AMZ_CONTENT_SHA256, X_AMZ_DECODED_CONTENT_LENGTH,
    X_AMZ_TRAILER,
};
use crate::s3::http::HttpRequest;
use crate::s3::multimap::MultimapExt;
use crate::s3::signer::{sign_chunk, sign_trailer};
use crate::s3::utils::sha256_hash;
use bytes::{BufMut, BytesMut};

/// Chunk payload size for aws-chunked encoding (64 KiB), used for every
/// chunk except possibly the last data chunk.
const CHUNK_DATA_SIZE: usize = 64 * 1024;

/// Length of a hex encoded signature value.
const SIGNATURE_VALUE_LEN: usize = 64;

const CHUNK_SIGNATURE_PREFIX: &str = ";chunk-signature=";
const TRAILER_SIGNATURE_PREFIX: &str = "x-amz-trailer-signature:";

/// Trailing header carried after a streamed body. Both parts are non-empty.
#[derive(Clone, Debug)]
pub struct Trailer {
    name: String,
    value: String,
}

/// Body representation chosen for one signing: either the body is left in
/// place (plain), or it is rewritten into aws-chunked framing (stream).
///
/// The transformer is consulted twice. [`prepare`](Self::prepare) runs
/// before canonicalization and publishes the `x-amz-content-sha256` sentinel
/// and the content-length family of headers.
/// [`transform`](Self::transform) runs once the final header signature is
/// known and rewrites the body.
#[derive(Clone, Debug)]
pub enum PayloadTransformer {
    Plain {
        sign_body: bool,
    },
    Stream {
        sign_body: bool,
        trailer: Option<Trailer>,
    },
}

impl PayloadTransformer {
    /// Picks the representation from the signing flags and the request's
    /// `x-amz-trailer` header. A trailer header must name a header that
    /// carries the trailer value, and streaming an unsigned payload is only
    /// possible with a trailer.
    pub fn for_request(
        req: &HttpRequest,
        sign_body: bool,
        force_streaming: bool,
    ) -> Result<PayloadTransformer, Error> {
        let trailer = match req.headers.value_of(X_AMZ_TRAILER) {
            Some(name) if !name.is_empty() => {
                let name = name.clone();
                let value = req.headers.value_of(&name).cloned().unwrap_or_default();
                if value.is_empty() {
                    return Err(Error::TrailerValueMissing(name));
                }
                Some(Trailer { name, value })
            }
            _ => None,
        };

        if !sign_body && force_streaming && trailer.is_none() {
            return Err(Error::UnsignedStreamingWithoutTrailer);
        }

        if !force_streaming && trailer.is_none() {
            return Ok(PayloadTransformer::Plain { sign_body });
        }

        Ok(PayloadTransformer::Stream { sign_body, trailer })
    }

    /// Value of the `x-amz-content-sha256` header for this representation.
    fn content_sha256(&self, body: &[u8]) -> String {
        match self {
            PayloadTransformer::Plain { sign_body: false } => "UNSIGNED-PAYLOAD".to_string(),
            PayloadTransformer::Plain { sign_body: true } => sha256_hash(body),
            PayloadTransformer::Stream {
                sign_body: false, ..
            } => "STREAMING-UNSIGNED-PAYLOAD-TRAILER".to_string(),
            PayloadTransformer::Stream {
                sign_body: true,
                trailer: None,
            } => "STREAMING-AWS4-HMAC-SHA256-PAYLOAD".to_string(),
            PayloadTransformer::Stream {
                sign_body: true,
                trailer: Some(_),
            } => "STREAMING-AWS4-HMAC-SHA256-PAYLOAD-TRAILER".to_string(),
        }
    }

    /// First phase, before canonicalization: sets `x-amz-content-sha256`,
    /// and for streaming additionally appends `aws-chunked` to the content
    /// encoding, removes the trailer value header (the `x-amz-trailer` name
    /// header stays), records the original body length and replaces
    /// `Content-Length` with the transformed length.
    pub fn prepare(&self, req: &mut HttpRequest) -> Result<(), Error> {
        let content_sha256 = self.content_sha256(&req.body);

        if let PayloadTransformer::Stream { trailer, .. } = self {
            let mut content_encoding = String::from("aws-chunked");
            if let Some(actual) = req.headers.value_of(CONTENT_ENCODING) {
                if !actual.is_empty() {
                    content_encoding.push(',');
                    content_encoding.push_str(actual);
                }
            }

            let new_len = self.transformed_body_len(req.body.len());
            if let Some(trailer) = trailer {
                req.headers.delete(&trailer.name);
            }
            req.headers.set(CONTENT_ENCODING, content_encoding);
            req.headers
                .set(X_AMZ_DECODED_CONTENT_LENGTH, req.body.len().to_string());
            req.headers.set(CONTENT_LENGTH, new_len.to_string());
        }

        req.headers.set(X_AMZ_CONTENT_SHA256, content_sha256);

        Ok(())
    }

    /// Total aws-chunked body length for a decoded body length, counting
    /// every chunk frame, the terminating chunk and the trailer block. Must
    /// equal the bytes actually written by [`transform`](Self::transform).
    fn transformed_body_len(&self, decoded_len: usize) -> usize {
        let (sign_body, trailer) = match self {
            PayloadTransformer::Plain { .. } => return decoded_len,
            PayloadTransformer::Stream { sign_body, trailer } => (*sign_body, trailer.as_ref()),
        };

        const SIGNATURE_SIZE: usize = CHUNK_SIGNATURE_PREFIX.len() + SIGNATURE_VALUE_LEN;

        let mut body_len = decoded_len;

        let nb_chunk = decoded_len / CHUNK_DATA_SIZE;
        if nb_chunk > 0 {
            let mut chunk_overhead = format!("{CHUNK_DATA_SIZE:x}").len() + 2;
            if sign_body {
                chunk_overhead += SIGNATURE_SIZE;
            }
            chunk_overhead += 2;
            body_len += nb_chunk * chunk_overhead;
        }

        let remaining = decoded_len % CHUNK_DATA_SIZE;
        if remaining > 0 {
            body_len += format!("{remaining:x}").len() + 2;
            if sign_body {
                body_len += SIGNATURE_SIZE;
            }
            body_len += 2;
        }

        // Terminating zero-length chunk: "0[;chunk-signature=<sig>]\r\n"
        body_len += 1 + 2;
        if sign_body {
            body_len += SIGNATURE_SIZE;
        }

        if let Some(trailer) = trailer {
            body_len += trailer.name.len() + 1 + trailer.value.len() + 2;
            if sign_body {
                body_len += TRAILER_SIGNATURE_PREFIX.len() + SIGNATURE_VALUE_LEN + 2;
            }
            body_len += 2;
        }

        body_len
    }

    /// Second phase, after the header signature is known: rewrites the body
    /// into chunked framing. A no-op for the plain representation.
    pub fn transform(
        &self,
        req: &mut HttpRequest,
        seed_signature: &str,
        date_time: &str,
        scope: &str,
        signing_key: &[u8],
    ) {
        let (sign_body, trailer) = match self {
            PayloadTransformer::Plain { .. } => return,
            PayloadTransformer::Stream { sign_body, trailer } => (*sign_body, trailer.as_ref()),
        };

        let new_len = self.transformed_body_len(req.body.len());
        let mut buf = BytesMut::with_capacity(new_len);
        let body = req.body.clone();
        let mut previous = seed_signature.to_string();

        let mut write_chunk = |buf: &mut BytesMut, chunk: &[u8], previous: &str| -> String {
            let mut current = String::new();
            buf.put_slice(format!("{:x}", chunk.len()).as_bytes());
            if sign_body {
                current = sign_chunk(signing_key, date_time, scope, previous, &sha256_hash(chunk));
                buf.put_slice(CHUNK_SIGNATURE_PREFIX.as_bytes());
                buf.put_slice(current.as_bytes());
            }
            buf.put_slice(b"\r\n");
            if !chunk.is_empty() {
                buf.put_slice(chunk);
                buf.put_slice(b"\r\n");
            }
            current
        };

        for chunk in body.chunks(CHUNK_DATA_SIZE) {
            previous = write_chunk(&mut buf, chunk, &previous);
        }
        previous = write_chunk(&mut buf, &[], &previous);

        if let Some(trailer) = trailer {
            let trailer_line = format!("{}:{}", trailer.name, trailer.value);
            buf.put_slice(trailer_line.as_bytes());
            buf.put_slice(b"\r\n");
            if sign_body {
                // The canonical trailer form ends with LF, not CRLF.
                let trailer_hash = sha256_hash(format!("{trailer_line}\n").as_bytes());
                let signature =
                    sign_trailer(signing_key, date_time, scope, &previous, &trailer_hash);
                buf.put_slice(TRAILER_SIGNATURE_PREFIX.as_bytes());
                buf.put_slice(signature.as_bytes());
                buf.put_slice(b"\r\n");
            }
            buf.put_slice(b"\r\n");
        }

        debug_assert_eq!(buf.len(), new_len);

        req.headers.set(CONTENT_LENGTH, buf.len().to_string());
        req.body = buf.freeze();
    }
}
