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

//! Pipeline semantics: validation order, error classification, user-agent
//! handling and cancellation.

mod common;

use bytes::Bytes;
use common::MockTransport;
use http::StatusCode;
use s3kit::s3::DEFAULT_USER_AGENT;
use s3kit::s3::args::{GetObjectInput, HeadBucketInput, ListBucketsInput, PutObjectInput};
use s3kit::s3::error::Error;
use s3kit::s3::http::{HttpResponse, HttpTransport};
use s3kit::s3::multimap::MultimapExt;
use s3kit::s3::signer::{AnonymousSigner, HeaderSigner};
use s3kit::s3::types::CallContext;
use s3kit::s3::{Client, Options};
use std::sync::Arc;

fn ok_transport() -> Arc<MockTransport> {
    MockTransport::respond_with(HttpResponse {
        status_code: StatusCode::OK,
        ..Default::default()
    })
}

fn client_with(transport: Arc<dyn HttpTransport>) -> Client {
    Client::new(
        Options::builder()
            .endpoint_host("s3.dev-local-1.s3kit.local")
            .signing_region("dev-local-1")
            .signer(Arc::new(AnonymousSigner))
            .transport(transport)
            .build(),
    )
    .unwrap()
}

#[tokio::test]
async fn missing_bucket_is_client_side_and_never_reaches_the_transport() {
    let transport = ok_transport();
    let client = client_with(transport.clone());

    let err = client
        .head_bucket(
            &CallContext::new(),
            HeadBucketInput::builder().bucket("").build(),
        )
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "client-side error occurred: bucket is mandatory"
    );
    assert!(matches!(
        err.client_side_cause(),
        Some(Error::BucketMandatory)
    ));
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn missing_bucket_takes_precedence_over_missing_key() {
    let transport = ok_transport();
    let client = client_with(transport.clone());

    let err = client
        .get_object(
            &CallContext::new(),
            GetObjectInput::builder().bucket("").key("").build(),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err.client_side_cause(),
        Some(Error::BucketMandatory)
    ));
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn missing_key_is_reported_when_the_bucket_is_present() {
    let client = client_with(ok_transport());

    let err = client
        .get_object(
            &CallContext::new(),
            GetObjectInput::builder().bucket("the-bucket").key("").build(),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err.client_side_cause(),
        Some(Error::ObjectKeyMandatory)
    ));
}

#[tokio::test]
async fn invalid_options_fail_before_the_transport() {
    let transport = ok_transport();
    let client = client_with(transport.clone());
    let client = client
        .with_options(|opts| opts.signing_region = String::new());
    // with_options re-validates, so the bad region is already rejected.
    assert!(client.is_err());

    // Smuggle the invalid snapshot through a valid client to exercise the
    // per-call validation middleware.
    let valid = client_with(transport.clone());
    let mut options = valid.options().clone();
    options.signing_region = String::new();
    let err = s3kit::s3::pipeline::perform_call::<_, s3kit::s3::response::HeadBucketOutput>(
        &CallContext::new(),
        options,
        HeadBucketInput::builder().bucket("b").build(),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err.client_side_cause(),
        Some(Error::InvalidConfig(_))
    ));
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn transport_errors_are_classified_client_side() {
    let transport = MockTransport::new(|_| {
        Err(Error::Internal("connection refused".to_string()))
    });
    let client = client_with(transport);

    let err = client
        .head_bucket(
            &CallContext::new(),
            HeadBucketInput::builder().bucket("the-bucket").build(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::ClientSide(_)));
    assert_eq!(
        err.to_string(),
        "client-side error occurred: connection refused"
    );
}

#[tokio::test]
async fn server_errors_pass_through_unwrapped() {
    let transport = MockTransport::respond_with(HttpResponse {
        status_code: StatusCode::NOT_FOUND,
        body: Bytes::from_static(
            b"<Error><Code>NoSuchBucket</Code><Message>gone</Message></Error>",
        ),
        ..Default::default()
    });
    let client = client_with(transport);

    let err = client
        .head_bucket(
            &CallContext::new(),
            HeadBucketInput::builder().bucket("the-bucket").build(),
        )
        .await
        .unwrap_err();

    let server = err.server_side().expect("expected a server-side error");
    assert_eq!(server.code, "NoSuchBucket");
    assert_eq!(server.message, "gone");
    assert_eq!(server.status_code, 404);
}

#[tokio::test]
async fn default_user_agent_is_sent() {
    let transport = ok_transport();
    let client = client_with(transport.clone());

    client
        .list_buckets(&CallContext::new(), ListBucketsInput::default())
        .await
        .unwrap();

    let requests = transport.requests();
    assert_eq!(
        requests[0].headers.value_of("User-Agent"),
        Some(&DEFAULT_USER_AGENT.to_string())
    );
}

#[tokio::test]
async fn empty_user_agent_sends_no_header() {
    let transport = ok_transport();
    let client = client_with(transport.clone())
        .with_options(|opts| opts.user_agent = Some(String::new()))
        .unwrap();

    client
        .list_buckets(&CallContext::new(), ListBucketsInput::default())
        .await
        .unwrap();

    assert_eq!(transport.requests()[0].headers.value_of("User-Agent"), None);
}

#[tokio::test]
async fn custom_user_agent_is_sent_as_given() {
    let transport = ok_transport();
    let client = client_with(transport.clone())
        .with_options(|opts| opts.user_agent = Some("custom/1.0".to_string()))
        .unwrap();

    client
        .list_buckets(&CallContext::new(), ListBucketsInput::default())
        .await
        .unwrap();

    assert_eq!(
        transport.requests()[0].headers.value_of("User-Agent"),
        Some(&"custom/1.0".to_string())
    );
}

#[tokio::test]
async fn cancellation_before_the_call_never_reaches_the_transport() {
    let transport = ok_transport();
    let client = client_with(transport.clone());

    let ctx = CallContext::new();
    ctx.cancel();

    let err = client
        .list_buckets(&ctx, ListBucketsInput::default())
        .await
        .unwrap_err();

    assert!(matches!(err.client_side_cause(), Some(Error::Canceled)));
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn cancellation_after_the_response_is_ignored() {
    let ctx = CallContext::new();
    let cancel_ctx = ctx.clone();
    let transport = MockTransport::new(move |_| {
        // Cancel while the "network" round-trip is in flight: the response
        // still comes back and must win over the late cancellation.
        cancel_ctx.cancel();
        Ok(HttpResponse {
            status_code: StatusCode::OK,
            ..Default::default()
        })
    });
    let client = client_with(transport);

    let result = client.list_buckets(&ctx, ListBucketsInput::default()).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn signing_errors_are_classified_client_side() {
    let transport = ok_transport();
    // Streaming an unsigned payload without a trailer is an invalid payload
    // configuration, surfaced by the signer middleware.
    let client = client_with(transport.clone())
        .with_options(|opts| {
            opts.signer = Arc::new(HeaderSigner::new(false, true));
            opts.credentials = Some(s3kit::s3::creds::Credentials::new("ak", "sk"));
        })
        .unwrap();

    let err = client
        .put_object(
            &CallContext::new(),
            PutObjectInput::builder()
                .bucket("the-bucket")
                .key("test.txt")
                .body(Bytes::from_static(b"data"))
                .build(),
        )
        .await
        .unwrap_err();

    match err.client_side_cause() {
        Some(Error::Sign(cause)) => {
            assert!(matches!(**cause, Error::UnsignedStreamingWithoutTrailer));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn marshal_errors_are_classified_client_side() {
    let transport = ok_transport();
    let client = client_with(transport.clone());

    // Header and trailer for the same checksum is a marshaling error.
    let err = client
        .put_object(
            &CallContext::new(),
            PutObjectInput::builder()
                .bucket("the-bucket")
                .key("test.txt")
                .checksum_crc32("sK4Y7A==")
                .trailer_checksum_crc32("sK4Y7A==")
                .build(),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err.client_side_cause(),
        Some(Error::HeaderTrailerConflict(_))
    ));
    assert_eq!(transport.call_count(), 0);
}
