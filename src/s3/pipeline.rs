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

//! The operation pipeline: the fixed middleware stack every typed call runs
//! through, gluing marshal → validate → resolve → sign → send → unmarshal.

use crate::s3::client::Options;
use crate::s3::endpoint::EndpointParameters;
use crate::s3::error::Error;
use crate::s3::header_constants::USER_AGENT;
use crate::s3::http::{HttpRequest, HttpResponse};
use crate::s3::middleware::{Chain, Handler, Middleware, Reply};
use crate::s3::multimap::{Multimap, MultimapExt};
use crate::s3::types::{CallContext, OperationInput, OperationOutput};
use crate::s3::utils::utc_now;
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

/// Per-call bundle handed through the chain: the options snapshot, the
/// typed call input and the outgoing request handle.
pub struct HandlerInput<I> {
    pub options: Options,
    pub call_input: I,
    pub request: HttpRequest,
}

/// Typed call output bound to the response handle it was unmarshaled from.
pub struct HandlerOutput<O> {
    pub call_output: O,
    pub response: HttpResponse,
}

/// Response metadata returned next to every typed output.
#[derive(Clone, Debug, Default)]
pub struct Metadata {
    pub status_code: u16,
    pub headers: Multimap,
}

impl Metadata {
    fn from_response(resp: &HttpResponse) -> Metadata {
        Metadata {
            status_code: resp.status_code.as_u16(),
            headers: resp.headers.clone(),
        }
    }
}

/// Outermost middleware: everything escaping the pipeline is either a
/// server-side error or wrapped as client-side. Errors are never swallowed.
struct ErrorClassifier;

#[async_trait]
impl<I, O> Middleware<HandlerInput<I>, HandlerOutput<O>> for ErrorClassifier
where
    I: OperationInput + 'static,
    O: OperationOutput + 'static,
{
    async fn around(
        &self,
        ctx: &CallContext,
        input: &mut HandlerInput<I>,
        next: &dyn Handler<HandlerInput<I>, HandlerOutput<O>>,
    ) -> Reply<HandlerOutput<O>> {
        let mut reply = next.handle(ctx, input).await;
        if let Some(err) = reply.error.take() {
            reply.error = Some(err.classify());
        }
        reply
    }
}

/// Validates the per-call options snapshot before any work happens.
struct ConfigValidation;

#[async_trait]
impl<I, O> Middleware<HandlerInput<I>, HandlerOutput<O>> for ConfigValidation
where
    I: OperationInput + 'static,
    O: OperationOutput + 'static,
{
    async fn around(
        &self,
        ctx: &CallContext,
        input: &mut HandlerInput<I>,
        next: &dyn Handler<HandlerInput<I>, HandlerOutput<O>>,
    ) -> Reply<HandlerOutput<O>> {
        if ctx.is_canceled() {
            return Reply::error(Error::Canceled);
        }
        if let Err(err) = input.options.validate() {
            return Reply::error(err);
        }
        next.handle(ctx, input).await
    }
}

/// Rejects calls whose input advertises a bucket or key it does not carry.
/// A missing bucket is reported before a missing key.
struct RequiredInput;

#[async_trait]
impl<I, O> Middleware<HandlerInput<I>, HandlerOutput<O>> for RequiredInput
where
    I: OperationInput + 'static,
    O: OperationOutput + 'static,
{
    async fn around(
        &self,
        ctx: &CallContext,
        input: &mut HandlerInput<I>,
        next: &dyn Handler<HandlerInput<I>, HandlerOutput<O>>,
    ) -> Reply<HandlerOutput<O>> {
        if ctx.is_canceled() {
            return Reply::error(Error::Canceled);
        }
        if let Some(bucket) = input.call_input.bucket() {
            if bucket.is_empty() {
                return Reply::error(Error::BucketMandatory);
            }
            if let Some(key) = input.call_input.key() {
                if key.is_empty() {
                    return Reply::error(Error::ObjectKeyMandatory);
                }
            }
        }
        next.handle(ctx, input).await
    }
}

/// Applies the user-agent option: present and non-empty means send it.
struct UserAgent;

#[async_trait]
impl<I, O> Middleware<HandlerInput<I>, HandlerOutput<O>> for UserAgent
where
    I: OperationInput + 'static,
    O: OperationOutput + 'static,
{
    async fn around(
        &self,
        ctx: &CallContext,
        input: &mut HandlerInput<I>,
        next: &dyn Handler<HandlerInput<I>, HandlerOutput<O>>,
    ) -> Reply<HandlerOutput<O>> {
        if ctx.is_canceled() {
            return Reply::error(Error::Canceled);
        }
        if let Some(user_agent) = &input.options.user_agent {
            if !user_agent.is_empty() {
                input.request.headers.set(USER_AGENT, user_agent.clone());
            }
        }
        next.handle(ctx, input).await
    }
}

/// Builds endpoint parameters from the options and the input capabilities,
/// resolves them and binds the request URI.
struct ResolveEndpoint;

#[async_trait]
impl<I, O> Middleware<HandlerInput<I>, HandlerOutput<O>> for ResolveEndpoint
where
    I: OperationInput + 'static,
    O: OperationOutput + 'static,
{
    async fn around(
        &self,
        ctx: &CallContext,
        input: &mut HandlerInput<I>,
        next: &dyn Handler<HandlerInput<I>, HandlerOutput<O>>,
    ) -> Reply<HandlerOutput<O>> {
        if ctx.is_canceled() {
            return Reply::error(Error::Canceled);
        }

        let params = EndpointParameters {
            bucket: input.call_input.bucket().unwrap_or_default().to_string(),
            key: input.call_input.key().unwrap_or_default().to_string(),
            host: input.options.endpoint_host.clone(),
            use_ssl: input.options.use_ssl,
            use_path_style: input.options.use_path_style,
        };

        let endpoint = match input
            .options
            .endpoint_resolver
            .resolve_endpoint(ctx, &params)
            .await
        {
            Ok(endpoint) => endpoint,
            Err(err) => return Reply::error(Error::ResolveEndpoint(Box::new(err))),
        };

        if let Err(err) = input.request.set_uri(&endpoint.url) {
            return Reply::error(Error::ResolveEndpoint(Box::new(err)));
        }

        next.handle(ctx, input).await
    }
}

/// Marshals the typed input onto the request on the way in and unmarshals
/// the typed output from the response on the way out. The unmarshal error
/// is surfaced unwrapped: outputs use it to report a `ServerSideError`
/// directly on an unexpected status.
struct TransportCodec;

#[async_trait]
impl<I, O> Middleware<HandlerInput<I>, HandlerOutput<O>> for TransportCodec
where
    I: OperationInput + 'static,
    O: OperationOutput + 'static,
{
    async fn around(
        &self,
        ctx: &CallContext,
        input: &mut HandlerInput<I>,
        next: &dyn Handler<HandlerInput<I>, HandlerOutput<O>>,
    ) -> Reply<HandlerOutput<O>> {
        if ctx.is_canceled() {
            return Reply::error(Error::Canceled);
        }

        if let Err(err) = input.call_input.marshal_http(&mut input.request) {
            return Reply::error(err);
        }

        let mut reply = next.handle(ctx, input).await;
        if reply.error.is_some() {
            return reply;
        }

        if let Some(output) = reply.output.as_mut() {
            if let Err(err) = output.call_output.unmarshal_http(&output.response) {
                reply.error = Some(err);
            }
        }

        reply
    }
}

/// Signs the fully-marshaled request right before the transport sends it.
struct SignRequest;

#[async_trait]
impl<I, O> Middleware<HandlerInput<I>, HandlerOutput<O>> for SignRequest
where
    I: OperationInput + 'static,
    O: OperationOutput + 'static,
{
    async fn around(
        &self,
        ctx: &CallContext,
        input: &mut HandlerInput<I>,
        next: &dyn Handler<HandlerInput<I>, HandlerOutput<O>>,
    ) -> Reply<HandlerOutput<O>> {
        if ctx.is_canceled() {
            return Reply::error(Error::Canceled);
        }

        let signer = input.options.signer.clone();
        if let Err(err) = signer.sign(
            &mut input.request,
            input.options.credentials.as_ref(),
            &input.options.signing_region,
            utc_now(),
        ) {
            return Reply::error(Error::Sign(Box::new(err)));
        }

        next.handle(ctx, input).await
    }
}

/// Terminal handler: the single suspension point of a call. Hands the
/// request to the transport and binds the response to a fresh output.
struct TransportHandler;

#[async_trait]
impl<I, O> Handler<HandlerInput<I>, HandlerOutput<O>> for TransportHandler
where
    I: OperationInput + 'static,
    O: OperationOutput + Default + 'static,
{
    async fn handle(
        &self,
        ctx: &CallContext,
        input: &mut HandlerInput<I>,
    ) -> Reply<HandlerOutput<O>> {
        if ctx.is_canceled() {
            return Reply::error(Error::Canceled);
        }

        let mut output = HandlerOutput {
            call_output: O::default(),
            response: HttpResponse::default(),
        };

        if let Err(err) = input
            .options
            .transport
            .execute(&input.request, &mut output.response)
            .await
        {
            return Reply::error(err);
        }

        // A cancellation racing the response read is ignored: the response
        // is already here and is returned normally.
        Reply::output(output)
    }
}

/// Runs one typed call through the full middleware stack and returns the
/// typed output with its response metadata.
pub async fn perform_call<I, O>(
    ctx: &CallContext,
    options: Options,
    input: I,
) -> Result<(O, Metadata), Error>
where
    I: OperationInput + 'static,
    O: OperationOutput + Default + 'static,
{
    // Outermost first; the signer sits between the codec and the wire so it
    // observes the fully-marshaled request.
    let chain: Chain<HandlerInput<I>, HandlerOutput<O>> = Chain::new(
        Arc::new(TransportHandler),
        vec![
            Arc::new(ErrorClassifier),
            Arc::new(ConfigValidation),
            Arc::new(RequiredInput),
            Arc::new(UserAgent),
            Arc::new(ResolveEndpoint),
            Arc::new(TransportCodec),
            Arc::new(SignRequest),
        ],
    );

    let mut input = HandlerInput {
        options,
        call_input: input,
        request: HttpRequest::default(),
    };

    let reply = chain.handle(ctx, &mut input).await;
    match (reply.output, reply.error) {
        (_, Some(err)) => {
            debug!("call failed: {err}");
            Err(err)
        }
        (Some(output), None) => {
            debug!(
                "call completed with HTTP {}",
                output.response.status_code.as_u16()
            );
            let metadata = Metadata::from_response(&output.response);
            Ok((output.call_output, metadata))
        }
        (None, None) => Err(Error::ClientSide(Box::new(Error::Internal(
            "pipeline returned neither output nor error".to_string(),
        )))),
    }
}
