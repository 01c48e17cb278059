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

//! Generic around-style interceptor chain wrapping a terminal handler.

use crate::s3::error::Error;
use crate::s3::types::CallContext;
use async_trait::async_trait;
use std::sync::Arc;

/// Outcome of a handler or middleware. Output and error are carried
/// independently, so a post-processing middleware can inspect a partial
/// output travelling next to an error.
#[derive(Debug)]
pub struct Reply<O> {
    pub output: Option<O>,
    pub error: Option<Error>,
}

impl<O> Reply<O> {
    pub fn output(output: O) -> Reply<O> {
        Reply {
            output: Some(output),
            error: None,
        }
    }

    pub fn error(error: Error) -> Reply<O> {
        Reply {
            output: None,
            error: Some(error),
        }
    }
}

/// Terminal processing step of a chain.
#[async_trait]
pub trait Handler<I, O>: Send + Sync {
    async fn handle(&self, ctx: &CallContext, input: &mut I) -> Reply<O>;
}

/// Around-style interceptor. Implementations may short-circuit (return
/// without calling `next`), pre-process the input, post-process the reply,
/// or both, and must honor cancellation on entry.
#[async_trait]
pub trait Middleware<I, O>: Send + Sync {
    async fn around(
        &self,
        ctx: &CallContext,
        input: &mut I,
        next: &dyn Handler<I, O>,
    ) -> Reply<O>;
}

struct ChainLink<I, O> {
    with: Arc<dyn Middleware<I, O>>,
    next: Arc<dyn Handler<I, O>>,
}

#[async_trait]
impl<I, O> Handler<I, O> for ChainLink<I, O>
where
    I: Send + Sync + 'static,
    O: Send + 'static,
{
    async fn handle(&self, ctx: &CallContext, input: &mut I) -> Reply<O> {
        self.with.around(ctx, input, self.next.as_ref()).await
    }
}

/// Ordered composition of middlewares around a terminal handler. The first
/// listed middleware is the outermost: it pre-processes first and
/// post-processes last.
pub struct Chain<I, O> {
    head: Arc<dyn Handler<I, O>>,
}

impl<I, O> Chain<I, O>
where
    I: Send + Sync + 'static,
    O: Send + 'static,
{
    pub fn new(
        terminal: Arc<dyn Handler<I, O>>,
        middlewares: Vec<Arc<dyn Middleware<I, O>>>,
    ) -> Chain<I, O> {
        let mut head = terminal;
        for with in middlewares.into_iter().rev() {
            head = Arc::new(ChainLink { with, next: head });
        }
        Chain { head }
    }

    pub async fn handle(&self, ctx: &CallContext, input: &mut I) -> Reply<O> {
        self.head.handle(ctx, input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingHandler {
        log: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Handler<String, String> for RecordingHandler {
        async fn handle(&self, _ctx: &CallContext, input: &mut String) -> Reply<String> {
            self.log.lock().unwrap().push(format!("handler({input})"));
            Reply::output("handler-output".to_string())
        }
    }

    struct RecordingMiddleware {
        name: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Middleware<String, String> for RecordingMiddleware {
        async fn around(
            &self,
            ctx: &CallContext,
            input: &mut String,
            next: &dyn Handler<String, String>,
        ) -> Reply<String> {
            self.log.lock().unwrap().push(format!(">{}", self.name));
            input.push_str(self.name);
            let reply = next.handle(ctx, input).await;
            self.log.lock().unwrap().push(format!("<{}", self.name));
            reply
        }
    }

    struct ShortCircuit;

    #[async_trait]
    impl Middleware<String, String> for ShortCircuit {
        async fn around(
            &self,
            _ctx: &CallContext,
            _input: &mut String,
            _next: &dyn Handler<String, String>,
        ) -> Reply<String> {
            Reply::error(Error::BucketMandatory)
        }
    }

    fn recording(
        log: &Arc<Mutex<Vec<String>>>,
        name: &'static str,
    ) -> Arc<dyn Middleware<String, String>> {
        Arc::new(RecordingMiddleware {
            name,
            log: log.clone(),
        })
    }

    #[tokio::test]
    async fn first_listed_middleware_is_outermost() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let chain = Chain::new(
            Arc::new(RecordingHandler { log: log.clone() }),
            vec![
                recording(&log, "m1"),
                recording(&log, "m2"),
                recording(&log, "m3"),
            ],
        );

        let mut input = String::new();
        let reply = chain.handle(&CallContext::new(), &mut input).await;

        assert_eq!(reply.output.as_deref(), Some("handler-output"));
        assert!(reply.error.is_none());
        assert_eq!(
            *log.lock().unwrap(),
            vec![">m1", ">m2", ">m3", "handler(m1m2m3)", "<m3", "<m2", "<m1"]
        );
    }

    #[tokio::test]
    async fn empty_chain_is_just_the_handler() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let chain = Chain::new(Arc::new(RecordingHandler { log: log.clone() }), vec![]);

        let mut input = String::from("direct");
        let reply = chain.handle(&CallContext::new(), &mut input).await;

        assert_eq!(reply.output.as_deref(), Some("handler-output"));
        assert_eq!(*log.lock().unwrap(), vec!["handler(direct)"]);
    }

    #[tokio::test]
    async fn short_circuit_skips_inner_links() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let chain = Chain::new(
            Arc::new(RecordingHandler { log: log.clone() }),
            vec![recording(&log, "outer"), Arc::new(ShortCircuit), recording(&log, "inner")],
        );

        let mut input = String::new();
        let reply = chain.handle(&CallContext::new(), &mut input).await;

        assert!(matches!(reply.error, Some(Error::BucketMandatory)));
        assert!(reply.output.is_none());
        // The inner middleware and the handler never ran.
        assert_eq!(*log.lock().unwrap(), vec![">outer", "<outer"]);
    }
}
