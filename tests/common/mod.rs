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

//! In-memory transport double for pipeline tests: records every request it
//! is handed and answers from a canned handler, without touching the
//! network.

use async_trait::async_trait;
use s3kit::s3::error::Error;
use s3kit::s3::http::{HttpRequest, HttpResponse, HttpTransport};
use std::sync::{Arc, Mutex};

type MockHandler = dyn Fn(&HttpRequest) -> Result<HttpResponse, Error> + Send + Sync;

pub struct MockTransport {
    handler: Box<MockHandler>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    /// Transport answering every request through `handler`.
    pub fn new(
        handler: impl Fn(&HttpRequest) -> Result<HttpResponse, Error> + Send + Sync + 'static,
    ) -> Arc<MockTransport> {
        Arc::new(MockTransport {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Transport answering every request with the same response.
    pub fn respond_with(response: HttpResponse) -> Arc<MockTransport> {
        MockTransport::new(move |_| Ok(response.clone()))
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn execute(
        &self,
        request: &HttpRequest,
        response: &mut HttpResponse,
    ) -> Result<(), Error> {
        self.requests.lock().unwrap().push(request.clone());
        *response = (self.handler)(request)?;
        Ok(())
    }
}
