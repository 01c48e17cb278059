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

//! S3Kit is a client core for Amazon S3 compatible object storage.
//!
//! The crate provides the two load-bearing pieces of an S3 client: an AWS
//! Signature Version 4 request signer (including `aws-chunked` streaming
//! payloads with trailer signing) and a typed request pipeline that composes
//! endpoint resolution, marshaling, signing, transport and error
//! classification into a single call per operation.

pub mod s3;
