// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use http::header::HeaderName;
use http::request::Parts;
use http::uri::Authority;
use http::HeaderMap;
use http::HeaderValue;
use http::Method;

/// Signing context for request.
///
/// It is a detached copy of everything a signer reads from the request.
/// Signers mutate the copy and call [`SigningRequest::apply`] once they are
/// done, so a failed signing never leaves a half signed request behind.
#[derive(Debug)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP authority, absent for origin-form uris.
    pub authority: Option<Authority>,
    /// HTTP path, still percent encoded.
    pub path: String,
    /// Raw HTTP query without the leading `?`, empty if absent.
    pub query: String,
    /// HTTP headers.
    pub headers: HeaderMap,
}

impl SigningRequest {
    /// Build a signing context from http::request::Parts.
    pub fn build(parts: &Parts) -> Self {
        SigningRequest {
            method: parts.method.clone(),
            authority: parts.uri.authority().cloned(),
            path: parts.uri.path().to_string(),
            query: parts.uri.query().unwrap_or_default().to_string(),
            headers: parts.headers.clone(),
        }
    }

    /// Apply the signing context back to http::request::Parts.
    ///
    /// Only headers are written back, signing never rewrites the uri.
    pub fn apply(self, parts: &mut Parts) {
        parts.headers = self.headers;
    }

    /// Insert the header, replacing every existing value of it.
    #[inline]
    pub fn header_insert(&mut self, key: &'static str, value: HeaderValue) {
        self.headers.insert(HeaderName::from_static(key), value);
    }
}
