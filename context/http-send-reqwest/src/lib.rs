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

//! Blocking reqwest transport for sigauth.
//!
//! `ReqwestHttpSend` implements `HttpSend` so that `Signer::send` can hand
//! signed requests to a `reqwest::blocking::Client`. The client's own
//! redirect, retry and timeout policy applies; the signer never re-signs.
//!
//! ```no_run
//! use sigauth_core::Context;
//! use sigauth_http_send_reqwest::ReqwestHttpSend;
//!
//! let client = reqwest::blocking::Client::builder()
//!     .redirect(reqwest::redirect::Policy::none())
//!     .build()
//!     .expect("client must build");
//! let ctx = Context::new().with_http_send(ReqwestHttpSend::new(client));
//! ```

use bytes::Bytes;
use reqwest::blocking::{Client, Request};
use sigauth_core::{Error, HttpSend, Result};

/// `HttpSend` implementation backed by a blocking reqwest client.
#[derive(Debug, Default, Clone)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::blocking::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl HttpSend for ReqwestHttpSend {
    fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = Request::try_from(req)
            .map_err(|e| Error::request_invalid("failed to convert request").with_source(e))?;
        let resp = self
            .client
            .execute(req)
            .map_err(|e| Error::unexpected("failed to send request").with_source(e))?;

        let mut builder = http::Response::builder()
            .status(resp.status())
            .version(resp.version());
        if let Some(headers) = builder.headers_mut() {
            headers.extend(resp.headers().clone());
        }

        let body = resp
            .bytes()
            .map_err(|e| Error::unexpected("failed to read response body").with_source(e))?;
        Ok(builder.body(body)?)
    }
}
