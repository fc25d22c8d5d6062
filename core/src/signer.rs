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

use crate::{Context, ProvideCredential, Result, SignRequest, SigningCredential};
use bytes::Bytes;
use http::request::Parts;
use log::{debug, warn};
use std::sync::Arc;

/// Signer is the main struct used to sign the request.
///
/// Credentials are resolved exactly once, in [`Signer::new`], and never
/// change afterwards. A signer can be cloned or shared between threads and
/// used for concurrent requests without locking.
///
/// When the resolved credential is missing or not valid, every request is
/// passed through unsigned.
#[derive(Clone, Debug)]
pub struct Signer<C: SigningCredential> {
    ctx: Context,
    builder: Arc<dyn SignRequest<Credential = C>>,
    credential: Option<C>,
}

impl<C: SigningCredential> Signer<C> {
    /// Create a new signer, resolving the credential from `provider`.
    ///
    /// Resolution never fails: a broken credential source is logged and
    /// treated as absent.
    pub fn new(
        ctx: Context,
        provider: impl ProvideCredential<Credential = C>,
        builder: impl SignRequest<Credential = C>,
    ) -> Self {
        let credential = match provider.provide_credential(&ctx) {
            Ok(cred) => cred,
            Err(err) => {
                warn!("failed to resolve credential from {provider:?}, requests will be sent unsigned: {err:?}");
                None
            }
        };

        Self {
            ctx,
            builder: Arc::new(builder),
            credential,
        }
    }

    /// The credential resolved at construction, if any.
    pub fn credential(&self) -> Option<&C> {
        self.credential.as_ref()
    }

    /// The context this signer was built with.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Signing request in place.
    ///
    /// `body` must be the exact bytes that will be sent. Headers added to
    /// `req` after this call are not covered by the signature.
    pub fn sign(&self, req: &mut Parts, body: &[u8]) -> Result<()> {
        let Some(cred) = self.credential.as_ref().filter(|cred| cred.is_valid()) else {
            debug!("no valid credential resolved, request will be sent unsigned");
            return Ok(());
        };

        self.builder.sign_request(&self.ctx, req, body, cred)
    }

    /// The before-send hook: sign `req` and hand it back.
    ///
    /// This is a single step. It is called once per outgoing request, and
    /// there is no second round after the response arrives.
    pub fn before_send<B: AsRef<[u8]>>(&self, req: http::Request<B>) -> Result<http::Request<B>> {
        let (mut parts, body) = req.into_parts();
        self.sign(&mut parts, body.as_ref())?;
        Ok(http::Request::from_parts(parts, body))
    }

    /// Sign `req`, send it through the context's [`crate::HttpSend`] once and
    /// return the response exactly as the transport produced it.
    pub fn send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = self.before_send(req)?;
        self.ctx.http_send(req)
    }
}
