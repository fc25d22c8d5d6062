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

use crate::canonical::CanonicalRequest;
use crate::constants::*;
use crate::signing_key::generate_signing_key;
use crate::Credential;
use http::header;
use http::request::Parts;
use http::uri::Authority;
use http::HeaderValue;
use log::debug;
use sigauth_core::hash::{hex_hmac_sha256, hex_sha256};
use sigauth_core::time::{format_date, format_iso8601, now, DateTime};
use sigauth_core::{Context, Result, SignRequest, SigningRequest};

/// RequestSigner that implement AWS SigV4.
///
/// Signs with the `Authorization` header. Every header present on the
/// request when it is signed is covered by the signature.
///
/// - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)
#[derive(Debug)]
pub struct RequestSigner {
    service: String,
    region: String,

    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new builder for AWS V4 signer.
    pub fn new(service: &str, region: &str) -> Self {
        Self {
            service: service.into(),
            region: region.into(),

            time: None,
        }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }
}

impl SignRequest for RequestSigner {
    type Credential = Credential;

    fn sign_request(
        &self,
        _: &Context,
        req: &mut Parts,
        body: &[u8],
        cred: &Self::Credential,
    ) -> Result<()> {
        let now = self.time.unwrap_or_else(now);
        let mut signed_req = SigningRequest::build(req);

        // Insert HOST header if not present.
        if !signed_req.headers.contains_key(header::HOST) {
            if let Some(authority) = &signed_req.authority {
                signed_req.headers.insert(header::HOST, host_header(authority)?);
            }
        }

        signed_req.header_insert(X_AMZ_DATE, HeaderValue::try_from(format_iso8601(now))?);

        if let Some(token) = cred.session_token.as_deref().filter(|v| !v.is_empty()) {
            let mut value = HeaderValue::from_str(token)?;
            // Mark the token sensitive so it never shows up in debug output.
            value.set_sensitive(true);
            signed_req.header_insert(X_AMZ_SECURITY_TOKEN, value);
        }

        // A payload hash set by the caller may not match this body.
        if signed_req.headers.contains_key(X_AMZ_CONTENT_SHA_256) {
            signed_req.header_insert(X_AMZ_CONTENT_SHA_256, HeaderValue::try_from(hex_sha256(body))?);
        }

        let creq = CanonicalRequest::build(
            &signed_req.method,
            &signed_req.path,
            &signed_req.query,
            &signed_req.headers,
            body,
        )?;

        let scope = credential_scope(now, &self.region, &self.service);
        debug!("calculated scope: {scope}");

        let string_to_sign = string_to_sign(now, &scope, &creq);
        debug!("calculated string to sign: {string_to_sign}");

        let signing_key = generate_signing_key(
            &cred.secret_access_key,
            &format_date(now),
            &self.region,
            &self.service,
        );
        let signature = hex_hmac_sha256(&signing_key, string_to_sign.as_bytes());

        signed_req.header_insert(
            X_AMZ_CONTENT_SHA_256,
            HeaderValue::try_from(creq.payload_hash.as_str())?,
        );

        let mut authorization = HeaderValue::try_from(format!(
            "{AWS4_HMAC_SHA256} Credential={}/{scope}, SignedHeaders={}, Signature={signature}",
            cred.access_key_id, creq.signed_headers,
        ))?;
        authorization.set_sensitive(true);
        signed_req
            .headers
            .insert(header::AUTHORIZATION, authorization);

        // Apply to the request.
        signed_req.apply(req);
        Ok(())
    }
}

/// The `Host` value a transport sends for `authority`, userinfo stripped.
fn host_header(authority: &Authority) -> Result<HeaderValue> {
    let host = match authority.port_u16() {
        Some(port) => format!("{}:{port}", authority.host()),
        None => authority.host().to_string(),
    };
    Ok(HeaderValue::try_from(host)?)
}

/// Scope: "20220313/<region>/<service>/aws4_request"
fn credential_scope(time: DateTime, region: &str, service: &str) -> String {
    format!("{}/{region}/{service}/{AWS4_REQUEST}", format_date(time))
}

// StringToSign:
//
// AWS4-HMAC-SHA256
// 20220313T072004Z
// 20220313/<region>/<service>/aws4_request
// <hashed_canonical_request>
fn string_to_sign(time: DateTime, scope: &str, creq: &CanonicalRequest) -> String {
    format!(
        "{AWS4_HMAC_SHA256}\n{}\n{scope}\n{}",
        format_iso8601(time),
        hex_sha256(creq.to_string().as_bytes())
    )
}
