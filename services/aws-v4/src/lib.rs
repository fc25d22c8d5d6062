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

//! AWS Signature Version 4 signer.
//!
//! Signs outgoing requests for any AWS service with the `Authorization`
//! header. Credentials are resolved once when the signer is built:
//!
//! 1. explicit values in [`Config`]
//! 2. `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY`
//! 3. the shared credentials file (`~/.aws/credentials`)
//!
//! When none of them yields a complete key pair, requests are passed through
//! unsigned.
//!
//! ## Example
//!
//! ```no_run
//! use sigauth_aws_v4::Config;
//! use sigauth_core::{Context, OsEnv, Result};
//!
//! # fn example() -> Result<()> {
//! let ctx = Context::new().with_env(OsEnv);
//! let signer = sigauth_aws_v4::signer(ctx, "s3", Config::default().with_region("us-east-2"));
//!
//! let req = http::Request::builder()
//!     .method("GET")
//!     .uri("https://s3.us-east-2.amazonaws.com/bucket/key")
//!     .body(Vec::new())?;
//! let req = signer.before_send(req)?;
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

mod constants;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod provide_credential;
pub use provide_credential::*;

mod canonical;
pub use canonical::CanonicalRequest;

mod signing_key;
pub use signing_key::generate_signing_key;

mod sign_request;
pub use sign_request::RequestSigner;

use sigauth_core::{Context, Signer};

/// Build a signer for `service` with credentials and region resolved from
/// `config`, the environment and the shared credentials file.
pub fn signer(ctx: Context, service: &str, config: Config) -> Signer<Credential> {
    let region = config.resolve_region(&ctx);
    let provider = DefaultCredentialProvider::new(config);

    Signer::new(ctx, provider, RequestSigner::new(service, &region))
}
