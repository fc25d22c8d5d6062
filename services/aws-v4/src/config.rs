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

use crate::constants::*;
use sigauth_core::utils::Redact;
use sigauth_core::Context;
use std::fmt::{Debug, Formatter};

/// Config for the aws v4 signer.
///
/// Every field is optional, unset fields are resolved from the environment
/// when the signer is built. Empty strings count as unset.
#[derive(Clone, Default)]
pub struct Config {
    /// `access_key_id` will be loaded from
    ///
    /// - this field if it's `is_some` (together with `secret_access_key`)
    /// - env value: `AWS_ACCESS_KEY_ID`
    /// - shared credentials file: `aws_access_key_id`
    pub access_key_id: Option<String>,
    /// `secret_access_key` will be loaded from
    ///
    /// - this field if it's `is_some` (together with `access_key_id`)
    /// - env value: `AWS_SECRET_ACCESS_KEY`
    /// - shared credentials file: `aws_secret_access_key`
    pub secret_access_key: Option<String>,
    /// `session_token` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: `AWS_SESSION_TOKEN`
    pub session_token: Option<String>,
    /// `region` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: `AWS_DEFAULT_REGION`
    /// - default to `us-east-1`
    pub region: Option<String>,
    /// Section of the shared credentials file to read, default to `default`.
    pub profile: Option<String>,
    /// `shared_credentials_file` will be loaded from:
    ///
    /// - this field if it's `is_some`
    /// - env value: `AWS_SHARED_CREDENTIALS_FILE`
    /// - default to: `~/.aws/credentials`
    pub shared_credentials_file: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::from(&self.secret_access_key))
            .field("session_token", &Redact::from(&self.session_token))
            .field("region", &self.region)
            .field("profile", &self.profile)
            .field("shared_credentials_file", &self.shared_credentials_file)
            .finish()
    }
}

impl Config {
    /// Set the access key pair.
    pub fn with_access_key(
        mut self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        self.access_key_id = Some(access_key_id.into());
        self.secret_access_key = Some(secret_access_key.into());
        self
    }

    /// Set the session token.
    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    /// Set the region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set the section of the shared credentials file to read.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Set the path of the shared credentials file.
    pub fn with_shared_credentials_file(mut self, path: impl Into<String>) -> Self {
        self.shared_credentials_file = Some(path.into());
        self
    }

    /// The explicit access key pair, only when both halves are set.
    pub(crate) fn access_key_pair(&self) -> Option<(&str, &str)> {
        match (
            non_empty(self.access_key_id.as_deref()),
            non_empty(self.secret_access_key.as_deref()),
        ) {
            (Some(ak), Some(sk)) => Some((ak, sk)),
            _ => None,
        }
    }

    /// Resolve the region: explicit value, then `AWS_DEFAULT_REGION`, then `us-east-1`.
    pub fn resolve_region(&self, ctx: &Context) -> String {
        non_empty(self.region.as_deref())
            .map(str::to_string)
            .or_else(|| env_non_empty(ctx, AWS_DEFAULT_REGION))
            .unwrap_or_else(|| DEFAULT_REGION.to_string())
    }

    /// Resolve the session token: explicit value, then `AWS_SESSION_TOKEN`.
    pub fn resolve_session_token(&self, ctx: &Context) -> Option<String> {
        non_empty(self.session_token.as_deref())
            .map(str::to_string)
            .or_else(|| env_non_empty(ctx, AWS_SESSION_TOKEN))
    }
}

pub(crate) fn non_empty(v: Option<&str>) -> Option<&str> {
    v.filter(|v| !v.is_empty())
}

pub(crate) fn env_non_empty(ctx: &Context, key: &str) -> Option<String> {
    ctx.env_var(key).filter(|v| !v.is_empty())
}
