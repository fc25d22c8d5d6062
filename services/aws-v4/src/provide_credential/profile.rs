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

use crate::config::non_empty;
use crate::constants::*;
use crate::Credential;
use ini::{Ini, Properties};
use log::debug;
use sigauth_core::{Context, Error, ProvideCredential, Result};

/// ProfileCredentialProvider loads AWS credentials from the shared credentials file.
///
/// The file is looked up at:
/// 1. The path specified via `with_credentials_file()`
/// 2. The `AWS_SHARED_CREDENTIALS_FILE` environment variable
/// 3. `~/.aws/credentials`
///
/// The section `default` is read unless another one is set via `with_profile()`.
///
/// A missing file, section or key yields no credential. A file that can't be
/// parsed yields a `ConfigInvalid` error, which the default chain logs and
/// skips.
#[derive(Debug)]
pub struct ProfileCredentialProvider {
    profile: String,
    credentials_file: Option<String>,
}

impl Default for ProfileCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileCredentialProvider {
    /// Create a new ProfileCredentialProvider with default settings.
    pub fn new() -> Self {
        Self {
            profile: DEFAULT_PROFILE.to_string(),
            credentials_file: None,
        }
    }

    /// Set the profile name to use.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Set the path to the credentials file.
    pub fn with_credentials_file(mut self, path: impl Into<String>) -> Self {
        self.credentials_file = Some(path.into());
        self
    }

    fn credentials_file_path(&self, ctx: &Context) -> String {
        if let Some(path) = &self.credentials_file {
            path.clone()
        } else if let Some(path) = ctx.env_var(AWS_SHARED_CREDENTIALS_FILE) {
            path
        } else {
            DEFAULT_SHARED_CREDENTIALS_FILE.to_string()
        }
    }
}

impl ProvideCredential for ProfileCredentialProvider {
    type Credential = Credential;

    fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let path = self.credentials_file_path(ctx);
        let Some(expanded_path) = ctx.expand_home_dir(&path) else {
            debug!("failed to expand homedir for path: {path}");
            return Ok(None);
        };

        let content = match ctx.file_read_as_string(&expanded_path) {
            Ok(content) => content,
            Err(err) => {
                debug!("failed to read credentials file {expanded_path}: {err:?}");
                return Ok(None);
            }
        };

        let conf = Ini::load_from_str(&content).map_err(|e| {
            Error::config_invalid(format!("failed to parse credentials file {expanded_path}"))
                .with_source(e)
        })?;

        let Some(props) = conf.section(Some(self.profile.as_str())) else {
            debug!(
                "profile {} not found in credentials file {expanded_path}",
                self.profile
            );
            return Ok(None);
        };

        let access_key_id = non_empty(get_ignore_case(props, AWS_ACCESS_KEY_ID_KEY));
        let secret_access_key = non_empty(get_ignore_case(props, AWS_SECRET_ACCESS_KEY_KEY));

        match (access_key_id, secret_access_key) {
            (Some(ak), Some(sk)) => Ok(Some(Credential::new(ak, sk))),
            _ => {
                debug!(
                    "profile {} in {expanded_path} has no complete access key pair",
                    self.profile
                );
                Ok(None)
            }
        }
    }
}

/// Option names in the credentials file are case-insensitive.
fn get_ignore_case<'a>(props: &'a Properties, key: &str) -> Option<&'a str> {
    props
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| v)
}
