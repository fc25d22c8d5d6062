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

use crate::provide_credential::{
    EnvCredentialProvider, ProfileCredentialProvider, StaticCredentialProvider,
};
use crate::{Config, Credential};
use sigauth_core::{Context, ProvideCredential, ProvideCredentialChain, Result};

/// DefaultCredentialProvider is a loader that will try to load credential via default chains.
///
/// Resolution order for the access key pair, first complete pair wins:
///
/// 1. Explicit values in [`Config`]
/// 2. Environment variables
/// 3. Shared credentials file (`~/.aws/credentials`)
///
/// The session token is resolved on its own: explicit value, then
/// `AWS_SESSION_TOKEN`, whichever source the key pair came from.
#[derive(Debug)]
pub struct DefaultCredentialProvider {
    config: Config,
    chain: ProvideCredentialChain<Credential>,
}

impl Default for DefaultCredentialProvider {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl DefaultCredentialProvider {
    /// Create a new `DefaultCredentialProvider` instance.
    pub fn new(config: Config) -> Self {
        let mut chain = ProvideCredentialChain::new();
        if let Some((ak, sk)) = config.access_key_pair() {
            chain = chain.push(StaticCredentialProvider::new(ak, sk));
        }

        let mut profile = ProfileCredentialProvider::new();
        if let Some(name) = &config.profile {
            profile = profile.with_profile(name);
        }
        if let Some(path) = &config.shared_credentials_file {
            profile = profile.with_credentials_file(path);
        }

        let chain = chain.push(EnvCredentialProvider::new()).push(profile);

        Self { config, chain }
    }
}

impl ProvideCredential for DefaultCredentialProvider {
    type Credential = Credential;

    fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let Some(mut cred) = self.chain.provide_credential(ctx)? else {
            return Ok(None);
        };

        cred.session_token = self.config.resolve_session_token(ctx);
        Ok(Some(cred))
    }
}
