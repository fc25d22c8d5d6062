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

pub use sigauth_aws_v4::*;

#[cfg(feature = "default-context")]
use crate::{default_context, Signer};

/// Signer returned by [`default_signer`].
#[cfg(feature = "default-context")]
pub type DefaultSigner = Signer<Credential>;

/// Build a signer for `service` over [`default_context`].
///
/// Credentials and region are resolved right away from `config`, the process
/// environment and the shared credentials file.
#[cfg(feature = "default-context")]
pub fn default_signer(service: &str, config: Config) -> DefaultSigner {
    signer(default_context(), service, config)
}
