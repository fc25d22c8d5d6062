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

//! Blocking file reading implementation for sigauth.
//!
//! This crate provides `StdFileRead`, a file reader that implements the
//! `FileRead` trait from `sigauth_core` on top of `std::fs`.
//!
//! Signers only read files while resolving credentials, which happens once
//! when the signer is built, so a blocking read is all that is needed.
//!
//! ## Example
//!
//! ```no_run
//! use sigauth_core::{Context, OsEnv};
//! use sigauth_file_read_std::StdFileRead;
//!
//! let ctx = Context::new()
//!     .with_file_read(StdFileRead)
//!     .with_env(OsEnv);
//!
//! match ctx.file_read("/path/to/credentials") {
//!     Ok(content) => println!("Read {} bytes", content.len()),
//!     Err(e) => eprintln!("Failed to read file: {}", e),
//! }
//! ```

use sigauth_core::{Error, FileRead, Result};

/// `std::fs` based implementation of the `FileRead` trait.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileRead;

impl FileRead for StdFileRead {
    fn file_read(&self, path: &str) -> Result<Vec<u8>> {
        std::fs::read(path)
            .map_err(|e| Error::unexpected(format!("failed to read file {path}")).with_source(e))
    }
}
