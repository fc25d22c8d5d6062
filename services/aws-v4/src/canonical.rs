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

use crate::constants::{AWS_QUERY_ENCODE_SET, AWS_URI_ENCODE_SET};
use http::{HeaderMap, Method};
use percent_encoding::{percent_decode_str, utf8_percent_encode};
use sigauth_core::hash::hex_sha256;
use sigauth_core::{Error, Result};
use std::fmt::{Display, Formatter, Write};

/// The canonical form of a request, the input of every SigV4 signature.
///
/// Its [`Display`] output is the canonical request string:
///
/// ```text
/// <method>
/// <canonical path>
/// <canonical query>
/// <canonical headers, one `name:value\n` per header>
/// <signed headers>
/// <payload hash>
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    /// HTTP method, as sent.
    pub method: String,
    /// URI encoded path, `/` when empty.
    pub path: String,
    /// Sorted and URI encoded query, empty when absent.
    pub query: String,
    /// Header block, every line terminated by `\n`.
    pub headers: String,
    /// Sorted lower-cased header names joined by `;`.
    pub signed_headers: String,
    /// Hex encoded SHA-256 of the body.
    pub payload_hash: String,
}

impl CanonicalRequest {
    /// Build the canonical request.
    ///
    /// `path` and `query` are taken as they appear on the wire: still percent
    /// encoded, query without the leading `?`. Every header in `headers` is
    /// signed.
    pub fn build(
        method: &Method,
        path: &str,
        query: &str,
        headers: &HeaderMap,
        body: &[u8],
    ) -> Result<Self> {
        let (headers, signed_headers) = canonical_headers(headers)?;

        Ok(Self {
            method: method.as_str().to_string(),
            path: canonical_path(path)?,
            query: canonical_query(query),
            headers,
            signed_headers,
            payload_hash: hex_sha256(body),
        })
    }
}

impl Display for CanonicalRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.method)?;
        writeln!(f, "{}", self.path)?;
        writeln!(f, "{}", self.query)?;
        writeln!(f, "{}", self.headers)?;
        writeln!(f, "{}", self.signed_headers)?;
        write!(f, "{}", self.payload_hash)
    }
}

fn canonical_path(path: &str) -> Result<String> {
    if path.is_empty() {
        return Ok("/".to_string());
    }

    let decoded = percent_decode_str(path).decode_utf8().map_err(|e| {
        Error::request_invalid(format!("path {path} is not valid utf-8 once decoded"))
            .with_source(e)
    })?;
    Ok(utf8_percent_encode(&decoded, &AWS_URI_ENCODE_SET).to_string())
}

fn canonical_query(query: &str) -> String {
    if query.is_empty() {
        return String::new();
    }

    let mut pairs = form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| {
            (
                utf8_percent_encode(&k, &AWS_QUERY_ENCODE_SET).to_string(),
                utf8_percent_encode(&v, &AWS_QUERY_ENCODE_SET).to_string(),
            )
        })
        .collect::<Vec<_>>();
    // Sort by the encoded form, that's what the server sees.
    pairs.sort_unstable();

    pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Returns the header block and the signed headers list.
fn canonical_headers(headers: &HeaderMap) -> Result<(String, String)> {
    // `HeaderName` is always lower-cased.
    let mut names = headers.keys().map(|k| k.as_str()).collect::<Vec<_>>();
    names.sort_unstable();

    let mut block = String::with_capacity(names.len() * 32);
    for name in &names {
        let mut values = Vec::new();
        for value in headers.get_all(*name) {
            let value = value.to_str().map_err(|e| {
                Error::request_invalid(format!("header {name} has a non visible ascii value"))
                    .with_source(e)
            })?;
            values.push(normalize_header_value(value));
        }

        writeln!(block, "{name}:{}", values.join(","))?;
    }

    Ok((block, names.join(";")))
}

/// Trim the value and collapse runs of whitespace into a single space.
fn normalize_header_value(value: &str) -> String {
    value.split_ascii_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;
    use pretty_assertions::assert_eq;
    use sigauth_core::ErrorKind;

    const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut h = HeaderMap::new();
        for (k, v) in pairs {
            h.append(*k, HeaderValue::from_static(v));
        }
        h
    }

    #[test]
    fn test_get_vanilla() -> Result<()> {
        let creq = CanonicalRequest::build(
            &Method::GET,
            "/",
            "",
            &headers(&[
                ("host", "example.amazonaws.com"),
                ("x-amz-date", "20150830T123600Z"),
            ]),
            b"",
        )?;

        assert_eq!(
            creq.to_string(),
            "GET\n/\n\nhost:example.amazonaws.com\nx-amz-date:20150830T123600Z\n\nhost;x-amz-date\n\
             e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            hex_sha256(creq.to_string().as_bytes()),
            "bb579772317eb040ac9ed261061d46c1f17a8133879d6129b6e1c25292927e63"
        );
        Ok(())
    }

    #[test]
    fn test_get_vanilla_2011() -> Result<()> {
        let creq = CanonicalRequest::build(
            &Method::GET,
            "/",
            "",
            &headers(&[
                ("date", "Mon, 09 Sep 2011 23:36:00 GMT"),
                ("host", "host.foo.com"),
            ]),
            b"",
        )?;

        assert_eq!(creq.signed_headers, "date;host");
        assert_eq!(
            hex_sha256(creq.to_string().as_bytes()),
            "366b91fb121d72a00f46bbe8d395f53a102b06dfb7e79636515208ed3fa606b1"
        );
        Ok(())
    }

    #[test]
    fn test_empty_body_hash() -> Result<()> {
        let creq = CanonicalRequest::build(&Method::POST, "/", "", &HeaderMap::new(), b"")?;
        assert_eq!(creq.payload_hash, EMPTY_SHA256);

        let creq = CanonicalRequest::build(&Method::PUT, "/", "", &HeaderMap::new(), b"hello")?;
        assert_eq!(creq.payload_hash, hex_sha256(b"hello"));
        Ok(())
    }

    #[test]
    fn test_path() -> Result<()> {
        for (input, expected) in [
            ("", "/"),
            ("/", "/"),
            ("/hello/world", "/hello/world"),
            ("/a b", "/a%20b"),
            ("/a%20b", "/a%20b"),
            ("/~user/file-1_2.txt", "/~user/file-1_2.txt"),
            ("/ü", "/%C3%BC"),
            ("/a+b=c", "/a%2Bb%3Dc"),
        ] {
            assert_eq!(canonical_path(input)?, expected, "input: {input}");
        }
        Ok(())
    }

    #[test]
    fn test_path_invalid_utf8() {
        let err = canonical_path("/%ff").expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }

    #[test]
    fn test_query_order_independent() {
        assert_eq!(
            canonical_query("Param2=value2&Param1=value1"),
            "Param1=value1&Param2=value2"
        );
        assert_eq!(
            canonical_query("Param2=value2&Param1=value1"),
            canonical_query("Param1=value1&Param2=value2")
        );
        // Same key is ordered by value.
        assert_eq!(
            canonical_query("Param1=value2&Param1=Value1"),
            "Param1=Value1&Param1=value2"
        );
    }

    #[test]
    fn test_query_encoding() {
        for (input, expected) in [
            ("", ""),
            ("a", "a="),
            ("a=&b", "a=&b="),
            ("a=1&a=1", "a=1&a=1"),
            ("key=a b", "key=a%20b"),
            ("key=a+b", "key=a%20b"),
            ("key=a%2Bb", "key=a%2Bb"),
            ("key=~-_.", "key=~-_."),
            ("key=a/b", "key=a%2Fb"),
            ("prefix=%E2%9C%93", "prefix=%E2%9C%93"),
        ] {
            assert_eq!(canonical_query(input), expected, "input: {input}");
        }
    }

    #[test]
    fn test_headers_normalized() -> Result<()> {
        let (block, signed) = canonical_headers(&headers(&[
            ("X-Amz-Meta-Name", "  a   b  c "),
            ("content-type", "text/plain"),
            ("my-header", "v1"),
            ("my-header", "v2  v3"),
        ]))?;

        assert_eq!(
            block,
            "content-type:text/plain\nmy-header:v1,v2 v3\nx-amz-meta-name:a b c\n"
        );
        assert_eq!(signed, "content-type;my-header;x-amz-meta-name");
        Ok(())
    }

    #[test]
    fn test_headers_non_visible_ascii() {
        let mut h = HeaderMap::new();
        h.insert(
            "x-amz-meta-name",
            HeaderValue::from_bytes("ü".as_bytes()).expect("obs-text is allowed"),
        );

        let err = canonical_headers(&h).expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }

    #[test]
    fn test_normalize_header_value() {
        assert_eq!(normalize_header_value("value"), "value");
        assert_eq!(normalize_header_value("  value  "), "value");
        assert_eq!(normalize_header_value("a    b\t c"), "a b c");
        assert_eq!(normalize_header_value(""), "");
    }
}
