use super::{suite_authorization, suite_signer};
use anyhow::Result;
use bytes::Bytes;
use http::{header, Method, Request, StatusCode};
use pretty_assertions::assert_eq;
use sigauth_core::{Context, HttpSend};
use std::sync::{Arc, Mutex};
use test_case::test_case;

#[test_case(Method::GET, "/", "5fa00fa31553b73ebf1942676e86291e8372ff2a2260956d9b8aae1d763fbf31" ; "get vanilla")]
#[test_case(Method::GET, "/?Param2=value2&Param1=value1", "b97d918cfa904a5beff61c982a1b6f458b799221646efd99d3219ec94cdf2500" ; "get vanilla query order key case")]
#[test_case(Method::GET, "/?Param1=value2&Param1=Value1", "eedbc4e291e521cf13422ffca22be7d2eb8146eecf653089df300a15b2382bd1" ; "get vanilla query order value")]
#[test_case(Method::POST, "/", "5da7c1a2acd57cee7505fc6676e4e544621c30862966e37dddb68e92efbe5d6b" ; "post vanilla")]
fn test_suite(method: Method, path: &str, signature: &str) {
    let req = Request::builder()
        .method(method)
        .uri(format!("https://example.amazonaws.com{path}"))
        .body(Vec::new())
        .expect("request must be valid");

    let req = suite_signer(Context::new())
        .before_send(req)
        .expect("sign must succeed");

    assert_eq!(
        req.headers()[header::AUTHORIZATION],
        suite_authorization("host;x-amz-date", signature).as_str()
    );
    assert_eq!(req.headers()["x-amz-date"], "20150830T123600Z");
    assert_eq!(
        req.headers()["x-amz-content-sha256"],
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

/// Records every request and answers with a fixed response.
#[derive(Debug, Default, Clone)]
struct RecordingHttpSend {
    requests: Arc<Mutex<Vec<http::Request<Bytes>>>>,
}

impl HttpSend for RecordingHttpSend {
    fn http_send(&self, req: http::Request<Bytes>) -> sigauth_core::Result<http::Response<Bytes>> {
        self.requests
            .lock()
            .expect("lock must not be poisoned")
            .push(req);

        Ok(http::Response::builder()
            .status(StatusCode::FORBIDDEN)
            .header("x-amzn-requestid", "4442587FB7D0A2F9")
            .body(Bytes::from_static(b"<Error><Code>SignatureDoesNotMatch</Code></Error>"))?)
    }
}

#[test]
fn test_send_hands_signed_request_to_transport() -> Result<()> {
    let transport = RecordingHttpSend::default();
    let signer = suite_signer(Context::new().with_http_send(transport.clone()));

    let req = Request::builder()
        .method(Method::PUT)
        .uri("https://example.amazonaws.com/object")
        .body(Bytes::from_static(b"Hello, World!"))?;
    let resp = signer.send(req)?;

    // The response is forwarded as the transport produced it.
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(resp.headers()["x-amzn-requestid"], "4442587FB7D0A2F9");
    assert_eq!(
        resp.body().as_ref(),
        b"<Error><Code>SignatureDoesNotMatch</Code></Error>"
    );

    let requests = transport.requests.lock().expect("lock must not be poisoned");
    assert_eq!(requests.len(), 1);
    let sent = &requests[0];
    assert!(sent.headers().contains_key(header::AUTHORIZATION));
    assert_eq!(
        sent.headers()["x-amz-content-sha256"],
        "dffd6021bb2bd5b0af676290809ec3a53191dd81c7f70a4b28688a362182986f"
    );
    assert_eq!(sent.body().as_ref(), b"Hello, World!");
    Ok(())
}

#[test]
fn test_signer_shared_between_threads() -> Result<()> {
    let signer = suite_signer(Context::new());

    let handles = (0..4)
        .map(|_| {
            let signer = signer.clone();
            std::thread::spawn(move || {
                let req = Request::builder()
                    .uri("https://example.amazonaws.com/")
                    .body(Vec::new())
                    .expect("request must be valid");
                signer
                    .before_send(req)
                    .expect("sign must succeed")
                    .headers()[header::AUTHORIZATION]
                    .clone()
            })
        })
        .collect::<Vec<_>>();

    for handle in handles {
        let authorization = handle.join().expect("thread must not panic");
        assert_eq!(
            authorization,
            suite_authorization(
                "host;x-amz-date",
                "5fa00fa31553b73ebf1942676e86291e8372ff2a2260956d9b8aae1d763fbf31"
            )
            .as_str()
        );
    }
    Ok(())
}
