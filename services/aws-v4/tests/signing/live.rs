use anyhow::Result;
use bytes::Bytes;
use http::{Method, Request, StatusCode};
use log::{debug, warn};
use sigauth_aws_v4::Config;
use sigauth_core::{Context, OsEnv};
use sigauth_file_read_std::StdFileRead;
use sigauth_http_send_reqwest::ReqwestHttpSend;
use std::env;

/// Signer and target url for a real bucket, only when `SIGAUTH_AWS_V4_TEST=on`.
fn init_live_test() -> Option<(sigauth_core::Signer<sigauth_aws_v4::Credential>, String)> {
    let _ = env_logger::builder().is_test(true).try_init();

    if env::var("SIGAUTH_AWS_V4_TEST").unwrap_or_default() != "on" {
        return None;
    }

    let url = env::var("SIGAUTH_AWS_V4_URL").expect("env SIGAUTH_AWS_V4_URL must set");
    let service = env::var("SIGAUTH_AWS_V4_SERVICE").unwrap_or_else(|_| "s3".to_string());

    let ctx = Context::new()
        .with_file_read(StdFileRead)
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    let signer = sigauth_aws_v4::signer(ctx, &service, Config::default());

    Some((signer, url))
}

#[test]
fn test_live_head_object() -> Result<()> {
    let Some((signer, url)) = init_live_test() else {
        warn!("SIGAUTH_AWS_V4_TEST is not set, skipped");
        return Ok(());
    };

    let req = Request::builder()
        .method(Method::HEAD)
        .uri(format!("{url}/not_exist_file"))
        .body(Bytes::new())?;
    let resp = signer.send(req)?;
    debug!("got response: {resp:?}");

    assert_eq!(StatusCode::NOT_FOUND, resp.status());
    Ok(())
}

#[test]
fn test_live_put_object() -> Result<()> {
    let Some((signer, url)) = init_live_test() else {
        warn!("SIGAUTH_AWS_V4_TEST is not set, skipped");
        return Ok(());
    };

    let req = Request::builder()
        .method(Method::PUT)
        .uri(format!("{url}/put_object_test"))
        .body(Bytes::from_static(b"Hello, World!"))?;
    let resp = signer.send(req)?;
    debug!("got response: {resp:?}");

    assert_eq!(StatusCode::OK, resp.status());
    Ok(())
}
