use super::create_test_context;
use anyhow::Result;
use http::{header, Request};
use pretty_assertions::assert_eq;
use sigauth_aws_v4::Config;
use sigauth_core::{Context, OsEnv};
use sigauth_file_read_std::StdFileRead;
use std::fs;
use test_case::test_case;

fn sign_with(ctx: Context, config: Config) -> Result<Request<Vec<u8>>> {
    let signer = sigauth_aws_v4::signer(ctx, "s3", config);
    let req = Request::builder()
        .uri("https://s3.amazonaws.com/bucket/key")
        .body(Vec::new())?;
    Ok(signer.before_send(req)?)
}

fn authorization(req: &Request<Vec<u8>>) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
}

#[test_case(&[] ; "nothing configured")]
#[test_case(&[("AWS_ACCESS_KEY_ID", "env_ak")] ; "only access key in env")]
#[test_case(&[("AWS_SECRET_ACCESS_KEY", "env_sk")] ; "only secret key in env")]
#[test_case(&[("AWS_ACCESS_KEY_ID", ""), ("AWS_SECRET_ACCESS_KEY", "")] ; "empty env")]
#[test_case(&[("AWS_SESSION_TOKEN", "token"), ("AWS_DEFAULT_REGION", "eu-west-1")] ; "token without keys")]
fn test_passthrough(envs: &[(&str, &str)]) {
    let home = tempfile::tempdir().expect("tempdir must be created");
    let ctx = create_test_context(envs, Some(home.path()));

    let req = sign_with(ctx, Config::default()).expect("sign must succeed");
    assert!(req.headers().is_empty(), "headers: {:?}", req.headers());
}

#[test_case("[profile]\naws_access_key_id = ak\naws_secret_access_key = sk\n" ; "no default section")]
#[test_case("[default]\naws_access_key_id = ak\n" ; "missing secret key")]
#[test_case("[default\naws_access_key_id = ak\naws_secret_access_key = sk\n" ; "corrupt file")]
fn test_passthrough_with_unusable_file(content: &str) {
    let home = tempfile::tempdir().expect("tempdir must be created");
    fs::create_dir(home.path().join(".aws")).expect("dir must be created");
    fs::write(home.path().join(".aws/credentials"), content).expect("file must be written");
    let ctx = create_test_context(&[], Some(home.path()));

    let req = sign_with(ctx, Config::default()).expect("sign must succeed");
    assert!(req.headers().is_empty(), "headers: {:?}", req.headers());
}

#[test]
fn test_resolution_order() -> Result<()> {
    let home = tempfile::tempdir()?;
    fs::create_dir(home.path().join(".aws"))?;
    fs::write(
        home.path().join(".aws/credentials"),
        "[default]\naws_access_key_id = file_ak\naws_secret_access_key = file_sk\n",
    )?;

    let file_only = create_test_context(&[], Some(home.path()));
    let req = sign_with(file_only, Config::default())?;
    let auth = authorization(&req).expect("must be signed");
    assert!(auth.starts_with("AWS4-HMAC-SHA256 Credential=file_ak/"), "{auth}");
    assert!(auth.contains("/us-east-1/s3/aws4_request"), "{auth}");

    let env_and_file = create_test_context(
        &[
            ("AWS_ACCESS_KEY_ID", "env_ak"),
            ("AWS_SECRET_ACCESS_KEY", "env_sk"),
            ("AWS_DEFAULT_REGION", "eu-west-1"),
        ],
        Some(home.path()),
    );
    let req = sign_with(env_and_file, Config::default())?;
    let auth = authorization(&req).expect("must be signed");
    assert!(auth.starts_with("AWS4-HMAC-SHA256 Credential=env_ak/"), "{auth}");
    assert!(auth.contains("/eu-west-1/s3/aws4_request"), "{auth}");

    let everything = create_test_context(
        &[
            ("AWS_ACCESS_KEY_ID", "env_ak"),
            ("AWS_SECRET_ACCESS_KEY", "env_sk"),
            ("AWS_SESSION_TOKEN", "env_token"),
            ("AWS_DEFAULT_REGION", "eu-west-1"),
        ],
        Some(home.path()),
    );
    let req = sign_with(
        everything,
        Config::default()
            .with_access_key("explicit_ak", "explicit_sk")
            .with_region("ap-northeast-1"),
    )?;
    let auth = authorization(&req).expect("must be signed");
    assert!(auth.starts_with("AWS4-HMAC-SHA256 Credential=explicit_ak/"), "{auth}");
    assert!(auth.contains("/ap-northeast-1/s3/aws4_request"), "{auth}");
    // Token comes from env even though the keys were explicit.
    assert_eq!(req.headers()["x-amz-security-token"], "env_token");

    Ok(())
}

#[test]
fn test_os_env() {
    temp_env::with_vars(
        vec![
            ("AWS_ACCESS_KEY_ID", Some("os_ak")),
            ("AWS_SECRET_ACCESS_KEY", Some("os_sk")),
            ("AWS_SESSION_TOKEN", None),
            ("AWS_DEFAULT_REGION", Some("us-west-2")),
        ],
        || {
            let ctx = Context::new().with_file_read(StdFileRead).with_env(OsEnv);
            let req = sign_with(ctx, Config::default()).expect("sign must succeed");

            let auth = authorization(&req).expect("must be signed");
            assert!(auth.starts_with("AWS4-HMAC-SHA256 Credential=os_ak/"), "{auth}");
            assert!(auth.contains("/us-west-2/s3/aws4_request"), "{auth}");
            assert!(req.headers().get("x-amz-security-token").is_none());
        },
    );
}
