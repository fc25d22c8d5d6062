use super::create_test_context;
use anyhow::Result;
use sigauth_aws_v4::{Config, DefaultCredentialProvider, ProfileCredentialProvider};
use sigauth_core::ProvideCredential;
use std::io::Write;

const CREDENTIALS: &str = r#"[default]
aws_access_key_id = default_ak
aws_secret_access_key = default_sk

; comment
[ci]
aws_access_key_id=ci_ak
aws_secret_access_key=ci_sk
region = eu-central-1
"#;

#[test]
fn test_profile_sections() -> Result<()> {
    let mut f = tempfile::NamedTempFile::new()?;
    f.write_all(CREDENTIALS.as_bytes())?;
    let path = f.path().to_string_lossy().to_string();
    let ctx = create_test_context(&[("AWS_SHARED_CREDENTIALS_FILE", &path)], None);

    let cred = ProfileCredentialProvider::new()
        .provide_credential(&ctx)?
        .expect("must load default section");
    assert_eq!(cred.access_key_id, "default_ak");
    assert_eq!(cred.secret_access_key, "default_sk");

    let cred = ProfileCredentialProvider::new()
        .with_profile("ci")
        .provide_credential(&ctx)?
        .expect("must load ci section");
    assert_eq!(cred.access_key_id, "ci_ak");
    assert_eq!(cred.secret_access_key, "ci_sk");

    let cred = ProfileCredentialProvider::new()
        .with_profile("missing")
        .provide_credential(&ctx)?;
    assert!(cred.is_none());

    Ok(())
}

#[test]
fn test_profile_from_config() -> Result<()> {
    let home = tempfile::tempdir()?;
    std::fs::write(home.path().join("creds"), CREDENTIALS)?;
    let ctx = create_test_context(&[], Some(home.path()));

    // Explicit paths may start with `~`.
    let provider = DefaultCredentialProvider::new(
        Config::default()
            .with_profile("ci")
            .with_shared_credentials_file("~/creds"),
    );
    let cred = provider
        .provide_credential(&ctx)?
        .expect("must load ci section");
    assert_eq!(cred.access_key_id, "ci_ak");
    assert!(cred.session_token.is_none());

    Ok(())
}
