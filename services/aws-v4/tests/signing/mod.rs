mod live;
mod suite;

use sigauth_aws_v4::{Credential, RequestSigner, StaticCredentialProvider};
use sigauth_core::time::parse_iso8601;
use sigauth_core::{Context, Signer};

pub const ACCESS_KEY: &str = "AKIDEXAMPLE";
pub const SECRET_KEY: &str = "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY";

/// Signer pinned to the time, region and service of the sigv4 test suite.
pub fn suite_signer(ctx: Context) -> Signer<Credential> {
    let _ = env_logger::builder().is_test(true).try_init();

    let time = parse_iso8601("20150830T123600Z").expect("time must be valid");
    Signer::new(
        ctx,
        StaticCredentialProvider::new(ACCESS_KEY, SECRET_KEY),
        RequestSigner::new("service", "us-east-1").with_time(time),
    )
}

pub fn suite_authorization(signed_headers: &str, signature: &str) -> String {
    format!(
        "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/service/aws4_request, \
         SignedHeaders={signed_headers}, Signature={signature}"
    )
}
