use anyhow::Result;
use sigauth::aws::Config;

fn main() -> Result<()> {
    env_logger::init();

    let signer = sigauth::aws::default_signer("s3", Config::default());
    if signer.credential().is_none() {
        println!("no credential found, the request will be sent unsigned");
    }

    let req = http::Request::builder()
        .method(http::Method::GET)
        .uri("https://s3.amazonaws.com/my-bucket/my-object")
        .body(bytes::Bytes::new())?;

    let resp = signer.send(req)?;
    println!("Response status: {}", resp.status());

    Ok(())
}
