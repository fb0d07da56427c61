use ferry::blob::{Blob, BlobConfig};
use ferry::http::Target;
use ferry::Transport;
use ferry_hyper::successful_fetch;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    env_logger::init();

    let uri = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://example.com/".to_owned());
    let target = uri.parse::<Target>()?;

    match successful_fetch().fetch(target, None).await {
        Ok(response) => {
            let blob = Blob::read(response.into_body(), BlobConfig::new().limit(1 << 20)).await?;
            println!("{} bytes", blob.size());
        }
        Err(err) => match err.into_rejected() {
            Ok(failed) => println!("rejected: {}", failed),
            Err(err) => return Err(err.into()),
        },
    }

    Ok(())
}
