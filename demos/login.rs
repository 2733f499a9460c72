use std::io;

use kandy::{BaseUrl, KandyClient, ProjectCredentials};
use tracing_subscriber::EnvFilter;

fn required_env(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let base_url = BaseUrl::new(required_env("KANDY_BASE_URL")?)?;
    let credentials = ProjectCredentials::new(
        required_env("KANDY_CLIENT_KEY")?,
        required_env("KANDY_CLIENT_SECRET")?,
    )?;

    let client = KandyClient::builder(base_url, credentials).build()?;
    client.login().await?;

    println!(
        "status: {:?}, user: {}, sms dids: {:?}",
        client.login_status(),
        client.preferred_username(),
        client.sms_did_list()
    );

    Ok(())
}
