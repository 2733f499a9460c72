use std::io;
use std::time::Duration;

use kandy::{
    Address, BaseUrl, KandyClient, MessageText, ProjectCredentials, SendSms, SenderAddress,
};
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
    let destination = Address::new(required_env("KANDY_DESTINATION")?)?;
    let message = std::env::var("KANDY_MESSAGE")
        .unwrap_or_else(|_| "Hello from the kandy demo.".to_owned());

    let client = KandyClient::builder(base_url, credentials)
        .timeout(Duration::from_secs(30))
        .build()?;
    client.login().await?;

    // Fall back to the first DID granted to the project.
    let sender = match std::env::var("KANDY_SENDER") {
        Ok(sender) => sender,
        Err(_) => client.sms_did_list().into_iter().next().unwrap_or_default(),
    };

    let request = SendSms::new(
        SenderAddress::new(sender)?,
        destination,
        MessageText::new(message)?,
    );

    match client.send_sms(request).await {
        Ok(message_id) => println!("sent message {message_id}"),
        Err(err) if err.is_auth_error() => {
            eprintln!("access token rejected, log in again: {err}");
            return Err(err.into());
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
