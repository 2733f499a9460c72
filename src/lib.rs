//! Typed Rust client for the Kandy CPaaS HTTP API.
//!
//! The crate has three layers: a domain layer of strong types, a transport layer for
//! wire-format details, and a small client layer that authenticates with the OAuth2
//! client-credentials grant and sends SMS with the resulting bearer token. Every failed
//! call returns one [`KandyError`] carrying `{code, message}`.
//!
//! ```rust,no_run
//! use kandy::{
//!     Address, BaseUrl, ClientCorrelator, KandyClient, MessageText, ProjectCredentials,
//!     SendSms, SenderAddress,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = KandyClient::new(
//!         BaseUrl::new("https://oauth-cpaas.att.com")?,
//!         ProjectCredentials::new("PRIV-...", "...")?,
//!         ClientCorrelator::random(),
//!     );
//!     client.login().await?;
//!
//!     let request = SendSms::new(
//!         SenderAddress::new("+15551230001")?,
//!         Address::new("+15551239999")?,
//!         MessageText::new("hello")?,
//!     );
//!     let message_id = client.send_sms(request).await?;
//!     println!("sent {message_id}");
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{KandyClient, KandyClientBuilder};
pub use domain::{
    Address, BaseUrl, ClientCorrelator, ClientKey, ClientSecret, Credentials, ErrorTier,
    IdTokenClaims, KandyError, LoginStatus, MessageId, MessageText, PhoneNumber,
    ProjectCredentials, SendSms, SenderAddress, TokenSet, ValidationError,
};
