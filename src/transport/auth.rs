use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::Deserialize;

use super::json::{from_object_slice, from_object_str};
use crate::domain::{ClientKey, ClientSecret, IdTokenClaims, ProjectCredentials, TokenSet};

/// Unpadded standard alphabet; non-zero trailing bits in the last symbol are ignored.
const ID_TOKEN_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone)
        .with_decode_allow_trailing_bits(true),
);

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why the claims of an id token could not be read.
///
/// The display strings are surfaced to callers as the `message` of a login error.
#[derive(Debug, thiserror::Error)]
pub enum ClaimsError {
    #[error("id_token is not valid!")]
    Malformed,

    #[error("id_token cannot be decoded!")]
    Base64(#[source] base64::DecodeError),

    #[error("id_token cannot be parsed")]
    Json(#[source] serde_json::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
struct TokenJsonResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    id_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct AuthErrorJsonResponse {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct IdTokenJsonClaims {
    #[serde(default)]
    preferred_username: Option<String>,
    #[serde(default, rename = "sms-did-list")]
    sms_did_list: Option<String>,
}

pub fn encode_token_form(credentials: &ProjectCredentials) -> Vec<(String, String)> {
    vec![
        ("grant_type".to_owned(), "client_credentials".to_owned()),
        (
            ClientKey::FIELD.to_owned(),
            credentials.key().as_str().to_owned(),
        ),
        (
            ClientSecret::FIELD.to_owned(),
            credentials.secret().as_str().to_owned(),
        ),
        ("scope".to_owned(), "openid".to_owned()),
    ]
}

pub fn decode_token_response(json: &str) -> Result<TokenSet, TransportError> {
    let parsed: TokenJsonResponse = from_object_str(json)?;
    Ok(TokenSet {
        access_token: parsed.access_token.unwrap_or_default(),
        id_token: parsed.id_token.unwrap_or_default(),
        refresh_token: parsed.refresh_token.unwrap_or_default(),
    })
}

/// Read the plain `{"message": ...}` body the token endpoint returns on failure.
pub fn decode_auth_error(json: &str) -> Result<String, TransportError> {
    let parsed: AuthErrorJsonResponse = from_object_str(json)?;
    Ok(parsed.message.unwrap_or_default())
}

/// Extract identity claims from the payload segment of `id_token`.
///
/// The signature is not checked; integrity relies on the TLS channel the token arrived on.
pub fn decode_id_token_claims(id_token: &str) -> Result<IdTokenClaims, ClaimsError> {
    let segments = id_token.split('.').collect::<Vec<_>>();
    let [_header, payload, _signature] = segments.as_slice() else {
        return Err(ClaimsError::Malformed);
    };

    let bytes = ID_TOKEN_ENGINE
        .decode(payload)
        .map_err(ClaimsError::Base64)?;
    let claims: IdTokenJsonClaims = from_object_slice(&bytes).map_err(ClaimsError::Json)?;

    let sms_did_list = claims
        .sms_did_list
        .unwrap_or_default()
        .split(',')
        .map(str::to_owned)
        .collect();

    Ok(IdTokenClaims {
        preferred_username: claims.preferred_username.unwrap_or_default(),
        sms_did_list,
    })
}
