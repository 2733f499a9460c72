#[derive(Clone, Default, PartialEq, Eq)]
/// Tokens returned by a successful client-credentials exchange.
pub struct TokenSet {
    pub access_token: String,
    pub id_token: String,
    pub refresh_token: String,
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSet")
            .field("access_token", &redacted(&self.access_token))
            .field("id_token", &redacted(&self.id_token))
            .field("refresh_token", &redacted(&self.refresh_token))
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Identity claims read from the payload segment of an id token.
///
/// Only these two claims are kept; the token itself is never verified.
pub struct IdTokenClaims {
    pub preferred_username: String,
    /// Comma-split `sms-did-list`, untrimmed. An empty claim yields `[""]`.
    pub sms_did_list: Vec<String>,
}

pub(crate) fn redacted(value: &str) -> &'static str {
    if value.is_empty() { "<empty>" } else { "<redacted>" }
}
