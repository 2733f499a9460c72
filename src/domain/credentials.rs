use crate::domain::response::{IdTokenClaims, TokenSet, redacted};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoginStatus {
    #[default]
    LoggedOut,
    LoggedIn,
}

#[derive(Clone, Default, PartialEq, Eq)]
/// Session state of one client: OAuth tokens plus the identity derived from them.
///
/// Invariant: [`LoginStatus::LoggedIn`] only after tokens and claims were both
/// accepted from the same token exchange. Tokens are kept in memory only.
pub struct Credentials {
    tokens: TokenSet,
    preferred_username: String,
    sms_did_list: Vec<String>,
    login_status: LoginStatus,
}

impl Credentials {
    pub fn login_status(&self) -> LoginStatus {
        self.login_status
    }

    pub fn is_logged_in(&self) -> bool {
        self.login_status == LoginStatus::LoggedIn
    }

    pub fn access_token(&self) -> &str {
        &self.tokens.access_token
    }

    pub fn id_token(&self) -> &str {
        &self.tokens.id_token
    }

    pub fn refresh_token(&self) -> &str {
        &self.tokens.refresh_token
    }

    /// CPaaS user id used in resource paths.
    pub fn preferred_username(&self) -> &str {
        &self.preferred_username
    }

    /// Phone numbers the project may send SMS from.
    pub fn sms_did_list(&self) -> &[String] {
        &self.sms_did_list
    }

    pub(crate) fn sign_in(&mut self, tokens: TokenSet, claims: IdTokenClaims) {
        self.tokens = tokens;
        self.preferred_username = claims.preferred_username;
        self.sms_did_list = claims.sms_did_list;
        self.login_status = LoginStatus::LoggedIn;
    }

    /// Keep the received tokens but drop identity and fail closed.
    pub(crate) fn reject_claims(&mut self, tokens: TokenSet) {
        self.tokens = tokens;
        self.preferred_username.clear();
        self.sms_did_list.clear();
        self.login_status = LoginStatus::LoggedOut;
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &redacted(&self.tokens.access_token))
            .field("id_token", &redacted(&self.tokens.id_token))
            .field("refresh_token", &redacted(&self.tokens.refresh_token))
            .field("preferred_username", &self.preferred_username)
            .field("sms_did_list", &self.sms_did_list)
            .field("login_status", &self.login_status)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens() -> TokenSet {
        TokenSet {
            access_token: "at-secret".to_owned(),
            id_token: "a.b.c".to_owned(),
            refresh_token: "rt-secret".to_owned(),
        }
    }

    fn claims() -> IdTokenClaims {
        IdTokenClaims {
            preferred_username: "user1".to_owned(),
            sms_did_list: vec!["+15551230001".to_owned()],
        }
    }

    #[test]
    fn default_is_logged_out_and_empty() {
        let credentials = Credentials::default();
        assert_eq!(credentials.login_status(), LoginStatus::LoggedOut);
        assert_eq!(credentials.access_token(), "");
        assert!(credentials.sms_did_list().is_empty());
    }

    #[test]
    fn sign_in_populates_every_field() {
        let mut credentials = Credentials::default();
        credentials.sign_in(tokens(), claims());

        assert!(credentials.is_logged_in());
        assert_eq!(credentials.access_token(), "at-secret");
        assert_eq!(credentials.id_token(), "a.b.c");
        assert_eq!(credentials.refresh_token(), "rt-secret");
        assert_eq!(credentials.preferred_username(), "user1");
        assert_eq!(credentials.sms_did_list(), ["+15551230001".to_owned()]);
    }

    #[test]
    fn reject_claims_keeps_tokens_and_clears_previous_identity() {
        let mut credentials = Credentials::default();
        credentials.sign_in(tokens(), claims());

        let newer = TokenSet {
            access_token: "at-secret-2".to_owned(),
            ..tokens()
        };
        credentials.reject_claims(newer);

        assert_eq!(credentials.login_status(), LoginStatus::LoggedOut);
        assert_eq!(credentials.access_token(), "at-secret-2");
        assert_eq!(credentials.preferred_username(), "");
        assert!(credentials.sms_did_list().is_empty());
    }

    #[test]
    fn reset_returns_to_default() {
        let mut credentials = Credentials::default();
        credentials.sign_in(tokens(), claims());
        credentials.reset();
        assert_eq!(credentials, Credentials::default());
    }

    #[test]
    fn debug_output_redacts_tokens() {
        let mut credentials = Credentials::default();
        credentials.sign_in(tokens(), claims());
        let rendered = format!("{credentials:?}");
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("<redacted>"));
        assert!(rendered.contains("user1"));
    }
}
