/// Message for a POST that never produced an HTTP response.
pub const NO_RESPONSE: &str = "no response for POST";
/// Message for an HTTP response whose body could not be read off the wire.
pub const UNREADABLE_BODY: &str = "POST response body cannot be read";
/// Message for a response body that does not match the expected shape.
pub const UNPARSABLE_BODY: &str = "Response body cannot be parsed";
/// Message for a request body that could not be serialized.
pub const UNSERIALIZABLE_BODY: &str = "cannot parse JSON body";
/// Message for a `401` on an authenticated call.
pub const RELOGIN_REQUIRED: &str = "Authentication failed, please relogin";
/// Message for a `201` whose `resourceURL` lacks the message id segment.
pub const UNPARSABLE_RESOURCE_URL: &str = "resourceURL cannot be parsed";
/// Message for a status code the operation has no rule for.
pub const UNEXPECTED_STATUS: &str = "An error occurred";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorTier {
    /// No HTTP exchange completed (`code == 0`).
    Transport,
    /// An HTTP response was received; `code` is its status.
    Http,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
#[error("{code} - {message}")]
/// The single error type returned by every [`KandyClient`](crate::KandyClient) call.
///
/// `code` is `0` when no HTTP response was obtained, otherwise the HTTP status. `message`
/// is either a transport description, a platform-supplied reason (with `%n` placeholders
/// already substituted), or one of the fixed fallback messages in this module.
pub struct KandyError {
    code: u16,
    message: String,
}

impl KandyError {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub(crate) fn transport(message: impl Into<String>) -> Self {
        Self::new(0, message)
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn tier(&self) -> ErrorTier {
        if self.code == 0 {
            ErrorTier::Transport
        } else {
            ErrorTier::Http
        }
    }

    /// `true` for a `401`: the access token was rejected and [`login`](crate::KandyClient::login)
    /// should be called again.
    pub fn is_auth_error(&self) -> bool {
        self.code == 401
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_code_and_message() {
        let err = KandyError::new(403, "Forbidden");
        assert_eq!(err.to_string(), "403 - Forbidden");
    }

    #[test]
    fn tier_follows_code() {
        assert_eq!(KandyError::transport(NO_RESPONSE).tier(), ErrorTier::Transport);
        assert_eq!(KandyError::new(500, UNEXPECTED_STATUS).tier(), ErrorTier::Http);
        assert!(KandyError::new(401, RELOGIN_REQUIRED).is_auth_error());
    }
}
