//! Domain layer: strong types with validation and invariants (no I/O).

mod credentials;
mod error;
mod request;
mod response;
mod validation;
mod value;

pub use credentials::{Credentials, LoginStatus};
pub use error::{
    ErrorTier, KandyError, NO_RESPONSE, RELOGIN_REQUIRED, UNEXPECTED_STATUS, UNPARSABLE_BODY,
    UNPARSABLE_RESOURCE_URL, UNREADABLE_BODY, UNSERIALIZABLE_BODY,
};
pub use request::SendSms;
pub use response::{IdTokenClaims, TokenSet};
pub use validation::ValidationError;
pub use value::{
    Address, BaseUrl, ClientCorrelator, ClientKey, ClientSecret, MessageId, MessageText,
    PhoneNumber, ProjectCredentials, SenderAddress,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_key_rejects_empty() {
        assert!(matches!(
            ClientKey::new("   "),
            Err(ValidationError::Empty {
                field: ClientKey::FIELD
            })
        ));
    }

    #[test]
    fn client_secret_rejects_empty_but_keeps_whitespace() {
        assert!(matches!(
            ClientSecret::new(""),
            Err(ValidationError::Empty {
                field: ClientSecret::FIELD
            })
        ));
        assert_eq!(ClientSecret::new(" s3cret ").unwrap().as_str(), " s3cret ");
    }

    #[test]
    fn client_secret_debug_is_redacted() {
        let secret = ClientSecret::new("s3cret").unwrap();
        assert!(!format!("{secret:?}").contains("s3cret"));
    }

    #[test]
    fn project_credentials_validate_both_parts() {
        assert!(ProjectCredentials::new("", "secret").is_err());
        assert!(ProjectCredentials::new("key", "").is_err());

        let credentials = ProjectCredentials::new(" key ", "secret").unwrap();
        assert_eq!(credentials.key().as_str(), "key");
        assert_eq!(credentials.secret().as_str(), "secret");
    }

    #[test]
    fn random_correlators_are_distinct() {
        let a = ClientCorrelator::random();
        let b = ClientCorrelator::random();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36);
    }

    #[test]
    fn base_url_rejects_unsupported_inputs() {
        assert!(matches!(
            BaseUrl::new(""),
            Err(ValidationError::Empty { .. })
        ));
        assert!(matches!(
            BaseUrl::new("not a url"),
            Err(ValidationError::InvalidUrl { .. })
        ));
        assert!(matches!(
            BaseUrl::new("ftp://cpaas.example.com"),
            Err(ValidationError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn base_url_endpoint_appends_segments() {
        let base = BaseUrl::new("https://cpaas.example.com").unwrap();
        let url = base.endpoint(["cpaas", "auth", "v1", "token"]);
        assert_eq!(url.as_str(), "https://cpaas.example.com/cpaas/auth/v1/token");

        let base = BaseUrl::new("https://cpaas.example.com/prefix/?q=1").unwrap();
        let url = base.endpoint(["cpaas", "auth", "v1", "token"]);
        assert_eq!(
            url.as_str(),
            "https://cpaas.example.com/prefix/cpaas/auth/v1/token"
        );
    }

    #[test]
    fn base_url_endpoint_escapes_path_separators() {
        let base = BaseUrl::new("https://cpaas.example.com").unwrap();
        let url = base.endpoint(["outbound", "a/b"]);
        assert_eq!(url.as_str(), "https://cpaas.example.com/outbound/a%2Fb");
    }

    #[test]
    fn message_text_preserves_whitespace() {
        assert!(MessageText::new("").is_err());
        assert_eq!(MessageText::new(" hi ").unwrap().as_str(), " hi ");
        assert_eq!(MessageText::new("  ").unwrap().as_str(), "  ");
    }

    #[test]
    fn message_id_is_not_trimmed() {
        assert!(MessageId::new("").is_err());
        assert_eq!(MessageId::new(" MSG123 ").unwrap().as_str(), " MSG123 ");
    }

    #[test]
    fn phone_number_parses_with_region_and_trims() {
        let pn = PhoneNumber::parse(Some(phonenumber::country::Id::US), " 2015550123 ").unwrap();
        assert_eq!(pn.raw(), "2015550123");
        assert_eq!(pn.e164(), "+12015550123");
    }

    #[test]
    fn address_from_phone_number_uses_e164() {
        let pn = PhoneNumber::parse(Some(phonenumber::country::Id::US), "2015550123").unwrap();
        let address: Address = pn.clone().into();
        assert_eq!(address.raw(), "+12015550123");

        let sender: SenderAddress = pn.into();
        assert_eq!(sender.as_str(), "+12015550123");
    }

    #[test]
    fn send_sms_keeps_parts() {
        let request = SendSms::new(
            SenderAddress::new("+15551230001").unwrap(),
            Address::new(" +15551239999 ").unwrap(),
            MessageText::new("hello").unwrap(),
        );
        assert_eq!(request.sender().as_str(), "+15551230001");
        assert_eq!(request.destination().raw(), "+15551239999");
        assert_eq!(request.text().as_str(), "hello");
    }
}
