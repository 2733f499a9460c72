use crate::domain::validation::ValidationError;

use phonenumber::country;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Root URL of a Kandy CPaaS deployment (for example `https://oauth-cpaas.att.com`).
///
/// Invariant: absolute `http`/`https` URL with a host, no query or fragment.
pub struct BaseUrl(Url);

impl BaseUrl {
    /// Parse and validate a base URL.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "base_url" });
        }

        let invalid = |reason: &str| ValidationError::InvalidUrl {
            input: trimmed.to_owned(),
            reason: reason.to_owned(),
        };

        let mut url = Url::parse(trimmed).map_err(|err| invalid(&err.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid("unsupported scheme"));
        }
        if url.host_str().is_none() || url.cannot_be_a_base() {
            return Err(invalid("missing host"));
        }
        url.set_query(None);
        url.set_fragment(None);
        Ok(Self(url))
    }

    /// Borrow the normalized URL.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Append percent-encoded path segments to the base path.
    pub(crate) fn endpoint<I, S>(&self, segments: I) -> Url
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut url = self.0.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Private project key (`client_id`).
///
/// Invariant: non-empty after trimming.
pub struct ClientKey(String);

impl ClientKey {
    /// Form field name used by the token endpoint (`client_id`).
    pub const FIELD: &'static str = "client_id";

    /// Create a validated [`ClientKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Private project secret (`client_secret`).
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct ClientSecret(String);

impl ClientSecret {
    /// Form field name used by the token endpoint (`client_secret`).
    pub const FIELD: &'static str = "client_secret";

    /// Create a validated [`ClientSecret`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the secret as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ClientSecret(<redacted>)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Static project credentials used for the client-credentials grant.
pub struct ProjectCredentials {
    key: ClientKey,
    secret: ClientSecret,
}

impl ProjectCredentials {
    /// Validate and pair a project key and secret.
    pub fn new(
        key: impl Into<String>,
        secret: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            key: ClientKey::new(key)?,
            secret: ClientSecret::new(secret)?,
        })
    }

    pub fn key(&self) -> &ClientKey {
        &self.key
    }

    pub fn secret(&self) -> &ClientSecret {
        &self.secret
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Identifier for this client instance (`clientCorrelator`), usually a UUID.
///
/// Invariant: non-empty after trimming.
pub struct ClientCorrelator(String);

impl ClientCorrelator {
    /// JSON field name used by the SMS endpoint (`clientCorrelator`).
    pub const FIELD: &'static str = "clientCorrelator";

    /// Create a validated [`ClientCorrelator`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Generate a random (UUID v4) correlator.
    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Borrow the validated correlator.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender address (one of the project's SMS DIDs), used as a path segment.
///
/// Invariant: non-empty after trimming.
pub struct SenderAddress(String);

impl SenderAddress {
    pub const FIELD: &'static str = "sender";

    /// Create a validated [`SenderAddress`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated address.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for SenderAddress {
    fn from(value: PhoneNumber) -> Self {
        Self(value.e164)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Destination address as sent in `outboundSMSMessageRequest.address`.
///
/// Invariant: non-empty after trimming. This type does not normalize; if you want E.164
/// normalization, parse into [`PhoneNumber`] and convert it into [`Address`].
pub struct Address(String);

impl Address {
    /// JSON field name used by the SMS endpoint (`address`).
    pub const FIELD: &'static str = "address";

    /// Create a validated (non-empty) address.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as sent to the platform.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for Address {
    /// Convert an already-parsed phone number to a normalized raw value (E.164).
    fn from(value: PhoneNumber) -> Self {
        Self(value.e164)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message text (`outboundSMSTextMessage.message`).
///
/// Invariant: must not be empty. Whitespace, including whitespace-only text, is sent as is.
pub struct MessageText(String);

impl MessageText {
    pub const FIELD: &'static str = "message";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Platform-assigned message id, the last segment of a `resourceURL`.
///
/// Invariant: non-empty. The value is kept exactly as the platform returned it.
pub struct MessageId(String);

impl MessageId {
    pub const FIELD: &'static str = "messageId";

    /// Create a validated [`MessageId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// Equality, ordering, and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    pub const FIELD: &'static str = "address";

    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164, parsed })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}
