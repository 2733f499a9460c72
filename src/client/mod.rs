//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use tracing::{debug, instrument};

use crate::domain::{
    BaseUrl, ClientCorrelator, Credentials, KandyError, LoginStatus, MessageId, NO_RESPONSE,
    ProjectCredentials, RELOGIN_REQUIRED, SendSms, UNEXPECTED_STATUS, UNPARSABLE_BODY,
    UNPARSABLE_RESOURCE_URL, UNREADABLE_BODY, UNSERIALIZABLE_BODY,
};
use crate::transport::{
    SendSmsStatus, decode_auth_error, decode_id_token_claims, decode_request_error,
    decode_send_sms_response, decode_token_response, encode_send_sms_body, encode_token_form,
    message_id_from_resource_url,
};

const TOKEN_PATH: [&str; 4] = ["cpaas", "auth", "v1", "token"];

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

#[derive(Debug, thiserror::Error)]
enum TransportFailure {
    #[error("no response for POST: {0}")]
    NoResponse(#[source] Box<dyn StdError + Send + Sync>),

    #[error("response body of HTTP {status} cannot be read: {source}")]
    UnreadableBody {
        status: u16,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl TransportFailure {
    fn status(&self) -> u16 {
        match self {
            Self::NoResponse(_) => 0,
            Self::UnreadableBody { status, .. } => *status,
        }
    }

    fn text(&self) -> &'static str {
        match self {
            Self::NoResponse(_) => NO_RESPONSE,
            Self::UnreadableBody { .. } => UNREADABLE_BODY,
        }
    }

    fn into_error(self) -> KandyError {
        debug!(error = %self, "POST failed");
        decode_request_error(self.status(), "", Some(self.text()))
    }
}

trait HttpTransport: Send + Sync {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, TransportFailure>>;

    fn post_json<'a>(
        &'a self,
        url: &'a str,
        bearer: &'a str,
        body: Vec<u8>,
    ) -> BoxFuture<'a, Result<HttpResponse, TransportFailure>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    async fn read(response: reqwest::Response) -> Result<HttpResponse, TransportFailure> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| TransportFailure::UnreadableBody {
                status,
                source: Box::new(err),
            })?;
        Ok(HttpResponse { status, body })
    }
}

impl HttpTransport for ReqwestTransport {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, TransportFailure>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url)
                .form(&params)
                .send()
                .await
                .map_err(|err| TransportFailure::NoResponse(Box::new(err)))?;
            Self::read(response).await
        })
    }

    fn post_json<'a>(
        &'a self,
        url: &'a str,
        bearer: &'a str,
        body: Vec<u8>,
    ) -> BoxFuture<'a, Result<HttpResponse, TransportFailure>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url)
                .bearer_auth(bearer)
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body)
                .send()
                .await
                .map_err(|err| TransportFailure::NoResponse(Box::new(err)))?;
            Self::read(response).await
        })
    }
}

#[derive(Debug, Clone)]
/// Builder for [`KandyClient`].
///
/// Use this when you need to customize the client correlator, timeout, or user-agent.
pub struct KandyClientBuilder {
    base_url: BaseUrl,
    credentials: ProjectCredentials,
    client_correlator: Option<ClientCorrelator>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl KandyClientBuilder {
    /// Create a builder with a random client correlator and no timeout/user-agent override.
    pub fn new(base_url: BaseUrl, credentials: ProjectCredentials) -> Self {
        Self {
            base_url,
            credentials,
            client_correlator: None,
            timeout: None,
            user_agent: None,
        }
    }

    /// Set the `clientCorrelator` sent with every SMS request.
    pub fn client_correlator(mut self, client_correlator: ClientCorrelator) -> Self {
        self.client_correlator = Some(client_correlator);
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`KandyClient`].
    ///
    /// Fails with a transport-tier [`KandyError`] (`code == 0`) if the HTTP client cannot
    /// be constructed.
    pub fn build(self) -> Result<KandyClient, KandyError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder.build().map_err(|err| {
            debug!(error = %err, "HTTP client cannot be built");
            KandyError::transport(format!("HTTP client cannot be built: {err}"))
        })?;

        Ok(KandyClient {
            base_url: self.base_url,
            credentials: self.credentials,
            client_correlator: self
                .client_correlator
                .unwrap_or_else(ClientCorrelator::random),
            session: Arc::default(),
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// High-level Kandy CPaaS client.
///
/// Holds the project credentials and the session obtained by [`KandyClient::login`].
/// Clones share the same session, so a login through one clone is visible to all.
///
/// The session sits behind a read-write lock: `login` applies its whole update under the
/// write lock, `send_sms` copies the bearer token and user id under the read lock. Neither
/// lock is held across a network call.
pub struct KandyClient {
    base_url: BaseUrl,
    credentials: ProjectCredentials,
    client_correlator: ClientCorrelator,
    session: Arc<RwLock<Credentials>>,
    http: Arc<dyn HttpTransport>,
}

impl KandyClient {
    /// Create a client for `base_url` with a fixed client correlator.
    ///
    /// For more customization, use [`KandyClient::builder`].
    pub fn new(
        base_url: BaseUrl,
        credentials: ProjectCredentials,
        client_correlator: ClientCorrelator,
    ) -> Self {
        Self {
            base_url,
            credentials,
            client_correlator,
            session: Arc::default(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(base_url: BaseUrl, credentials: ProjectCredentials) -> KandyClientBuilder {
        KandyClientBuilder::new(base_url, credentials)
    }

    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    pub fn client_correlator(&self) -> &ClientCorrelator {
        &self.client_correlator
    }

    pub fn login_status(&self) -> LoginStatus {
        self.session().login_status()
    }

    /// CPaaS user id from the last successful login, empty when logged out.
    pub fn preferred_username(&self) -> String {
        self.session().preferred_username().to_owned()
    }

    /// Sender numbers available to the project, from the last successful login.
    pub fn sms_did_list(&self) -> Vec<String> {
        self.session().sms_did_list().to_vec()
    }

    /// Snapshot of the current session.
    pub fn credentials(&self) -> Credentials {
        self.session().clone()
    }

    /// Authenticate the project with the OAuth2 client-credentials grant.
    ///
    /// On `200` the returned tokens are always stored. The id token's claims are then read;
    /// if that fails the session stays [`LoginStatus::LoggedOut`] and the error carries the
    /// HTTP status with the claim-decoding message.
    ///
    /// Errors:
    /// - `code == 0` when no response was obtained,
    /// - `{status, message}` from the token endpoint's `{"message": ...}` body otherwise,
    /// - `{status, "Response body cannot be parsed"}` if that body is not a JSON object.
    #[instrument(level = "debug", skip(self))]
    pub async fn login(&self) -> Result<(), KandyError> {
        let url = self.base_url.endpoint(TOKEN_PATH);
        debug!(endpoint = %url, "requesting access token");

        let response = self
            .http
            .post_form(url.as_str(), encode_token_form(&self.credentials))
            .await
            .map_err(TransportFailure::into_error)?;
        debug!(status = response.status, "token endpoint responded");

        if response.status != 200 {
            let message =
                decode_auth_error(&response.body).unwrap_or_else(|_| UNPARSABLE_BODY.to_owned());
            return Err(KandyError::new(response.status, message));
        }

        let tokens = match decode_token_response(&response.body) {
            Ok(tokens) => tokens,
            Err(err) => {
                debug!(error = %err, "token response cannot be parsed");
                self.session_mut().reset();
                return Err(KandyError::new(response.status, UNPARSABLE_BODY));
            }
        };

        let claims = decode_id_token_claims(&tokens.id_token);
        let mut session = self.session_mut();
        match claims {
            Ok(claims) => {
                session.sign_in(tokens, claims);
                Ok(())
            }
            Err(err) => {
                session.reject_claims(tokens);
                Err(KandyError::new(response.status, err.to_string()))
            }
        }
    }

    /// Send one SMS and return the platform-assigned message id.
    ///
    /// Uses the access token and user id from the last [`login`](Self::login); no local
    /// check is made that a login happened, the platform answers `401` instead.
    ///
    /// Errors:
    /// - `code == 0` when no response was obtained,
    /// - `401` with a fixed "please relogin" message,
    /// - `400` or `> 401` with the platform's service/policy exception text,
    /// - `201` if the success body or its `resourceURL` cannot be read,
    /// - any other status with a generic message.
    #[instrument(level = "debug", skip(self, request), fields(sender = %request.sender().as_str()))]
    pub async fn send_sms(&self, request: SendSms) -> Result<MessageId, KandyError> {
        let body = encode_send_sms_body(&request, &self.client_correlator).map_err(|err| {
            debug!(error = %err, "SMS request cannot be serialized");
            KandyError::transport(UNSERIALIZABLE_BODY)
        })?;

        let (access_token, user_id) = {
            let session = self.session();
            (
                session.access_token().to_owned(),
                session.preferred_username().to_owned(),
            )
        };

        let url = self.base_url.endpoint([
            "cpaas",
            "smsmessaging",
            "v1",
            user_id.as_str(),
            "outbound",
            request.sender().as_str(),
            "requests",
        ]);
        debug!(endpoint = %url, "sending SMS");

        let response = self
            .http
            .post_json(url.as_str(), &access_token, body)
            .await
            .map_err(TransportFailure::into_error)?;
        debug!(status = response.status, "SMS endpoint responded");

        match SendSmsStatus::classify(response.status) {
            SendSmsStatus::Created => {
                let resource_url = decode_send_sms_response(&response.body)
                    .map_err(|_| KandyError::new(response.status, UNPARSABLE_BODY))?;
                message_id_from_resource_url(&resource_url)
                    .ok_or_else(|| KandyError::new(response.status, UNPARSABLE_RESOURCE_URL))
            }
            SendSmsStatus::Unauthorized => Err(KandyError::new(response.status, RELOGIN_REQUIRED)),
            SendSmsStatus::RequestError => {
                Err(decode_request_error(response.status, &response.body, None))
            }
            SendSmsStatus::Unexpected => Err(KandyError::new(response.status, UNEXPECTED_STATUS)),
        }
    }

    fn session(&self) -> RwLockReadGuard<'_, Credentials> {
        self.session.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn session_mut(&self) -> RwLockWriteGuard<'_, Credentials> {
        self.session.write().unwrap_or_else(PoisonError::into_inner)
    }
}
