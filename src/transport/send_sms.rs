use serde::{Deserialize, Serialize};

use super::json::{from_object_str, object_or_null};
use crate::domain::{ClientCorrelator, MessageId, SendSms};

/// Position of `{messageId}` in a `resourceURL` split on `/`:
/// `/cpaas/smsmessaging/v1/{userId}/remoteAddresses/{remoteAddress}/localAddresses/{localAddress}/messages/{messageId}`.
const RESOURCE_URL_MESSAGE_ID_INDEX: usize = 10;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// How the SMS endpoint's HTTP status is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendSmsStatus {
    /// `201`: the body carries the new message's `resourceURL`.
    Created,
    /// `401`: the bearer token was rejected; the body is not inspected.
    Unauthorized,
    /// `400` or anything above `401`: the body carries a `requestError` envelope.
    RequestError,
    /// Any other status.
    Unexpected,
}

impl SendSmsStatus {
    pub fn classify(status: u16) -> Self {
        match status {
            201 => Self::Created,
            401 => Self::Unauthorized,
            400 | 402.. => Self::RequestError,
            _ => Self::Unexpected,
        }
    }
}

#[derive(Debug, Serialize)]
struct SendSmsJsonRequest<'a> {
    #[serde(rename = "outboundSMSMessageRequest")]
    outbound_sms_message_request: OutboundSmsMessageRequest<'a>,
}

#[derive(Debug, Serialize)]
struct OutboundSmsMessageRequest<'a> {
    address: [&'a str; 1],
    #[serde(rename = "clientCorrelator")]
    client_correlator: &'a str,
    #[serde(rename = "outboundSMSTextMessage")]
    outbound_sms_text_message: OutboundSmsTextMessage<'a>,
}

#[derive(Debug, Serialize)]
struct OutboundSmsTextMessage<'a> {
    message: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SendSmsJsonResponse {
    #[serde(
        default,
        rename = "outboundSMSMessageRequest",
        deserialize_with = "object_or_null"
    )]
    outbound_sms_message_request: Option<OutboundSmsMessageResponse>,
}

#[derive(Debug, Clone, Deserialize)]
struct OutboundSmsMessageResponse {
    #[serde(default, rename = "resourceURL")]
    resource_url: Option<String>,
}

pub fn encode_send_sms_body(
    request: &SendSms,
    correlator: &ClientCorrelator,
) -> Result<Vec<u8>, TransportError> {
    let body = SendSmsJsonRequest {
        outbound_sms_message_request: OutboundSmsMessageRequest {
            address: [request.destination().raw()],
            client_correlator: correlator.as_str(),
            outbound_sms_text_message: OutboundSmsTextMessage {
                message: request.text().as_str(),
            },
        },
    };
    Ok(serde_json::to_vec(&body)?)
}

/// Read `outboundSMSMessageRequest.resourceURL` from a `201` body.
pub fn decode_send_sms_response(json: &str) -> Result<String, TransportError> {
    let parsed: SendSmsJsonResponse = from_object_str(json)?;
    Ok(parsed
        .outbound_sms_message_request
        .and_then(|request| request.resource_url)
        .unwrap_or_default())
}

pub fn message_id_from_resource_url(resource_url: &str) -> Option<MessageId> {
    resource_url
        .split('/')
        .nth(RESOURCE_URL_MESSAGE_ID_INDEX)
        .and_then(|segment| MessageId::new(segment).ok())
}

#[cfg(test)]
mod tests {
    use crate::domain::{Address, MessageText, SenderAddress};

    use super::*;

    #[test]
    fn classify_covers_every_branch() {
        assert_eq!(SendSmsStatus::classify(201), SendSmsStatus::Created);
        assert_eq!(SendSmsStatus::classify(401), SendSmsStatus::Unauthorized);
        assert_eq!(SendSmsStatus::classify(400), SendSmsStatus::RequestError);
        assert_eq!(SendSmsStatus::classify(402), SendSmsStatus::RequestError);
        assert_eq!(SendSmsStatus::classify(403), SendSmsStatus::RequestError);
        assert_eq!(SendSmsStatus::classify(503), SendSmsStatus::RequestError);
        for status in [0, 100, 200, 202, 204, 302, 399] {
            assert_eq!(
                SendSmsStatus::classify(status),
                SendSmsStatus::Unexpected,
                "status {status}"
            );
        }
    }

    #[test]
    fn encode_body_wraps_single_destination() {
        let request = SendSms::new(
            SenderAddress::new("+15551230001").unwrap(),
            Address::new("+15551239999").unwrap(),
            MessageText::new("hello \"world\"").unwrap(),
        );
        let correlator = ClientCorrelator::new("cc-1").unwrap();

        let body = encode_send_sms_body(&request, &correlator).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "outboundSMSMessageRequest": {
                    "address": ["+15551239999"],
                    "clientCorrelator": "cc-1",
                    "outboundSMSTextMessage": { "message": "hello \"world\"" }
                }
            })
        );
    }

    #[test]
    fn decode_response_reads_resource_url() {
        let json = r#"
        {
          "outboundSMSMessageRequest": {
            "address": ["+15551239999"],
            "senderAddress": "+15551230001",
            "resourceURL": "/cpaas/smsmessaging/v1/u1/remoteAddresses/r1/localAddresses/l1/messages/MSG123"
          }
        }
        "#;
        let resource_url = decode_send_sms_response(json).unwrap();
        assert_eq!(
            resource_url,
            "/cpaas/smsmessaging/v1/u1/remoteAddresses/r1/localAddresses/l1/messages/MSG123"
        );
        assert!(decode_send_sms_response("created").is_err());
        assert_eq!(decode_send_sms_response("{}").unwrap(), "");
    }

    #[test]
    fn decode_response_rejects_non_object_json() {
        for json in [
            "[]",
            r#"["/cpaas/smsmessaging/v1/u1/remoteAddresses/r1/localAddresses/l1/messages/MSG123"]"#,
            r#""created""#,
            r#"{"outboundSMSMessageRequest":[]}"#,
            r#"{"outboundSMSMessageRequest":"MSG123"}"#,
        ] {
            assert!(decode_send_sms_response(json).is_err(), "json: {json}");
        }
        assert_eq!(decode_send_sms_response("null").unwrap(), "");
    }

    #[test]
    fn message_id_is_eleventh_segment() {
        let id = message_id_from_resource_url(
            "/cpaas/smsmessaging/v1/u1/remoteAddresses/r1/localAddresses/l1/messages/MSG123",
        )
        .unwrap();
        assert_eq!(id.as_str(), "MSG123");
    }

    #[test]
    fn message_id_segment_is_returned_verbatim() {
        let id = message_id_from_resource_url(
            "/cpaas/smsmessaging/v1/u1/remoteAddresses/r1/localAddresses/l1/messages/ MSG123 ",
        )
        .unwrap();
        assert_eq!(id.as_str(), " MSG123 ");
    }

    #[test]
    fn message_id_is_none_for_short_or_empty_paths() {
        assert!(message_id_from_resource_url("").is_none());
        assert!(message_id_from_resource_url("/cpaas/smsmessaging/v1/u1/messages/MSG123").is_none());
        assert!(
            message_id_from_resource_url(
                "/cpaas/smsmessaging/v1/u1/remoteAddresses/r1/localAddresses/l1/messages/"
            )
            .is_none()
        );
    }
}
