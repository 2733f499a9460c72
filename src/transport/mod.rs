//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod auth;
mod json;
mod request_error;
mod send_sms;

pub use auth::{
    decode_auth_error, decode_id_token_claims, decode_token_response, encode_token_form,
};
pub use request_error::decode_request_error;
pub use send_sms::{
    SendSmsStatus, decode_send_sms_response, encode_send_sms_body, message_id_from_resource_url,
};
