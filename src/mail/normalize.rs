//! Flatten a Gmail message into the record served to clients.

use serde::{Deserialize, Serialize};

use crate::google::gmail::{Message, MessageHeader, MessagePayload, decode_base64};
use crate::mail::MailError;

pub const UNKNOWN_SENDER: &str = "Unknown sender";
pub const NO_SUBJECT: &str = "No subject";
pub const UNKNOWN_DATE: &str = "Unknown date";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedEmail {
    pub id: String,
    pub sender: String,
    pub subject: String,
    pub date: String,
    pub body: String,
}

/// Extract sender, subject, date and body from a full message.
///
/// Header names are matched exactly and the first match wins. For
/// multipart messages the first `text/plain` part is used, falling back
/// to the first `text/html` part. Single part messages use the payload
/// body directly. Fails only when the selected content can't be decoded.
pub fn normalize(message: &Message) -> Result<NormalizedEmail, MailError> {
    let payload = message.payload.as_ref();
    let headers = payload
        .and_then(|p| p.headers.as_deref())
        .unwrap_or_default();

    let body = match payload.and_then(body_data) {
        Some(data) => decode_base64(data)?,
        None => String::new(),
    };

    Ok(NormalizedEmail {
        id: message.id.clone(),
        sender: header_or(headers, "From", UNKNOWN_SENDER),
        subject: header_or(headers, "Subject", NO_SUBJECT),
        date: header_or(headers, "Date", UNKNOWN_DATE),
        body,
    })
}

fn header_or(headers: &[MessageHeader], name: &str, default: &str) -> String {
    headers
        .iter()
        .find(|h| h.name == name)
        .map(|h| h.value.as_str())
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
        .to_string()
}

fn body_data(payload: &MessagePayload) -> Option<&str> {
    let body = match &payload.parts {
        Some(parts) => parts
            .iter()
            .find(|p| p.mimetype == "text/plain")
            .or_else(|| parts.iter().find(|p| p.mimetype == "text/html"))
            .and_then(|p| p.body.as_ref()),
        None => payload.body.as_ref(),
    };
    body.and_then(|b| b.data.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::google::gmail::{MessagePart, MessagePartBody};
    use crate::mail::ErrorKind;
    use base64::{Engine as _, engine::general_purpose::URL_SAFE};

    fn header(name: &str, value: &str) -> MessageHeader {
        MessageHeader {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    fn body(content: &str) -> Option<MessagePartBody> {
        Some(MessagePartBody {
            data: Some(URL_SAFE.encode(content)),
            size: content.len() as u64,
            ..Default::default()
        })
    }

    fn part(mimetype: &str, content: &str) -> MessagePart {
        MessagePart {
            mimetype: mimetype.to_string(),
            body: body(content),
            ..Default::default()
        }
    }

    fn message(headers: Vec<MessageHeader>, payload: MessagePayload) -> Message {
        Message {
            id: "msg_001".to_string(),
            payload: Some(MessagePayload {
                headers: Some(headers),
                ..payload
            }),
            ..Default::default()
        }
    }

    fn multipart(parts: Vec<MessagePart>) -> MessagePayload {
        MessagePayload {
            mimetype: "multipart/alternative".to_string(),
            parts: Some(parts),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_for_missing_headers() {
        let msg = message(vec![header("To", "me@example.com")], MessagePayload::default());
        let email = normalize(&msg).unwrap();
        assert_eq!(email.id, "msg_001");
        assert_eq!(email.sender, "Unknown sender");
        assert_eq!(email.subject, "No subject");
        assert_eq!(email.date, "Unknown date");
        assert_eq!(email.body, "");
    }

    #[test]
    fn test_headers() {
        let msg = message(
            vec![
                header("From", "Alice <alice@example.com>"),
                header("Subject", "Lunch"),
                header("Subject", "Ignored"),
                header("Date", "Tue, 12 Nov 2024 09:15:23 +0000"),
            ],
            MessagePayload::default(),
        );
        let email = normalize(&msg).unwrap();
        assert_eq!(email.sender, "Alice <alice@example.com>");
        assert_eq!(email.subject, "Lunch");
        assert_eq!(email.date, "Tue, 12 Nov 2024 09:15:23 +0000");
    }

    #[test]
    fn test_header_names_are_case_sensitive() {
        let msg = message(
            vec![header("from", "alice@example.com"), header("SUBJECT", "Hi")],
            MessagePayload::default(),
        );
        let email = normalize(&msg).unwrap();
        assert_eq!(email.sender, "Unknown sender");
        assert_eq!(email.subject, "No subject");
    }

    #[test]
    fn test_empty_header_value_uses_default() {
        let msg = message(vec![header("Subject", "")], MessagePayload::default());
        assert_eq!(normalize(&msg).unwrap().subject, "No subject");
    }

    #[test]
    fn test_prefers_plain_text_part() {
        let msg = message(
            vec![],
            multipart(vec![
                part("text/html", "<p>Hello</p>"),
                part("text/plain", "Hello"),
            ]),
        );
        assert_eq!(normalize(&msg).unwrap().body, "Hello");
    }

    #[test]
    fn test_falls_back_to_html_part() {
        let msg = message(
            vec![],
            multipart(vec![
                part("image/png", "not text"),
                part("text/html", "<p>Hello</p>"),
            ]),
        );
        assert_eq!(normalize(&msg).unwrap().body, "<p>Hello</p>");
    }

    #[test]
    fn test_mime_type_must_match_exactly() {
        let msg = message(
            vec![],
            multipart(vec![part("text/plain; charset=UTF-8", "Hello")]),
        );
        assert_eq!(normalize(&msg).unwrap().body, "");
    }

    #[test]
    fn test_multipart_ignores_payload_body() {
        let payload = MessagePayload {
            body: body("top level"),
            ..multipart(vec![part("application/pdf", "%PDF")])
        };
        let msg = message(vec![], payload);
        assert_eq!(normalize(&msg).unwrap().body, "");
    }

    #[test]
    fn test_single_part_body() {
        let payload = MessagePayload {
            mimetype: "text/plain".to_string(),
            body: body("Plain text body"),
            ..Default::default()
        };
        let msg = message(vec![], payload);
        assert_eq!(normalize(&msg).unwrap().body, "Plain text body");
    }

    #[test]
    fn test_selected_part_without_data() {
        let empty = MessagePart {
            mimetype: "text/plain".to_string(),
            body: Some(MessagePartBody::default()),
            ..Default::default()
        };
        let msg = message(vec![], multipart(vec![empty, part("text/html", "<p>x</p>")]));
        // The plain part wins even though it carries no data
        assert_eq!(normalize(&msg).unwrap().body, "");
    }

    #[test]
    fn test_message_without_payload() {
        let msg = Message {
            id: "msg_002".to_string(),
            ..Default::default()
        };
        let email = normalize(&msg).unwrap();
        assert_eq!(email.id, "msg_002");
        assert_eq!(email.sender, "Unknown sender");
        assert_eq!(email.body, "");
    }

    #[test]
    fn test_undecodable_body() {
        let payload = MessagePayload {
            body: Some(MessagePartBody {
                data: Some("%%%".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let err = normalize(&message(vec![], payload)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Normalization);
    }
}
