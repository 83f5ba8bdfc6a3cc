//! Parsed message representation.

use std::borrow::Cow;

use serde::Serialize;

/// One header field, unfolded: continuation lines are already joined into
/// `value`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Header {
    pub name: String,
    pub value: String,
}

/// A parsed message: its header fields in original order, the raw body, and
/// a label saying where the bytes came from (a path or a blob id) for
/// diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    source: String,
    headers: Vec<Header>,
    body: Vec<u8>,
}

impl Message {
    pub(crate) fn new(source: String, headers: Vec<Header>, body: Vec<u8>) -> Self {
        Self {
            source,
            headers,
            body,
        }
    }

    /// Label identifying the origin of the bytes.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// All header fields, in the order they appeared.
    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    /// Value of the first header named `name`, compared case-insensitively.
    ///
    /// Mail in the wild writes `Message-ID`, `Message-Id`, and `message-id`;
    /// lookups treat them as the same field. Repeated fields (`Received`)
    /// are all kept in [`headers`](Self::headers); this returns the first.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    /// The raw body bytes, exactly as retrieved.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// The body as text, with invalid UTF-8 replaced.
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Message {
        Message::new(
            "test".to_string(),
            vec![
                Header {
                    name: "Received".to_string(),
                    value: "first hop".to_string(),
                },
                Header {
                    name: "Subject".to_string(),
                    value: "hello".to_string(),
                },
                Header {
                    name: "Received".to_string(),
                    value: "second hop".to_string(),
                },
            ],
            b"body\n".to_vec(),
        )
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let msg = sample();
        assert_eq!(msg.header("subject"), Some("hello"));
        assert_eq!(msg.header("SUBJECT"), Some("hello"));
        assert_eq!(msg.header("x-missing"), None);
    }

    #[test]
    fn repeated_headers_keep_order_and_first_wins() {
        let msg = sample();
        assert_eq!(msg.header("received"), Some("first hop"));
        let received: Vec<&str> = msg
            .headers()
            .iter()
            .filter(|h| h.name == "Received")
            .map(|h| h.value.as_str())
            .collect();
        assert_eq!(received, vec!["first hop", "second hop"]);
    }

    #[test]
    fn body_text_replaces_invalid_utf8() {
        let msg = Message::new("test".to_string(), Vec::new(), vec![0x68, 0x69, 0xff]);
        assert_eq!(msg.body_text(), "hi\u{fffd}");
    }
}
