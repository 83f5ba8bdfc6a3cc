//! Lenient RFC-822 header parsing.
//!
//! Real mailboxes hold messages with bare LF line endings, stray colonless
//! lines, and folded headers in every style, so the rules here are
//! permissive: anything that does not look like a header field is skipped,
//! and only a message with no recognizable fields at all is rejected.

use crate::error::{MailError, MailResult};
use crate::message::{Header, Message};
use crate::traits::MessageParser;

/// The bundled parser: splits the header block from the body at the first
/// blank line, unfolds continuation lines, and keeps the body as raw bytes.
#[derive(Clone, Copy, Debug, Default)]
pub struct Rfc822Parser;

impl Rfc822Parser {
    pub fn new() -> Self {
        Self
    }
}

impl MessageParser for Rfc822Parser {
    fn parse(&self, source: &str, data: &[u8]) -> MailResult<Message> {
        if data.is_empty() {
            return Err(MailError::Empty);
        }
        let (header_block, body) = split_at_blank_line(data);
        let headers = parse_headers(header_block);
        if headers.is_empty() {
            return Err(MailError::Malformed(format!(
                "no header fields in {source}"
            )));
        }
        Ok(Message::new(source.to_string(), headers, body.to_vec()))
    }
}

/// Split at the first blank line (`\n\n` or `\n\r\n`). Without one, the
/// whole input is headers and the body is empty.
fn split_at_blank_line(data: &[u8]) -> (&[u8], &[u8]) {
    // A message opening with a blank line has no header block at all.
    if data.first() == Some(&b'\n') {
        return (&[], &data[1..]);
    }
    if data.starts_with(b"\r\n") {
        return (&[], &data[2..]);
    }
    let mut i = 0;
    while i < data.len() {
        if data[i] == b'\n' {
            if data.get(i + 1) == Some(&b'\n') {
                return (&data[..i], &data[i + 2..]);
            }
            if data.get(i + 1) == Some(&b'\r') && data.get(i + 2) == Some(&b'\n') {
                return (&data[..i], &data[i + 3..]);
            }
        }
        i += 1;
    }
    (data, &[])
}

fn parse_headers(block: &[u8]) -> Vec<Header> {
    let mut headers: Vec<Header> = Vec::new();
    for raw in block.split(|&b| b == b'\n') {
        let line = raw.strip_suffix(b"\r").unwrap_or(raw);
        if line.is_empty() {
            continue;
        }
        if line[0] == b' ' || line[0] == b'\t' {
            // Folded continuation: belongs to the previous field. A leading
            // continuation with no field before it is dropped.
            if let Some(last) = headers.last_mut() {
                let text = String::from_utf8_lossy(line);
                last.value.push(' ');
                last.value.push_str(text.trim());
            }
            continue;
        }
        let Some(colon) = line.iter().position(|&b| b == b':') else {
            continue;
        };
        let name = String::from_utf8_lossy(&line[..colon]).trim().to_string();
        if name.is_empty() {
            continue;
        }
        let value = String::from_utf8_lossy(&line[colon + 1..])
            .trim()
            .to_string();
        headers.push(Header { name, value });
    }
    headers
}
