//! Incremental HTTP request parsing.
//!
//! The parser is a byte-driven state machine: each byte is appended to the
//! raw accumulator and to a line accumulator, and a full parse step runs only
//! when a line feed arrives. A blank line (just its own terminator) ends the
//! header section and completes the request. Parsing is best-effort and
//! forgiving: a line matching neither the request-line shape nor the header
//! shape is silently skipped.

use bytes::BufMut;

use crate::http::request::{Method, Request};

pub struct RequestParser {
    request: Request,
    line: Vec<u8>,
}

impl RequestParser {
    pub fn new() -> Self {
        Self {
            request: Request::default(),
            line: Vec::new(),
        }
    }

    /// Feed a single input byte.
    ///
    /// A zero byte is the "no data" sentinel and is ignored. Once the request
    /// is complete every further byte is ignored as well; the finished
    /// request never mutates.
    pub fn feed(&mut self, byte: u8) {
        if byte == 0 || self.request.complete {
            return;
        }

        self.request.raw.put_u8(byte);
        self.line.push(byte);

        if byte == b'\n' {
            // A line holding only its terminator is the blank line ending
            // the header section.
            if self.line == b"\n" || self.line == b"\r\n" {
                self.request.complete = true;
                self.evaluate_range();
                return;
            }

            self.parse_line();
            self.line.clear();
        }
    }

    /// True once the terminating blank line has been observed.
    pub fn is_complete(&self) -> bool {
        self.request.complete
    }

    /// The request as parsed so far; best-effort before completion.
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Consumes the parser, yielding the request for dispatch.
    pub fn into_request(self) -> Request {
        self.request
    }

    fn parse_line(&mut self) {
        let text = String::from_utf8_lossy(&self.line).into_owned();
        let line = text.trim_end_matches(['\r', '\n']);

        // The two shapes are not mutually exclusive: both are tried on every
        // line, request line first, so a request line containing a colon is
        // also recorded as a header.
        self.try_request_line(line);
        self.try_header(line);
    }

    /// Request-line shape: `<METHOD> <path> <trailing-token>`. The path runs
    /// up to the last space; trailing tokens (protocol version) are ignored.
    fn try_request_line(&mut self, line: &str) {
        if self.request.method.is_some() {
            // First match wins; later lines that happen to look like a
            // request line are skipped.
            return;
        }

        for method in Method::ALL {
            let Some(rest) = line.strip_prefix(method.as_str()) else {
                continue;
            };
            let Some(rest) = rest.strip_prefix(' ') else {
                continue;
            };
            if let Some((path, _version)) = rest.rsplit_once(' ') {
                let path = path.trim();
                if !path.is_empty() {
                    self.request.method = Some(method);
                    self.request.path = Some(path.to_string());
                    return;
                }
            }
        }
    }

    /// Header shape: `<name>:<value>`, split at the first colon. Names are
    /// stored lower-cased and trimmed; a repeated name overwrites the
    /// earlier value.
    fn try_header(&mut self, line: &str) {
        let Some((name, value)) = line.split_once(':') else {
            return;
        };
        let name = name.trim();
        let value = value.trim();
        if name.is_empty() || value.is_empty() {
            return;
        }

        self.request
            .headers
            .insert(name.to_lowercase(), value.to_string());
    }

    /// Runs once, at completion. Any `range` header marks the request
    /// partial; offsets come from the first `<digits>-<digits>` occurrence
    /// in its value and default to 0 when a side is empty or unparsable.
    fn evaluate_range(&mut self) {
        let Some(value) = self.request.headers.get("range") else {
            return;
        };
        self.request.partial = true;

        if let Some((start, end)) = parse_range(value) {
            self.request.range_start = start;
            self.request.range_end = end;
        }
    }
}

impl Default for RequestParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Finds the first `-` in the value and takes the digit runs on either side
/// as the range offsets. Either run may be empty; an empty or oversized run
/// parses to the 0 default.
fn parse_range(value: &str) -> Option<(u64, u64)> {
    let dash = value.find('-')?;
    let bytes = value.as_bytes();

    let mut start_at = dash;
    while start_at > 0 && bytes[start_at - 1].is_ascii_digit() {
        start_at -= 1;
    }

    let mut end_at = dash + 1;
    while end_at < bytes.len() && bytes[end_at].is_ascii_digit() {
        end_at += 1;
    }

    let start = value[start_at..dash].parse().unwrap_or(0);
    let end = value[dash + 1..end_at].parse().unwrap_or(0);
    Some((start, end))
}
