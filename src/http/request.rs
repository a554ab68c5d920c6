use bytes::BytesMut;
use std::collections::HashMap;

/// HTTP request methods.
///
/// The fixed verb set recognized on the request line. Anything else is
/// treated as an unparsable line and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// HEAD - Like GET but without the response body
    HEAD,
    /// GET - Retrieve a resource
    GET,
    /// POST - Create or submit data
    POST,
    /// PUT - Replace a resource
    PUT,
    /// DELETE - Delete a resource
    DELETE,
    /// TRACE - Echo the received request
    TRACE,
    /// OPTIONS - Describe communication options
    OPTIONS,
    /// CONNECT - Establish a tunnel
    CONNECT,
    /// PATCH - Partial modification of a resource
    PATCH,
}

impl Method {
    /// Every recognized verb, in the order they are tried on the request line.
    pub const ALL: [Method; 9] = [
        Method::HEAD,
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::TRACE,
        Method::OPTIONS,
        Method::CONNECT,
        Method::PATCH,
    ];

    /// Parses an HTTP method from a string (case-sensitive, uppercase).
    ///
    /// # Example
    ///
    /// ```
    /// # use switchboard::http::request::Method;
    /// assert_eq!(Method::from_str("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_str("get"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        Method::ALL.into_iter().find(|m| m.as_str() == s)
    }

    /// The wire spelling of the verb.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::HEAD => "HEAD",
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::TRACE => "TRACE",
            Method::OPTIONS => "OPTIONS",
            Method::CONNECT => "CONNECT",
            Method::PATCH => "PATCH",
        }
    }
}

/// An HTTP request reconstructed incrementally from the byte stream.
///
/// Built up field by field by the owning [`RequestParser`] as lines arrive;
/// `method` and `path` stay `None` until the request line has been seen.
/// Once `complete` flips true the parser freezes the request and it is
/// handed to exactly one processor.
///
/// [`RequestParser`]: crate::http::parser::RequestParser
#[derive(Debug, Default)]
pub struct Request {
    pub(crate) method: Option<Method>,
    pub(crate) path: Option<String>,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) raw: BytesMut,
    pub(crate) complete: bool,
    pub(crate) partial: bool,
    pub(crate) range_start: u64,
    pub(crate) range_end: u64,
}

impl Request {
    /// The HTTP method, once the request line has been parsed.
    pub fn method(&self) -> Option<Method> {
        self.method
    }

    /// The request target, once the request line has been parsed.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Retrieves a header value by name, case-insensitively.
    ///
    /// Header names are stored lower-cased and trimmed; the lookup key is
    /// lower-cased to match.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .get(&key.to_lowercase())
            .map(|v| v.as_str())
    }

    /// All headers seen so far, keyed by lower-cased name.
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// The exact bytes received so far, verbatim.
    pub fn raw_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// True once the blank line terminating the header section was seen.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// True when a completed request carried a `range` header.
    pub fn is_partial_request(&self) -> bool {
        self.partial
    }

    /// Start offset of a range request; 0 when absent or unparsable.
    pub fn start_offset(&self) -> u64 {
        self.range_start
    }

    /// End offset of a range request; 0 when absent or unparsable.
    pub fn end_offset(&self) -> u64 {
        self.range_end
    }
}
