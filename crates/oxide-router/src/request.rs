//! Request and URI values consumed by routes.

use std::collections::BTreeMap;
use std::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// Route parameters, keyed by parameter name.
pub type Params = BTreeMap<String, String>;

/// Characters left alone by raw URL encoding (RFC 3986 unreserved).
const RAW_URL: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Raw URL encoding plus the sub-delimiters, `:` and `@`, which are legal
/// inside a path segment.
const PATH_SEGMENT: &AsciiSet = &RAW_URL
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b':')
    .remove(b';')
    .remove(b'=')
    .remove(b'@');

/// Percent-encodes everything except unreserved characters.
pub(crate) fn raw_url_encode(value: &str) -> String {
    utf8_percent_encode(value, RAW_URL).to_string()
}

/// Percent-encodes a value for use inside a single path segment.
pub(crate) fn encode_path_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// Decodes percent-encoded octets. `+` is left untouched.
pub(crate) fn raw_url_decode(value: &str) -> String {
    percent_decode_str(value).decode_utf8_lossy().into_owned()
}

/// An already parsed URI.
///
/// Routes read the scheme, host and path, and produce new URIs through the
/// `with_*` methods while assembling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Uri {
    scheme: String,
    host: String,
    path: String,
    query: String,
}

impl Uri {
    /// Creates an empty URI.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a URI carrying only a path.
    #[must_use]
    pub fn from_path(path: impl Into<String>) -> Self {
        Self::new().with_path(path)
    }

    /// Returns the scheme, empty when unset.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Returns the host, empty when unset.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the query string without the leading `?`.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns a copy with the scheme replaced.
    #[must_use]
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Returns a copy with the host replaced.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Returns a copy with the path replaced.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Returns a copy with the query string replaced.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.scheme.is_empty() {
            write!(f, "{}:", self.scheme)?;
        }
        if !self.host.is_empty() {
            write!(f, "//{}", self.host)?;
        }
        if !self.host.is_empty() && !self.path.is_empty() && !self.path.starts_with('/') {
            f.write_str("/")?;
        }
        f.write_str(&self.path)?;
        if !self.query.is_empty() {
            write!(f, "?{}", self.query)?;
        }
        Ok(())
    }
}

/// A request to be routed: an HTTP method and a URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// HTTP method, compared case-insensitively by method routes.
    pub method: String,
    /// Request URI.
    pub uri: Uri,
}

impl Request {
    /// Creates a new request.
    pub fn new(method: impl Into<String>, uri: Uri) -> Self {
        Self {
            method: method.into(),
            uri,
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(uri: Uri) -> Self {
        Self::new("GET", uri)
    }

    /// Creates a POST request.
    #[must_use]
    pub fn post(uri: Uri) -> Self {
        Self::new("POST", uri)
    }

    /// Returns the request URI.
    #[must_use]
    pub const fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Returns the request path.
    #[must_use]
    pub fn path(&self) -> &str {
        self.uri.path()
    }
}
