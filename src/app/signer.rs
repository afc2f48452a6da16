//! Canonical query string for signed distribution requests
//!
//! The distribution authenticates requests through a set of query parameters
//! handed out with dataset access approval. The host expects reserved
//! characters in the parameter values literally, so the canonical form is
//! standard form encoding followed by a percent-decode pass: characters that
//! decode cleanly back to themselves pass through unchanged.

use url::form_urlencoded;

/// Immutable query string appended to every distribution request
///
/// Built once at startup from the loaded parameter list.
#[derive(Debug, Clone)]
pub struct SignedParams {
    query: String,
}

impl SignedParams {
    /// Build the canonical query string from raw key/value pairs
    pub fn new(params: &[(String, String)]) -> Self {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .finish();

        // Decode pass over the encoded form. The input was UTF-8 to begin
        // with, so decoding cannot fail; keep the encoded form if it somehow
        // does.
        let query = match urlencoding::decode(&encoded) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => encoded,
        };

        Self { query }
    }

    /// An empty parameter set (requests go out unsigned)
    pub fn empty() -> Self {
        Self {
            query: String::new(),
        }
    }

    /// Whether any parameters are present
    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }

    /// The canonical query string, without a leading `?`
    pub fn as_str(&self) -> &str {
        &self.query
    }
}
