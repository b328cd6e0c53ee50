//! Opaque location handles issued by the host document provider.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
/// Opaque host-issued reference to a file or directory.
///
/// Handles are URI-like strings minted by the host document provider. The bridge
/// never interprets them as native filesystem paths; the only structure it relies
/// on is the trailing path segment used to derive display names for document
/// picks (the document chooser does not supply a separate display name).
pub struct LocationHandle(String);

impl LocationHandle {
    /// Wraps a raw host-issued reference string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the raw reference string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derives the last path segment of the handle, percent-decoded.
    ///
    /// Query and fragment parts are stripped first. For scheme://authority
    /// handles the authority is not treated as a path segment. Returns `None`
    /// when no segment can be derived (empty handle, authority-only handle, or
    /// a bare `/` path).
    pub fn last_path_segment(&self) -> Option<String> {
        let raw = self.0.as_str();
        let raw = raw.split(['?', '#']).next().unwrap_or(raw);

        let path = match raw.find("://") {
            Some(idx) => {
                let rest = &raw[idx + 3..];
                match rest.find('/') {
                    Some(slash) => &rest[slash + 1..],
                    None => return None,
                }
            }
            None => raw,
        };

        let segment = path
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default();
        if segment.is_empty() {
            None
        } else {
            Some(percent_decode(segment))
        }
    }
}

impl From<&str> for LocationHandle {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for LocationHandle {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl std::fmt::Display for LocationHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Decodes `%XX` escapes; malformed escapes pass through untouched.
fn percent_decode(segment: &str) -> String {
    let bytes = segment.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if let Some(value) = segment
                .get(i + 1..i + 3)
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())
            {
                out.push(value);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
