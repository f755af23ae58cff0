//! Query-string tokens: section names and SSL overrides.
//!
//! The raw query is split on `&`, each token URI-decoded: escapes of the
//! reserved characters `; / ? : @ & = + $ , #` stay as written, everything
//! else is percent-decoded. `sslon` and `ssloff` steer the banner scheme;
//! everything else names a section.

use percent_encoding::percent_decode_str;

/// Characters whose escapes survive decoding.
const URI_RESERVED: &[u8] = b";/?:@&=+$,#";

/// Forces `https` in the banner.
pub const SSL_ON: &str = "sslon";
/// Forces `http` in the banner.
pub const SSL_OFF: &str = "ssloff";

/// `sslon` and `ssloff` were both requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SslConflict;

impl std::fmt::Display for SslConflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{SSL_ON} and {SSL_OFF} cannot be used together")
    }
}

/// Decoded query tokens in request order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    tokens: Vec<String>,
}

impl QueryParams {
    /// Parse the raw query (text after `?`, if any).
    pub fn parse(query: Option<&str>) -> Self {
        let tokens = query
            .unwrap_or("")
            .split('&')
            .map(decode_uri)
            .collect();
        Self { tokens }
    }

    /// True for a missing query, `?` alone, or a single empty token.
    pub fn is_empty(&self) -> bool {
        matches!(self.tokens.as_slice(), [] | [_]) && self.tokens.iter().all(String::is_empty)
    }

    /// Section names in request order, duplicates kept.
    pub fn sections(&self) -> Vec<&str> {
        self.tokens
            .iter()
            .map(String::as_str)
            .filter(|t| !is_ssl_keyword(t))
            .collect()
    }

    /// `Some(true)` for `sslon`, `Some(false)` for `ssloff`, `None` for neither.
    pub fn ssl_override(&self) -> Result<Option<bool>, SslConflict> {
        let on = self.tokens.iter().any(|t| t == SSL_ON);
        let off = self.tokens.iter().any(|t| t == SSL_OFF);

        match (on, off) {
            (true, true) => Err(SslConflict),
            (true, false) => Ok(Some(true)),
            (false, true) => Ok(Some(false)),
            (false, false) => Ok(None),
        }
    }
}

/// Percent-decode `token`, keeping escapes of [`URI_RESERVED`] characters.
///
/// Invalid UTF-8 after decoding is replaced lossily.
fn decode_uri(token: &str) -> String {
    let mut decoded = String::with_capacity(token.len());
    let mut rest = token;

    while let Some(at) = find_reserved_escape(rest) {
        decoded.push_str(&percent_decode_str(&rest[..at]).decode_utf8_lossy());
        decoded.push_str(&rest[at..at + 3]);
        rest = &rest[at + 3..];
    }
    decoded.push_str(&percent_decode_str(rest).decode_utf8_lossy());
    decoded
}

/// Byte offset of the first `%XX` that encodes a reserved character.
fn find_reserved_escape(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    bytes.windows(3).position(|w| {
        if w[0] != b'%' {
            return false;
        }
        match (hex_value(w[1]), hex_value(w[2])) {
            (Some(hi), Some(lo)) => URI_RESERVED.contains(&(hi << 4 | lo)),
            _ => false,
        }
    })
}

fn hex_value(b: u8) -> Option<u8> {
    char::from(b).to_digit(16).map(|d| d as u8)
}

fn is_ssl_keyword(token: &str) -> bool {
    token == SSL_ON || token == SSL_OFF
}
