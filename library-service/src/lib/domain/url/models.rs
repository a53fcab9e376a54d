use std::fmt;
use std::str::FromStr;

use http::uri::Authority;

use crate::domain::url::errors::UrlError;

/// Host every redirect target points at.
pub const REDIRECT_HOST: &str = "www.byfood.com";

/// Scheme every redirect target uses.
pub const REDIRECT_SCHEME: &str = "https";

/// Normalization applied to a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlOperation {
    /// Drop query and fragment, strip trailing slashes.
    Canonical,
    /// Rewrite onto the redirect host, lowercase the path, then canonicalize.
    Redirection,
    /// Same output as `Redirection`.
    All,
}

impl FromStr for UrlOperation {
    type Err = UrlError;

    /// Parse an operation tag, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "canonical" => Ok(Self::Canonical),
            "redirection" => Ok(Self::Redirection),
            "all" => Ok(Self::All),
            _ => Err(UrlError::InvalidOperation(s.to_string())),
        }
    }
}

impl fmt::Display for UrlOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Canonical => "canonical",
            Self::Redirection => "redirection",
            Self::All => "all",
        })
    }
}

/// A URL reference, absolute or relative, with query and fragment dropped.
///
/// The path is held percent-decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlReference {
    pub scheme: Option<String>,
    pub authority: Option<String>,
    pub target: UrlTarget,
}

/// What follows the scheme and authority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlTarget {
    /// Hierarchical path, possibly empty or relative.
    Path(Vec<u8>),
    /// Body of a `scheme:body` reference whose body does not start with `/`.
    Opaque(Vec<u8>),
}

impl UrlReference {
    /// Parse a URL reference.
    ///
    /// Query and fragment are cut off before anything else is inspected.
    ///
    /// # Errors
    /// * `InvalidInput` - Blank input, control characters, a leading `:`, a
    ///   colon in the first segment of a relative path, an invalid authority
    ///   or a malformed percent escape
    pub fn parse(raw_url: &str) -> Result<Self, UrlError> {
        let invalid = || UrlError::InvalidInput(raw_url.to_string());

        if raw_url.trim().is_empty() || raw_url.bytes().any(|b| b < 0x20 || b == 0x7f) {
            return Err(invalid());
        }

        let rest = raw_url.split_once('#').map_or(raw_url, |(head, _)| head);
        let rest = rest.split_once('?').map_or(rest, |(head, _)| head);

        let (scheme, rest) = split_scheme(rest).ok_or_else(invalid)?;
        let scheme = scheme.map(str::to_ascii_lowercase);

        if scheme.is_some() && !rest.starts_with('/') {
            return Ok(Self {
                scheme,
                authority: None,
                target: UrlTarget::Opaque(percent_decode(rest).ok_or_else(invalid)?),
            });
        }

        if scheme.is_none() && rest.split('/').next().is_some_and(|s| s.contains(':')) {
            return Err(invalid());
        }

        let has_authority =
            rest.starts_with("//") && (scheme.is_some() || !rest.starts_with("///"));
        let (authority, path) = if has_authority {
            let after = &rest[2..];
            let end = after.find('/').unwrap_or(after.len());
            let authority = &after[..end];
            if !authority.is_empty() && authority.parse::<Authority>().is_err() {
                return Err(invalid());
            }
            (Some(authority.to_string()), &after[end..])
        } else {
            (None, rest)
        };

        Ok(Self {
            scheme,
            authority,
            target: UrlTarget::Path(percent_decode(path).ok_or_else(invalid)?),
        })
    }
}

/// Split a leading `scheme:` off, if the input has one.
///
/// Returns `None` when the input starts with `:`.
fn split_scheme(input: &str) -> Option<(Option<&str>, &str)> {
    for (i, c) in input.char_indices() {
        match c {
            'a'..='z' | 'A'..='Z' => {}
            '0'..='9' | '+' | '-' | '.' if i > 0 => {}
            ':' if i == 0 => return None,
            ':' => return Some((Some(&input[..i]), &input[i + 1..])),
            _ => return Some((None, input)),
        }
    }
    Some((None, input))
}

fn percent_decode(input: &str) -> Option<Vec<u8>> {
    let bytes = input.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let pair = bytes.get(i + 1..i + 3)?;
            if !pair.iter().all(u8::is_ascii_hexdigit) {
                return None;
            }
            decoded.push((hex_value(pair[0]) << 4) | hex_value(pair[1]));
            i += 3;
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }

    Some(decoded)
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => digit - b'A' + 10,
    }
}
