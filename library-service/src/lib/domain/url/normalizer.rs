use crate::domain::url::errors::UrlError;
use crate::domain::url::models::UrlOperation;
use crate::domain::url::models::UrlReference;
use crate::domain::url::models::UrlTarget;
use crate::domain::url::models::REDIRECT_HOST;
use crate::domain::url::models::REDIRECT_SCHEME;

/// Bytes kept literally when a path is written back out.
const PATH_SAFE: &[u8] = b"-_.~$&+,/:;=@";

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Normalize `raw_url` according to the operation tag.
///
/// Relative references are accepted: `canonical` cleans them in place and
/// `redirection` moves their path under the redirect host. The tag is checked
/// before the URL is parsed, so an unknown tag wins over an unparsable URL.
///
/// # Errors
/// * `InvalidOperation` - Tag is not `canonical`, `redirection` or `all`
/// * `InvalidInput` - URL cannot be parsed as a reference
pub fn normalize(raw_url: &str, operation: &str) -> Result<String, UrlError> {
    let operation: UrlOperation = operation.parse()?;
    let reference = UrlReference::parse(raw_url)?;

    Ok(match operation {
        UrlOperation::Canonical => canonical(&reference),
        UrlOperation::Redirection | UrlOperation::All => redirection(&reference),
    })
}

fn canonical(reference: &UrlReference) -> String {
    match &reference.target {
        UrlTarget::Opaque(body) => format!(
            "{}:{}",
            reference.scheme.as_deref().unwrap_or_default(),
            encode_path(trim_trailing_slashes(body))
        ),
        UrlTarget::Path(path) => {
            let path = trim_trailing_slashes(path);
            // A bare root stays a root rather than becoming an empty string.
            let path: &[u8] = match (&reference.scheme, &reference.authority, path) {
                (None, None, []) => &b"/"[..],
                _ => path,
            };
            assemble(
                reference.scheme.as_deref(),
                reference.authority.as_deref(),
                path,
            )
        }
    }
}

fn redirection(reference: &UrlReference) -> String {
    let (UrlTarget::Path(path) | UrlTarget::Opaque(path)) = &reference.target;

    let mut path = lowercase(path);
    if !path.is_empty() && !path.starts_with(b"/") {
        path.insert(0, b'/');
    }

    assemble(
        Some(REDIRECT_SCHEME),
        Some(REDIRECT_HOST),
        trim_trailing_slashes(&path),
    )
}

fn assemble(scheme: Option<&str>, authority: Option<&str>, path: &[u8]) -> String {
    let mut url = String::new();

    if let Some(scheme) = scheme {
        url.push_str(scheme);
        url.push(':');
    }
    if authority.is_some() || (scheme.is_some() && !path.is_empty()) {
        url.push_str("//");
        url.push_str(authority.unwrap_or_default());
    }

    let path = encode_path(path);
    // Keep a colon in the first segment from reading as a scheme.
    if url.is_empty() && path.split('/').next().is_some_and(|s| s.contains(':')) {
        url.push_str("./");
    }
    url.push_str(&path);

    url
}

fn trim_trailing_slashes(path: &[u8]) -> &[u8] {
    let end = path.iter().rposition(|&b| b != b'/').map_or(0, |i| i + 1);
    &path[..end]
}

fn lowercase(path: &[u8]) -> Vec<u8> {
    match std::str::from_utf8(path) {
        Ok(path) => path.to_lowercase().into_bytes(),
        Err(_) => path.to_ascii_lowercase(),
    }
}

fn encode_path(path: &[u8]) -> String {
    let mut encoded = String::with_capacity(path.len());
    for &b in path {
        if b.is_ascii_alphanumeric() || PATH_SAFE.contains(&b) {
            encoded.push(char::from(b));
        } else {
            encoded.push('%');
            encoded.push(char::from(HEX_UPPER[usize::from(b >> 4)]));
            encoded.push(char::from(HEX_UPPER[usize::from(b & 0x0f)]));
        }
    }
    encoded
}
