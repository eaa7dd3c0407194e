use hmac::{Hmac, Mac};
use http::header::{COOKIE, HeaderMap};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::session::errors::SessionError;
use crate::utils::{base64url_decode, base64url_encode};

type HmacSha256 = Hmac<Sha256>;

fn mac_for(id: &str, secret: &[u8]) -> Result<HmacSha256, SessionError> {
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| SessionError::Crypto(format!("Invalid HMAC key: {e}")))?;
    mac.update(id.as_bytes());
    Ok(mac)
}

/// Cookie value for a session id: `{id}.{base64url(HMAC-SHA256(secret, id))}`
pub(super) fn sign_session_id(id: &str, secret: &[u8]) -> Result<String, SessionError> {
    let signature = mac_for(id, secret)?.finalize().into_bytes();
    Ok(format!("{id}.{}", base64url_encode(signature.to_vec())?))
}

/// Return the session id carried by a cookie value if its signature checks out.
pub(super) fn verify_session_cookie<'a>(value: &'a str, secret: &[u8]) -> Option<&'a str> {
    let (id, signature) = value.rsplit_once('.')?;
    if id.is_empty() {
        return None;
    }
    let signature = base64url_decode(signature).ok()?;
    let expected = mac_for(id, secret).ok()?.finalize().into_bytes();

    if bool::from(expected.as_slice().ct_eq(signature.as_slice())) {
        Some(id)
    } else {
        None
    }
}

/// Find the value of cookie `name` in the request's `Cookie` headers.
///
/// Header values that are not visible ASCII cannot hold our cookie and are skipped.
pub(super) fn get_cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    for cookie_header in headers.get_all(COOKIE) {
        let Ok(cookie_str) = cookie_header.to_str() else {
            tracing::debug!("Skipping non-ASCII cookie header");
            continue;
        };

        let found = cookie_str.split(';').map(|s| s.trim()).find_map(|s| {
            let mut parts = s.splitn(2, '=');
            match (parts.next(), parts.next()) {
                (Some(k), Some(v)) if k == name => Some(v),
                _ => None,
            }
        });
        if found.is_some() {
            return found;
        }
    }

    tracing::trace!("No session cookie '{}' found in cookies", name);
    None
}
