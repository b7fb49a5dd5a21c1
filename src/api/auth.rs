//! Request signing for mutating endpoints.
//!
//! Callers are never taken from the request body. A mutating request
//! carries three headers:
//!
//! | Header               | Value                                   |
//! |----------------------|-----------------------------------------|
//! | `x-vault-public-key` | hex Ed25519 public key (32 bytes)       |
//! | `x-vault-timestamp`  | unix seconds at signing time            |
//! | `x-vault-signature`  | hex Ed25519 signature (64 bytes)        |
//!
//! The signature covers [`signing_payload`]: method, path, timestamp and
//! the raw body. The caller [`Address`] is the last 20 bytes of the
//! SHA-256 digest of the public key, see [`caller_address`].

use axum::body::Bytes;
use axum::extract::{FromRequest, OriginalUri, Request};
use axum::http::{HeaderMap, Method};
use chrono::{DateTime, Utc};
use ed25519_dalek::{Signature, SignatureError, VerifyingKey};
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};

use crate::domain::Address;
use crate::domain::address::ADDRESS_LEN;
use crate::error::GatewayError;

/// Header carrying the hex-encoded Ed25519 public key.
pub const PUBLIC_KEY_HEADER: &str = "x-vault-public-key";
/// Header carrying the signing time in unix seconds.
pub const TIMESTAMP_HEADER: &str = "x-vault-timestamp";
/// Header carrying the hex-encoded Ed25519 signature.
pub const SIGNATURE_HEADER: &str = "x-vault-signature";

/// Maximum distance between the signing time and the server clock.
pub const MAX_CLOCK_SKEW_SECS: i64 = 300;

/// Derives the caller address of an Ed25519 public key.
#[must_use]
pub fn caller_address(key: &VerifyingKey) -> Address {
    let digest = Sha256::digest(key.as_bytes());
    let mut bytes = [0u8; ADDRESS_LEN];
    for (dst, src) in bytes
        .iter_mut()
        .zip(digest.iter().skip(digest.len() - ADDRESS_LEN))
    {
        *dst = *src;
    }
    Address::from_bytes(bytes)
}

/// Bytes a client signs: `"{METHOD}\n{path}\n{timestamp}\n"` then the body.
#[must_use]
pub fn signing_payload(method: &Method, path: &str, timestamp: i64, body: &[u8]) -> Vec<u8> {
    let mut payload = format!("{method}\n{path}\n{timestamp}\n").into_bytes();
    payload.extend_from_slice(body);
    payload
}

/// Verifies the signature headers of a request and returns its caller.
///
/// # Errors
///
/// Returns [`GatewayError::Unauthenticated`] if a header is missing or
/// malformed, the timestamp is outside [`MAX_CLOCK_SKEW_SECS`] of `now`,
/// or the signature does not verify.
pub fn verify_request(
    headers: &HeaderMap,
    method: &Method,
    path: &str,
    body: &[u8],
    now: DateTime<Utc>,
) -> Result<Address, GatewayError> {
    let key_bytes: [u8; 32] = decode_header(headers, PUBLIC_KEY_HEADER)?;
    let signature_bytes: [u8; 64] = decode_header(headers, SIGNATURE_HEADER)?;
    let timestamp = header_str(headers, TIMESTAMP_HEADER)?
        .parse::<i64>()
        .map_err(|_| unauthenticated(format!("{TIMESTAMP_HEADER} is not unix seconds")))?;

    if (now.timestamp() - timestamp).abs() > MAX_CLOCK_SKEW_SECS {
        return Err(unauthenticated(format!(
            "{TIMESTAMP_HEADER} is more than {MAX_CLOCK_SKEW_SECS}s from server time"
        )));
    }

    let key = VerifyingKey::from_bytes(&key_bytes).map_err(bad_signature)?;
    let signature = Signature::from_bytes(&signature_bytes);
    key.verify_strict(&signing_payload(method, path, timestamp, body), &signature)
        .map_err(bad_signature)?;

    Ok(caller_address(&key))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Result<&'a str, GatewayError> {
    headers
        .get(name)
        .ok_or_else(|| unauthenticated(format!("missing {name} header")))?
        .to_str()
        .map_err(|_| unauthenticated(format!("{name} is not ASCII")))
}

fn decode_header<const N: usize>(headers: &HeaderMap, name: &str) -> Result<[u8; N], GatewayError> {
    let raw = header_str(headers, name)?;
    let raw = raw.strip_prefix("0x").unwrap_or(raw);
    let bytes = hex::decode(raw).map_err(|_| unauthenticated(format!("{name} is not hex")))?;
    <[u8; N]>::try_from(bytes.as_slice())
        .map_err(|_| unauthenticated(format!("{name} must be {N} bytes")))
}

fn unauthenticated(message: String) -> GatewayError {
    GatewayError::Unauthenticated(message)
}

fn bad_signature(_: SignatureError) -> GatewayError {
    unauthenticated("signature does not verify".to_string())
}

/// Extractor yielding the verified caller and the raw body.
#[derive(Debug)]
pub struct SignedRequest {
    /// Address derived from the verified public key.
    pub caller: Address,
    /// Raw request body, exactly as signed.
    pub body: Bytes,
}

impl<S> FromRequest<S> for SignedRequest
where
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let method = req.method().clone();
        let path = req.extensions().get::<OriginalUri>().map_or_else(
            || req.uri().path().to_owned(),
            |original| original.path().to_owned(),
        );
        let headers = req.headers().clone();
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| GatewayError::InvalidRequest(e.body_text()))?;

        let caller = verify_request(&headers, &method, &path, &body, Utc::now())?;
        tracing::debug!(%caller, %method, %path, "verified request signature");
        Ok(Self { caller, body })
    }
}

/// Extractor yielding the verified caller and a JSON body.
#[derive(Debug)]
pub struct SignedJson<T> {
    /// Address derived from the verified public key.
    pub caller: Address,
    /// Deserialized request body.
    pub body: T,
}

impl<S, T> FromRequest<S> for SignedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = GatewayError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let SignedRequest { caller, body } = SignedRequest::from_request(req, state).await?;
        let body = serde_json::from_slice(&body)
            .map_err(|e| GatewayError::InvalidRequest(format!("body: {e}")))?;
        Ok(Self { caller, body })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use ed25519_dalek::{Signer, SigningKey};

    const PATH: &str = "/api/v1/vault/pause";

    fn signed_headers(key: &SigningKey, path: &str, timestamp: i64, body: &[u8]) -> HeaderMap {
        let signature = key.sign(&signing_payload(&Method::POST, path, timestamp, body));
        let mut headers = HeaderMap::new();
        for (name, value) in [
            (PUBLIC_KEY_HEADER, hex::encode(key.verifying_key().as_bytes())),
            (TIMESTAMP_HEADER, timestamp.to_string()),
            (SIGNATURE_HEADER, hex::encode(signature.to_bytes())),
        ] {
            let Ok(value) = HeaderValue::from_str(&value) else {
                panic!("header value");
            };
            headers.insert(name, value);
        }
        headers
    }

    #[test]
    fn valid_signature_yields_derived_caller() {
        let key = SigningKey::from_bytes(&[7u8; 32]);
        let now = Utc::now();
        let headers = signed_headers(&key, PATH, now.timestamp(), b"{}");

        let Ok(caller) = verify_request(&headers, &Method::POST, PATH, b"{}", now) else {
            panic!("signature should verify");
        };
        assert_eq!(caller, caller_address(&key.verifying_key()));
    }

    #[test]
    fn claimed_key_signed_by_someone_else_is_rejected() {
        let admin = SigningKey::from_bytes(&[0xad; 32]);
        let stranger = SigningKey::from_bytes(&[0x5e; 32]);
        let now = Utc::now();

        let mut headers = signed_headers(&stranger, PATH, now.timestamp(), b"{}");
        let Ok(admin_key) = HeaderValue::from_str(&hex::encode(admin.verifying_key().as_bytes()))
        else {
            panic!("header value");
        };
        headers.insert(PUBLIC_KEY_HEADER, admin_key);

        assert!(matches!(
            verify_request(&headers, &Method::POST, PATH, b"{}", now),
            Err(GatewayError::Unauthenticated(_))
        ));
    }

    #[test]
    fn signature_is_bound_to_path_and_body() {
        let key = SigningKey::from_bytes(&[7u8; 32]);
        let now = Utc::now();
        let headers = signed_headers(&key, PATH, now.timestamp(), b"{}");

        let other_path = "/api/v1/vault/unpause";
        assert!(verify_request(&headers, &Method::POST, other_path, b"{}", now).is_err());
        assert!(verify_request(&headers, &Method::POST, PATH, b"{\"x\":1}", now).is_err());
    }

    #[test]
    fn stale_timestamp_is_rejected() {
        let key = SigningKey::from_bytes(&[7u8; 32]);
        let now = Utc::now();
        let stale = now.timestamp() - MAX_CLOCK_SKEW_SECS - 1;
        let headers = signed_headers(&key, PATH, stale, b"");

        let Err(GatewayError::Unauthenticated(msg)) =
            verify_request(&headers, &Method::POST, PATH, b"", now)
        else {
            panic!("expected unauthenticated");
        };
        assert!(msg.contains(TIMESTAMP_HEADER));
    }

    #[test]
    fn missing_headers_are_rejected() {
        let Err(GatewayError::Unauthenticated(msg)) =
            verify_request(&HeaderMap::new(), &Method::POST, PATH, b"", Utc::now())
        else {
            panic!("expected unauthenticated");
        };
        assert!(msg.contains(PUBLIC_KEY_HEADER));
    }

    #[test]
    fn caller_address_is_stable_per_key() {
        let a = SigningKey::from_bytes(&[1u8; 32]).verifying_key();
        let b = SigningKey::from_bytes(&[2u8; 32]).verifying_key();
        assert_eq!(caller_address(&a), caller_address(&a));
        assert_ne!(caller_address(&a), caller_address(&b));
        assert!(!caller_address(&a).is_zero());
    }
}
