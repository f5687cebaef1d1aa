//! HMAC-SHA256 request signing for the Volcengine and BytePlus OpenAPI
//!
//! The scheme follows the V4 layout: a canonical request is hashed into a
//! string to sign, and the signature is derived from a key chain over the
//! date, region, service and the literal `request`.

use std::collections::BTreeMap;
use std::fmt::Write;

use chrono::{DateTime, Utc};
use hmac::digest::InvalidLength;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

const ALGORITHM: &str = "HMAC-SHA256";
const SIGNED_HEADERS: &str = "content-type;host;x-content-sha256;x-date";

/// Service name in the credential scope
pub const SMS_SERVICE: &str = "volcSMS";

/// Access key pair and scope of a signer
#[derive(Clone)]
pub struct RequestSigner {
    access_key: String,
    secret_key: String,
    region: String,
    service: String,
}

/// Headers to attach to a signed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub x_date: String,
    pub content_sha256: String,
    pub authorization: String,
}

impl RequestSigner {
    pub fn new(access_key: &str, secret_key: &str, region: &str, service: &str) -> Self {
        Self {
            access_key: access_key.to_string(),
            secret_key: secret_key.to_string(),
            region: region.to_string(),
            service: service.to_string(),
        }
    }

    /// Sign a request
    ///
    /// `query` is sorted and encoded into the canonical query string; the body
    /// is hashed as sent.
    pub fn sign(
        &self,
        method: &str,
        host: &str,
        query: &BTreeMap<&str, &str>,
        content_type: &str,
        body: &[u8],
        now: DateTime<Utc>,
    ) -> Result<SignedRequest, InvalidLength> {
        let x_date = now.format("%Y%m%dT%H%M%SZ").to_string();
        let short_date = now.format("%Y%m%d").to_string();
        let content_sha256 = hex_sha256(body);

        let canonical_headers = format!(
            "content-type:{}\nhost:{}\nx-content-sha256:{}\nx-date:{}\n",
            content_type, host, content_sha256, x_date
        );
        let canonical_request = format!(
            "{}\n/\n{}\n{}\n{}\n{}",
            method,
            canonical_query_string(query),
            canonical_headers,
            SIGNED_HEADERS,
            content_sha256
        );

        let credential_scope = format!(
            "{}/{}/{}/request",
            short_date, self.region, self.service
        );
        let string_to_sign = format!(
            "{}\n{}\n{}\n{}",
            ALGORITHM,
            x_date,
            credential_scope,
            hex_sha256(canonical_request.as_bytes())
        );

        let signature = self.signature(&short_date, &string_to_sign)?;
        let authorization = format!(
            "{} Credential={}/{}, SignedHeaders={}, Signature={}",
            ALGORITHM, self.access_key, credential_scope, SIGNED_HEADERS, signature
        );

        Ok(SignedRequest {
            x_date,
            content_sha256,
            authorization,
        })
    }

    fn signature(&self, short_date: &str, string_to_sign: &str) -> Result<String, InvalidLength> {
        let k_date = hmac_sha256(self.secret_key.as_bytes(), short_date.as_bytes())?;
        let k_region = hmac_sha256(&k_date, self.region.as_bytes())?;
        let k_service = hmac_sha256(&k_region, self.service.as_bytes())?;
        let k_signing = hmac_sha256(&k_service, b"request")?;
        Ok(hex::encode(hmac_sha256(&k_signing, string_to_sign.as_bytes())?))
    }
}

/// Sorted `key=value` pairs joined by `&`
pub fn canonical_query_string(query: &BTreeMap<&str, &str>) -> String {
    query
        .iter()
        .map(|(k, v)| format!("{}={}", uri_encode(k), uri_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn uri_encode(value: &str) -> String {
    let mut result = String::with_capacity(value.len() * 3);
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                result.push(byte as char)
            }
            _ => {
                let _ = write!(result, "%{:02X}", byte);
            }
        }
    }
    result
}

fn hex_sha256(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>, InvalidLength> {
    let mut mac = Hmac::<Sha256>::new_from_slice(key)?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}
