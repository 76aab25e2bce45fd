//! Salted password hashing.
//!
//! Stored format: `v1$<salt_b64>$<mac_b64>` where the MAC is
//! HMAC-SHA256(key = salt, message = password) and both parts are
//! URL-safe base64 without padding. Verification compares in constant time.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

const SCHEME: &str = "v1";

pub fn hash_password(password: &str) -> String {
    // 16 random bytes of salt per hash.
    let salt = Uuid::new_v4();
    let mac = mac_bytes(salt.as_bytes(), password);
    format!(
        "{SCHEME}${}${}",
        URL_SAFE_NO_PAD.encode(salt.as_bytes()),
        URL_SAFE_NO_PAD.encode(mac)
    )
}

pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.splitn(3, '$');
    let (Some(scheme), Some(salt_b64), Some(mac_b64)) =
        (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    if scheme != SCHEME {
        return false;
    }
    let (Ok(salt), Ok(expected)) = (
        URL_SAFE_NO_PAD.decode(salt_b64),
        URL_SAFE_NO_PAD.decode(mac_b64),
    ) else {
        return false;
    };
    let computed = mac_bytes(&salt, password);
    computed.ct_eq(expected.as_slice()).into()
}

fn mac_bytes(salt: &[u8], password: &str) -> [u8; 32] {
    // HMAC accepts a key of any length.
    let mut mac = HmacSha256::new_from_slice(salt).expect("HMAC accepts any key length");
    mac.update(password.as_bytes());
    mac.finalize().into_bytes().into()
}
