//! Admin credential and Basic header parsing

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sha2::{Digest, Sha256};

/// Configured admin credential
///
/// Only SHA-256 digests are kept, so the plaintext password never sits in
/// state and every comparison is over fixed-length values.
pub struct AdminCredential {
    username: String,
    username_digest: [u8; 32],
    password_digest: [u8; 32],
}

impl std::fmt::Debug for AdminCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredential")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl AdminCredential {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            username_digest: digest(username),
            password_digest: digest(password),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Check a presented username/password pair
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let user_ok = fixed_eq(&digest(username), &self.username_digest);
        let pass_ok = fixed_eq(&digest(password), &self.password_digest);
        user_ok & pass_ok
    }
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}

/// Compare without short-circuiting on the first differing byte
fn fixed_eq(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Parse `Authorization: Basic base64(user:pass)` into `(user, pass)`
///
/// The scheme name is matched case-insensitively. The password may contain `:`.
pub fn parse_basic_header(header: &str) -> Option<(String, String)> {
    let (scheme, encoded) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, pass) = decoded.split_once(':')?;
    Some((user.to_string(), pass.to_string()))
}
