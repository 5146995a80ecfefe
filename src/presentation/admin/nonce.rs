use base64::engine::general_purpose::URL_SAFE_NO_PAD as BASE64_URL_SAFE;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};

type HmacSha256 = Hmac<Sha256>;

/// Seconds one token window lasts. Tokens also verify during the window
/// after the one they were issued in.
const WINDOW_SECONDS: u64 = 12 * 60 * 60;

/// Tag bytes kept from the HMAC output before encoding.
const TOKEN_TAG_BYTES: usize = 12;

/// Issues and verifies the security tokens embedded in settings forms.
///
/// A token binds an action name to a time window with HMAC-SHA256. A fresh
/// factory draws a random secret, so tokens do not survive a restart.
pub struct NonceFactory {
    secret: [u8; 32],
}

impl NonceFactory {
    pub fn new() -> Self {
        Self {
            secret: rand::random(),
        }
    }

    pub fn with_secret(secret: [u8; 32]) -> Self {
        Self { secret }
    }

    /// Token for `action`, bound to the current time window.
    pub fn issue(&self, action: &str) -> String {
        self.token_for(action, current_window())
    }

    /// Accepts tokens issued in the current or the previous window.
    pub fn verify(&self, action: &str, token: &str) -> bool {
        let window = current_window();
        self.matches(action, token, window)
            || (window > 0 && self.matches(action, token, window - 1))
    }

    fn matches(&self, action: &str, token: &str, window: u64) -> bool {
        constant_time_eq(self.token_for(action, window).as_bytes(), token.as_bytes())
    }

    fn token_for(&self, action: &str, window: u64) -> String {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC can take key of any size");
        mac.update(action.as_bytes());
        mac.update(&window.to_le_bytes());
        let tag = mac.finalize().into_bytes();

        BASE64_URL_SAFE.encode(&tag[..TOKEN_TAG_BYTES])
    }
}

impl Default for NonceFactory {
    fn default() -> Self {
        Self::new()
    }
}

fn current_window() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    now / WINDOW_SECONDS
}

// Constant-time comparison
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
