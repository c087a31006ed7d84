//! One-time sign-in codes.
//!
//! Codes live in memory only, one per email, and expire after a fixed TTL.
//! A successful verification consumes the code.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use rand::Rng;

struct PendingCode {
    code: String,
    expires_at: Instant,
}

impl PendingCode {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

pub struct OtpCache {
    codes: DashMap<String, PendingCode>,
    ttl: Duration,
}

/// Emails are compared case-insensitively.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl OtpCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            codes: DashMap::new(),
            ttl,
        }
    }

    /// Issues a fresh six-digit code for `email`, replacing any pending one.
    pub fn issue(&self, email: &str) -> String {
        self.purge_expired();

        let code = rand::thread_rng().gen_range(100_000..=999_999).to_string();
        self.codes.insert(
            normalize_email(email),
            PendingCode {
                code: code.clone(),
                expires_at: Instant::now() + self.ttl,
            },
        );
        code
    }

    /// Checks `code` for `email`. A match consumes the code; a mismatch leaves
    /// it in place until it expires.
    pub fn verify(&self, email: &str, code: &str) -> bool {
        let key = normalize_email(email);
        let now = Instant::now();

        let removed = self
            .codes
            .remove_if(&key, |_, pending| pending.is_expired(now) || pending.code == code.trim());

        match removed {
            Some((_, pending)) if !pending.is_expired(now) => true,
            Some(_) => {
                tracing::debug!("Discarded expired sign-in code");
                false
            }
            None => false,
        }
    }

    /// Drops every expired code and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.codes.len();
        self.codes.retain(|_, pending| !pending.is_expired(now));
        before.saturating_sub(self.codes.len())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
