//! Session Gate Module
//! Optional password gate with an expiring in-memory session.

use sha2::{Digest, Sha256};
use std::time::{Duration, Instant};

/// Guards the dashboard behind a password when one is configured.
/// Sessions live only as long as the process and expire after the
/// configured timeout.
pub struct AuthGate {
    password_sha256: Option<String>,
    timeout: Duration,
    session_started: Option<Instant>,
}

impl AuthGate {
    pub fn new(password_sha256: Option<String>, timeout: Duration) -> Self {
        Self {
            password_sha256: password_sha256.map(|h| h.to_lowercase()),
            timeout,
            session_started: None,
        }
    }

    /// Whether a login screen is needed at all.
    pub fn required(&self) -> bool {
        self.password_sha256.is_some()
    }

    /// Check the session, clearing it when expired.
    pub fn check(&mut self) -> bool {
        if self.password_sha256.is_none() {
            return true;
        }
        match self.session_started {
            Some(started) if started.elapsed() < self.timeout => true,
            Some(_) => {
                tracing::info!("session expired");
                self.session_started = None;
                false
            }
            None => false,
        }
    }

    /// Verify a password attempt; opens a session on success.
    pub fn login(&mut self, password: &str) -> bool {
        let Some(expected) = &self.password_sha256 else {
            return true;
        };
        if sha256_hex(password) == *expected {
            tracing::info!("login succeeded");
            self.session_started = Some(Instant::now());
            true
        } else {
            tracing::warn!("login failed");
            false
        }
    }

    pub fn logout(&mut self) {
        tracing::info!("logged out");
        self.session_started = None;
    }
}

pub fn sha256_hex(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_password_means_open_access() {
        let mut gate = AuthGate::new(None, Duration::from_secs(60));
        assert!(!gate.required());
        assert!(gate.check());
    }

    #[test]
    fn correct_password_opens_a_session() {
        let mut gate = AuthGate::new(Some(sha256_hex("hunter2")), Duration::from_secs(60));
        assert!(!gate.check());
        assert!(!gate.login("wrong"));
        assert!(!gate.check());
        assert!(gate.login("hunter2"));
        assert!(gate.check());
    }

    #[test]
    fn hash_comparison_is_case_insensitive() {
        let upper = sha256_hex("secret").to_uppercase();
        let mut gate = AuthGate::new(Some(upper), Duration::from_secs(60));
        assert!(gate.login("secret"));
    }

    #[test]
    fn session_expires_after_timeout() {
        let mut gate = AuthGate::new(Some(sha256_hex("pw")), Duration::ZERO);
        assert!(gate.login("pw"));
        assert!(!gate.check());
    }

    #[test]
    fn logout_clears_the_session() {
        let mut gate = AuthGate::new(Some(sha256_hex("pw")), Duration::from_secs(60));
        gate.login("pw");
        gate.logout();
        assert!(!gate.check());
    }

    #[test]
    fn digest_matches_known_vector() {
        assert_eq!(
            sha256_hex("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
