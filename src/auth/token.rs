use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use rand::Rng;

use crate::error::{Error, Result};

const ARGON2_MEMORY: u32 = 64 * 1024;
const ARGON2_ITERATIONS: u32 = 1;
const ARGON2_PARALLELISM: u32 = 4;
const ARGON2_OUTPUT_LEN: usize = 32;

const TOKEN_PREFIX: &str = "habitual";
const LOOKUP_LENGTH: usize = 8;
const SECRET_LENGTH: usize = 24;
const SECRET_BYTES: usize = SECRET_LENGTH / 2;

/// A freshly minted session token. `raw` is handed to the client once;
/// only `lookup` and `hash` are stored.
pub struct IssuedToken {
    pub raw: String,
    pub lookup: String,
    pub hash: String,
}

pub struct TokenGenerator {
    argon2: Argon2<'static>,
}

impl Default for TokenGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenGenerator {
    #[must_use]
    pub fn new() -> Self {
        let params = Params::new(
            ARGON2_MEMORY,
            ARGON2_ITERATIONS,
            ARGON2_PARALLELISM,
            Some(ARGON2_OUTPUT_LEN),
        )
        .expect("invalid argon2 params");

        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }

    /// Generates a session token of the form `habitual_<lookup>_<secret>`.
    pub fn generate(&self) -> Result<IssuedToken> {
        let lookup = generate_lookup();
        let raw = format!("{TOKEN_PREFIX}_{lookup}_{}", generate_secret());
        let hash = self.hash(&raw)?;
        Ok(IssuedToken { raw, lookup, hash })
    }

    pub fn hash(&self, token: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(token.as_bytes(), &salt)
            .map_err(|e| Error::Config(format!("failed to hash token: {e}")))?;
        Ok(hash.to_string())
    }

    /// Verifies a raw token against a stored PHC hash.
    pub fn verify(&self, token: &str, hash: &str) -> Result<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| Error::Config(format!("invalid hash format: {e}")))?;

        match self.argon2.verify_password(token.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(Error::Config(format!("failed to verify token: {e}"))),
        }
    }
}

fn generate_lookup() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..LOOKUP_LENGTH].to_string()
}

fn generate_secret() -> String {
    let mut bytes = [0u8; SECRET_BYTES];
    rand::thread_rng().fill(&mut bytes);
    hex::encode(bytes)
}

/// Splits a session token into its lookup and secret parts.
pub fn parse_token(token: &str) -> Result<(String, String)> {
    let rest = token
        .strip_prefix(TOKEN_PREFIX)
        .and_then(|r| r.strip_prefix('_'))
        .ok_or(Error::InvalidTokenFormat)?;

    let (lookup, secret) = rest.split_once('_').ok_or(Error::InvalidTokenFormat)?;

    if lookup.len() != LOOKUP_LENGTH || secret.len() != SECRET_LENGTH || secret.contains('_') {
        return Err(Error::InvalidTokenFormat);
    }

    Ok((lookup.to_string(), secret.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_generation_format() {
        let generator = TokenGenerator::new();
        let issued = generator.generate().unwrap();

        assert!(issued.raw.starts_with("habitual_"));
        assert_eq!(issued.lookup.len(), 8);

        let parts: Vec<&str> = issued.raw.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[1], issued.lookup);
        assert_eq!(parts[2].len(), 24);
        assert!(issued.hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_token_verification() {
        let generator = TokenGenerator::new();
        let issued = generator.generate().unwrap();

        assert!(generator.verify(&issued.raw, &issued.hash).unwrap());

        let wrong = format!("{}_wrong", &issued.raw[..issued.raw.len() - 5]);
        assert!(!generator.verify(&wrong, &issued.hash).unwrap());
    }

    #[test]
    fn test_parse_token() {
        let (lookup, secret) = parse_token("habitual_12345678_123456789012345678901234").unwrap();
        assert_eq!(lookup, "12345678");
        assert_eq!(secret, "123456789012345678901234");

        for bad in [
            "cutlass_12345678_123456789012345678901234",
            "habitual_12345678",
            "habitual_1234_123456789012345678901234",
            "habitual_12345678_1234567890123456789012_4",
            "",
        ] {
            assert!(parse_token(bad).is_err(), "{bad}");
        }
    }
}
