//! Salted password hashing, stored as `base64(derived):base64(salt)`.

use argon2::{Algorithm, Argon2, Params, Version};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rand::rngs::OsRng;
use rand::RngCore;
use subtle::ConstantTimeEq;

use crate::errors::{Error, Result};

pub const SALT_BYTE_SIZE: usize = 32;
pub const HASH_BYTE_SIZE: usize = 32;

/// Argon2id with `iterations` passes over the default memory size.
fn hasher(iterations: u32) -> Result<Argon2<'static>> {
    let params = Params::new(
        Params::DEFAULT_M_COST,
        iterations,
        Params::DEFAULT_P_COST,
        Some(HASH_BYTE_SIZE),
    )
    .map_err(|e| Error::internal("Invalid password hashing parameters", e.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

fn derive(password: &str, salt: &[u8], iterations: u32) -> Result<[u8; HASH_BYTE_SIZE]> {
    let mut derived = [0u8; HASH_BYTE_SIZE];
    hasher(iterations)?
        .hash_password_into(password.as_bytes(), salt, &mut derived)
        .map_err(|e| Error::internal("Password hashing failed", e.to_string()))?;
    Ok(derived)
}

/// Hashes `password` with a fresh random salt.
pub fn hash_password(password: &str, iterations: u32) -> Result<String> {
    let mut salt = [0u8; SALT_BYTE_SIZE];
    OsRng.fill_bytes(&mut salt);
    let derived = derive(password, &salt, iterations)?;
    Ok(format!("{}:{}", BASE64.encode(derived), BASE64.encode(salt)))
}

/// Checks `password` against a stored hash. A malformed stored value never verifies.
pub fn verify_password(password: &str, stored: &str, iterations: u32) -> Result<bool> {
    let Some((hash_part, salt_part)) = stored.split_once(':') else {
        return Ok(false);
    };
    let (Ok(expected), Ok(salt)) = (BASE64.decode(hash_part), BASE64.decode(salt_part)) else {
        return Ok(false);
    };
    if expected.len() != HASH_BYTE_SIZE {
        return Ok(false);
    }
    let derived = derive(password, &salt, iterations)?;
    Ok(derived.as_slice().ct_eq(expected.as_slice()).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_has_two_base64_parts() {
        let stored = hash_password("welcome1234", 1).unwrap();
        let (hash, salt) = stored.split_once(':').unwrap();
        assert_eq!(BASE64.decode(hash).unwrap().len(), HASH_BYTE_SIZE);
        assert_eq!(BASE64.decode(salt).unwrap().len(), SALT_BYTE_SIZE);
    }

    #[test]
    fn test_verifies_only_original_password() {
        let stored = hash_password("correct horse", 1).unwrap();
        assert!(verify_password("correct horse", &stored, 1).unwrap());
        assert!(!verify_password("battery staple", &stored, 1).unwrap());
        assert!(!verify_password("correct horse", &stored, 2).unwrap());
    }

    #[test]
    fn test_same_password_gets_different_salts() {
        assert_ne!(hash_password("pw", 1).unwrap(), hash_password("pw", 1).unwrap());
    }

    #[test]
    fn test_malformed_stored_value_does_not_verify() {
        assert!(!verify_password("pw", "not-a-hash", 1).unwrap());
        assert!(!verify_password("pw", "@@@:@@@", 1).unwrap());
    }

    #[test]
    fn test_truncated_hash_does_not_verify() {
        let stored = hash_password("pw", 1).unwrap();
        let (hash, salt) = stored.split_once(':').unwrap();
        let mut bytes = BASE64.decode(hash).unwrap();
        bytes.truncate(HASH_BYTE_SIZE - 1);
        let truncated = format!("{}:{}", BASE64.encode(bytes), salt);
        assert!(!verify_password("pw", &truncated, 1).unwrap());
    }

    #[test]
    fn test_single_flipped_byte_does_not_verify() {
        let stored = hash_password("pw", 1).unwrap();
        let (hash, salt) = stored.split_once(':').unwrap();
        let mut bytes = BASE64.decode(hash).unwrap();
        bytes[HASH_BYTE_SIZE - 1] ^= 0x01;
        let tampered = format!("{}:{}", BASE64.encode(bytes), salt);
        assert!(!verify_password("pw", &tampered, 1).unwrap());
    }

    #[test]
    fn test_zero_iterations_is_rejected() {
        assert!(hash_password("pw", 0).is_err());
    }
}
