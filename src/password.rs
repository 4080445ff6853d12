//! Password hashing and verification.

use pbkdf2::{
    Pbkdf2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::error::AppError;

/// Hash a password using PBKDF2-SHA256 with a fresh random salt.
///
/// The returned PHC string embeds the algorithm identifier, salt, and
/// iteration count, so verification stays self-describing and a future
/// parameter upgrade keeps old digests verifiable.
pub fn hash_password(plain: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Pbkdf2.hash_password(plain.as_bytes(), &salt)?.to_string();
    Ok(hash)
}

/// Verify a password against a stored digest.
pub fn verify_password(hash: &str, plain: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Pbkdf2.verify_password(plain.as_bytes(), &parsed_hash).is_ok()
}
