use crate::config::AppConfig;
use crate::errors::SuperjeError;
use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};

/// Hash kata sandi dengan Argon2id
pub fn hash_password(password: &str) -> Result<String, SuperjeError> {
    let config = AppConfig::get();
    let params = Params::new(
        config.argon2.memory_cost,
        config.argon2.time_cost,
        config.argon2.parallelism,
        None,
    )
    .map_err(|e| SuperjeError::validation(format!("Parameter Argon2 tidak valid: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| SuperjeError::validation(format!("Gagal melakukan hash kata sandi: {e}")))?;
    Ok(hash.to_string())
}

/// Verifikasi kata sandi terhadap hash tersimpan
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed_hash) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok(),
        Err(_) => false,
    }
}
