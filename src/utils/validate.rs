use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

// NIP: 18 digit angka
static NIP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{18}$").expect("Invalid NIP regex"));

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Format email tidak valid");
    }
    Ok(())
}

/// Validasi NIP pegawai (opsional pada akun; bila diisi harus 18 digit)
pub fn validate_nip(nip: &str) -> Result<(), &'static str> {
    if !NIP_RE.is_match(nip) {
        return Err("NIP harus terdiri dari 18 digit angka");
    }
    Ok(())
}

/// Hasil validasi kebijakan kata sandi
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// Validasi kata sandi terhadap kebijakan keamanan
///
/// Kebijakan:
/// - panjang minimal 8 karakter
/// - harus memuat huruf besar, huruf kecil, dan angka
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    if password.len() < 8 {
        errors.push("Kata sandi minimal 8 karakter");
    }

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Kata sandi harus memuat huruf besar");
    }

    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Kata sandi harus memuat huruf kecil");
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Kata sandi harus memuat angka");
    }

    let weak_passwords = [
        "password",
        "12345678",
        "123456789",
        "qwerty123",
        "admin123",
        "password1",
        "Password1",
        "Qwerty123",
        "Abcd1234",
    ];
    if weak_passwords
        .iter()
        .any(|&weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Kata sandi terlalu umum, pilih yang lebih kuat");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// Validasi kata sandi versi ringkas (mengembalikan Result)
pub fn validate_password_simple(password: &str) -> Result<(), String> {
    let result = validate_password(password);
    if result.is_valid {
        Ok(())
    } else {
        Err(result.error_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_password() {
        assert!(validate_password("SecureP@ss1").is_valid);
        assert!(validate_password("SpjKuat2025").is_valid);
    }

    #[test]
    fn test_short_password() {
        let result = validate_password("Ab1");
        assert!(!result.is_valid);
        assert!(result.errors.contains(&"Kata sandi minimal 8 karakter"));
    }

    #[test]
    fn test_missing_classes() {
        assert!(!validate_password("abcd1234").is_valid);
        assert!(!validate_password("ABCD1234").is_valid);
        assert!(!validate_password("AbcdEfgh").is_valid);
    }

    #[test]
    fn test_common_password() {
        let result = validate_password("Password1");
        assert!(!result.is_valid);
    }

    #[test]
    fn test_email() {
        assert!(validate_email("operator@instansi.go.id").is_ok());
        assert!(validate_email("bukan-email").is_err());
    }

    #[test]
    fn test_nip() {
        assert!(validate_nip("198501012010011001").is_ok());
        assert!(validate_nip("12345").is_err());
        assert!(validate_nip("19850101201001100a").is_err());
    }
}
