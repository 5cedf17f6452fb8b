//! Modul penanganan error terpadu
//!
//! Menggunakan makro untuk menghasilkan tipe error beserta kode dan nama
//! jenisnya. Seluruh lapisan storage dan service memakai tipe ini.

use std::fmt;

/// Makro pendefinisi tipe error
///
/// Menghasilkan:
/// - definisi enum
/// - metode code() - kode error
/// - metode error_type() - nama jenis error
/// - metode message() - detail error
/// - konstruktor singkat per varian
macro_rules! define_superje_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum SuperjeError {
            $($variant(String),)*
        }

        impl SuperjeError {
            /// Kode error
            pub fn code(&self) -> &'static str {
                match self {
                    $(SuperjeError::$variant(_) => $code,)*
                }
            }

            /// Nama jenis error
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(SuperjeError::$variant(_) => $type_name,)*
                }
            }

            /// Detail error
            pub fn message(&self) -> &str {
                match self {
                    $(SuperjeError::$variant(msg) => msg,)*
                }
            }
        }

        // Konstruktor singkat
        paste::paste! {
            impl SuperjeError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        SuperjeError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_superje_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    FileOperation("E004", "File Operation Error"),
    Validation("E005", "Validation Error"),
    NotFound("E006", "Resource Not Found"),
    Serialization("E007", "Serialization Error"),
    DateParse("E008", "Date Parse Error"),
    Authentication("E009", "Authentication Error"),
    Authorization("E010", "Authorization Error"),
    PreconditionFailed("E011", "Precondition Failed"),
    Conflict("E012", "Concurrent Update Conflict"),
}

impl SuperjeError {
    /// Format berwarna untuk lingkungan pengembangan
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// Format ringkas
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for SuperjeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SuperjeError {}

// From untuk error umum
impl From<sea_orm::DbErr> for SuperjeError {
    fn from(err: sea_orm::DbErr) -> Self {
        SuperjeError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for SuperjeError {
    fn from(err: std::io::Error) -> Self {
        SuperjeError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for SuperjeError {
    fn from(err: serde_json::Error) -> Self {
        SuperjeError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for SuperjeError {
    fn from(err: chrono::ParseError) -> Self {
        SuperjeError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SuperjeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SuperjeError::database_config("test").code(), "E001");
        assert_eq!(SuperjeError::validation("test").code(), "E005");
        assert_eq!(SuperjeError::authorization("test").code(), "E010");
        assert_eq!(SuperjeError::precondition_failed("test").code(), "E011");
        assert_eq!(SuperjeError::conflict("test").code(), "E012");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            SuperjeError::precondition_failed("test").error_type(),
            "Precondition Failed"
        );
        assert_eq!(
            SuperjeError::conflict("test").error_type(),
            "Concurrent Update Conflict"
        );
    }

    #[test]
    fn test_error_message() {
        let err = SuperjeError::validation("Input tidak valid");
        assert_eq!(err.message(), "Input tidak valid");
    }

    #[test]
    fn test_format_simple() {
        let err = SuperjeError::not_found("SPJ tidak ditemukan");
        let formatted = err.format_simple();
        assert!(formatted.contains("Resource Not Found"));
        assert!(formatted.contains("SPJ tidak ditemukan"));
    }
}
