/// Memeriksa kecocokan magic bytes isi berkas dengan ekstensinya
///
/// # Arguments
/// * `data` - byte awal isi berkas
/// * `extension` - ekstensi berkas (termasuk titik, mis. ".pdf")
///
/// # Returns
/// * `true` - magic bytes cocok
/// * `false` - tidak cocok atau jenis tidak dikenal
pub fn validate_magic_bytes(data: &[u8], extension: &str) -> bool {
    if data.is_empty() {
        return false;
    }

    match extension.to_lowercase().as_str() {
        ".pdf" => data.starts_with(b"%PDF"),
        // Format lama MS Office (OLE Compound Document)
        ".xls" => data.starts_with(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1]),
        // Format baru MS Office (OOXML berbasis ZIP)
        ".xlsx" => data.starts_with(&[0x50, 0x4B, 0x03, 0x04]),

        // Jenis tak dikenal - tolak
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_magic() {
        assert!(validate_magic_bytes(b"%PDF-1.7 sisanya", ".pdf"));
        assert!(!validate_magic_bytes(b"bukan pdf", ".pdf"));
    }

    #[test]
    fn test_xlsx_magic() {
        assert!(validate_magic_bytes(&[0x50, 0x4B, 0x03, 0x04, 0x14], ".xlsx"));
        assert!(!validate_magic_bytes(b"%PDF", ".xlsx"));
    }

    #[test]
    fn test_xls_magic() {
        assert!(validate_magic_bytes(
            &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1, 0x00],
            ".xls"
        ));
    }

    #[test]
    fn test_unknown_extension_rejected() {
        assert!(!validate_magic_bytes(b"%PDF", ".exe"));
        assert!(!validate_magic_bytes(&[], ".pdf"));
    }
}
