use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

static NIM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{5,15}$").expect("Invalid NIM regex"));

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    // 邮箱格式校验：必须包含 @ 和 .
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

pub fn validate_nim(nim: &str) -> Result<(), &'static str> {
    // 学号只允许 5-15 位数字
    if !NIM_RE.is_match(nim) {
        return Err("NIM must be 5 to 15 digits");
    }
    Ok(())
}

/// 投稿必填字段校验
pub fn validate_submission_fields(
    nama: &str,
    nim: &str,
    email: &str,
    judul: &str,
    abstrak: &str,
    file_url: &str,
) -> Result<(), &'static str> {
    if nama.trim().is_empty() {
        return Err("Nama is required");
    }
    if judul.trim().is_empty() {
        return Err("Judul is required");
    }
    if abstrak.trim().is_empty() {
        return Err("Abstrak is required");
    }
    if file_url.trim().is_empty() {
        return Err("File URL is required");
    }
    validate_nim(nim)?;
    validate_email(email)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email() {
        assert!(validate_email("budi@students.uty.ac.id").is_ok());
        assert!(validate_email("a.b-c+d@example.co").is_ok());
    }

    #[test]
    fn test_invalid_email() {
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("missing@tld").is_err());
    }

    #[test]
    fn test_nim() {
        assert!(validate_nim("5220411001").is_ok());
        assert!(validate_nim("12ab34").is_err());
        assert!(validate_nim("123").is_err());
    }

    #[test]
    fn test_submission_fields() {
        assert!(
            validate_submission_fields(
                "Budi",
                "5220411001",
                "budi@uty.ac.id",
                "Analisis Jaringan",
                "Ringkasan singkat.",
                "https://utfs.io/f/abc"
            )
            .is_ok()
        );
        assert!(
            validate_submission_fields(
                "",
                "5220411001",
                "budi@uty.ac.id",
                "Judul",
                "Abstrak",
                "https://utfs.io/f/abc"
            )
            .is_err()
        );
    }
}
