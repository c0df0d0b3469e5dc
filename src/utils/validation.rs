use crate::utils::error::{EtlError, Result};
use chrono::NaiveDate;
use chrono_tz::Tz;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: impl ToString, reason: impl Into<String>) -> EtlError {
    EtlError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    // 模板佔位符 ({team}, {date}...) 先以實際值代入再解析
    let probe = url_str
        .replace("{team}", "team")
        .replace("{year}", "2025")
        .replace("{date}", "20250101");

    match Url::parse(&probe) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(invalid(
                field_name,
                url_str,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(invalid(field_name, url_str, format!("Invalid URL format: {}", e))),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(invalid(
            field_name,
            value,
            format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}

pub fn validate_file_extension(field_name: &str, file: &str, allowed_extensions: &[&str]) -> Result<()> {
    match std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(extension) if allowed_extensions.contains(&extension) => Ok(()),
        Some(extension) => Err(invalid(
            field_name,
            file,
            format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed_extensions.join(", ")
            ),
        )),
        None => Err(invalid(field_name, file, "File has no extension or invalid filename")),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| EtlError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

pub fn validate_timezone(field_name: &str, tz_id: &str) -> Result<Tz> {
    tz_id
        .parse::<Tz>()
        .map_err(|_| invalid(field_name, tz_id, "Not an IANA timezone identifier"))
}

pub fn validate_date(field_name: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| invalid(field_name, value, format!("Expected YYYY-MM-DD: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("source.url_template", "https://example.com").is_ok());
        assert!(validate_url(
            "source.url_template",
            "https://www.mlb.com/{team}/schedule/{year}/fullseason"
        )
        .is_ok());
        assert!(validate_url("source.url_template", "").is_err());
        assert!(validate_url("source.url_template", "invalid-url").is_err());
        assert!(validate_url("source.url_template", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("run.concurrency", 5, 1).is_ok());
        assert!(validate_positive_number("run.concurrency", 0, 1).is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("export.template_path", "dynamics.zip", &["csv", "zip"]).is_ok());
        assert!(validate_file_extension("export.template_path", "dynamics.xlsx", &["csv", "zip"]).is_err());
        assert!(validate_file_extension("export.template_path", "dynamics", &["csv", "zip"]).is_err());
    }

    #[test]
    fn test_validate_timezone() {
        assert!(validate_timezone("run.viewer_timezone", "America/Chicago").is_ok());
        assert!(validate_timezone("run.viewer_timezone", "Mars/Olympus").is_err());
    }

    #[test]
    fn test_validate_date() {
        assert_eq!(
            validate_date("source.start_date", "2025-05-15").unwrap(),
            NaiveDate::from_ymd_opt(2025, 5, 15).unwrap()
        );
        assert!(validate_date("source.start_date", "05/15/2025").is_err());
    }
}
