// src/types/settings.rs
use serde::{Deserialize, Serialize};

use crate::error::HeaderError;

/// Identity and layout settings consumed by the renderer.
///
/// The core only reads these. Whoever builds them (config file, editor
/// settings, command line) is responsible for refusing to call into the
/// engine when [`HeaderSettings::validate`] fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderSettings {
    /// Login or handle written on the `By`, `Created` and `Updated` lines.
    pub identity: String,
    /// Email written on the `By` line.
    pub email: String,
    /// Total header width; clamped before use, so any value is accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_width: Option<i64>,
}

impl HeaderSettings {
    /// Create settings from raw values, trimming surrounding whitespace.
    pub fn new(identity: impl AsRef<str>, email: impl AsRef<str>) -> Self {
        Self {
            identity: identity.as_ref().trim().to_string(),
            email: email.as_ref().trim().to_string(),
            header_width: None,
        }
    }

    /// Override the total header width.
    pub fn with_width(mut self, width: i64) -> Self {
        self.header_width = Some(width);
        self
    }

    /// Check that both identity and email are present.
    pub fn validate(&self) -> Result<(), HeaderError> {
        if self.identity.is_empty() {
            return Err(HeaderError::MissingIdentity);
        }
        if self.email.is_empty() {
            return Err(HeaderError::MissingEmail);
        }
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }

    /// `identity <email>`, as shown on the `By` line.
    pub fn signature(&self) -> String {
        format!("{} <{}>", self.identity, self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_values() {
        let settings = HeaderSettings::new("  ada ", "\tada@example.com\n");
        assert_eq!(settings.identity, "ada");
        assert_eq!(settings.email, "ada@example.com");
        assert_eq!(settings.header_width, None);
    }

    #[test]
    fn validate_reports_missing_identity_first() {
        let settings = HeaderSettings::new("", "");
        assert_eq!(settings.validate(), Err(HeaderError::MissingIdentity));
    }

    #[test]
    fn validate_reports_missing_email() {
        let settings = HeaderSettings::new("ada", "   ");
        assert_eq!(settings.validate(), Err(HeaderError::MissingEmail));
        assert!(!settings.is_complete());
    }

    #[test]
    fn signature_wraps_email_in_angle_brackets() {
        let settings = HeaderSettings::new("ada", "ada@example.com");
        assert_eq!(settings.signature(), "ada <ada@example.com>");
    }

    #[test]
    fn width_is_optional_in_json() {
        let settings: HeaderSettings =
            serde_json::from_str(r#"{"identity":"ada","email":"a@b.c"}"#).unwrap();
        assert_eq!(settings.header_width, None);

        let json = serde_json::to_string(&settings.clone().with_width(100)).unwrap();
        assert!(json.contains("\"header_width\":100"));
    }
}
