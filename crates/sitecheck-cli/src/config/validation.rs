//! Configuration validation with actionable errors.

use crate::config::CheckConfig;
use crate::error::{ConfigError, Result};

impl CheckConfig {
    /// Validates the merged configuration before the pipeline starts.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] with a hint for the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.page.viewport.width == 0 || self.page.viewport.height == 0 {
            return Err(ConfigError::InvalidValue {
                field: "page.viewport".to_string(),
                value: format!("{}x{}", self.page.viewport.width, self.page.viewport.height),
                hint: "Viewport dimensions must be non-zero".to_string(),
            }
            .into());
        }

        if self.page.timeout == 0 {
            return Err(ConfigError::InvalidValue {
                field: "page.timeout".to_string(),
                value: "0".to_string(),
                hint: "Navigation needs a non-zero timeout in milliseconds".to_string(),
            }
            .into());
        }

        if self.output.report_file.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "output.reportFile".to_string(),
                hint: "Provide a file name for the JSON report".to_string(),
            }
            .into());
        }

        if self.monitoring.screenshot && self.output.screenshot_file.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "output.screenshotFile".to_string(),
                hint: "Provide a file name or disable screenshots".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(CheckConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_viewport_is_rejected() {
        let mut config = CheckConfig::default();
        config.page.viewport.width = 0;

        let err = config.validate().expect_err("should fail");
        assert!(err.to_string().contains("page.viewport"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut config = CheckConfig::default();
        config.page.timeout = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_report_file_is_rejected() {
        let mut config = CheckConfig::default();
        config.output.report_file = "  ".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_screenshot_file_is_ok_when_screenshots_disabled() {
        let mut config = CheckConfig::default();
        config.output.screenshot_file = String::new();
        config.monitoring.screenshot = false;

        assert!(config.validate().is_ok());
    }
}
