//! Multi-source configuration loading.
//!
//! Priority: CLI flags > `SITECHECK_*` environment variables >
//! `sitecheck.config.json` > built-in defaults.

use crate::cli::RunArgs;
use crate::config::CheckConfig;
use crate::error::{ConfigError, Result};
use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
};
use std::path::Path;

impl CheckConfig {
    /// Loads configuration from all sources and applies CLI overrides.
    ///
    /// An explicitly passed `--config` path must exist; the implicit
    /// `sitecheck.config.json` in the working directory is only used when
    /// present.
    pub fn load(args: &RunArgs) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        let config_file = if let Some(path) = &args.config {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.clone()).into());
            }
            Some(path.clone())
        } else {
            let default_path = Path::new("sitecheck.config.json");
            default_path.exists().then(|| default_path.to_path_buf())
        };

        if let Some(path) = config_file {
            figment = figment.merge(Json::file(path));
        }

        // Environment overrides (SITECHECK_PAGE_TIMEOUT, SITECHECK_OUTPUT_DIR, ...)
        figment = figment.merge(Env::prefixed("SITECHECK_").split("_"));

        let mut config: Self = figment.extract().map_err(|e| ConfigError::InvalidValue {
            field: "configuration".to_string(),
            value: e.to_string(),
            hint: "Check sitecheck.config.json syntax and field types".to_string(),
        })?;

        config.apply_overrides(args);
        Ok(config)
    }

    /// CLI flags override everything else.
    fn apply_overrides(&mut self, args: &RunArgs) {
        if let Some(dir) = &args.output_dir {
            self.output.dir = dir.clone();
        }
        if let Some(timeout) = args.timeout {
            self.page.timeout = timeout;
        }
        if let Some(duration) = args.duration {
            self.monitoring.duration = duration;
        }
        if let Some(wait_until) = args.wait_until {
            self.page.wait_until = wait_until.into();
        }
        if args.no_screenshot {
            self.monitoring.screenshot = false;
        }
        if args.visible {
            self.browser.headless = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::WaitUntilArg;
    use sitecheck_browser::WaitUntil;
    use std::io::Write;
    use std::path::PathBuf;

    fn write_config(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join("sitecheck.config.json");
        let mut file = std::fs::File::create(&path).expect("create config");
        file.write_all(contents.as_bytes()).expect("write config");
        path
    }

    #[test]
    fn defaults_match_the_documented_values() {
        let config = CheckConfig::default();

        assert!(config.browser.headless);
        assert_eq!(config.page.viewport.width, 1920);
        assert_eq!(config.page.viewport.height, 1080);
        assert_eq!(config.page.timeout, 30_000);
        assert_eq!(config.page.wait_until, WaitUntil::DomContentLoaded);
        assert_eq!(config.monitoring.duration, 5_000);
        assert!(config.monitoring.screenshot);
        assert!(config.monitoring.full_page_screenshot);
        assert_eq!(config.output.dir, PathBuf::from("./output"));
        assert_eq!(config.output.report_file, "test-report.json");
        assert_eq!(config.output.screenshot_file, "screenshot.png");
        assert_eq!(config.analysis.health_score.error_penalty, 10);
        assert_eq!(config.analysis.health_score.warning_penalty, 2);
        assert_eq!(config.analysis.health_score.network_error_penalty, 5);
        assert_eq!(config.analysis.health_score.navigation_timeout_penalty, 20);
        assert!(config.analysis.severity_thresholds.high.contains(&"Uncaught".to_string()));
    }

    #[test]
    fn config_file_values_override_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(
            dir.path(),
            r#"{ "page": { "timeout": 10000 }, "monitoring": { "duration": 1000 } }"#,
        );

        let args = RunArgs {
            config: Some(path),
            ..RunArgs::default()
        };
        let config = CheckConfig::load(&args).expect("load config");

        assert_eq!(config.page.timeout, 10_000);
        assert_eq!(config.monitoring.duration, 1_000);
        // Untouched sections keep their defaults
        assert_eq!(config.page.viewport.width, 1920);
    }

    #[test]
    fn cli_flags_override_config_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(dir.path(), r#"{ "page": { "timeout": 10000 } }"#);

        let args = RunArgs {
            config: Some(path),
            timeout: Some(7_000),
            duration: Some(500),
            wait_until: Some(WaitUntilArg::Load),
            no_screenshot: true,
            visible: true,
            output_dir: Some(PathBuf::from("/tmp/sitecheck-out")),
            ..RunArgs::default()
        };
        let config = CheckConfig::load(&args).expect("load config");

        assert_eq!(config.page.timeout, 7_000);
        assert_eq!(config.monitoring.duration, 500);
        assert_eq!(config.page.wait_until, WaitUntil::Load);
        assert!(!config.monitoring.screenshot);
        assert!(!config.browser.headless);
        assert_eq!(config.output.dir, PathBuf::from("/tmp/sitecheck-out"));
    }

    #[test]
    fn explicit_missing_config_path_errors() {
        let args = RunArgs {
            config: Some(PathBuf::from("/nonexistent/sitecheck.config.json")),
            ..RunArgs::default()
        };

        let result = CheckConfig::load(&args);
        assert!(result.is_err());
    }

    #[test]
    fn malformed_config_reports_a_hint() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(dir.path(), r#"{ "page": { "timeout": "soon" } }"#);

        let args = RunArgs {
            config: Some(path),
            ..RunArgs::default()
        };
        let err = CheckConfig::load(&args).expect_err("should fail");
        assert!(err.to_string().contains("Hint"));
    }
}
