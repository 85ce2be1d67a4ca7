//! Install command implementation.
//!
//! Copies the bundled slash-command definition into the user configuration
//! directory (`~/.claude/commands`), creating the directories if needed.
//! Pure file-copy; no state beyond the written file.

use crate::cli::InstallArgs;
use crate::error::{CliError, Result, ResultExt};
use crate::ui;
use std::path::PathBuf;

/// The bundled slash-command definition.
const COMMAND_DEFINITION: &str = include_str!("../../assets/sitecheck.md");

/// File name under the commands directory.
pub(crate) const COMMAND_FILE_NAME: &str = "sitecheck.md";

/// Execute the install command.
pub fn execute(args: InstallArgs) -> Result<()> {
    let commands_dir = resolve_commands_dir(args.dir)?;

    ui::info("Installing the sitecheck slash command...");

    std::fs::create_dir_all(&commands_dir).context("failed to create commands directory")?;

    let target = commands_dir.join(COMMAND_FILE_NAME);
    std::fs::write(&target, COMMAND_DEFINITION).with_path(&target)?;

    ui::success(&format!("Command installed to: {}", target.display()));
    ui::info("Use it in your editor as: /sitecheck <url>");

    Ok(())
}

/// The directory the command definition lives in: an explicit override, or
/// `~/.claude/commands`.
pub(crate) fn resolve_commands_dir(overridden: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = overridden {
        return Ok(dir);
    }

    let home = dirs::home_dir()
        .ok_or_else(|| CliError::Custom("could not determine the home directory".to_string()))?;
    Ok(home.join(".claude").join("commands"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_writes_the_command_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let commands_dir = dir.path().join("commands");

        execute(InstallArgs {
            dir: Some(commands_dir.clone()),
        })
        .expect("install");

        let written = std::fs::read_to_string(commands_dir.join(COMMAND_FILE_NAME)).expect("read back");
        assert!(written.contains("sitecheck"));
        assert_eq!(written, COMMAND_DEFINITION);
    }

    #[test]
    fn install_creates_missing_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("a").join("b").join("commands");

        execute(InstallArgs { dir: Some(nested.clone()) }).expect("install");

        assert!(nested.join(COMMAND_FILE_NAME).exists());
    }

    #[test]
    fn install_overwrites_an_existing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let commands_dir = dir.path().to_path_buf();
        std::fs::write(commands_dir.join(COMMAND_FILE_NAME), "stale").expect("seed");

        execute(InstallArgs {
            dir: Some(commands_dir.clone()),
        })
        .expect("install");

        let written = std::fs::read_to_string(commands_dir.join(COMMAND_FILE_NAME)).expect("read back");
        assert_ne!(written, "stale");
    }

    #[test]
    fn explicit_dir_override_wins() {
        let resolved = resolve_commands_dir(Some(PathBuf::from("/tmp/custom"))).expect("resolve");
        assert_eq!(resolved, PathBuf::from("/tmp/custom"));
    }
}
