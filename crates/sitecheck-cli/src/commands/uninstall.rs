//! Uninstall command implementation.
//!
//! Removes the installed slash-command definition. A missing file is a
//! warning, not a failure - there is nothing to undo.

use crate::cli::UninstallArgs;
use crate::commands::install::{COMMAND_FILE_NAME, resolve_commands_dir};
use crate::error::{Result, ResultExt};
use crate::ui;

/// Execute the uninstall command.
pub fn execute(args: UninstallArgs) -> Result<()> {
    let commands_dir = resolve_commands_dir(args.dir)?;
    let target = commands_dir.join(COMMAND_FILE_NAME);

    if !target.exists() {
        ui::warning("Command not found. Nothing to uninstall.");
        return Ok(());
    }

    std::fs::remove_file(&target).with_path(&target)?;

    ui::success(&format!("Removed: {}", target.display()));

    Ok(())
}
