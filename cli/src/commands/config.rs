use std::ffi::OsString;

use color_eyre::eyre::{bail, Result};

use crate::config::{config_path, runtime_dir, UserConfig};

pub fn run(path: bool, reset: bool, edit: bool) -> Result<()> {
    let config_file = config_path();

    if path {
        println!("{}", config_file.display());
    } else if reset {
        UserConfig::default().save()?;
        println!("Wrote default config to {}", config_file.display());
    } else if edit {
        let Some(editor) = pick_editor(std::env::var_os("VISUAL"), std::env::var_os("EDITOR"))
        else {
            bail!("Set $VISUAL or $EDITOR to edit {}", config_file.display());
        };

        if !config_file.exists() {
            UserConfig::default().save()?;
        }

        let status = std::process::Command::new(editor)
            .arg(&config_file)
            .status()?;
        if !status.success() {
            bail!("Editor exited with {}", status);
        }
    } else {
        print!("{}", render(&UserConfig::load())?);
    }

    Ok(())
}

/// Empty variables count as unset.
fn pick_editor(visual: Option<OsString>, editor: Option<OsString>) -> Option<OsString> {
    visual
        .filter(|v| !v.is_empty())
        .or_else(|| editor.filter(|e| !e.is_empty()))
}

fn render(config: &UserConfig) -> Result<String> {
    let source = if config.force_simulation {
        "simulated (forced)"
    } else {
        "host battery, simulated if unavailable"
    };

    Ok(format!(
        "# {}\n# source: {}\n# log dir: {}\n\n{}",
        config_path().display(),
        source,
        runtime_dir().display(),
        toml::to_string_pretty(config)?
    ))
}
