/*
[INPUT]:  Interactive user input via CLI
[OUTPUT]: Generated YAML configuration file
[POS]:    CLI initialization layer
[UPDATE]: When RunnerConfig schema changes
*/

use anyhow::{Context, Result, bail};
use console::style;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use std::path::PathBuf;

use genjob_runner::RunnerConfig;

pub fn run_init(output: PathBuf) -> Result<()> {
    println!("{}", style("Welcome to genjob init").bold().cyan());
    println!(
        "{}",
        style("This will guide you through creating a runner configuration.").dim()
    );

    let theme = ColorfulTheme::default();
    let defaults = RunnerConfig::default();

    if output.exists()
        && !Confirm::with_theme(&theme)
            .with_prompt(format!("{} exists. Overwrite?", output.display()))
            .default(false)
            .interact()?
    {
        bail!("refusing to overwrite {}", output.display());
    }

    println!("\n{}", style("--- Server ---").bold());
    let base_url: String = Input::with_theme(&theme)
        .with_prompt("Job server base URL")
        .default(defaults.base_url.clone())
        .interact_text()?;

    let poll_interval_ms: u64 = Input::with_theme(&theme)
        .with_prompt("Poll interval (ms)")
        .default(defaults.poll_interval_ms)
        .interact_text()?;

    println!("\n{}", style("--- Artifact ---").bold());
    let download = Confirm::with_theme(&theme)
        .with_prompt("Download the artifact when generation finishes?")
        .default(defaults.download)
        .interact()?;

    let output_dir: String = Input::with_theme(&theme)
        .with_prompt("Output directory")
        .default(defaults.output_dir.display().to_string())
        .interact_text()?;

    let config = RunnerConfig {
        base_url,
        poll_interval_ms,
        output_dir: PathBuf::from(output_dir),
        download,
        ..defaults
    };
    config.validate().context("invalid configuration")?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(&output, config.to_yaml()?)
        .with_context(|| format!("failed to write config to {}", output.display()))?;

    println!("\n{}", style("SUCCESS!").bold().green());
    println!(
        "Configuration written to: {}",
        style(output.display()).cyan()
    );

    Ok(())
}
