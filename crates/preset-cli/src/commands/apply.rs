//! Implementation of the `preset apply` command.
//!
//! Responsibility: wire the adapters into a `PresetApplier`, pick the
//! interaction mode, run the preset and display the report. No business
//! logic lives here.

use std::io::IsTerminal as _;
use std::path::{Path, PathBuf};

use serde_json::json;
use tracing::{debug, info, instrument};

use preset_adapters::{LocalFilesystem, NonInteractivePrompt, TomlImporter, TracingBus, default_chain};
use preset_core::application::{ApplyReport, PresetApplier, ports::Prompt};
use preset_core::domain::{ApplierOptions, Preset};

use crate::{
    cli::{ApplyArgs, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Execute the `preset apply` command.
///
/// 1. Decide whether prompts may be shown
/// 2. Resolve and import the preset (with a spinner for remote fetches)
/// 3. `--dry-run`: list the actions and stop
/// 4. Run the actions against the target directory
/// 5. Print the report
#[instrument(skip_all, fields(source = %args.source))]
pub fn execute(args: ApplyArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let cwd = std::env::current_dir().with_cli_context(|| "Failed to read the current directory")?;
    let target = absolute(&cwd, &args.target);
    if target.is_file() {
        return Err(CliError::InvalidInput {
            message: format!("target '{}' is a file, not a directory", target.display()),
            source: None,
        });
    }

    let interactive = interaction_mode(
        args.interaction_override(),
        config.apply.interactive,
        std::io::stdin().is_terminal(),
    );
    debug!(?interactive, target = %target.display(), "Apply options resolved");

    let applier = PresetApplier::new(
        default_chain(&config.resolver_settings(&cwd)),
        Box::new(TomlImporter::new()),
        Box::new(LocalFilesystem::new()),
        prompt_for(interactive)?,
        Box::new(TracingBus::new()),
    );

    let spinner = output.spinner(format!("Resolving {}", args.source));
    let loaded = applier.load(&args.source);
    spinner.finish_and_clear();
    let mut preset = loaded?;

    if args.dry_run {
        return describe(&preset, &target, &output);
    }

    output.header(&format!(
        "Applying '{}' to {}",
        preset.name,
        target.display()
    ))?;

    let options = ApplierOptions::new(&target).with_interactive(interactive);
    let report = applier.run(&mut preset, &options)?;
    info!(preset = %report.preset, "Apply finished");

    print_report(&report, &target, &output)
}

/// Flag, then config, then "no terminal means no prompts".
pub fn interaction_mode(flag: Option<bool>, configured: Option<bool>, stdin_is_tty: bool) -> Option<bool> {
    flag.or(configured)
        .or(if stdin_is_tty { None } else { Some(false) })
}

#[cfg(feature = "interactive")]
fn prompt_for(interactive: Option<bool>) -> CliResult<Box<dyn Prompt>> {
    Ok(match interactive {
        Some(false) => Box::new(NonInteractivePrompt::new()),
        _ => Box::new(crate::prompt::DialoguerPrompt::new()),
    })
}

#[cfg(not(feature = "interactive"))]
fn prompt_for(interactive: Option<bool>) -> CliResult<Box<dyn Prompt>> {
    if interactive == Some(true) {
        return Err(CliError::FeatureNotAvailable {
            feature: "interactive",
        });
    }
    Ok(Box::new(NonInteractivePrompt::new()))
}

fn absolute(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

fn describe(preset: &Preset, target: &Path, output: &OutputManager) -> CliResult<()> {
    if output.format() == OutputFormat::Json {
        let actions: Vec<_> = preset
            .actions
            .iter()
            .map(|a| json!({ "title": a.label(), "kind": a.kind().as_str() }))
            .collect();
        output.json(&json!({
            "preset": preset.name,
            "source": preset.descriptor.raw_input(),
            "kind": preset.descriptor.kind().as_str(),
            "directory": preset.descriptor.directory().display().to_string(),
            "target": target.display().to_string(),
            "actions": actions,
        }))?;
        return Ok(());
    }

    output.info(&format!(
        "Dry run: '{}' ({}) would be applied to {}",
        preset.name,
        preset.descriptor,
        target.display()
    ))?;
    for (index, action) in preset.actions.iter().enumerate() {
        output.print(&format!("  {:>2}. [{}] {}", index + 1, action.kind(), action.label()))?;
    }
    if preset.actions.is_empty() {
        output.print("  (no actions)")?;
    }
    Ok(())
}

fn print_report(report: &ApplyReport, target: &Path, output: &OutputManager) -> CliResult<()> {
    if output.format() == OutputFormat::Json {
        output.json(&json!({
            "preset": report.preset,
            "target": target.display().to_string(),
            "executed": report.executed,
            "skipped": report.skipped,
            "failed": report.failed,
        }))?;
        return Ok(());
    }

    output.success(&format!(
        "Applied '{}' ({} executed, {} skipped)",
        report.preset, report.executed, report.skipped
    ))?;
    if report.failed > 0 {
        output.warning(&format!(
            "{} action(s) failed; see the warnings above",
            report.failed
        ))?;
        if !output.is_verbose() {
            output.info("Re-run with -v for details.")?;
        }
    }
    Ok(())
}
