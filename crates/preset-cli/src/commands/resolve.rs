//! `preset resolve` — show which resolver handles a source and where the
//! preset lives on disk.

use serde_json::json;
use tracing::instrument;

use preset_adapters::default_chain;

use crate::{
    cli::{OutputFormat, ResolveArgs},
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

#[instrument(skip_all, fields(source = %args.source))]
pub fn execute(args: ResolveArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let cwd = std::env::current_dir().with_cli_context(|| "Failed to read the current directory")?;
    let chain = default_chain(&config.resolver_settings(&cwd));

    let spinner = output.spinner(format!("Resolving {}", args.source));
    let resolved = chain.resolve(&args.source);
    spinner.finish_and_clear();
    let descriptor = resolved?;

    if output.format() == OutputFormat::Json {
        output.json(&json!({
            "source": descriptor.raw_input(),
            "kind": descriptor.kind().as_str(),
            "directory": descriptor.directory().display().to_string(),
            "ref": descriptor.git_ref(),
            "subpath": descriptor.subpath(),
        }))?;
        return Ok(());
    }

    output.success(&format!("{} → {}", descriptor.raw_input(), descriptor.kind()))?;
    output.print(&format!("  directory: {}", descriptor.directory().display()))?;
    if let Some(git_ref) = descriptor.git_ref() {
        output.print(&format!("  ref:       {git_ref}"))?;
    }
    if let Some(subpath) = descriptor.subpath() {
        output.print(&format!("  subpath:   {subpath}"))?;
    }
    Ok(())
}
