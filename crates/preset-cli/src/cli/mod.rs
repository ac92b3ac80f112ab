//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "preset",
    bin_name = "preset",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Apply reusable project presets",
    long_about = "Preset resolves a preset from a local directory, a GitHub \
                  repository, a Gist, any git remote or the preset registry, \
                  and applies its actions to a target directory.",
    after_help = "EXAMPLES:\n\
        \x20 preset apply ./my-preset\n\
        \x20 preset apply owner/repo/presets/react@v2 --target app\n\
        \x20 preset apply gist:0123456789abcdef0123 --no-interaction\n\
        \x20 preset resolve laravel\n\
        \x20 preset completions bash > /usr/share/bash-completion/completions/preset",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Apply a preset to a directory.
    #[command(
        visible_alias = "a",
        about = "Apply a preset",
        after_help = "SOURCES:\n\
            \x20 ./path, /abs/path          local directory\n\
            \x20 owner/repo[/sub][@ref]     GitHub repository\n\
            \x20 gist:<id>[@ref]            GitHub Gist\n\
            \x20 git+<url>, git@host:repo   any git remote\n\
            \x20 name, scope:name           preset registry"
    )]
    Apply(ApplyArgs),

    /// Show where a source resolves to without applying it.
    #[command(
        about = "Resolve a preset source",
        after_help = "EXAMPLES:\n\
            \x20 preset resolve ./my-preset\n\
            \x20 preset resolve owner/repo@main --output-format json"
    )]
    Resolve(ResolveArgs),

    /// Initialise a preset configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 preset init           # default location\n\
            \x20 preset init --force   # overwrite an existing file"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 preset completions bash > ~/.local/share/bash-completion/completions/preset\n\
            \x20 preset completions zsh  > ~/.zfunc/_preset\n\
            \x20 preset completions fish > ~/.config/fish/completions/preset.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the preset configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 preset config get resolver.registry_owner\n\
            \x20 preset config list\n\
            \x20 preset config path"
    )]
    Config(ConfigCommands),
}

// ── apply ─────────────────────────────────────────────────────────────────────

/// Arguments for `preset apply`.
#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Where the preset comes from.
    #[arg(value_name = "SOURCE", help = "Preset source")]
    pub source: String,

    /// Directory the preset is applied to.
    #[arg(
        short = 't',
        long = "target",
        value_name = "DIR",
        default_value = ".",
        help = "Target directory"
    )]
    pub target: PathBuf,

    /// Force interactive prompts on.
    #[arg(
        short = 'i',
        long = "interactive",
        conflicts_with = "no_interaction",
        help = "Ask questions even if the preset disables them"
    )]
    pub interactive: bool,

    /// Answer every prompt with its default.
    #[arg(
        short = 'n',
        long = "no-interaction",
        help = "Never prompt; use defaults and overwrite on conflict"
    )]
    pub no_interaction: bool,

    /// Describe the preset without running it.
    #[arg(long = "dry-run", help = "List the preset's actions without applying them")]
    pub dry_run: bool,
}

impl ApplyArgs {
    /// `Some` when a flag forces the mode.
    pub fn interaction_override(&self) -> Option<bool> {
        match (self.interactive, self.no_interaction) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

// ── resolve ───────────────────────────────────────────────────────────────────

/// Arguments for `preset resolve`.
#[derive(Debug, Args)]
pub struct ResolveArgs {
    #[arg(value_name = "SOURCE", help = "Preset source")]
    pub source: String,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `preset init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `preset completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `preset config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `resolver.cache_dir`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
