//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    completions::CompletionsArgs, config::ConfigCommands, material::MaterialCommands,
    options::OptionsArgs, recommend::RecommendArgs, validate::ValidateArgs, wizard::WizardArgs,
};
use crate::core::Config;

#[derive(Parser)]
#[command(name = "prepflow")]
#[command(author, version, about = "Metallographic sample preparation planner")]
#[command(
    long_about = "Recommends equipment and consumables for each stage of a metallographic sample preparation workflow, from sectioning through hardness testing."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose (debug) logging on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

impl GlobalOpts {
    /// Requested format, with `auto` replaced by the configured default
    pub fn effective_format(&self, config: &Config) -> OutputFormat {
        if self.format != OutputFormat::Auto {
            return self.format;
        }
        config
            .default_format
            .as_deref()
            .and_then(|f| OutputFormat::from_str(f, true).ok())
            .unwrap_or(OutputFormat::Auto)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Recommend equipment and consumables for a workflow
    Recommend(RecommendArgs),

    /// Answer the builder questions interactively
    Wizard(WizardArgs),

    /// Browse the material library
    #[command(subcommand)]
    Material(MaterialCommands),

    /// Validate workflow and material files against schemas
    Validate(ValidateArgs),

    /// List accepted values for each workflow field
    Options(OptionsArgs),

    /// Show configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Styled listing for terminals, grouped by stage
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown report
    Md,
}
