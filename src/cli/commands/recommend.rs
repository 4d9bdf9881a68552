//! `prepflow recommend` command - recommendations for a workflow
//!
//! The workflow comes from a YAML/JSON file, from flags, or both; flags
//! override file values.

use console::style;
use miette::Result;
use std::path::{Path, PathBuf};

use crate::cli::helpers::write_output;
use crate::cli::output::render_recommendations;
use crate::cli::GlobalOpts;
use crate::core::{load_workflow, Config, LookupError, MaterialLibrary};
use crate::engine::RecommendationEngine;
use crate::entities::{Recommendation, WorkflowInput};

#[derive(clap::Args, Debug, Default)]
pub struct RecommendArgs {
    /// Workflow file (YAML or JSON, `-` for stdin)
    pub file: Option<PathBuf>,

    /// Process stage to include (repeatable or comma-separated)
    #[arg(long = "stage", short = 's', value_delimiter = ',')]
    pub stages: Vec<String>,

    /// Material hardness (e.g., "Hard", "Very Hard (> 65 HRC)")
    #[arg(long)]
    pub hardness: Option<String>,

    /// Sample size (e.g., "Small", "Large (50-100mm)")
    #[arg(long)]
    pub size: Option<String>,

    /// Sample shape (e.g., "Thin", "Irregular")
    #[arg(long)]
    pub shape: Option<String>,

    /// Free-form material type (e.g., "Hard Metals (Carbides)")
    #[arg(long = "material-type")]
    pub material_type: Option<String>,

    /// Material library key (slug or name)
    #[arg(long, short = 'm')]
    pub material: Option<String>,

    /// Throughput (Low, Medium, High, Very High)
    #[arg(long)]
    pub throughput: Option<String>,

    /// Automation (Manual, Semi-Automated, Automated)
    #[arg(long)]
    pub automation: Option<String>,

    /// Budget (Essential, Standard, Advanced, Comprehensive)
    #[arg(long)]
    pub budget: Option<String>,

    /// Surface finish (Standard, High Quality, Extremely Flat, EBSD)
    #[arg(long)]
    pub finish: Option<String>,

    /// Application (repeatable, e.g., --application "Quality Control")
    #[arg(long = "application", short = 'a')]
    pub applications: Vec<String>,

    /// Write output to a file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Print the derived workflow features to stderr
    #[arg(long)]
    pub explain: bool,
}

impl RecommendArgs {
    /// Apply flag values on top of `input`
    pub fn apply_overrides(&self, input: &mut WorkflowInput) {
        if !self.stages.is_empty() {
            input.process_stages = self
                .stages
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(Into::into)
                .collect();
        }
        if let Some(h) = &self.hardness {
            input.material_hardness = h.as_str().into();
        }
        if let Some(s) = &self.size {
            input.sample_size = s.as_str().into();
        }
        if let Some(s) = &self.shape {
            input.sample_shape = s.as_str().into();
        }
        if let Some(t) = &self.material_type {
            input.material_type = t.clone();
        }
        if let Some(m) = &self.material {
            input.material = Some(m.clone());
            input.selected_material = None;
        }
        if let Some(t) = &self.throughput {
            input.throughput = t.as_str().into();
        }
        if let Some(a) = &self.automation {
            input.automation = a.as_str().into();
        }
        if let Some(b) = &self.budget {
            input.budget = b.as_str().into();
        }
        if let Some(f) = &self.finish {
            input.surface_finish = f.as_str().into();
        }
        if !self.applications.is_empty() {
            input.applications = self.applications.iter().map(|a| a.as_str().into()).collect();
        }
    }
}

pub fn run(args: RecommendArgs, global: &GlobalOpts) -> Result<()> {
    let mut input = match &args.file {
        Some(path) => load_workflow(path)?,
        None => WorkflowInput::default(),
    };
    args.apply_overrides(&mut input);

    let config = Config::load();
    let library = MaterialLibrary::load(config.materials_dir());
    resolve_material(&mut input, &library)?;

    let engine = RecommendationEngine::new();
    if args.explain {
        let explanation = serde_yml::to_string(&engine.explain(&input))
            .map_err(|e| miette::miette!("{}", e))?;
        eprintln!("{}\n{}", style("Derived features").bold(), explanation);
    }

    let recommendations = engine.generate(&input);
    emit(&recommendations, &input, global, &config, args.output.as_deref())
}

/// Resolve the material key, with a hint listing similar library entries
pub(crate) fn resolve_material(input: &mut WorkflowInput, library: &MaterialLibrary) -> Result<()> {
    input.resolve_material(library).map_err(|e| {
        let LookupError::UnknownMaterial(ref key) = e;
        let similar: Vec<String> = library
            .search(key.split_whitespace().next().unwrap_or(key))
            .iter()
            .filter_map(|m| m.slug.clone())
            .take(5)
            .collect();
        let help = if similar.is_empty() {
            "Run `prepflow material list` to see available materials".to_string()
        } else {
            format!("Similar materials: {}", similar.join(", "))
        };
        miette::miette!(help = help, "{}", e)
    })
}

/// Render and write recommendations in the effective output format
pub(crate) fn emit(
    recommendations: &[Recommendation],
    input: &WorkflowInput,
    global: &GlobalOpts,
    config: &Config,
    output: Option<&Path>,
) -> Result<()> {
    if input.process_stages.is_empty() && !global.quiet {
        eprintln!(
            "{} No process stages selected. Use --stage (e.g., --stage grinding,polishing).",
            style("!").yellow()
        );
    }

    let format = global.effective_format(config);
    let rendered = render_recommendations(recommendations, input, format, config.site_url())?;
    write_output(&rendered, output, global.quiet)
}
