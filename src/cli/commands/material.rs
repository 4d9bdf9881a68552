//! `prepflow material` command - browse the material library

use clap::Subcommand;
use console::style;
use miette::{miette, IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::truncate_str;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::library::MaterialLookup;
use crate::core::{Config, MaterialLibrary};
use crate::engine::text::micron_list;
use crate::entities::Material;

#[derive(Subcommand, Debug)]
pub enum MaterialCommands {
    /// List library materials
    List {
        /// Filter by name, slug or category (case-insensitive substring)
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// Show one material with its preparation sequences
    Show {
        /// Material slug or name
        key: String,
    },
}

pub fn run(cmd: MaterialCommands, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let library = MaterialLibrary::load(config.materials_dir());
    let format = global.effective_format(&config);

    match cmd {
        MaterialCommands::List { search } => {
            let materials = library.search(search.as_deref().unwrap_or(""));
            print!("{}", render_list(&materials, format)?);
            if format == OutputFormat::Auto && !global.quiet {
                println!(
                    "\n{} material(s) found",
                    style(materials.len()).cyan()
                );
            }
            Ok(())
        }
        MaterialCommands::Show { key } => {
            let material = library.find(&key).ok_or_else(|| {
                miette!(
                    help = "Run `prepflow material list` to see available materials",
                    "Unknown material: {}",
                    key
                )
            })?;
            print!("{}", render_show(material, format)?);
            Ok(())
        }
    }
}

fn render_list(materials: &[&Material], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(materials).into_diagnostic()?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Yaml => serde_yml::to_string(materials).into_diagnostic(),
        OutputFormat::Tsv => {
            let mut out = String::from("SLUG\tNAME\tCATEGORY\tHARDNESS\n");
            for m in materials {
                out.push_str(&list_row(m).join("\t"));
                out.push('\n');
            }
            Ok(out)
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer
                .write_record(["slug", "name", "category", "hardness"])
                .into_diagnostic()?;
            for m in materials {
                writer.write_record(list_row(m)).into_diagnostic()?;
            }
            let bytes = writer.into_inner().into_diagnostic()?;
            String::from_utf8(bytes).into_diagnostic()
        }
        OutputFormat::Auto | OutputFormat::Md => {
            let mut builder = Builder::default();
            builder.push_record(["Slug", "Name", "Category", "Hardness"]);
            for m in materials {
                let [slug, name, category, hardness] = list_row(m);
                builder.push_record([slug, truncate_str(&name, 32), category, hardness]);
            }
            let mut table = builder.build();
            if format == OutputFormat::Md {
                table.with(Style::markdown());
            } else {
                table.with(Style::rounded());
            }
            Ok(format!("{}\n", table))
        }
    }
}

fn list_row(material: &Material) -> [String; 4] {
    [
        material.slug.clone().unwrap_or_default(),
        material.name.clone(),
        material.category.clone().unwrap_or_default(),
        material
            .hardness()
            .and_then(|h| h.category())
            .unwrap_or("")
            .to_string(),
    ]
}

fn render_show(material: &Material, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(material).into_diagnostic()?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Auto => Ok(describe(material)),
        _ => serde_yml::to_string(material).into_diagnostic(),
    }
}

/// Human-readable material card
fn describe(material: &Material) -> String {
    let mut out = format!("{}\n", style(&material.name).bold().underlined());
    let field = |label: &str, value: &str| format!("  {:<12} {}\n", style(label).dim(), value);

    if let Some(slug) = &material.slug {
        out.push_str(&field("Slug", slug));
    }
    if let Some(category) = &material.category {
        out.push_str(&field("Category", category));
    }
    if let Some(h) = material.hardness() {
        out.push_str(&field("Hardness", h.label()));
    }
    if let Some(grits) = material.grinding_sequence() {
        out.push_str(&field("Grinding", &format!("{} grit", grits.join(", "))));
    }
    if let Some(sizes) = material.polishing_sequence() {
        out.push_str(&field("Polishing", &micron_list(sizes)));
    }
    if !material.common_etchants.is_empty() {
        out.push_str(&field("Etchants", &material.common_etchants.join(", ")));
    }
    if let Some(notes) = &material.preparation_notes {
        out.push_str(&format!("\n  {}\n", notes.trim()));
    }
    out
}
