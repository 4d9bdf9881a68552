//! `prepflow options` command - accepted values for each workflow field

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;
use crate::entities::{
    Application, Automation, Budget, DamageCriticality, Documentation, FinalSurfaceQuality,
    GrindingSurface, Hardness, MountingPreference, ProcessStage, SampleShape, SampleSize,
    SectionType, SurfaceFinish, Throughput,
};

#[derive(clap::Args, Debug)]
pub struct OptionsArgs {
    /// Only list this field (workflow key, e.g. materialHardness)
    pub field: Option<String>,
}

/// One workflow field and the labels it accepts
#[derive(Debug, Serialize)]
pub struct FieldOptions {
    pub field: &'static str,
    pub values: Vec<String>,
}

fn labels<T>(all: &[T], label: impl Fn(&T) -> &str) -> Vec<String> {
    all.iter().map(|t| label(t).to_string()).collect()
}

/// Every categorical workflow field, in form order
pub fn all_fields() -> Vec<FieldOptions> {
    let field = |field, values| FieldOptions { field, values };
    vec![
        field("processStages", labels(ProcessStage::ALL, |s| s.as_str())),
        field("materialHardness", labels(Hardness::ALL, |h| h.label())),
        field("sampleSize", labels(SampleSize::ALL, |s| s.label())),
        field("sampleShape", labels(SampleShape::ALL, |s| s.label())),
        field("throughput", labels(Throughput::ALL, |t| t.label())),
        field("automation", labels(Automation::ALL, |a| a.label())),
        field("budget", labels(Budget::ALL, |b| b.label())),
        field("surfaceFinish", labels(SurfaceFinish::ALL, |f| f.label())),
        field("applications", labels(Application::KNOWN, |a| a.label())),
        field("sectionType", labels(SectionType::ALL, |s| s.label())),
        field("damageCriticality", labels(DamageCriticality::ALL, |d| d.label())),
        field("mountingTypePreference", labels(MountingPreference::ALL, |m| m.label())),
        field("grindingSurfaceRequirements", labels(GrindingSurface::ALL, |g| g.label())),
        field("finalSurfaceQuality", labels(FinalSurfaceQuality::ALL, |q| q.label())),
        field("documentationRequirements", labels(Documentation::ALL, |d| d.label())),
    ]
}

pub fn run(args: OptionsArgs, global: &GlobalOpts) -> Result<()> {
    let mut fields = all_fields();
    if let Some(wanted) = &args.field {
        let key = wanted.replace(['-', '_'], "").to_lowercase();
        fields.retain(|f| f.field.to_lowercase() == key);
        if fields.is_empty() {
            let known: Vec<_> = all_fields().iter().map(|f| f.field).collect();
            return Err(miette::miette!(
                help = format!("Known fields: {}", known.join(", ")),
                "Unknown field: {}",
                wanted
            ));
        }
    }

    let format = global.effective_format(&Config::load());
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&fields).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&fields).into_diagnostic()?);
        }
        OutputFormat::Tsv | OutputFormat::Csv => {
            for f in &fields {
                for value in &f.values {
                    println!("{}\t{}", f.field, value);
                }
            }
        }
        OutputFormat::Auto | OutputFormat::Md => {
            for (i, f) in fields.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                println!("{}", style(f.field).bold());
                for value in &f.values {
                    println!("  {}", value);
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_field_has_values() {
        let fields = all_fields();
        assert_eq!(fields.len(), 15);
        assert!(fields.iter().all(|f| !f.values.is_empty()));
    }

    #[test]
    fn test_labels_parse_back() {
        let fields = all_fields();
        let hardness = fields.iter().find(|f| f.field == "materialHardness").unwrap();
        for label in &hardness.values {
            assert_ne!(Hardness::from(label.as_str()), Hardness::Unspecified, "{}", label);
        }
        let stages = fields.iter().find(|f| f.field == "processStages").unwrap();
        assert_eq!(stages.values.len(), 8);
        assert!(stages.values.contains(&"hardness".to_string()));
    }
}
