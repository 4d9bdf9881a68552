//! `prepflow wizard` command - interactive workflow builder
//!
//! Walks through the same questions as the builder form. Stage-specific
//! refinements are only asked for the stages that were selected.

use console::style;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::commands::recommend::{emit, resolve_material};
use crate::cli::helpers::write_output;
use crate::cli::GlobalOpts;
use crate::core::{Config, MaterialLibrary};
use crate::engine::generate_recommendations;
use crate::entities::{
    Application, Automation, Budget, DamageCriticality, Documentation, FinalSurfaceQuality,
    GrindingSurface, Hardness, MountingPreference, ProcessStage, SampleShape, SampleSize,
    SectionType, SurfaceFinish, Throughput, WorkflowInput,
};

#[derive(clap::Args, Debug)]
pub struct WizardArgs {
    /// Also save the answers as a workflow file
    #[arg(long)]
    pub save: Option<PathBuf>,
}

/// Answers collected by the wizard, before they become a workflow input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WizardAnswers {
    pub stages: Vec<ProcessStage>,
    pub material: Option<String>,
    pub material_type: String,
    pub hardness: Hardness,
    pub size: SampleSize,
    pub shape: SampleShape,
    pub throughput: Throughput,
    pub automation: Automation,
    pub budget: Budget,
    pub finish: SurfaceFinish,
    pub applications: Vec<Application>,
    pub section_type: SectionType,
    pub damage_criticality: DamageCriticality,
    pub mounting: MountingPreference,
    pub grinding_surface: GrindingSurface,
    pub final_quality: FinalSurfaceQuality,
    pub documentation: Documentation,
    pub hardness_tests: Vec<String>,
}

impl WizardAnswers {
    /// Build the workflow input
    ///
    /// Refinements for stages that were not selected are dropped so that a
    /// saved workflow only carries what applies to it.
    pub fn into_input(self) -> WorkflowInput {
        let has = |stage: ProcessStage| self.stages.contains(&stage);

        WorkflowInput {
            section_type: if has(ProcessStage::Sectioning) {
                self.section_type
            } else {
                SectionType::default()
            },
            damage_criticality: if has(ProcessStage::Sectioning) {
                self.damage_criticality
            } else {
                DamageCriticality::default()
            },
            mounting_type_preference: if has(ProcessStage::Mounting) {
                self.mounting
            } else {
                MountingPreference::default()
            },
            grinding_surface_requirements: if has(ProcessStage::Grinding) {
                self.grinding_surface
            } else {
                GrindingSurface::default()
            },
            final_surface_quality: if has(ProcessStage::Polishing) {
                self.final_quality
            } else {
                FinalSurfaceQuality::default()
            },
            documentation_requirements: if has(ProcessStage::Microscopy) {
                self.documentation
            } else {
                Documentation::default()
            },
            hardness_test_types: if has(ProcessStage::Hardness) {
                self.hardness_tests
            } else {
                Vec::new()
            },
            process_stages: self.stages,
            material: self.material,
            selected_material: None,
            material_type: self.material_type,
            material_hardness: self.hardness,
            sample_size: self.size,
            sample_shape: self.shape,
            throughput: self.throughput,
            automation: self.automation,
            budget: self.budget,
            surface_finish: self.finish,
            applications: self.applications,
        }
    }
}

pub fn run(args: WizardArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let library = MaterialLibrary::load(config.materials_dir());

    let answers = Wizard::new().ask(&library)?;
    let mut input = answers.into_input();

    if let Some(path) = &args.save {
        let yaml = serde_yml::to_string(&input).into_diagnostic()?;
        write_output(&yaml, Some(path), global.quiet)?;
    }

    resolve_material(&mut input, &library)?;
    let recommendations = generate_recommendations(&input);
    if !global.quiet {
        eprintln!();
    }
    emit(&recommendations, &input, global, &config, None)
}

struct Wizard {
    theme: ColorfulTheme,
}

impl Wizard {
    fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    fn ask(&self, library: &MaterialLibrary) -> Result<WizardAnswers> {
        println!("{}", style("Sample preparation workflow").bold().cyan());
        println!("{}\n", style("Space toggles a choice, Enter confirms.").dim());

        let mut answers = WizardAnswers::default();

        let stage_labels: Vec<&str> = ProcessStage::ALL.iter().map(|s| s.as_str()).collect();
        answers.stages = self
            .multi("Process stages", &stage_labels)?
            .into_iter()
            .map(|i| ProcessStage::ALL[i].clone())
            .collect();

        let materials = library.materials();
        let mut material_items = vec!["(none - describe the material instead)".to_string()];
        material_items.extend(materials.iter().map(|m| m.name.clone()));
        let choice = Select::with_theme(&self.theme)
            .with_prompt("Library material")
            .items(&material_items)
            .default(0)
            .interact()
            .into_diagnostic()?;

        if choice > 0 {
            let material = materials[choice - 1];
            answers.material = Some(material.slug.clone().unwrap_or_else(|| material.name.clone()));
        } else {
            answers.material_type = Input::with_theme(&self.theme)
                .with_prompt("Material type")
                .allow_empty(true)
                .interact_text()
                .into_diagnostic()?;
        }

        // Library materials carry their own hardness
        let known_hardness = (choice > 0)
            .then(|| materials[choice - 1].hardness())
            .flatten();
        answers.hardness = match known_hardness {
            Some(h) => h,
            None => self.tier("Material hardness", Hardness::ALL, |h| h.label())?,
        };

        answers.size = self.tier("Sample size", SampleSize::ALL, |s| s.label())?;
        answers.shape = self.tier("Sample shape", SampleShape::ALL, |s| s.label())?;
        answers.throughput = self.tier("Throughput", Throughput::ALL, |t| t.label())?;
        answers.automation = self.tier("Automation", Automation::ALL, |a| a.label())?;
        answers.budget = self.tier("Budget", Budget::ALL, |b| b.label())?;
        answers.finish = self.tier("Surface finish", SurfaceFinish::ALL, |f| f.label())?;

        let app_labels: Vec<&str> = Application::KNOWN.iter().map(|a| a.label()).collect();
        answers.applications = self
            .multi("Applications", &app_labels)?
            .into_iter()
            .map(|i| Application::KNOWN[i].clone())
            .collect();

        self.ask_refinements(&mut answers)?;
        Ok(answers)
    }

    fn ask_refinements(&self, answers: &mut WizardAnswers) -> Result<()> {
        let has = |stage: ProcessStage| answers.stages.contains(&stage);
        let (sectioning, mounting, grinding, polishing, microscopy, hardness) = (
            has(ProcessStage::Sectioning),
            has(ProcessStage::Mounting),
            has(ProcessStage::Grinding),
            has(ProcessStage::Polishing),
            has(ProcessStage::Microscopy),
            has(ProcessStage::Hardness),
        );

        if sectioning {
            answers.section_type = self.tier("Section type", SectionType::ALL, |s| s.label())?;
            answers.damage_criticality =
                self.tier("Damage criticality", DamageCriticality::ALL, |d| d.label())?;
        }
        if mounting {
            answers.mounting =
                self.tier("Mounting preference", MountingPreference::ALL, |m| m.label())?;
        }
        if grinding {
            answers.grinding_surface =
                self.tier("Grinding surface", GrindingSurface::ALL, |g| g.label())?;
        }
        if polishing {
            answers.final_quality =
                self.tier("Final surface quality", FinalSurfaceQuality::ALL, |q| q.label())?;
        }
        if microscopy {
            answers.documentation =
                self.tier("Documentation", Documentation::ALL, |d| d.label())?;
        }
        if hardness {
            let tests = ["Vickers", "Rockwell", "Brinell", "Knoop"];
            answers.hardness_tests = self
                .multi("Hardness test methods", &tests)?
                .into_iter()
                .map(|i| tests[i].to_string())
                .collect();
        }
        Ok(())
    }

    fn tier<T: Copy>(&self, prompt: &str, all: &[T], label: fn(&T) -> &'static str) -> Result<T> {
        let items: Vec<&str> = all.iter().map(label).collect();
        let selection = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(&items)
            .default(0)
            .interact()
            .into_diagnostic()?;
        Ok(all[selection])
    }

    fn multi(&self, prompt: &str, items: &[&str]) -> Result<Vec<usize>> {
        MultiSelect::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .interact()
            .into_diagnostic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answers_build_input() {
        let answers = WizardAnswers {
            stages: vec![ProcessStage::Grinding, ProcessStage::Microscopy],
            material: Some("ss-304".into()),
            hardness: Hardness::Medium,
            throughput: Throughput::High,
            applications: vec![Application::QualityControl],
            grinding_surface: GrindingSurface::MinimalDeformation,
            documentation: Documentation::HighResolution,
            ..Default::default()
        };
        let input = answers.into_input();

        assert_eq!(input.process_stages.len(), 2);
        assert_eq!(input.material.as_deref(), Some("ss-304"));
        assert_eq!(input.material_hardness, Hardness::Medium);
        assert_eq!(input.grinding_surface_requirements, GrindingSurface::MinimalDeformation);
        assert_eq!(input.documentation_requirements, Documentation::HighResolution);
    }

    #[test]
    fn test_refinements_for_unselected_stages_dropped() {
        let answers = WizardAnswers {
            stages: vec![ProcessStage::Etching],
            mounting: MountingPreference::Castable,
            final_quality: FinalSurfaceQuality::EbsdReady,
            hardness_tests: vec!["Vickers".into()],
            ..Default::default()
        };
        let input = answers.into_input();

        assert_eq!(input.mounting_type_preference, MountingPreference::default());
        assert_eq!(input.final_surface_quality, FinalSurfaceQuality::default());
        assert!(input.hardness_test_types.is_empty());
    }
}
