//! Grinding rules - platform, optional rough grinder and paper sequence

use crate::engine::sequence::grinding_sequence;
use crate::engine::stages::{control_type, platen_size, StageContext};
use crate::engine::text::sentences;
use crate::entities::{GrindingSurface, Recommendation, Stage};

pub(super) fn evaluate(ctx: &StageContext<'_>) -> Vec<Recommendation> {
    let input = ctx.input;
    let f = ctx.features;
    let mut recs = Vec::new();

    if f.is_large {
        recs.push(Recommendation::equipment(
            Stage::Grinding,
            "Belt Grinder / Hand Grinder",
            format!(
                "Essential for initial rough grinding of {} samples. Provides fastest material removal before fine grinding with papers. Critical for large samples requiring significant material removal.",
                input.sample_size.phrase()
            ),
        ));
    }

    recs.push(Recommendation::equipment(
        Stage::Grinding,
        format!("{} {} Grinder/Polisher", platen_size(f), control_type(f)),
        sentences([
            format!(
                "Appropriate platen size for {} samples.",
                input.sample_size.phrase()
            ),
            if f.is_automated {
                "Programmable operation ensures consistent grinding parameters.".to_string()
            } else {
                "Manual control provides flexibility for varied materials.".to_string()
            },
        ]),
    ));

    let sequence = grinding_sequence(input, f);
    let grits = sequence.list();
    let range = sequence.range();
    let light_pressure = match input.grinding_surface_requirements {
        GrindingSurface::MinimalDeformation => {
            "Minimal deformation required: use light, even pressure and do not skip grit steps."
        }
        GrindingSurface::PreserveFeatures => {
            "Check the surface between steps so features of interest are not ground away."
        }
        GrindingSurface::StandardFlat => "",
    };

    let papers = if f.wants_aggressive_abrasive() {
        Recommendation::consumable(
            Stage::Grinding,
            format!("Silicon Carbide Grinding Papers ({} grit)", grits),
            sentences([
                "SiC provides aggressive cutting action essential for hard materials.".to_string(),
                format!("Follow progressive sequence ({}): {} grit.", range, grits),
                fine_grit_note(sequence.has_fine_grits(), "best surface quality before polishing"),
                light_pressure.to_string(),
            ]),
        )
    } else if f.is_soft {
        let first = sequence.steps().first().map(String::as_str).unwrap_or("240");
        Recommendation::consumable(
            Stage::Grinding,
            format!("Aluminum Oxide or Fine SiC Grinding Papers ({} grit)", grits),
            sentences([
                format!(
                    "Finer abrasives (starting at {} grit) with light pressure minimize embedding and relief in soft materials.",
                    first
                ),
                format!("Follow sequence ({}): {} grit.", range, grits),
                "Essential for preserving true microstructure.".to_string(),
                light_pressure.to_string(),
            ]),
        )
    } else {
        Recommendation::consumable(
            Stage::Grinding,
            format!("Grinding Papers ({} grit)", grits),
            sentences([
                format!("Standard grinding papers in progressive grit sizes ({}): {}.", range, grits),
                if sequence.has_fine_grits() {
                    fine_grit_note(true, "optimal surface preparation before polishing")
                } else {
                    "Follow progressive grinding steps for optimal surface preparation.".to_string()
                },
                light_pressure.to_string(),
            ]),
        )
    };
    recs.push(papers);

    recs
}

fn fine_grit_note(has_fine: bool, purpose: &str) -> String {
    if has_fine {
        format!("Fine grits (800, 1200) recommended for {}.", purpose)
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::stages::test_support::{run, types};
    use crate::entities::{GrindingSurface, Material, Stage, WorkflowInput};

    #[test]
    fn test_small_manual_grinder() {
        let input = WorkflowInput::new(["grinding"]).with_size("Small");
        let recs = run(Stage::Grinding, &input);

        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].item_type, "8-10 inch Manual Grinder/Polisher");
        assert!(recs[0].reasoning.contains("small (< 25mm) samples"));
        assert_eq!(
            recs[1].item_type,
            "Grinding Papers (120, 240, 320, 400, 600, 800, 1200 grit)"
        );
        assert!(recs[1].reasoning.contains("120-1200 grit"));
    }

    #[test]
    fn test_large_sample_gets_belt_grinder_first() {
        let input = WorkflowInput::new(["grinding"])
            .with_size("Very Large")
            .with_automation("Automated");
        let names = run(Stage::Grinding, &input);

        assert_eq!(
            types(&names)[..2],
            ["Belt Grinder / Hand Grinder", "12 inch Programmable Grinder/Polisher"]
        );
    }

    #[test]
    fn test_semi_automated_label() {
        let input = WorkflowInput::new(["grinding"]).with_automation("Semi-Automated");
        assert_eq!(
            run(Stage::Grinding, &input)[0].item_type,
            "8-10 inch Semi-automated Grinder/Polisher"
        );
    }

    #[test]
    fn test_soft_papers() {
        let input = WorkflowInput::new(["grinding"]).with_hardness("Soft");
        let papers = &run(Stage::Grinding, &input)[1];
        assert_eq!(
            papers.item_type,
            "Aluminum Oxide or Fine SiC Grinding Papers (240, 320, 400, 600 grit)"
        );
        assert!(papers.reasoning.contains("starting at 240 grit"));
        assert!(papers.reasoning.contains("240-600 grit"));
    }

    #[test]
    fn test_very_hard_sic_papers() {
        let input = WorkflowInput::new(["grinding"]).with_hardness("Very Hard");
        let papers = &run(Stage::Grinding, &input)[1];
        assert!(papers.item_type.starts_with("Silicon Carbide Grinding Papers"));
        assert!(papers.reasoning.contains("Fine grits (800, 1200)"));
    }

    #[test]
    fn test_material_sequence_overrides_hardness() {
        let material = Material::new("Lab alloy").with_grinding_sequence(["180", "500", "2000"]);
        let input = WorkflowInput::new(["grinding"])
            .with_hardness("Very Hard")
            .with_material(material);
        let papers = &run(Stage::Grinding, &input)[1];

        assert_eq!(papers.item_type, "Silicon Carbide Grinding Papers (180, 500, 2000 grit)");
        assert!(papers.reasoning.contains("(180-2000 grit): 180, 500, 2000 grit."));
        assert!(!papers.reasoning.contains("Fine grits"));
    }

    #[test]
    fn test_minimal_deformation_note() {
        let mut input = WorkflowInput::new(["grinding"]);
        input.grinding_surface_requirements = GrindingSurface::MinimalDeformation;
        let papers = &run(Stage::Grinding, &input)[1];
        assert!(papers.reasoning.contains("light, even pressure"));
    }
}
