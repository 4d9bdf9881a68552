//! Sectioning rules
//!
//! Small samples that need a careful cut go to precision wafering; abrasive
//! cut-off saws start at a 10-inch blade and are too large for them.
//! Everything else is cut on an abrasive saw sized to the sample, with the
//! feed mechanism picked from throughput, automation and budget. A precision
//! wafering system can still be appended as an optional alternative.

use crate::engine::stages::StageContext;
use crate::engine::text::sentences;
use crate::entities::{Application, Budget, Recommendation, Stage, SurfaceFinish};

/// Feed mechanism of an abrasive cut-off saw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Feed {
    AutomatedTable,
    ManualTable,
    WheelOnly,
    Table,
}

impl Feed {
    fn label(&self) -> &'static str {
        match self {
            Feed::AutomatedTable => "with Automated Table Feed",
            Feed::ManualTable => "with Manual Table Feed",
            Feed::WheelOnly => "with Wheel Feed Only (Budget Option)",
            Feed::Table => "with Table Feed",
        }
    }

    fn justification(&self) -> &'static str {
        match self {
            Feed::AutomatedTable => {
                "Automated table feed ensures consistent cutting parameters for high throughput."
            }
            Feed::ManualTable => {
                "Table feed provides better control and consistency for medium to high throughput."
            }
            Feed::WheelOnly => "Wheel feed only provides cost-effective sectioning for low-volume work.",
            Feed::Table => "Table feed provides controlled, repeatable cuts for routine work.",
        }
    }
}

pub(super) fn evaluate(ctx: &StageContext<'_>) -> Vec<Recommendation> {
    let input = ctx.input;
    let f = ctx.features;

    let needs_high_precision = input.damage_criticality.is_elevated();
    let needs_specific_feature = input.section_type.is_targeted();
    let extremely_flat = input.surface_finish == SurfaceFinish::ExtremelyFlat;

    let precision_primary = f.is_small
        && (f.is_delicate
            || f.needs_ebsd
            || extremely_flat
            || needs_high_precision
            || needs_specific_feature);

    if precision_primary {
        return vec![
            Recommendation::equipment(
                Stage::Sectioning,
                "Precision Wafering System with Diamond Blades",
                "Essential for small delicate samples. Precision wafering with thin diamond blades (3-8 inch) minimizes damage and material loss. Standard abrasive saws (minimum 10-inch) are too large for small samples. Produces smoother cut surfaces with less damage, reducing subsequent grinding time.",
            ),
            Recommendation::consumable(
                Stage::Sectioning,
                "Diamond Wafering Blades (3-8 inch)",
                "Thin diamond blades (0.1-0.5 mm) minimize kerf width and material loss. Essential for small samples where material conservation is important. High concentration diamond blades provide precise cutting with minimal heat generation.",
            ),
        ];
    }

    let mut recs = Vec::new();

    let blade_size = if f.is_very_large {
        "14-16 inch"
    } else if f.is_large {
        "12-14 inch"
    } else {
        "10-12 inch"
    };
    let feed = feed_for(ctx);

    recs.push(Recommendation::equipment(
        Stage::Sectioning,
        format!("{} Abrasive Cut-off Saw {}", blade_size, feed.label()),
        sentences([
            format!(
                "Primary sectioning method for {}.",
                ctx.material_type_or("most materials")
            ),
            "Versatile and cost-effective, suitable for a wide range of materials from soft metals to hard steels and ceramics.".to_string(),
            "Standard abrasive saws start at 10-inch (250mm) blade size.".to_string(),
            feed.justification().to_string(),
            format!(
                "Appropriate blade size for {} samples.",
                input.sample_size.phrase()
            ),
        ]),
    ));

    if f.wants_aggressive_abrasive() || f.is_hard {
        recs.push(Recommendation::consumable(
            Stage::Sectioning,
            "Silicon Carbide Abrasive Cut-off Wheels",
            "SiC abrasive wheels provide aggressive cutting action essential for hard materials and ceramics. Proper blade selection and adequate cooling prevent excessive heat generation that could alter microstructure.",
        ));
    } else if f.is_soft {
        recs.push(Recommendation::consumable(
            Stage::Sectioning,
            "Aluminum Oxide Abrasive Cut-off Wheels",
            "Alumina abrasive wheels suitable for soft non-ferrous metals. Proper blade selection prevents excessive heat generation and material smearing in soft materials.",
        ));
    } else {
        recs.push(Recommendation::consumable(
            Stage::Sectioning,
            "Abrasive Cut-off Wheels",
            format!(
                "Silicon carbide or alumina abrasive wheels suitable for {}. Proper blade selection prevents excessive heat generation.",
                ctx.material_type_or("metallic materials")
            ),
        ));
    }

    recs.push(Recommendation::consumable(
        Stage::Sectioning,
        "Cutting Fluid / Coolant",
        "Essential for cooling and lubrication during cutting. Prevents excessive heat generation that could cause phase transformations or microstructural changes.",
    ));

    let sensitive_sample = f.is_hard_material
        || f.is_brittle
        || f.is_delicate
        || needs_high_precision
        || needs_specific_feature;
    let damage_sensitive_use = f.needs_ebsd
        || extremely_flat
        || input.has_application(&Application::ResearchDevelopment)
        || input.has_application(&Application::FailureAnalysis)
        || needs_high_precision;

    if sensitive_sample && damage_sensitive_use {
        let subject = if f.is_hard_material {
            "hard materials and ceramics"
        } else if f.is_delicate {
            "delicate samples"
        } else {
            "applications requiring minimal damage"
        };
        let follow_up = if f.is_large {
            "For large samples, use abrasive sectioning for rough cutting, then precision wafering for final section."
        } else {
            "Produces smoother cut surfaces with less damage, reducing subsequent grinding time."
        };

        recs.push(Recommendation::equipment(
            Stage::Sectioning,
            "Precision Wafering System with Diamond Blades (Optional/Alternative)",
            sentences([
                format!(
                    "Recommended as alternative or complement to abrasive sectioning for {}.",
                    subject
                ),
                "Diamond blade cutting minimizes deformation and thermal damage.".to_string(),
                follow_up.to_string(),
            ]),
        ));
        recs.push(Recommendation::consumable(
            Stage::Sectioning,
            "Diamond Wafering Blades (3-8 inch)",
            format!(
                "High concentration diamond blades provide precise cutting with minimal heat generation. Prevents thermal damage critical for {}.",
                if f.is_hard_material {
                    "hard materials and ceramics"
                } else {
                    "delicate materials"
                }
            ),
        ));
    }

    recs
}

fn feed_for(ctx: &StageContext<'_>) -> Feed {
    let throughput = ctx.input.throughput;
    if throughput.is_high() || ctx.features.is_automated {
        Feed::AutomatedTable
    } else if throughput.needs_table_feed() {
        Feed::ManualTable
    } else if ctx.input.budget == Budget::Essential && ctx.features.is_small {
        Feed::WheelOnly
    } else {
        Feed::Table
    }
}
