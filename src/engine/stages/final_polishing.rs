//! Final polishing rules

use crate::engine::stages::StageContext;
use crate::entities::{Recommendation, Stage, SurfaceFinish};

pub(super) fn evaluate(ctx: &StageContext<'_>) -> Vec<Recommendation> {
    if needs_deformation_free(ctx) {
        vec![
            Recommendation::equipment(
                Stage::FinalPolishing,
                "Vibratory Polisher",
                "Essential for EBSD preparation and extremely flat surfaces. Produces deformation-free surfaces with minimal relief critical for electron backscatter diffraction. Uses vibration to polish samples without mechanical pressure.",
            ),
            Recommendation::consumable(
                Stage::FinalPolishing,
                "Colloidal Silica Polishing Suspension (0.05 µm)",
                "Final polishing step for extremely flat surfaces. Essential for EBSD and advanced characterization techniques requiring minimal surface relief and deformation-free surfaces.",
            ),
            Recommendation::consumable(
                Stage::FinalPolishing,
                "Napped Polishing Cloth",
                "Napped cloth essential for final colloidal silica polishing. Provides gentle polishing action for deformation-free surfaces.",
            ),
        ]
    } else {
        vec![
            Recommendation::consumable(
                Stage::FinalPolishing,
                "Fine Diamond Suspension (0.25 µm) or Colloidal Silica (0.05 µm)",
                "Final polishing step for high-quality surface finish. Removes fine scratches from previous polishing steps and prepares surface for microstructural analysis.",
            ),
            Recommendation::consumable(
                Stage::FinalPolishing,
                "Napped Polishing Cloth",
                "Napped cloth for final polishing steps. Provides appropriate surface for fine polishing suspensions.",
            ),
        ]
    }
}

fn needs_deformation_free(ctx: &StageContext<'_>) -> bool {
    let input = ctx.input;
    ctx.features.needs_ebsd
        || matches!(
            input.surface_finish,
            SurfaceFinish::ExtremelyFlat | SurfaceFinish::HighQuality
        )
        || input.final_surface_quality.is_deformation_free()
}
