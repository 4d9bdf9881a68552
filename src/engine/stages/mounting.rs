//! Mounting rules - cold (castable) versus compression mounting

use crate::engine::stages::StageContext;
use crate::entities::{MountingPreference, Recommendation, Stage};

pub(super) fn evaluate(ctx: &StageContext<'_>) -> Vec<Recommendation> {
    let f = ctx.features;

    if needs_cold_mounting(ctx) {
        let equipment = if f.is_high_throughput {
            Recommendation::equipment(
                Stage::Mounting,
                "UV Curing Mounting System",
                "Fastest cold mounting cycles for high-volume work. Essential for temperature-sensitive materials where compression mounting heat would alter microstructure.",
            )
        } else {
            Recommendation::equipment(
                Stage::Mounting,
                "Vacuum Impregnation System",
                "Removes air bubbles for clear mounts without heat application. Essential for soft metals and heat-sensitive materials. Prevents thermal damage that could mask true microstructure.",
            )
        };

        vec![
            equipment,
            Recommendation::consumable(
                Stage::Mounting,
                "Epoxy Mounting Resins",
                "High-quality epoxy resins for cold mounting. Excellent edge retention and chemical resistance essential for microstructure preservation.",
            ),
        ]
    } else {
        let press = if f.is_automated { "Automated" } else { "Manual" };

        vec![
            Recommendation::equipment(
                Stage::Mounting,
                format!("{} Compression Mounting Press", press),
                "Fast cycles and good edge retention for most materials. Heat and pressure application suitable for materials that can tolerate thermal cycling.",
            ),
            Recommendation::consumable(
                Stage::Mounting,
                "Thermosetting Mounting Resins",
                "Phenolic or diallyl phthalate (DAP) resins for compression mounting. Select based on material compatibility and edge retention needs.",
            ),
        ]
    }
}

/// Soft, delicate or heat-sensitive samples, or an explicit castable
/// preference
fn needs_cold_mounting(ctx: &StageContext<'_>) -> bool {
    let f = ctx.features;
    f.is_soft
        || f.is_delicate
        || is_heat_sensitive(ctx)
        || ctx.input.mounting_type_preference == MountingPreference::Castable
}

fn is_heat_sensitive(ctx: &StageContext<'_>) -> bool {
    let names_sensitive = |label: &str| {
        let l = label.to_lowercase();
        l.contains("titanium") || l.contains("heat-sensitive") || l.contains("heat sensitive")
    };

    names_sensitive(&ctx.input.material_type)
        || ctx
            .input
            .selected_material
            .as_ref()
            .and_then(|m| m.category.as_deref())
            .is_some_and(names_sensitive)
}
