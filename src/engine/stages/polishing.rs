//! Polishing rules - platform and diamond suspension sequence

use crate::engine::sequence::polishing_sequence;
use crate::engine::stages::{control_type, platen_size, StageContext};
use crate::engine::text::{micron, micron_list, sentences};
use crate::entities::{Application, Recommendation, Stage};

pub(super) fn evaluate(ctx: &StageContext<'_>) -> Vec<Recommendation> {
    let input = ctx.input;
    let f = ctx.features;
    let mut recs = Vec::new();

    let control = if f.is_automated {
        "Programmable operation ensures consistent polishing parameters."
    } else {
        "Manual control provides flexibility."
    };

    if needs_dual_wheel(ctx) {
        recs.push(Recommendation::equipment(
            Stage::Polishing,
            format!("Dual Wheel {} {} Grinder/Polisher", platen_size(f), control_type(f)),
            sentences([
                "Dual wheel configuration allows dedicated wheels for grinding and polishing, preventing cross-contamination and improving throughput.",
                control,
                "Essential for high-volume production and quality control where sample-to-sample contamination must be avoided.",
            ]),
        ));
    } else {
        recs.push(Recommendation::equipment(
            Stage::Polishing,
            format!("{} {} Grinder/Polisher", platen_size(f), control_type(f)),
            sentences([
                "Can handle both grinding and polishing operations with polishing suspension.",
                control,
            ]),
        ));
    }

    let sequence = polishing_sequence(input, f);
    let finest = sequence
        .steps()
        .last()
        .map(|s| micron(s))
        .unwrap_or_else(|| micron("0.25"));

    recs.push(Recommendation::consumable(
        Stage::Polishing,
        format!(
            "Diamond Polishing Suspensions ({} to {})",
            micron(sequence.coarse_diamond()),
            finest
        ),
        format!(
            "Diamond suspensions for progressive polishing steps: {}. Essential for removing grinding scratches and achieving high-quality surface finish.",
            micron_list(sequence.steps())
        ),
    ));

    recs.push(Recommendation::consumable(
        Stage::Polishing,
        "Polishing Cloths (synthetic)",
        "Synthetic polishing cloths for diamond polishing stages. Provides consistent surface for diamond suspension application.",
    ));

    recs
}

/// High-volume work or production testing, where a shared wheel would carry
/// contamination between samples
fn needs_dual_wheel(ctx: &StageContext<'_>) -> bool {
    ctx.features.is_high_throughput || ctx.input.has_application(&Application::ProductionTesting)
}
