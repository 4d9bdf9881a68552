//! Microscopy rules - microscope tier and digital imaging

use crate::engine::stages::StageContext;
use crate::entities::{Application, Recommendation, Stage};

pub(super) fn evaluate(ctx: &StageContext<'_>) -> Vec<Recommendation> {
    let f = ctx.features;
    let input = ctx.input;

    let tier = if f.needs_ebsd || input.has_application(&Application::ResearchDevelopment) {
        "Advanced"
    } else if f.is_high_throughput {
        "Production"
    } else {
        "Standard"
    };
    let workload = if f.is_high_throughput {
        "high-throughput"
    } else {
        "routine"
    };

    let mut recs = vec![Recommendation::equipment(
        Stage::Microscopy,
        format!("{} Metallurgical Microscope", tier),
        format!(
            "{} microscope suitable for {} metallographic analysis. Consider digital imaging capabilities for documentation.",
            tier.to_lowercase(),
            workload
        ),
    )];

    if needs_imaging(ctx) {
        recs.push(Recommendation::equipment(
            Stage::Microscopy,
            "Digital Imaging System",
            format!(
                "Essential for modern metallography documentation. Includes digital camera and imaging software for image capture, measurement, annotation, and report generation. Critical for {} documentation.",
                documentation_purpose(ctx)
            ),
        ));
    }

    recs
}

fn needs_imaging(ctx: &StageContext<'_>) -> bool {
    let input = ctx.input;
    ctx.features.is_high_throughput
        || input.has_application(&Application::QualityControl)
        || input.has_application(&Application::FailureAnalysis)
        || input.has_application(&Application::ResearchDevelopment)
        || input.documentation_requirements.needs_imaging()
}

fn documentation_purpose(ctx: &StageContext<'_>) -> String {
    let input = ctx.input;
    if input.has_application(&Application::QualityControl) {
        "quality control".to_string()
    } else if input.has_application(&Application::FailureAnalysis) {
        "failure analysis".to_string()
    } else if input.has_application(&Application::ResearchDevelopment)
        || !input.documentation_requirements.needs_imaging()
    {
        "research".to_string()
    } else {
        input.documentation_requirements.label().to_lowercase()
    }
}
