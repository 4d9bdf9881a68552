//! Markdown report rendering using Tera

use chrono::{DateTime, Utc};
use rust_embed::Embed;
use serde::Serialize;
use tera::Tera;
use thiserror::Error;

use crate::entities::{Recommendation, Stage, WorkflowInput};

#[derive(Embed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

const REPORT_TEMPLATE: &str = "report.md.tera";

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template rendering error: {0}")]
    RenderError(String),
}

/// Recommendations of one stage, in output order
#[derive(Debug, Serialize)]
pub struct StageGroup<'a> {
    pub stage: Stage,
    pub title: &'static str,
    pub recommendations: Vec<&'a Recommendation>,
}

/// Split recommendations into consecutive per-stage groups
pub fn group_by_stage(recommendations: &[Recommendation]) -> Vec<StageGroup<'_>> {
    let mut groups: Vec<StageGroup<'_>> = Vec::new();
    for rec in recommendations {
        match groups.last_mut() {
            Some(group) if group.stage == rec.stage => group.recommendations.push(rec),
            _ => groups.push(StageGroup {
                stage: rec.stage,
                title: rec.stage.title(),
                recommendations: vec![rec],
            }),
        }
    }
    groups
}

/// One line of the input summary table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub field: &'static str,
    pub value: String,
}

/// Field/value rows describing the input, skipping blanks
pub fn input_summary(input: &WorkflowInput) -> Vec<SummaryRow> {
    let stages = input
        .process_stages
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let applications = input
        .applications
        .iter()
        .map(|a| a.label())
        .collect::<Vec<_>>()
        .join(", ");

    [
        ("Stages", stages),
        ("Material type", input.material_type.clone()),
        (
            "Material",
            input
                .selected_material
                .as_ref()
                .map(|m| m.name.clone())
                .unwrap_or_default(),
        ),
        ("Hardness", input.material_hardness.label().to_string()),
        ("Sample size", input.sample_size.label().to_string()),
        ("Sample shape", input.sample_shape.label().to_string()),
        ("Applications", applications),
        ("Throughput", input.throughput.label().to_string()),
        ("Automation", input.automation.label().to_string()),
        ("Budget", input.budget.label().to_string()),
        ("Surface finish", input.surface_finish.label().to_string()),
    ]
    .into_iter()
    .filter(|(_, value)| !value.is_empty())
    .map(|(field, value)| SummaryRow { field, value })
    .collect()
}

/// Report generator with the embedded templates loaded
pub struct ReportGenerator {
    tera: Tera,
}

impl ReportGenerator {
    pub fn new() -> Result<Self, TemplateError> {
        let mut tera = Tera::default();

        for file in EmbeddedTemplates::iter() {
            let filename = file.as_ref();
            if let Some(content) = EmbeddedTemplates::get(filename) {
                if let Ok(template_str) = std::str::from_utf8(&content.data) {
                    tera.add_raw_template(filename, template_str)
                        .map_err(|e| TemplateError::RenderError(e.to_string()))?;
                }
            }
        }

        Ok(Self { tera })
    }

    /// Render the markdown report, leaving link markup as written
    pub fn render_markdown(
        &self,
        input: &WorkflowInput,
        recommendations: &[Recommendation],
        generated: DateTime<Utc>,
    ) -> Result<String, TemplateError> {
        if !self.tera.get_template_names().any(|n| n == REPORT_TEMPLATE) {
            return Err(TemplateError::NotFound(REPORT_TEMPLATE.to_string()));
        }

        let mut context = tera::Context::new();
        context.insert("generated", &generated.format("%Y-%m-%d %H:%M UTC").to_string());
        context.insert("summary", &input_summary(input));
        context.insert("groups", &group_by_stage(recommendations));

        self.tera
            .render(REPORT_TEMPLATE, &context)
            .map_err(|e| TemplateError::RenderError(e.to_string()))
    }
}
