//! Rendering recommendations for the terminal and for pipes
//!
//! This is the rendering side of the link-markup contract: the engine emits
//! `[label](path)` as opaque text and only the human-readable listing
//! resolves it. Machine formats (yaml, json, tsv, csv) and the markdown
//! report keep the markup exactly as emitted.

use chrono::Utc;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::OutputFormat;
use crate::core::links::resolve_links;
use crate::entities::{Category, Recommendation, WorkflowInput};
use crate::schema::template::{group_by_stage, ReportGenerator};

/// Default wrap width when the terminal size is unknown
const DEFAULT_WIDTH: usize = 88;

/// Render recommendations in the requested format
pub fn render_recommendations(
    recommendations: &[Recommendation],
    input: &WorkflowInput,
    format: OutputFormat,
    site_url: Option<&str>,
) -> Result<String> {
    match format {
        OutputFormat::Auto => Ok(render_human(recommendations, site_url, terminal_width())),
        OutputFormat::Yaml => serde_yml::to_string(recommendations).into_diagnostic(),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(recommendations).into_diagnostic()?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Tsv => Ok(render_tsv(recommendations)),
        OutputFormat::Csv => render_csv(recommendations),
        OutputFormat::Md => ReportGenerator::new()
            .and_then(|g| g.render_markdown(input, recommendations, Utc::now()))
            .map_err(|e| miette::miette!("{}", e)),
    }
}

fn terminal_width() -> usize {
    let term = console::Term::stdout();
    term.size_checked()
        .map(|(_, cols)| usize::from(cols).min(DEFAULT_WIDTH + 12))
        .unwrap_or(DEFAULT_WIDTH)
}

/// Stage-grouped listing with links resolved against `site_url`
pub fn render_human(
    recommendations: &[Recommendation],
    site_url: Option<&str>,
    width: usize,
) -> String {
    let mut out = String::new();
    let indent = "      ";

    for (i, group) in group_by_stage(recommendations).iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("{}\n", style(group.title).bold().underlined()));

        for rec in &group.recommendations {
            let marker = match rec.category {
                Category::Equipment => style("●").cyan(),
                Category::Consumable => style("○").yellow(),
            };
            out.push_str(&format!(
                "  {} {} {}\n",
                marker,
                style(&rec.item_type).bold(),
                style(format!("[{}]", rec.category)).dim()
            ));

            let reasoning = resolve_links(&rec.reasoning, site_url);
            for line in wrap_text(&reasoning, width.saturating_sub(indent.len())) {
                out.push_str(indent);
                out.push_str(&line);
                out.push('\n');
            }
        }
    }

    out
}

/// One recommendation per line: stage, category, type, reasoning
pub fn render_tsv(recommendations: &[Recommendation]) -> String {
    let clean = |s: &str| s.replace(['\t', '\n'], " ");
    let mut out = String::from("STAGE\tCATEGORY\tTYPE\tREASONING\n");
    for rec in recommendations {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\n",
            rec.stage,
            rec.category,
            clean(&rec.item_type),
            clean(&rec.reasoning)
        ));
    }
    out
}

pub fn render_csv(recommendations: &[Recommendation]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["stage", "category", "type", "reasoning"])
        .into_diagnostic()?;
    for rec in recommendations {
        writer
            .write_record([
                rec.stage.as_str(),
                &rec.category.to_string(),
                &rec.item_type,
                &rec.reasoning,
            ])
            .into_diagnostic()?;
    }
    let bytes = writer.into_inner().into_diagnostic()?;
    String::from_utf8(bytes).into_diagnostic()
}

/// Wrap text to fit within a maximum width, breaking at word boundaries
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if text.chars().count() <= max_width || max_width < 5 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };

        if needed <= max_width || current.is_empty() {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::generate_recommendations;
    use crate::entities::Stage;

    fn etching() -> (WorkflowInput, Vec<Recommendation>) {
        let input = WorkflowInput::new(["etching"]);
        let recs = generate_recommendations(&input);
        (input, recs)
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("short", 20), vec!["short"]);
        assert_eq!(
            wrap_text("one two three four", 9),
            vec!["one two", "three", "four"]
        );
        assert_eq!(wrap_text("averyveryverylongword x", 6), vec!["averyveryverylongword", "x"]);
    }

    #[test]
    fn test_human_resolves_links() {
        console::set_colors_enabled(false);
        let (_, recs) = etching();
        let out = render_human(&recs, Some("https://example.org"), 400);

        assert!(out.starts_with("Etching\n"));
        assert!(out.contains("Fume Hood / Ventilation System [equipment]"));
        assert!(out.contains("Etchant Selector tool (https://example.org/tools/etchant-selector)"));
        assert!(!out.contains("]("));
    }

    #[test]
    fn test_machine_formats_keep_markup() {
        let (input, recs) = etching();
        for format in [OutputFormat::Yaml, OutputFormat::Json, OutputFormat::Tsv, OutputFormat::Csv] {
            let out = render_recommendations(&recs, &input, format, Some("https://x")).unwrap();
            assert!(out.contains("(/tools/etchant-selector)"), "{:?}", format);
        }
    }

    #[test]
    fn test_json_shape() {
        let (input, recs) = etching();
        let out = render_recommendations(&recs, &input, OutputFormat::Json, None).unwrap();
        let parsed: Vec<Recommendation> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, recs);
        assert!(out.contains("\"type\": \"Fume Hood / Ventilation System\""));
        assert!(out.contains("\"stage\": \"etching\""));
    }

    #[test]
    fn test_tsv_rows() {
        let recs = generate_recommendations(&WorkflowInput::new(["polishing"]));
        let tsv = render_tsv(&recs);
        let lines: Vec<_> = tsv.lines().collect();

        assert_eq!(lines.len(), recs.len() + 1);
        assert!(lines.iter().skip(1).all(|l| l.split('\t').count() == 4));
        assert!(lines
            .iter()
            .any(|l| l.starts_with(&format!("{}\t", Stage::FinalPolishing))));
    }

    #[test]
    fn test_csv_quotes_commas() {
        let recs = generate_recommendations(&WorkflowInput::new(["grinding"]));
        let csv = render_csv(&recs).unwrap();
        assert!(csv.starts_with("stage,category,type,reasoning\n"));
        assert!(csv.contains("\"Grinding Papers (120, 240, 320, 400, 600, 800, 1200 grit)\""));
    }
}
