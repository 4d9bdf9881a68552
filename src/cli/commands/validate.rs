//! `prepflow validate` command - check workflow and material files against schemas

use console::style;
use miette::Result;
use std::path::PathBuf;
use walkdir::WalkDir;

use crate::schema::validator::{ValidateFileError, Validator};

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Files or directories to validate (YAML or JSON)
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Continue validation after first error
    #[arg(long)]
    pub keep_going: bool,

    /// Show summary only, don't show individual errors
    #[arg(long)]
    pub summary: bool,
}

/// Validation statistics
#[derive(Default)]
struct ValidationStats {
    files_checked: usize,
    files_passed: usize,
    files_failed: usize,
    total_errors: usize,
}

pub fn run(args: ValidateArgs) -> Result<()> {
    let files = expand_paths(&args.paths);
    if files.is_empty() {
        return Err(miette::miette!(
            help = "Pass .yaml, .yml or .json files, or directories containing them",
            "No files to validate"
        ));
    }

    let validator = Validator::default();
    let mut stats = ValidationStats::default();

    for path in &files {
        stats.files_checked += 1;

        match validator.validate_file(path) {
            Ok(kind) => {
                stats.files_passed += 1;
                if !args.summary {
                    println!(
                        "{} {} {}",
                        style("✓").green(),
                        path.display(),
                        style(format!("({})", kind)).dim()
                    );
                }
            }
            Err(e) => {
                let count = match &e {
                    ValidateFileError::Invalid(v) => v.violation_count(),
                    ValidateFileError::Load(_) => 1,
                };
                stats.files_failed += 1;
                stats.total_errors += count;

                if !args.summary {
                    println!(
                        "{} {} - {} error(s)",
                        style("✗").red(),
                        path.display(),
                        count
                    );
                    let report = miette::Report::new(e);
                    println!("{:?}", report);
                }

                if !args.keep_going {
                    break;
                }
            }
        }
    }

    println!();
    println!("{}", style("─".repeat(60)).dim());
    println!("{}", style("Validation Summary").bold());
    println!("{}", style("─".repeat(60)).dim());
    println!("  Files checked:  {}", style(stats.files_checked).cyan());
    println!("  Files passed:   {}", style(stats.files_passed).green());
    println!("  Files failed:   {}", style(stats.files_failed).red());
    println!("  Total errors:   {}", style(stats.total_errors).red());
    println!();

    match stats.files_failed {
        0 => {
            println!("{} All files passed validation!", style("✓").green().bold());
            Ok(())
        }
        1 => Err(miette::miette!("Validation failed: 1 file has errors")),
        n => Err(miette::miette!("Validation failed: {} files have errors", n)),
    }
}

fn is_document(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| matches!(e.to_ascii_lowercase().as_str(), "yaml" | "yml" | "json"))
}

/// Expand paths - directories contribute every YAML/JSON file below them
fn expand_paths(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path)
                .into_iter()
                .filter_entry(|e| !e.file_name().to_string_lossy().starts_with('.') || e.depth() == 0)
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
            {
                if is_document(entry.path()) {
                    files.push(entry.path().to_path_buf());
                }
            }
        } else {
            // Missing files are reported by the validator
            files.push(path.clone());
        }
    }

    files.sort();
    files.dedup();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_expand_paths_filters_documents() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.yaml"), "processStages: []").unwrap();
        fs::write(dir.path().join("b.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        fs::create_dir(dir.path().join(".hidden")).unwrap();
        fs::write(dir.path().join(".hidden/c.yaml"), "").unwrap();

        let files = expand_paths(&[dir.path().to_path_buf()]);
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.yaml", "b.json"]);
    }

    #[test]
    fn test_explicit_file_kept_even_if_missing() {
        let files = expand_paths(&[PathBuf::from("does-not-exist.yaml")]);
        assert_eq!(files.len(), 1);
    }
}
