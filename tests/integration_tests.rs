//! Integration tests for the prepflow CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// prepflow command isolated from the user's config and environment
fn prepflow(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("prepflow").unwrap();
    cmd.current_dir(tmp.path())
        .env("HOME", tmp.path())
        .env("XDG_CONFIG_HOME", tmp.path().join(".config"))
        .env_remove("PREPFLOW_SITE_URL")
        .env_remove("PREPFLOW_MATERIALS")
        .env_remove("PREPFLOW_LOG");
    cmd
}

fn recommend_json(tmp: &TempDir, args: &[&str]) -> Vec<serde_json::Value> {
    let output = prepflow(tmp)
        .args(["recommend", "--format", "json"])
        .args(args)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

fn stages_of(recs: &[serde_json::Value]) -> Vec<&str> {
    let mut stages: Vec<&str> = recs.iter().filter_map(|r| r["stage"].as_str()).collect();
    stages.dedup();
    stages
}

// ============================================================================
// Recommend
// ============================================================================

#[test]
fn test_recommend_polishing_includes_final_polishing() {
    let tmp = TempDir::new().unwrap();
    let recs = recommend_json(&tmp, &["--stage", "polishing,sectioning"]);
    assert_eq!(stages_of(&recs), vec!["sectioning", "polishing", "final-polishing"]);
    assert!(recs
        .iter()
        .all(|r| r["category"] == "equipment" || r["category"] == "consumable"));
}

#[test]
fn test_recommend_without_stages_warns() {
    let tmp = TempDir::new().unwrap();
    prepflow(&tmp)
        .args(["recommend", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"))
        .stderr(predicate::str::contains("No process stages selected"));
}

#[test]
fn test_recommend_scenario_flags() {
    let tmp = TempDir::new().unwrap();
    let recs = recommend_json(
        &tmp,
        &[
            "-s",
            "sectioning",
            "--hardness",
            "Hard",
            "--size",
            "Large",
            "--throughput",
            "High",
            "--automation",
            "Automated",
            "--material-type",
            "Carbon Steel",
        ],
    );
    let types: Vec<&str> = recs.iter().filter_map(|r| r["type"].as_str()).collect();
    assert!(types.contains(&"12-14 inch Abrasive Cut-off Saw with Automated Table Feed"));
    assert!(types.contains(&"Silicon Carbide Abrasive Cut-off Wheels"));
}

#[test]
fn test_recommend_from_workflow_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("workflow.yaml"),
        "processStages: [etching, cleaning]\nmaterialType: Carbon Steel\n",
    )
    .unwrap();

    prepflow(&tmp)
        .args(["recommend", "workflow.yaml", "--format", "tsv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("STAGE\tCATEGORY\tTYPE\tREASONING\n"))
        .stdout(predicate::str::contains("etching\tequipment\tFume Hood / Ventilation System"))
        .stdout(predicate::str::contains("cleaning\tequipment\tUltrasonic Cleaner"))
        .stdout(predicate::str::contains("Carbon Steel"));
}

#[test]
fn test_recommend_flags_override_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("w.json"), r#"{"processStages": ["etching"]}"#).unwrap();

    let output = prepflow(&tmp)
        .args(["recommend", "w.json", "--stage", "hardness", "--format", "json"])
        .output()
        .unwrap();
    let recs: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stages_of(&recs), vec!["hardness"]);
}

#[test]
fn test_recommend_from_stdin() {
    let tmp = TempDir::new().unwrap();
    prepflow(&tmp)
        .args(["recommend", "-", "--format", "csv"])
        .write_stdin("processStages: [microscopy]\nthroughput: High\n")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("stage,category,type,reasoning\n"))
        .stdout(predicate::str::contains("Production Metallurgical Microscope"))
        .stdout(predicate::str::contains("Digital Imaging System"));
}

#[test]
fn test_recommend_library_material_sequence() {
    let tmp = TempDir::new().unwrap();
    let recs = recommend_json(&tmp, &["--stage", "grinding", "--material", "wc-co"]);
    let types: Vec<&str> = recs.iter().filter_map(|r| r["type"].as_str()).collect();
    assert!(
        types.contains(&"Silicon Carbide Grinding Papers (120, 220, 600, 1200 grit)"),
        "{:?}",
        types
    );
}

#[test]
fn test_recommend_unknown_material_fails() {
    let tmp = TempDir::new().unwrap();
    prepflow(&tmp)
        .args(["recommend", "--stage", "grinding", "--material", "unobtainium"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown material: unobtainium"));
}

#[test]
fn test_recommend_extra_materials_dir() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("mats");
    fs::create_dir(&dir).unwrap();
    fs::write(
        dir.join("brass.yaml"),
        "name: Cartridge Brass\nslug: brass-260\nhardness_category: soft\nrecommended_grinding_sequence: [\"320\", \"600\"]\n",
    )
    .unwrap();

    let output = prepflow(&tmp)
        .env("PREPFLOW_MATERIALS", &dir)
        .args(["recommend", "-s", "grinding", "-m", "brass-260", "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).contains("(320, 600 grit)"));
}

#[test]
fn test_recommend_markdown_report() {
    let tmp = TempDir::new().unwrap();
    prepflow(&tmp)
        .args(["recommend", "-s", "etching", "--format", "md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Preparation Workflow Recommendations"))
        .stdout(predicate::str::contains("## Etching"))
        .stdout(predicate::str::contains("(/tools/etchant-selector)"));
}

#[test]
fn test_recommend_human_output_resolves_links() {
    let tmp = TempDir::new().unwrap();
    prepflow(&tmp)
        .env("PREPFLOW_SITE_URL", "https://example.org")
        .args(["recommend", "-s", "etching"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fume Hood / Ventilation System"))
        .stdout(predicate::str::contains("https://example.org/tools/etchant-selector"));
}

#[test]
fn test_recommend_output_file() {
    let tmp = TempDir::new().unwrap();
    prepflow(&tmp)
        .args(["recommend", "-s", "cleaning", "-f", "yaml", "-o", "out.yaml"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Written to"));

    let written = fs::read_to_string(tmp.path().join("out.yaml")).unwrap();
    assert!(written.contains("Drying Oven"));
}

#[test]
fn test_project_config_default_format() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join(".prepflow")).unwrap();
    fs::write(
        tmp.path().join(".prepflow/config.yaml"),
        "default_format: json\n",
    )
    .unwrap();

    prepflow(&tmp)
        .args(["recommend", "-s", "hardness"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"stage\": \"hardness\""));
}

#[test]
fn test_project_materials_dir_found_from_nested_directory() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join(".prepflow")).unwrap();
    fs::write(tmp.path().join(".prepflow/config.yaml"), "materials_dir: mats\n").unwrap();
    fs::create_dir(tmp.path().join("mats")).unwrap();
    fs::write(
        tmp.path().join("mats/custom.yaml"),
        "name: Custom Alloy\nslug: custom\nrecommended_grinding_sequence: [\"180\", \"500\"]\n",
    )
    .unwrap();
    let nested = tmp.path().join("work/run");
    fs::create_dir_all(&nested).unwrap();

    for dir in [tmp.path().to_path_buf(), nested] {
        let output = prepflow(&tmp)
            .current_dir(&dir)
            .args(["recommend", "-s", "grinding", "-m", "custom", "-f", "json"])
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "from {}: {}",
            dir.display(),
            String::from_utf8_lossy(&output.stderr)
        );
        assert!(String::from_utf8_lossy(&output.stdout).contains("(180, 500 grit)"));
    }
}

#[test]
fn test_recommend_syntax_error_reported() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("bad.yaml"), "processStages: [grinding\n").unwrap();
    prepflow(&tmp)
        .args(["recommend", "bad.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("syntax error"));
}

// ============================================================================
// Validate
// ============================================================================

#[test]
fn test_validate_valid_workflow() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("workflow.yaml"),
        "processStages: [grinding, polishing]\nmaterialHardness: Hard (50-65 HRC)\n",
    )
    .unwrap();

    prepflow(&tmp)
        .args(["validate", "workflow.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Files passed:"))
        .stdout(predicate::str::contains("All files passed validation!"));
}

#[test]
fn test_validate_rejects_unknown_stage() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("workflow.yaml"), "processStages: [anodizing]\n").unwrap();

    prepflow(&tmp)
        .args(["validate", "workflow.yaml"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("error(s)"))
        .stderr(predicate::str::contains("Validation failed: 1 file has errors"));
}

#[test]
fn test_validate_builtin_materials() {
    let tmp = TempDir::new().unwrap();
    let materials = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("materials");

    prepflow(&tmp)
        .arg("validate")
        .arg(&materials)
        .assert()
        .success()
        .stdout(predicate::str::contains("(material)"));
}

#[test]
fn test_validate_keep_going_counts_all_failures() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("a.yaml"), "processStages: nope\n").unwrap();
    fs::write(tmp.path().join("b.yaml"), "unknownField: 1\n").unwrap();

    prepflow(&tmp)
        .args(["validate", "--keep-going", "--summary", "a.yaml", "b.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("2 files have errors"));
}

// ============================================================================
// Material, options, config, completions
// ============================================================================

#[test]
fn test_material_list_tsv() {
    let tmp = TempDir::new().unwrap();
    prepflow(&tmp)
        .args(["material", "list", "--format", "tsv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ss-304\tStainless Steel 304"))
        .stdout(predicate::str::contains("wc-co\tTungsten Carbide (WC-Co)"));
}

#[test]
fn test_material_list_search() {
    let tmp = TempDir::new().unwrap();
    prepflow(&tmp)
        .args(["material", "list", "--search", "titanium", "--format", "tsv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ti-grade-5"))
        .stdout(predicate::str::contains("ss-304").not());
}

#[test]
fn test_material_show_json() {
    let tmp = TempDir::new().unwrap();
    prepflow(&tmp)
        .args(["material", "show", "WC-CO", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"slug\": \"wc-co\""))
        .stdout(predicate::str::contains("\"hardness_category\": \"very-hard\""));
}

#[test]
fn test_material_show_unknown() {
    let tmp = TempDir::new().unwrap();
    prepflow(&tmp)
        .args(["material", "show", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown material: nope"));
}

#[test]
fn test_options_json() {
    let tmp = TempDir::new().unwrap();
    let output = prepflow(&tmp)
        .args(["options", "materialHardness", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let fields: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(fields[0]["field"], "materialHardness");
    assert_eq!(fields[0]["values"][3], "Very Hard (> 65 HRC)");
}

#[test]
fn test_options_unknown_field() {
    let tmp = TempDir::new().unwrap();
    prepflow(&tmp)
        .args(["options", "colour"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown field: colour"));
}

#[test]
fn test_config_keys_and_show() {
    let tmp = TempDir::new().unwrap();
    prepflow(&tmp)
        .args(["config", "keys"])
        .assert()
        .success()
        .stdout(predicate::str::contains("site_url"))
        .stdout(predicate::str::contains("materials_dir"));

    prepflow(&tmp)
        .env("PREPFLOW_SITE_URL", "https://example.org")
        .args(["config", "show", "site_url"])
        .assert()
        .success()
        .stdout("https://example.org\n");

    prepflow(&tmp)
        .args(["config", "show", "default_format"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not set"));
}

#[test]
fn test_completions_bash() {
    let tmp = TempDir::new().unwrap();
    prepflow(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("prepflow"));
}

#[test]
fn test_help_lists_commands() {
    let tmp = TempDir::new().unwrap();
    prepflow(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("recommend"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("material"));
}
