//! Hardness testing rules

use crate::engine::stages::StageContext;
use crate::engine::text::{human_list, sentences};
use crate::entities::{Recommendation, Stage};

pub(super) fn evaluate(ctx: &StageContext<'_>) -> Vec<Recommendation> {
    let scales: Vec<String> = ctx
        .input
        .hardness_test_types
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("variable"))
        .map(str::to_string)
        .collect();

    let requested = if scales.is_empty() {
        String::new()
    } else {
        format!("Requested test methods: {}.", human_list(&scales))
    };

    vec![Recommendation::equipment(
        Stage::Hardness,
        "Hardness Tester (Vickers/Rockwell)",
        sentences([
            format!(
                "Appropriate hardness testing system for {}.",
                ctx.material_type_or("your materials")
            ),
            "Vickers for precision, Rockwell for production testing.".to_string(),
            requested,
        ]),
    )]
}

#[cfg(test)]
mod tests {
    use crate::engine::stages::test_support::run;
    use crate::entities::{Stage, WorkflowInput};

    #[test]
    fn test_hardness_tester() {
        let recs = run(Stage::Hardness, &WorkflowInput::new(["hardness"]));
        assert_eq!(recs.len(), 1);
        assert_eq!(
            recs[0].reasoning,
            "Appropriate hardness testing system for your materials. Vickers for precision, Rockwell for production testing."
        );
    }

    #[test]
    fn test_names_material_and_scales() {
        let mut input = WorkflowInput::new(["hardness"]).with_material_type("Tool Steel");
        input.hardness_test_types = vec!["Rockwell".into(), "Knoop".into(), "Variable".into()];

        let reasoning = &run(Stage::Hardness, &input)[0].reasoning;
        assert!(reasoning.starts_with("Appropriate hardness testing system for Tool Steel."));
        assert!(reasoning.ends_with("Requested test methods: Rockwell and Knoop."));
    }
}
