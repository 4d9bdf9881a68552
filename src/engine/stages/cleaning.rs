use crate::engine::stages::StageContext;
use crate::entities::{Recommendation, Stage};

pub(super) fn evaluate(_ctx: &StageContext<'_>) -> Vec<Recommendation> {
    vec![
        Recommendation::equipment(
            Stage::Cleaning,
            "Ultrasonic Cleaner",
            "Essential for removing polishing residues and contaminants. Ensures clean samples for accurate microstructural analysis.",
        ),
        Recommendation::equipment(
            Stage::Cleaning,
            "Drying Oven",
            "Critical for drying samples after cleaning to prevent water spots and contamination. Essential for high-quality surface preparation, especially for microscopy and photography.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use crate::engine::stages::test_support::{run, types};
    use crate::entities::{Category, Stage, WorkflowInput};

    #[test]
    fn test_cleaning_is_equipment_only() {
        let recs = run(Stage::Cleaning, &WorkflowInput::new(["cleaning"]).with_throughput("High"));
        assert_eq!(types(&recs), vec!["Ultrasonic Cleaner", "Drying Oven"]);
        assert!(recs.iter().all(|r| r.category == Category::Equipment));
    }
}
