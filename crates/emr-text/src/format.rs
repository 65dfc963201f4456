use emr_model::PrimaryLabel;

use crate::bullets::reformat_bullets;
use crate::ros::format_review_of_systems;

/// Display formatting for one primary section.
///
/// Review of systems uses the sign-pair formatter; every other section is
/// reformatted into bullets.
pub fn format_section(label: PrimaryLabel, body: &str) -> String {
    match label {
        PrimaryLabel::ReviewOfSystems => format_review_of_systems(body),
        _ => reformat_bullets(body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_by_label() {
        assert_eq!(
            format_section(PrimaryLabel::ReviewOfSystems, "Cough: +"),
            "Cough: +"
        );
        assert_eq!(
            format_section(PrimaryLabel::PastHistory, "Hypertension"),
            "- Hypertension."
        );
        assert_eq!(format_section(PrimaryLabel::PhysicalExam, ""), "");
    }
}
