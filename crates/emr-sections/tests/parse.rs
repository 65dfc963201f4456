//! End-to-end parsing of generated notes.

use emr_model::{ExcludedLabel, PrimaryLabel};
use emr_sections::{LabelTable, parse_sections};
use emr_text::{format_section, normalize};
use proptest::prelude::*;

#[test]
fn sample_note_round_trip() {
    let raw = "현병력\nPatient reports cough for 3 days\n과거력\nHypertension\n진단명\nURI";
    let note = parse_sections(raw);

    assert_eq!(
        note.get(PrimaryLabel::PresentIllness),
        "Patient reports cough for 3 days"
    );
    assert_eq!(note.get(PrimaryLabel::PastHistory), "Hypertension");
    for label in [
        PrimaryLabel::ChiefComplaint,
        PrimaryLabel::PersonalSocialHistory,
        PrimaryLabel::ReviewOfSystems,
        PrimaryLabel::PhysicalExam,
    ] {
        assert_eq!(note.get(label), "");
    }
    assert!(note.others().is_empty());

    assert_eq!(
        format_section(
            PrimaryLabel::PresentIllness,
            note.get(PrimaryLabel::PresentIllness)
        ),
        "- Patient reports cough for 3 days."
    );
    assert_eq!(
        format_section(PrimaryLabel::PastHistory, note.get(PrimaryLabel::PastHistory)),
        "- Hypertension."
    );
}

#[test]
fn full_note_serializes_with_english_keys() {
    let raw = "주호소：\n기침\\n현병력 :\n• 3일 전부터 기침\n• 가래 동반\n\
               개인력및사회력\n흡연 (-)\n통문진\n발열: -, 오한: -\n신체검진\n\
               청진상 수포음\n진료계획\n항생제";
    let note = parse_sections(raw);
    insta::assert_json_snapshot!(note, @r#"
    {
      "primary": {
        "chief_complaint": "기침",
        "present_illness": "• 3일 전부터 기침\n• 가래 동반",
        "past_history": "",
        "personal_social_history": "흡연 (-)",
        "review_of_systems": "발열: -, 오한: -",
        "physical_exam": "청진상 수포음"
      },
      "others": []
    }
    "#);
}

#[test]
fn labels_accept_colon_but_not_inline_content() {
    let note = parse_sections("주호소: 두통\n과거력 :\n없음");
    assert_eq!(note.get(PrimaryLabel::PresentIllness), "주호소: 두통");
    assert_eq!(note.get(PrimaryLabel::ChiefComplaint), "");
    assert_eq!(note.get(PrimaryLabel::PastHistory), "없음");
}

#[test]
fn review_of_systems_formats_after_parse() {
    let note = parse_sections("계통문진\n발열: -, 오한: -; 기침: +");
    assert_eq!(
        format_section(
            PrimaryLabel::ReviewOfSystems,
            note.get(PrimaryLabel::ReviewOfSystems)
        ),
        "발열: -\n오한: -\n기침: +"
    );
}

fn any_heading() -> impl Strategy<Value = String> {
    let mut headings: Vec<String> = PrimaryLabel::ALL
        .iter()
        .map(|label| label.as_str().to_string())
        .collect();
    headings.extend(ExcludedLabel::ALL.iter().map(|label| label.as_str().to_string()));
    headings.extend(["통문진".to_string(), "진료계획".to_string()]);
    proptest::sample::select(headings)
}

proptest! {
    #[test]
    fn every_primary_key_is_present(raw in any::<String>()) {
        let note = parse_sections(&raw);
        let labels: Vec<PrimaryLabel> = note.primary().map(|(label, _)| label).collect();
        prop_assert_eq!(labels, PrimaryLabel::ALL.to_vec());
    }

    #[test]
    fn parsing_is_deterministic(raw in any::<String>()) {
        prop_assert_eq!(parse_sections(&raw), parse_sections(&raw));
    }

    #[test]
    fn unlabeled_text_is_present_illness(raw in "[a-z0-9 .,\n]{0,80}") {
        let note = parse_sections(&raw);
        prop_assert_eq!(note.get(PrimaryLabel::PresentIllness), normalize(&raw));
        prop_assert!(note.others().is_empty());
        for label in PrimaryLabel::ALL {
            if label != PrimaryLabel::PresentIllness {
                prop_assert_eq!(note.get(label), "");
            }
        }
    }

    #[test]
    fn excluded_content_never_leaks(
        sections in proptest::collection::vec((any_heading(), "[a-z ]{1,12}"), 1..8)
    ) {
        let mut raw = String::new();
        for (index, (heading, body)) in sections.iter().enumerate() {
            let excluded = ExcludedLabel::ALL
                .iter()
                .any(|label| label.as_str() == heading) || heading == "진료계획";
            let marker = if excluded { format!("SECRET{index}") } else { format!("KEPT{index}") };
            raw.push_str(&format!("{heading}\n{marker} {body}\n"));
        }
        let note = parse_sections(&raw);
        let table = LabelTable::standard();
        prop_assert!(note.others().is_empty());
        for (_, content) in note.primary() {
            prop_assert!(!content.contains("SECRET"));
            for line in content.lines() {
                prop_assert!(table.match_line(line).is_none());
            }
        }
        for (index, _) in sections.iter().enumerate() {
            let kept = format!("KEPT{index}");
            if raw.contains(&kept) {
                prop_assert!(note.primary().any(|(_, content)| content.contains(&kept)));
            }
        }
    }
}
