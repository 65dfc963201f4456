//! Tests for emr-model types.

use std::collections::BTreeMap;

use emr_model::{
    Annotation, EmrField, EvaluationSession, LikertScores, ModelError, NoteRecord, OtherSection,
    ParsedNote, PrimaryLabel, Suitability,
};

fn record(row: usize, id: &str) -> NoteRecord {
    NoteRecord {
        row,
        record_id: id.to_string(),
        dialogue: String::new(),
        generated: String::new(),
        visit_time: None,
    }
}

fn session(ids: &[&str]) -> EvaluationSession {
    let records = ids
        .iter()
        .enumerate()
        .map(|(row, id)| record(row, id))
        .collect();
    EvaluationSession::new(records)
}

#[test]
fn parsed_note_serializes_with_snake_case_keys() {
    let mut primary = BTreeMap::new();
    primary.insert(PrimaryLabel::PresentIllness, "Cough".to_string());
    let note = ParsedNote::from_parts(
        primary,
        vec![OtherSection {
            label: "가족력".to_string(),
            content: "None".to_string(),
        }],
    );
    let json = serde_json::to_value(&note).expect("serialize note");
    assert_eq!(json["primary"]["present_illness"], "Cough");
    assert_eq!(json["primary"]["chief_complaint"], "");
    assert_eq!(json["primary"].as_object().map(|map| map.len()), Some(6));
    assert_eq!(json["others"][0]["label"], "가족력");

    let round: ParsedNote = serde_json::from_value(json).expect("deserialize note");
    assert_eq!(round, note);
}

#[test]
fn annotation_deserializes_from_answer_file_shape() {
    let json = r#"{
        "suitable": "N",
        "likert": [5, 4, 3, 2, 1],
        "emr": {"chief_complaint": "Cough", "other": "Follow up"},
        "saved": true
    }"#;
    let annotation: Annotation = serde_json::from_str(json).expect("parse annotation");
    assert_eq!(annotation.suitable, Suitability::Unsuitable);
    assert_eq!(annotation.likert.as_array(), [5, 4, 3, 2, 1]);
    assert_eq!(annotation.emr_text(EmrField::ChiefComplaint), "Cough");
    assert_eq!(annotation.emr_text(EmrField::PastHistory), "");
    assert!(annotation.saved);
}

#[test]
fn annotation_fields_default_when_missing() {
    let annotation: Annotation = serde_json::from_str("{}").expect("parse empty annotation");
    assert_eq!(annotation, Annotation::default());
}

#[test]
fn session_navigation_is_clamped() {
    let mut session = session(&["A-1", "A-2", "A-3"]);
    session.go_previous();
    assert_eq!(session.current_index(), 0);
    session.go_next();
    session.go_next();
    session.go_next();
    assert_eq!(session.current_index(), 2);
    session.select(1).expect("select row");
    assert_eq!(session.current_record().map(|r| r.record_id.as_str()), Some("A-2"));
    assert_eq!(
        session.select(3),
        Err(ModelError::RowOutOfRange { row: 3, len: 3 })
    );
}

#[test]
fn session_save_tracks_progress() {
    let mut session = session(&["A-1", "A-2"]);
    assert_eq!(session.progress().done, 0);
    assert!(!session.is_complete());

    session
        .save(0, Annotation::default(), true)
        .expect("save first row");
    assert_eq!(session.current_index(), 1);
    assert!(session.is_saved(0));
    assert_eq!(session.status_label(0).as_deref(), Some("✅ A-1"));
    assert_eq!(session.status_label(1).as_deref(), Some("⬜ A-2"));

    session
        .save(1, Annotation::default(), true)
        .expect("save last row");
    assert_eq!(session.current_index(), 1);
    let progress = session.progress();
    assert_eq!((progress.done, progress.total, progress.remaining()), (2, 2, 0));
    assert!((progress.fraction() - 1.0).abs() < f64::EPSILON);
    assert!(session.is_complete());
}

#[test]
fn session_rejects_invalid_scores() {
    let mut session = session(&["A-1"]);
    let json = r#"{"likert": [1, 2, 3, 4, 9]}"#;
    let annotation: Annotation = serde_json::from_str(json).expect("parse annotation");
    assert_eq!(
        session.save(0, annotation, false),
        Err(ModelError::LikertOutOfRange { item: 5, score: 9 })
    );
    assert!(!session.is_saved(0));
    assert!(LikertScores::new([3; 5]).is_ok());
}

#[test]
fn empty_session_is_never_complete() {
    let mut session = EvaluationSession::new(Vec::new());
    session.go_next();
    assert_eq!(session.current_index(), 0);
    assert!(!session.is_complete());
    assert_eq!(session.progress().fraction(), 0.0);
}

#[test]
fn restored_answers_keep_draft_state() {
    let mut session = session(&["A-1", "A-2"]);
    let json = r#"{"0": {"saved": true}, "1": {"suitable": "N"}}"#;
    let answers: BTreeMap<usize, Annotation> = serde_json::from_str(json).expect("parse answers");
    session.restore_answers(answers).expect("restore");
    assert!(session.is_saved(0));
    assert!(!session.is_saved(1));
    assert_eq!(session.answer(1).map(|a| a.suitable), Some(Suitability::Unsuitable));
    assert_eq!(session.progress().done, 1);

    let out_of_range: BTreeMap<usize, Annotation> = BTreeMap::from([(7, Annotation::default())]);
    assert_eq!(
        session.restore_answers(out_of_range),
        Err(ModelError::RowOutOfRange { row: 7, len: 2 })
    );
}
