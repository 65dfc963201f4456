use std::collections::BTreeMap;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{debug, info, info_span, trace};

use emr_cli::logging::redact_value;
use emr_cli::summary::{
    dataset_table, labels_table, progress_line, render_note_text, render_record_detail,
};
use emr_ingest::{decode_bytes, read_dataset};
use emr_model::{Annotation, EvaluationSession, LIKERT_ITEMS, LikertScores};
use emr_output::{build_export_rows, ensure_complete, render_note_html, write_export_file};
use emr_sections::LabelTable;

use crate::cli::{AnnotateArgs, ExportArgs, InspectArgs, LabelArgs, OutputFormatArg, ParseArgs};

fn label_table(args: &LabelArgs) -> Result<LabelTable> {
    let mut table = LabelTable::default();
    for token in &args.extra_labels {
        table = table
            .with_other_label(token)
            .with_context(|| format!("invalid extra label: {token}"))?;
    }
    Ok(table)
}

fn read_note(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => {
            let bytes =
                std::fs::read(path).with_context(|| format!("read note: {}", path.display()))?;
            let (text, encoding) = decode_bytes(&bytes);
            debug!(path = %path.display(), %encoding, "read note");
            Ok(text)
        }
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("read note from stdin")?;
            Ok(text)
        }
    }
}

fn load_session(dataset: &Path, annotations: Option<&Path>) -> Result<EvaluationSession> {
    let dataset = read_dataset(dataset)?;
    let mut session = EvaluationSession::new(dataset.into_records());
    if let Some(path) = annotations {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read annotations: {}", path.display()))?;
        let answers: BTreeMap<usize, Annotation> = serde_json::from_str(&text)
            .with_context(|| format!("parse annotations: {}", path.display()))?;
        let count = answers.len();
        session
            .restore_answers(answers)
            .with_context(|| format!("apply annotations: {}", path.display()))?;
        info!(answers = count, "restored annotations");
    }
    Ok(session)
}

fn write_answers(path: &Path, answers: &BTreeMap<usize, Annotation>) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create directory: {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(answers).context("encode annotations")?;
    std::fs::write(path, json).with_context(|| format!("write annotations: {}", path.display()))?;
    info!(path = %path.display(), answers = answers.len(), "wrote annotations");
    Ok(())
}

pub fn run_parse(args: &ParseArgs) -> Result<()> {
    let table = label_table(&args.labels)?;
    let raw = read_note(args.input.as_deref())?;
    trace!(note = redact_value(&raw), "parsing note");
    let note = table.parse(&raw);
    let output = match args.format {
        OutputFormatArg::Text => render_note_text(&note),
        OutputFormatArg::Json => serde_json::to_string_pretty(&note).context("encode note")?,
        OutputFormatArg::Html => render_note_html(&note),
    };
    println!("{output}");
    Ok(())
}

pub fn run_inspect(args: &InspectArgs) -> Result<()> {
    let span = info_span!("inspect", dataset = %args.dataset.display());
    let _guard = span.enter();
    let table = label_table(&args.labels)?;
    let mut session = load_session(&args.dataset, args.annotations.as_deref())?;
    match args.row {
        Some(row) => {
            session.select(row)?;
            if args.next {
                session.go_next();
            } else if args.previous {
                session.go_previous();
            }
            let record = session
                .current_record()
                .context("selected record is missing")?;
            println!("{}", render_record_detail(record, &session, &table));
        }
        None => {
            println!("Dataset: {}", args.dataset.display());
            println!("{}", dataset_table(&session, &table));
            println!("{}", progress_line(session.progress()));
        }
    }
    Ok(())
}

pub fn run_annotate(args: &AnnotateArgs) -> Result<()> {
    let span = info_span!("annotate", dataset = %args.dataset.display(), row = args.row);
    let _guard = span.enter();
    let existing = args.annotations.exists().then_some(args.annotations.as_path());
    let mut session = load_session(&args.dataset, existing)?;

    // Start from the row's previous answer so unspecified values are kept.
    let mut annotation = session.answer(args.row).cloned().unwrap_or_default();
    if let Some(scores) = &args.likert {
        let Ok(scores) = <[u8; 5]>::try_from(scores.as_slice()) else {
            bail!(
                "expected {} Likert scores, got {}",
                LIKERT_ITEMS.len(),
                scores.len()
            );
        };
        annotation.likert = LikertScores::new(scores)?;
    }
    if let Some(suitable) = args.suitable {
        annotation.suitable = suitable;
    }
    for (field, text) in &args.fields {
        if text.trim().is_empty() {
            annotation.emr.remove(field);
        } else {
            annotation.emr.insert(*field, text.clone());
        }
    }
    session.save(args.row, annotation, args.next)?;
    write_answers(&args.annotations, session.answers())?;

    if let Some(status) = session.status_label(args.row) {
        println!("Saved row {}: {status}", args.row);
    }
    if args.next
        && let Some(status) = session.status_label(session.current_index())
    {
        println!("Next row {}: {status}", session.current_index());
    }
    println!("{}", progress_line(session.progress()));
    Ok(())
}

pub fn run_export(args: &ExportArgs) -> Result<()> {
    let span = info_span!("export", dataset = %args.dataset.display());
    let _guard = span.enter();
    let session = load_session(&args.dataset, Some(&args.annotations))?;
    if !args.allow_partial {
        ensure_complete(&session)?;
    }
    let rows = build_export_rows(&session);
    write_export_file(&args.output, &rows)?;
    println!(
        "Exported {} records to {}",
        rows.len(),
        args.output.display()
    );
    println!("{}", progress_line(session.progress()));
    Ok(())
}

pub fn run_labels(args: &LabelArgs) -> Result<()> {
    let table = label_table(args)?;
    println!("{}", labels_table(&table));
    Ok(())
}
