//! Evaluation session state.
//!
//! Owns the loaded records, the answers captured so far and the navigation
//! index. Callers pass the session explicitly; the parser never sees it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::annotation::Annotation;
use crate::error::{ModelError, Result};
use crate::record::NoteRecord;

/// Completion counts for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
}

impl Progress {
    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.done)
    }

    /// Fraction complete in `0.0..=1.0`; an empty dataset reports 0.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.done as f64 / self.total as f64
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EvaluationSession {
    records: Vec<NoteRecord>,
    answers: BTreeMap<usize, Annotation>,
    current: usize,
}

impl EvaluationSession {
    /// Start a fresh session. Loading a new dataset discards previous answers.
    pub fn new(records: Vec<NoteRecord>) -> Self {
        Self {
            records,
            answers: BTreeMap::new(),
            current: 0,
        }
    }

    pub fn records(&self) -> &[NoteRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_record(&self) -> Option<&NoteRecord> {
        self.records.get(self.current)
    }

    pub fn answer(&self, row: usize) -> Option<&Annotation> {
        self.answers.get(&row)
    }

    pub fn answers(&self) -> &BTreeMap<usize, Annotation> {
        &self.answers
    }

    /// Jump to a row.
    pub fn select(&mut self, row: usize) -> Result<()> {
        self.check_row(row)?;
        self.current = row;
        Ok(())
    }

    /// Move forward one row, stopping at the last.
    pub fn go_next(&mut self) {
        if !self.records.is_empty() {
            self.current = (self.current + 1).min(self.records.len() - 1);
        }
    }

    /// Move back one row, stopping at the first.
    pub fn go_previous(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    /// Store an answer for `row` and mark it saved. With `advance`, the
    /// session moves to the following row (clamped to the last).
    pub fn save(&mut self, row: usize, mut annotation: Annotation, advance: bool) -> Result<()> {
        self.check_row(row)?;
        annotation.validate()?;
        annotation.saved = true;
        self.answers.insert(row, annotation);
        if advance {
            self.current = (row + 1).min(self.records.len() - 1);
        }
        Ok(())
    }

    /// Restore previously captured answers as they were, drafts included.
    ///
    /// Every row and score is checked before anything is stored.
    pub fn restore_answers(&mut self, answers: BTreeMap<usize, Annotation>) -> Result<()> {
        for (row, annotation) in &answers {
            self.check_row(*row)?;
            annotation.validate()?;
        }
        self.answers.extend(answers);
        Ok(())
    }

    pub fn is_saved(&self, row: usize) -> bool {
        self.answers.get(&row).is_some_and(|answer| answer.saved)
    }

    pub fn progress(&self) -> Progress {
        let done = self.answers.values().filter(|answer| answer.saved).count();
        Progress {
            done,
            total: self.records.len(),
        }
    }

    /// True once every row has a saved answer (and there is at least one row).
    pub fn is_complete(&self) -> bool {
        let progress = self.progress();
        progress.total > 0 && progress.done == progress.total
    }

    /// Navigation label: a check mark for saved rows, an empty box otherwise.
    pub fn status_label(&self, row: usize) -> Option<String> {
        let record = self.records.get(row)?;
        let mark = if self.is_saved(row) { "✅" } else { "⬜" };
        Some(format!("{mark} {}", record.record_id))
    }

    fn check_row(&self, row: usize) -> Result<()> {
        if row >= self.records.len() {
            return Err(ModelError::RowOutOfRange {
                row,
                len: self.records.len(),
            });
        }
        Ok(())
    }
}
