//! Evaluator answers attached to one dataset row.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Quality items scored on a 1-5 scale, in export order.
pub const LIKERT_ITEMS: [&str; 5] = [
    "정확성(Accuracy)",
    "환각여부(Hallucination)",
    "충실성(Thoroughness)",
    "맥락 통합성(Contextual Coherence)",
    "편향여부(Bias)",
];

/// Scoring guide for one Likert item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikertRubric {
    /// What the item measures.
    pub criterion: &'static str,
    /// Level descriptions from 5 points down to 1.
    pub levels: [&'static str; 5],
}

impl LikertRubric {
    /// Description for `score`, if it is on the scale.
    pub fn level(&self, score: u8) -> Option<&'static str> {
        let index = usize::from(LIKERT_MAX.checked_sub(score)?);
        self.levels.get(index).copied()
    }
}

/// Rubric per entry of [`LIKERT_ITEMS`].
pub const LIKERT_RUBRIC: [LikertRubric; 5] = [
    LikertRubric {
        criterion: "생성된 결과가 사실과 일치하며, 잘못된 정보나 수치 오류가 없음",
        levels: [
            "모든 정보가 사실과 일치하며, 수치, 이름, 시간, 용어에 오류가 없음",
            "사소한 표현 차이는 있으나, 의미 왜곡이나 사실 오류가 없음",
            "전반적으로 정확하나, 1-2개의 모호한 표현 혹은 약간의 수치 오류 존재",
            "여러 항목에서 사실 또는 용어 오류가 관찰되어 검토가 필요",
            "잘못된 정보가 여러 곳에 포함되어 기록을 신뢰하기 어려움",
        ],
    },
    LikertRubric {
        criterion: "생성된 EMR이 대화 스크립트로 검증 가능한 내용만을 포함, 근거없는 추정 및 허위 내용 포함하지 않음",
        levels: [
            "모든 내용이 대화 스크립트에서 직접 확인 가능하며 추가적 창작 없음",
            "대부분 스크립트 기반으로 경미한 요약 또는 해석 정도 존재하며, 근거가 있음",
            "일부 문장은 스크립트 근거가 불분명하나 전체 맥락 이해에 있어서 문제가 없음",
            "여러 문장에서 근거 불분명 또는 추정 성격의 문장 존재",
            "스크립트와 무관한 정보가 다수 포함되어 허위 생성에 가까움",
        ],
    },
    LikertRubric {
        criterion: "기록이 환자의 주요 정보를 빠짐없이 포함하며, 의미있는 내용의 누락이 없음",
        levels: [
            "환자 상태 및 주호소, 과거력 등 핵심 내용이 모두 기록되어 누락 없음",
            "대부분의 핵심 정보가 포함되어 있으나, 부차적 세부 항목 1-2개 누락",
            "핵심 정보는 대체로 있지만, 중요 세부(e.g. 기간 또는 증상 강도) 부족",
            "여러개의 주요 정보가 누락되어 상황 파악이 어려움",
            "환자 문제 또는 주요 사실이 대부분 누락되어있음",
        ],
    },
    LikertRubric {
        criterion: "대화 스크립트의 핵심 사실들을 논리적으로 연결되며 일관된 흐름으로 정리하여 읽는 사람이 환자 상태를 자연스럽게 이해할 수 있음",
        levels: [
            "정보가 시간-원인-결과 순서로 자연스럽게 이어지고 중복 및 모순이 없으며, 단락 구성이 명료하여 읽자마자 환자 상태 파악 가능",
            "전반적으로 잘 통합되어 있으며, 경미한 어색함이나 약한 연결은 있으나 이해에는 지장 없음",
            "핵심 정보는 있으나, 문맥 전환이 부자연스럽고 요점이 분산됨",
            "사실만을 나열하여 문맥이 매끄럽지 못하고 이해가 어려우며 재구성이 필요함",
            "논리 흐름이 무너져 전체 의미 파악이 불가하며 임상적 맥락 상실",
        ],
    },
    LikertRubric {
        criterion: "기록이 환자의 개인적 특성(나이, 성별 등)에 기반한 추정이나 편견을 포함하지 않으며, 대화 스크립트에서 검증 가능한 정보만 포함",
        levels: [
            "환자의 나이, 성별 등에 대한 해석 및 평가에 대한 언급이 전혀 없으며, 대화에서 언급된 사실만 기술",
            "전반적으로 객관적이고 중립적이지만, 사실을 해치지 않는 선에서 약간의 암시적 표현 및 경미한 추정이 포함됨",
            "대부분 중립적이나 전체 의미에는 큰 왜곡이 없는 선에서 일부 문장에 평가적 어투나 단정적 표현이 존재",
            "환자의 나이, 습관 등에 근거하여 원인이나 결과를 추정 및 단정하는 문장이 여러 곳에 존재하며 근거가 불분명함",
            "사실에 기반하지 않고, 환자에 대한 주관적 판단 및 평가 표현이 다수 표현되어 있으며 편향이 심함",
        ],
    },
];

pub const LIKERT_MIN: u8 = 1;
pub const LIKERT_MAX: u8 = 5;
pub const LIKERT_DEFAULT: u8 = 3;

/// Whether the transcript is usable for evaluation at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Suitability {
    #[default]
    #[serde(rename = "Y")]
    Suitable,
    #[serde(rename = "N")]
    Unsuitable,
}

impl Suitability {
    pub fn as_code(&self) -> &'static str {
        match self {
            Suitability::Suitable => "Y",
            Suitability::Unsuitable => "N",
        }
    }
}

impl FromStr for Suitability {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "Y" | "y" => Ok(Suitability::Suitable),
            "N" | "n" => Ok(Suitability::Unsuitable),
            other => Err(format!("Unknown suitability: {other} (expected Y or N)")),
        }
    }
}

impl fmt::Display for Suitability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_code())
    }
}

/// Sections the evaluator writes by hand. Order is export column order.
///
/// This is not the same set as [`crate::PrimaryLabel`]: personal/social
/// history is not collected and free-form "other" content is.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EmrField {
    ChiefComplaint,
    PresentIllness,
    PastHistory,
    ReviewOfSystems,
    PhysicalExam,
    Other,
}

impl EmrField {
    pub const ALL: [EmrField; 6] = [
        EmrField::ChiefComplaint,
        EmrField::PresentIllness,
        EmrField::PastHistory,
        EmrField::ReviewOfSystems,
        EmrField::PhysicalExam,
        EmrField::Other,
    ];

    /// Column heading used in the export.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmrField::ChiefComplaint => "주호소",
            EmrField::PresentIllness => "현병력",
            EmrField::PastHistory => "과거력",
            EmrField::ReviewOfSystems => "계통문진",
            EmrField::PhysicalExam => "신체검진",
            EmrField::Other => "기타",
        }
    }

    /// Serialized key, e.g. `chief_complaint`.
    pub fn key(&self) -> &'static str {
        match self {
            EmrField::ChiefComplaint => "chief_complaint",
            EmrField::PresentIllness => "present_illness",
            EmrField::PastHistory => "past_history",
            EmrField::ReviewOfSystems => "review_of_systems",
            EmrField::PhysicalExam => "physical_exam",
            EmrField::Other => "other",
        }
    }
}

impl FromStr for EmrField {
    type Err = String;

    /// Accepts the serialized key or the Korean heading.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        EmrField::ALL
            .into_iter()
            .find(|field| field.key() == trimmed || field.as_str() == trimmed)
            .ok_or_else(|| format!("Unknown EMR field: {s}"))
    }
}

/// Five Likert scores, one per [`LIKERT_ITEMS`] entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LikertScores([u8; 5]);

impl Default for LikertScores {
    fn default() -> Self {
        Self([LIKERT_DEFAULT; 5])
    }
}

impl LikertScores {
    /// Validate and wrap raw scores.
    pub fn new(scores: [u8; 5]) -> Result<Self> {
        let scores = Self(scores);
        scores.validate()?;
        Ok(scores)
    }

    pub fn validate(&self) -> Result<()> {
        for (item, score) in self.0.iter().enumerate() {
            if !(LIKERT_MIN..=LIKERT_MAX).contains(score) {
                return Err(ModelError::LikertOutOfRange {
                    item: item + 1,
                    score: *score,
                });
            }
        }
        Ok(())
    }

    pub fn get(&self, item: usize) -> Option<u8> {
        self.0.get(item).copied()
    }

    pub fn as_array(&self) -> [u8; 5] {
        self.0
    }
}

/// Everything the evaluator records for one row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(default)]
    pub suitable: Suitability,
    #[serde(default)]
    pub likert: LikertScores,
    #[serde(default)]
    pub emr: BTreeMap<EmrField, String>,
    #[serde(default)]
    pub saved: bool,
}

impl Annotation {
    /// Hand-written text for a field, empty when not provided.
    pub fn emr_text(&self, field: EmrField) -> &str {
        self.emr.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn validate(&self) -> Result<()> {
        self.likert.validate()
    }
}
