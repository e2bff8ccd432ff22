//! Cone test domain models.

use crate::color::Color;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Photoreceptor class a question probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConeChannel {
    /// Long wavelength (red)
    L,
    /// Medium wavelength (green)
    M,
    /// Short wavelength (blue)
    S,
}

impl ConeChannel {
    pub const ALL: [ConeChannel; 3] = [ConeChannel::L, ConeChannel::M, ConeChannel::S];

    /// Human-readable name used in result screens.
    pub fn label(&self) -> &'static str {
        match self {
            ConeChannel::L => "L-Cone (Red)",
            ConeChannel::M => "M-Cone (Green)",
            ConeChannel::S => "S-Cone (Blue)",
        }
    }
}

impl fmt::Display for ConeChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConeChannel::L => write!(f, "L"),
            ConeChannel::M => write!(f, "M"),
            ConeChannel::S => write!(f, "S"),
        }
    }
}

/// One of the two stimuli shown for a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StimulusOption {
    pub color: Color,
    pub label: String,
}

impl StimulusOption {
    pub fn new(color: Color, label: impl Into<String>) -> Self {
        Self {
            color,
            label: label.into(),
        }
    }
}

/// A single, immutable test question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestQuestion {
    /// Stable identifier, e.g. `"l1"`
    pub id: String,
    pub channel: ConeChannel,
    pub prompt: String,
    pub options: [StimulusOption; 2],
    /// Index into `options` of the canonically correct stimulus
    pub correct_answer: usize,
}

/// Answers given so far, keyed by question id.
///
/// Answering a question again replaces the earlier answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet {
    answers: HashMap<String, usize>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, question_id: impl Into<String>, option_index: usize) {
        self.answers.insert(question_id.into(), option_index);
    }

    pub fn get(&self, question_id: &str) -> Option<usize> {
        self.answers.get(question_id).copied()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// True when every question in `questions` has an answer.
    pub fn covers(&self, questions: &[TestQuestion]) -> bool {
        questions.iter().all(|q| self.answers.contains_key(&q.id))
    }
}

impl<K: Into<String>> FromIterator<(K, usize)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (K, usize)>>(iter: I) -> Self {
        let mut set = AnswerSet::new();
        for (id, index) in iter {
            set.record(id, index);
        }
        set
    }
}

/// Per-channel percentage of correctly answered questions.
///
/// Values are whole percentages in `[0, 100]`. A retake produces a new
/// profile instead of mutating an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensitivityProfile {
    pub l_cone: u8,
    pub m_cone: u8,
    pub s_cone: u8,
}

impl SensitivityProfile {
    pub const fn new(l_cone: u8, m_cone: u8, s_cone: u8) -> Self {
        Self {
            l_cone,
            m_cone,
            s_cone,
        }
    }

    pub fn channel(&self, channel: ConeChannel) -> u8 {
        match channel {
            ConeChannel::L => self.l_cone,
            ConeChannel::M => self.m_cone,
            ConeChannel::S => self.s_cone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_set_replaces_previous_answer() {
        let mut answers = AnswerSet::new();
        answers.record("l1", 1);
        answers.record("l1", 0);
        assert_eq!(answers.get("l1"), Some(0));
        assert_eq!(answers.len(), 1);
    }

    #[test]
    fn test_profile_serializes_camel_case() {
        let json = serde_json::to_value(SensitivityProfile::new(100, 67, 33)).unwrap();
        assert_eq!(json["lCone"], 100);
        assert_eq!(json["mCone"], 67);
        assert_eq!(json["sCone"], 33);
    }
}
