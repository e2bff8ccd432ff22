//! The standard cone contrast battery.

use super::model::{ConeChannel, StimulusOption, TestQuestion};
use crate::color::Color;

struct Entry {
    id: &'static str,
    channel: ConeChannel,
    prompt: &'static str,
    options: [(Color, &'static str); 2],
    correct_answer: usize,
}

const BATTERY: [Entry; 9] = [
    Entry {
        id: "l1",
        channel: ConeChannel::L,
        prompt: "Which square appears more vibrant?",
        options: [(Color::new(0xFF, 0x00, 0x00), "A"), (Color::new(0xCC, 0x00, 0x00), "B")],
        correct_answer: 0,
    },
    Entry {
        id: "l2",
        channel: ConeChannel::L,
        prompt: "Can you see the number in this pattern?",
        options: [(Color::new(0xFF, 0x6B, 0x6B), "Yes"), (Color::new(0xCC, 0xCC, 0xCC), "No")],
        correct_answer: 0,
    },
    Entry {
        id: "l3",
        channel: ConeChannel::L,
        prompt: "Which red shade is darker?",
        options: [(Color::new(0x8B, 0x00, 0x00), "A"), (Color::new(0xDC, 0x14, 0x3C), "B")],
        correct_answer: 0,
    },
    Entry {
        id: "m1",
        channel: ConeChannel::M,
        prompt: "Which green appears brighter?",
        options: [(Color::new(0x00, 0xFF, 0x00), "A"), (Color::new(0x00, 0xCC, 0x00), "B")],
        correct_answer: 0,
    },
    Entry {
        id: "m2",
        channel: ConeChannel::M,
        prompt: "Can you distinguish these two greens?",
        options: [(Color::new(0x22, 0x8B, 0x22), "A"), (Color::new(0x2E, 0x8B, 0x57), "B")],
        correct_answer: 0,
    },
    Entry {
        id: "m3",
        channel: ConeChannel::M,
        prompt: "Which shade is more olive-like?",
        options: [(Color::new(0x55, 0x6B, 0x2F), "A"), (Color::new(0x6B, 0x8E, 0x23), "B")],
        correct_answer: 0,
    },
    Entry {
        id: "s1",
        channel: ConeChannel::S,
        prompt: "Which blue is more intense?",
        options: [(Color::new(0x00, 0x00, 0xFF), "A"), (Color::new(0x00, 0x00, 0xCC), "B")],
        correct_answer: 0,
    },
    Entry {
        id: "s2",
        channel: ConeChannel::S,
        prompt: "Can you see the difference in these blues?",
        options: [(Color::new(0x41, 0x69, 0xE1), "A"), (Color::new(0x1E, 0x90, 0xFF), "B")],
        correct_answer: 0,
    },
    Entry {
        id: "s3",
        channel: ConeChannel::S,
        prompt: "Which appears more purple?",
        options: [(Color::new(0x6A, 0x5A, 0xCD), "A"), (Color::new(0x46, 0x82, 0xB4), "B")],
        correct_answer: 1,
    },
];

/// Returns the nine fixed questions, three per cone channel, in presentation order.
pub fn standard_questions() -> Vec<TestQuestion> {
    BATTERY
        .iter()
        .map(|entry| TestQuestion {
            id: entry.id.to_string(),
            channel: entry.channel,
            prompt: entry.prompt.to_string(),
            options: entry
                .options
                .map(|(color, label)| StimulusOption::new(color, label)),
            correct_answer: entry.correct_answer,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_three_questions_per_channel() {
        let questions = standard_questions();
        assert_eq!(questions.len(), 9);
        for channel in ConeChannel::ALL {
            assert_eq!(questions.iter().filter(|q| q.channel == channel).count(), 3);
        }
    }

    #[test]
    fn test_ids_are_unique_and_answers_in_range() {
        let questions = standard_questions();
        let ids: HashSet<_> = questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids.len(), questions.len());
        assert!(questions.iter().all(|q| q.correct_answer < q.options.len()));
    }

    #[test]
    fn test_purple_question_expects_second_option() {
        let questions = standard_questions();
        let s3 = questions.iter().find(|q| q.id == "s3").unwrap();
        assert_eq!(s3.correct_answer, 1);
        assert_eq!(s3.options[1].color.to_hex(), "#4682B4");
    }
}
