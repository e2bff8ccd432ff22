//! Converts test answers into a [`SensitivityProfile`].

use super::model::{AnswerSet, ConeChannel, SensitivityProfile, TestQuestion};

/// Scores `answers` against `questions`.
///
/// Each channel's value is the share of its questions answered with the
/// correct option, as a percentage rounded half away from zero. A question
/// with no recorded answer counts as incorrect; completeness is the caller's
/// concern (see [`super::ConeTest::finish`]). A channel without questions
/// scores 0.
pub fn score(questions: &[TestQuestion], answers: &AnswerSet) -> SensitivityProfile {
    SensitivityProfile {
        l_cone: channel_percentage(questions, answers, ConeChannel::L),
        m_cone: channel_percentage(questions, answers, ConeChannel::M),
        s_cone: channel_percentage(questions, answers, ConeChannel::S),
    }
}

fn channel_percentage(questions: &[TestQuestion], answers: &AnswerSet, channel: ConeChannel) -> u8 {
    let (total, correct) = questions
        .iter()
        .filter(|q| q.channel == channel)
        .fold((0usize, 0usize), |(total, correct), q| {
            let hit = answers.get(&q.id) == Some(q.correct_answer);
            (total + 1, correct + usize::from(hit))
        });

    if total == 0 {
        return 0;
    }

    // correct <= total, so the result stays within 0..=100
    (correct as f64 / total as f64 * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cone::standard_questions;

    fn all_correct(questions: &[TestQuestion]) -> AnswerSet {
        questions
            .iter()
            .map(|q| (q.id.clone(), q.correct_answer))
            .collect()
    }

    /// Answers the first `n` questions of `channel` correctly and the rest wrongly.
    fn with_correct_count(questions: &[TestQuestion], channel: ConeChannel, n: usize) -> AnswerSet {
        let mut answers = all_correct(questions);
        for q in questions.iter().filter(|q| q.channel == channel).skip(n) {
            answers.record(q.id.clone(), 1 - q.correct_answer);
        }
        answers
    }

    #[test]
    fn test_all_correct_is_full_marks() {
        let questions = standard_questions();
        let profile = score(&questions, &all_correct(&questions));
        assert_eq!(profile, SensitivityProfile::new(100, 100, 100));
    }

    #[test]
    fn test_partial_counts_map_to_rounded_percentages() {
        let questions = standard_questions();
        for (n, expected) in [(0, 0), (1, 33), (2, 67), (3, 100)] {
            for channel in ConeChannel::ALL {
                let profile = score(&questions, &with_correct_count(&questions, channel, n));
                assert_eq!(profile.channel(channel), expected, "{channel} with {n} correct");
                for other in ConeChannel::ALL.into_iter().filter(|c| *c != channel) {
                    assert_eq!(profile.channel(other), 100);
                }
            }
        }
    }

    #[test]
    fn test_missing_answers_count_as_incorrect() {
        let questions = standard_questions();
        let profile = score(&questions, &AnswerSet::new());
        assert_eq!(profile, SensitivityProfile::new(0, 0, 0));

        let mut answers = AnswerSet::new();
        answers.record("m1", 0);
        assert_eq!(score(&questions, &answers), SensitivityProfile::new(0, 33, 0));
    }

    #[test]
    fn test_purple_question_rewards_second_option() {
        let questions = standard_questions();
        let mut answers = all_correct(&questions);
        answers.record("s3", 0);
        assert_eq!(score(&questions, &answers).s_cone, 67);
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let questions = standard_questions();
        let answers = with_correct_count(&questions, ConeChannel::M, 2);
        assert_eq!(score(&questions, &answers), score(&questions, &answers));
    }

    #[test]
    fn test_empty_channel_scores_zero() {
        let questions: Vec<_> = standard_questions()
            .into_iter()
            .filter(|q| q.channel != ConeChannel::S)
            .collect();
        let profile = score(&questions, &all_correct(&questions));
        assert_eq!(profile, SensitivityProfile::new(100, 100, 0));
    }
}
