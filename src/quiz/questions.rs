use std::collections::HashMap;

use serde::Serialize;

use super::Personality;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringCategory {
    Energy,
    Motivation,
    Structure,
    Resilience,
}

#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub question_number: u32,
    pub question_text: &'static str,
    pub option_a: &'static str,
    pub option_b: &'static str,
    pub option_c: &'static str,
    pub option_d: &'static str,
    pub scoring_category: ScoringCategory,
}

pub static QUESTIONS: [Question; 5] = [
    Question {
        question_number: 1,
        question_text: "What's your current energy level in the morning?",
        option_a: "Zombie mode (need 3 alarms)",
        option_b: "Groggy but manageable",
        option_c: "Awake and ready",
        option_d: "Energized and excited",
        scoring_category: ScoringCategory::Energy,
    },
    Question {
        question_number: 2,
        question_text: "How do you prefer to track your progress?",
        option_a: "Visual charts and graphs",
        option_b: "Written journal entries",
        option_c: "Simple checkboxes",
        option_d: "I don't track, I just do",
        scoring_category: ScoringCategory::Motivation,
    },
    Question {
        question_number: 3,
        question_text: "What motivates you most?",
        option_a: "Competing with others",
        option_b: "Personal growth",
        option_c: "Rewards and achievements",
        option_d: "Fear of consequences",
        scoring_category: ScoringCategory::Motivation,
    },
    Question {
        question_number: 4,
        question_text: "How much structure do you need in your daily routine?",
        option_a: "Very rigid schedule",
        option_b: "Moderate structure",
        option_c: "Loose routine with flexibility",
        option_d: "No schedule, spontaneous",
        scoring_category: ScoringCategory::Structure,
    },
    Question {
        question_number: 5,
        question_text: "How do you handle setbacks or missed habits?",
        option_a: "Analyze what went wrong",
        option_b: "Double down with determination",
        option_c: "Move on quickly without dwelling",
        option_d: "Feel discouraged for a while",
        scoring_category: ScoringCategory::Resilience,
    },
];

/// Energy average used when no energy question was answered.
const NEUTRAL_ENERGY: f64 = 2.5;

fn question(number: &str) -> Option<&'static Question> {
    let number: u32 = number.trim().parse().ok()?;
    QUESTIONS.iter().find(|q| q.question_number == number)
}

/// `A` to `D` score 1 to 4, case-insensitively.
fn answer_score(letter: &str) -> Option<u32> {
    match letter.trim().to_ascii_uppercase().as_str() {
        "A" => Some(1),
        "B" => Some(2),
        "C" => Some(3),
        "D" => Some(4),
        _ => None,
    }
}

/// Scores quiz answers keyed by question number.
///
/// Answers to unknown questions or with an unknown letter are ignored.
pub fn score_answers(answers: &HashMap<String, String>) -> Result<Personality> {
    if answers.is_empty() {
        return Err(Error::BadRequest("Please complete the quiz first".to_string()));
    }

    let mut totals: HashMap<ScoringCategory, (u32, u32)> = HashMap::new();
    for (number, letter) in answers {
        let (Some(question), Some(score)) = (question(number), answer_score(letter)) else {
            continue;
        };
        let entry = totals.entry(question.scoring_category).or_default();
        entry.0 += score;
        entry.1 += 1;
    }

    let energy = match totals.get(&ScoringCategory::Energy) {
        Some(&(sum, count)) if count > 0 => f64::from(sum) / f64::from(count),
        _ => NEUTRAL_ENERGY,
    };

    Ok(Personality::from_energy(energy))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_energy_answer_decides_personality() {
        assert_eq!(
            score_answers(&answers(&[("1", "D"), ("2", "A")])).unwrap(),
            Personality::MorningWarrior
        );
        assert_eq!(
            score_answers(&answers(&[("1", "c")])).unwrap(),
            Personality::MorningWarrior
        );
        assert_eq!(
            score_answers(&answers(&[("1", "A"), ("3", "D")])).unwrap(),
            Personality::NightOwl
        );
        assert_eq!(
            score_answers(&answers(&[("1", "B")])).unwrap(),
            Personality::NightOwl
        );
    }

    #[test]
    fn test_no_energy_answer_is_steady_achiever() {
        let result = score_answers(&answers(&[("2", "A"), ("4", "D"), ("5", "B")])).unwrap();
        assert_eq!(result, Personality::SteadyAchiever);
    }

    #[test]
    fn test_unknown_questions_and_letters_ignored() {
        let result = score_answers(&answers(&[("1", "Z"), ("99", "D"), ("x", "A")])).unwrap();
        assert_eq!(result, Personality::SteadyAchiever);
    }

    #[test]
    fn test_empty_answers_rejected() {
        assert!(matches!(
            score_answers(&HashMap::new()),
            Err(Error::BadRequest(_))
        ));
    }

    #[test]
    fn test_questions_are_numbered_in_order() {
        for (i, q) in QUESTIONS.iter().enumerate() {
            assert_eq!(q.question_number as usize, i + 1);
        }
    }
}
