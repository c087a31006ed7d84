//! Habit personality quiz and the habit templates it recommends.

pub mod catalogue;
mod personality;
mod questions;

pub use catalogue::{GENERAL_TEMPLATES, PERSONALITY_TEMPLATES, TemplateSeed};
pub use personality::{Personality, Profile};
pub use questions::{QUESTIONS, Question, ScoringCategory, score_answers};
