use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Outcome of the habit personality quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Personality {
    #[serde(rename = "Morning Warrior")]
    MorningWarrior,
    #[serde(rename = "Night Owl")]
    NightOwl,
    #[serde(rename = "Steady Achiever")]
    SteadyAchiever,
}

/// Descriptive material shown with a quiz result.
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub name: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
    pub peak_time: &'static str,
    pub energy_level: &'static str,
    pub motivation_style: &'static str,
    pub commitment_level: &'static str,
    pub insights: &'static [&'static str],
    pub avoid_habits: &'static [&'static str],
}

const MORNING_WARRIOR: Profile = Profile {
    name: "Morning Warrior",
    emoji: "🌅",
    description: "You thrive in the early hours with high energy and focus. Your peak productivity happens before most people wake up.",
    peak_time: "6-9 AM",
    energy_level: "High",
    motivation_style: "Goal-driven",
    commitment_level: "Dedicated",
    insights: &[
        "Front-load difficult habits in the morning when your willpower is highest",
        "Avoid evening habits - your energy depletes as the day goes on",
        "Set SMART goals with measurable outcomes for best results",
        "You succeed with structured routines and clear schedules",
    ],
    avoid_habits: &[
        "Evening workouts (low energy time)",
        "Spontaneous habits without structure",
        "Long meditation sessions (prefer action-oriented habits)",
    ],
};

const NIGHT_OWL: Profile = Profile {
    name: "Night Owl",
    emoji: "🦉",
    description: "Your energy peaks in the evening. You work best when the world is quiet and distractions fade away.",
    peak_time: "8 PM - 12 AM",
    energy_level: "High (Evening)",
    motivation_style: "Independent",
    commitment_level: "Focused",
    insights: &[
        "Schedule important habits for evening hours",
        "Don't force morning routines - work with your natural rhythm",
        "Use late-night focus for creative and challenging tasks",
        "Build momentum with evening wins",
    ],
    avoid_habits: &[
        "Early morning workouts",
        "6 AM wake-up goals",
        "Morning meditation (try evening instead)",
    ],
};

const STEADY_ACHIEVER: Profile = Profile {
    name: "Steady Achiever",
    emoji: "📈",
    description: "You value consistency over intensity. Slow and steady wins your race, building habits through reliable routines.",
    peak_time: "Consistent throughout day",
    energy_level: "Moderate",
    motivation_style: "Process-focused",
    commitment_level: "Reliable",
    insights: &[
        "Focus on small, sustainable habits rather than big dramatic changes",
        "Consistency is your superpower - use it!",
        "Track progress with simple methods",
        "Build one habit at a time for best results",
    ],
    avoid_habits: &[
        "Extreme fitness challenges",
        "Multiple new habits at once",
        "All-or-nothing approaches",
    ],
};

impl Personality {
    pub const ALL: [Personality; 3] = [
        Personality::MorningWarrior,
        Personality::NightOwl,
        Personality::SteadyAchiever,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.profile().name
    }

    #[must_use]
    pub const fn profile(self) -> &'static Profile {
        match self {
            Personality::MorningWarrior => &MORNING_WARRIOR,
            Personality::NightOwl => &NIGHT_OWL,
            Personality::SteadyAchiever => &STEADY_ACHIEVER,
        }
    }

    /// Maps the average energy score (1 to 4) to a personality.
    #[must_use]
    pub fn from_energy(average: f64) -> Self {
        if average >= 3.0 {
            Personality::MorningWarrior
        } else if average <= 2.0 {
            Personality::NightOwl
        } else {
            Personality::SteadyAchiever
        }
    }
}

impl FromStr for Personality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Personality::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown personality: {s}"))
    }
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
