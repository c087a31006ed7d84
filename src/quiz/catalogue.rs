//! Template catalogues seeded into the store on initialisation.

use super::Personality;
use crate::types::Priority;

/// A template before it has been given a database id.
#[derive(Debug, Clone, Copy)]
pub struct TemplateSeed {
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub priority: Priority,
    pub personality: Option<Personality>,
    pub reason: Option<&'static str>,
}

const fn general(
    name: &'static str,
    description: &'static str,
    category: &'static str,
    priority: Priority,
) -> TemplateSeed {
    TemplateSeed {
        name,
        description,
        category,
        priority,
        personality: None,
        reason: None,
    }
}

const fn recommended(
    personality: Personality,
    name: &'static str,
    description: &'static str,
    category: &'static str,
    priority: Priority,
    reason: &'static str,
) -> TemplateSeed {
    TemplateSeed {
        name,
        description,
        category,
        priority,
        personality: Some(personality),
        reason: Some(reason),
    }
}

use Priority::{High, Low, Medium};

/// Quick-add templates offered to every user.
pub static GENERAL_TEMPLATES: &[TemplateSeed] = &[
    general("Drink 8 Glasses of Water", "Stay hydrated throughout the day", "Health", Medium),
    general("Take Vitamins Daily", "Remember to take daily vitamins and supplements", "Health", Medium),
    general("Sleep 8 Hours", "Get quality sleep every night", "Health", High),
    general("No Snacking After 8 PM", "Avoid late-night eating for better health", "Health", Medium),
    general("Eat 5 Servings of Fruits/Veggies", "Consume nutritious fruits and vegetables daily", "Health", High),
    general("10 Min Exercise", "Quick daily workout routine", "Fitness", High),
    general("Morning Yoga", "Start your day with stretching and yoga", "Fitness", Medium),
    general("10,000 Steps Daily", "Walk 10,000 steps each day", "Fitness", Medium),
    general("Gym 3x Per Week", "Regular gym sessions for fitness", "Fitness", High),
    general("Evening Stretching", "Gentle stretching routine before bed", "Fitness", Low),
    general("Read 10 Pages", "Daily reading habit", "Study", Medium),
    general("Study for 1 Hour", "Dedicated study time each day", "Study", High),
    general("Practice Coding", "Work on coding exercises daily", "Study", High),
    general("Learn New Vocabulary", "Study 10 new words daily", "Study", Medium),
    general("Review Notes", "Review class or meeting notes", "Study", Medium),
    general("Make Tomorrow's To-Do List", "Plan ahead for productivity", "Productivity", Medium),
    general("Clear Inbox to Zero", "Process all emails daily", "Productivity", Low),
    general("No Social Media Before Noon", "Focus on work in the morning", "Productivity", High),
    general("Desk Organization", "Keep workspace clean and organized", "Productivity", Low),
    general("2-Hour Deep Work Session", "Focused work without distractions", "Productivity", High),
    general("10 Min Meditation", "Daily mindfulness practice", "Mindfulness", Medium),
    general("Gratitude Journal", "Write 3 things you're grateful for", "Mindfulness", Medium),
    general("Evening Reflection", "Reflect on the day before bed", "Mindfulness", Low),
    general("Deep Breathing Exercise", "5 minutes of focused breathing", "Mindfulness", Low),
    general("Morning Affirmations", "Start day with positive affirmations", "Mindfulness", Medium),
    general("Track Daily Expenses", "Record all spending in budget app", "Finance", High),
    general("Review Budget Weekly", "Check financial goals and spending", "Finance", Medium),
    general("Save $10 Daily", "Put aside money for savings", "Finance", Medium),
    general("No Impulse Purchases", "Wait 24 hours before buying", "Finance", Medium),
    general("Call a Friend", "Stay connected with loved ones", "Social", Low),
    general("Text Family", "Check in with family members", "Social", Low),
    general("Compliment Someone", "Spread kindness daily", "Social", Low),
    general("Reach Out to Someone New", "Expand your social circle", "Social", Low),
    general("Make Your Bed", "Start the day with a small win", "Chores", Low),
    general("Do the Dishes", "Keep kitchen clean", "Chores", Medium),
    general("Laundry Day", "Wash and fold clothes", "Chores", Medium),
    general("Weekly Cleaning", "Deep clean your living space", "Chores", Medium),
    general("10-Min Declutter", "Organize one area of your home", "Chores", Low),
];

/// Templates recommended after the quiz, three per personality.
pub static PERSONALITY_TEMPLATES: &[TemplateSeed] = &[
    recommended(
        Personality::MorningWarrior,
        "Wake at 6 AM",
        "Start your day early to maximize morning energy",
        "Health",
        High,
        "Matches your peak energy time",
    ),
    recommended(
        Personality::MorningWarrior,
        "15-min Morning Workout",
        "Quick exercise routine to energize your day",
        "Fitness",
        High,
        "High energy baseline supports morning exercise",
    ),
    recommended(
        Personality::MorningWarrior,
        "Goal Planning Session",
        "Review and plan daily goals each morning",
        "Productivity",
        Medium,
        "Goal-driven style thrives on planning",
    ),
    recommended(
        Personality::NightOwl,
        "Evening Journaling",
        "Reflect on your day before bed",
        "Personal Growth",
        Medium,
        "Evening focus perfect for reflection",
    ),
    recommended(
        Personality::NightOwl,
        "Night Reading 30 mins",
        "Read before bed to wind down",
        "Learning",
        Medium,
        "Peak concentration in evening hours",
    ),
    recommended(
        Personality::NightOwl,
        "Evening Stretching",
        "Gentle stretching routine before sleep",
        "Health",
        Low,
        "Works with your natural evening rhythm",
    ),
    recommended(
        Personality::SteadyAchiever,
        "Drink 8 Glasses of Water",
        "Stay hydrated throughout the day",
        "Health",
        Medium,
        "Simple, consistent habit perfect for your style",
    ),
    recommended(
        Personality::SteadyAchiever,
        "Daily 10-Minute Walk",
        "Take a short walk every day",
        "Fitness",
        Medium,
        "Small, sustainable daily habit",
    ),
    recommended(
        Personality::SteadyAchiever,
        "Read 10 Pages",
        "Read at least 10 pages each day",
        "Learning",
        Medium,
        "Achievable daily goal with steady progress",
    ),
];

/// Every seed, general templates first.
pub fn all_seeds() -> impl Iterator<Item = &'static TemplateSeed> {
    GENERAL_TEMPLATES.iter().chain(PERSONALITY_TEMPLATES.iter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_general_catalogue_covers_builtin_categories() {
        assert_eq!(GENERAL_TEMPLATES.len(), 38);
        let categories: HashSet<&str> = GENERAL_TEMPLATES.iter().map(|t| t.category).collect();
        for builtin in crate::habits::listing::BUILTIN_CATEGORIES {
            assert!(categories.contains(builtin), "missing {builtin}");
        }
        assert!(GENERAL_TEMPLATES.iter().all(|t| t.personality.is_none()));
    }

    #[test]
    fn test_three_recommendations_per_personality() {
        for personality in Personality::ALL {
            let count = PERSONALITY_TEMPLATES
                .iter()
                .filter(|t| t.personality == Some(personality))
                .count();
            assert_eq!(count, 3, "{personality}");
        }
    }

    #[test]
    fn test_names_unique_within_each_catalogue() {
        let general: HashSet<&str> = GENERAL_TEMPLATES.iter().map(|t| t.name).collect();
        assert_eq!(general.len(), GENERAL_TEMPLATES.len());
        assert_eq!(all_seeds().count(), 47);
    }
}
