//! Closed lookup tables behind context-aware recommendations.
//!
//! Each table is an exhaustive `match`, so a new mood, time of day or reading
//! goal will not compile until every table covers it.

use crate::domain::book::Genre;
use crate::domain::context::{Mood, ReadingGoal, TimeOfDay};

pub fn mood_genres(mood: Mood, time_of_day: TimeOfDay) -> [Genre; 2] {
    use Genre::*;

    match (mood, time_of_day) {
        (Mood::Relaxed, TimeOfDay::Morning) => [Comedy, Essays],
        (Mood::Relaxed, TimeOfDay::Afternoon) => [Romance, Fiction],
        (Mood::Relaxed, TimeOfDay::Evening) => [Fantasy, Novel],
        (Mood::Focused, TimeOfDay::Morning) => [Educational, Dictionary],
        (Mood::Focused, TimeOfDay::Afternoon) => [Mystery, SciFi],
        (Mood::Focused, TimeOfDay::Evening) => [Drama, Essays],
        (Mood::Inspired, TimeOfDay::Morning) => [Educational, Novel],
        (Mood::Inspired, TimeOfDay::Afternoon) => [SciFi, Fantasy],
        (Mood::Inspired, TimeOfDay::Evening) => [Fiction, Mystery],
    }
}

pub fn goal_genres(goal: ReadingGoal) -> &'static [Genre] {
    use Genre::*;

    match goal {
        ReadingGoal::Learning => &[Educational, Dictionary, Essays],
        ReadingGoal::Entertainment => &[Fiction, Fantasy, SciFi, Comedy],
        ReadingGoal::PersonalGrowth => &[Novel, Drama, Essays],
        ReadingGoal::Relaxation => &[Romance, Comedy, Fiction],
    }
}

pub fn mood_phrase(mood: Mood, time_of_day: TimeOfDay) -> &'static str {
    match (mood, time_of_day) {
        (Mood::Relaxed, TimeOfDay::Morning) => "Perfect for a calm morning read",
        (Mood::Relaxed, TimeOfDay::Afternoon) => "Great for a relaxing afternoon",
        (Mood::Relaxed, TimeOfDay::Evening) => "Ideal for winding down",
        (Mood::Focused, TimeOfDay::Morning) => "Best for productive mornings",
        (Mood::Focused, TimeOfDay::Afternoon) => "Maintains afternoon concentration",
        (Mood::Focused, TimeOfDay::Evening) => "Engaging evening read",
        (Mood::Inspired, TimeOfDay::Morning) => "Starts your day with inspiration",
        (Mood::Inspired, TimeOfDay::Afternoon) => "Keeps creativity flowing",
        (Mood::Inspired, TimeOfDay::Evening) => "Enriching evening material",
    }
}

pub fn goal_phrase(goal: ReadingGoal) -> &'static str {
    match goal {
        ReadingGoal::Learning => "Supports your learning goals",
        ReadingGoal::Entertainment => "Provides great entertainment",
        ReadingGoal::PersonalGrowth => "Aids in personal development",
        ReadingGoal::Relaxation => "Perfect for relaxation",
    }
}
