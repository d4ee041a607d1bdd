//! Curated date suggestions shown before anything is generated.

/// A hand-picked suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion {
    pub title: &'static str,
    pub description: &'static str,
}

const CURATED: &[Suggestion] = &[
    Suggestion {
        title: "Coffee & Conversation",
        description: "Start your day with a cozy café visit and meaningful talks",
    },
    Suggestion {
        title: "Movie Night",
        description: "Cuddle up for a romantic film at home or the cinema",
    },
    Suggestion {
        title: "Romantic Dinner",
        description: "Cook together or explore a new restaurant",
    },
    Suggestion {
        title: "Live Music",
        description: "Enjoy a concert or intimate acoustic session",
    },
    Suggestion {
        title: "Photo Adventure",
        description: "Explore your city and capture beautiful moments",
    },
    Suggestion {
        title: "Stargazing",
        description: "Find a quiet spot and watch the stars together",
    },
];

/// All curated suggestions, in display order.
pub fn curated() -> &'static [Suggestion] {
    CURATED
}

/// Find a curated suggestion by title (case-insensitive).
pub fn find(title: &str) -> Option<&'static Suggestion> {
    CURATED.iter().find(|s| s.title.eq_ignore_ascii_case(title))
}
