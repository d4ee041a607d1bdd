//! Known form values for idea requests.
//!
//! The HTTP endpoint accepts any string; these lists drive the CLI's
//! choices and help text.

/// One selectable value and its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormOption {
    pub value: &'static str,
    pub label: &'static str,
}

const fn opt(value: &'static str, label: &'static str) -> FormOption {
    FormOption { value, label }
}

pub const MOODS: &[FormOption] = &[
    opt("romantic", "Romantic"),
    opt("adventurous", "Adventurous"),
    opt("casual", "Casual"),
    opt("fun", "Fun & Playful"),
    opt("intimate", "Intimate"),
    opt("exciting", "Exciting"),
];

pub const BUDGETS: &[FormOption] = &[
    opt("low", "Low ($)"),
    opt("medium", "Medium ($$)"),
    opt("high", "High ($$$)"),
];

pub const TIMES_OF_DAY: &[FormOption] = &[
    opt("morning", "Morning"),
    opt("afternoon", "Afternoon"),
    opt("evening", "Evening"),
    opt("night", "Night"),
];

pub const OCCASIONS: &[FormOption] = &[
    opt("first date", "First Date"),
    opt("anniversary", "Anniversary"),
    opt("birthday", "Birthday"),
    opt("valentines", "Valentine's Day"),
    opt("proposal", "Proposal"),
];

/// Default mood preselected in forms.
pub const DEFAULT_MOOD: &str = "romantic";

/// Default budget preselected in forms.
pub const DEFAULT_BUDGET: &str = "medium";

/// Look up the display label for `value`.
pub fn label_for(options: &[FormOption], value: &str) -> Option<&'static str> {
    options.iter().find(|o| o.value == value).map(|o| o.label)
}

/// Comma-separated list of accepted values, for error messages.
pub fn values_list(options: &[FormOption]) -> String {
    options
        .iter()
        .map(|o| o.value)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_listed() {
        assert!(label_for(MOODS, DEFAULT_MOOD).is_some());
        assert!(label_for(BUDGETS, DEFAULT_BUDGET).is_some());
    }

    #[test]
    fn label_lookup() {
        assert_eq!(label_for(OCCASIONS, "valentines"), Some("Valentine's Day"));
        assert_eq!(label_for(BUDGETS, "priceless"), None);
    }

    #[test]
    fn values_list_joins() {
        assert_eq!(values_list(BUDGETS), "low, medium, high");
    }
}
