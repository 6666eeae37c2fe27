//! Password strength meter for the reset and signup forms
//!
//! Advisory only: the server remains the authority on password rules.

use std::fmt;

const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

pub const SPECIAL_CHARACTER_NOTE: &str = "For very strong, add at least one special character";
pub const STRONG_PASSWORD_MESSAGE: &str = "Password is strong and meets all requirements";
pub const MISMATCH_MESSAGE: &str = "Passwords don't match";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StrengthLevel {
    Weak,
    Fair,
    Good,
    Strong,
    VeryStrong,
}

impl StrengthLevel {
    const ALL: [StrengthLevel; 5] = [
        StrengthLevel::Weak,
        StrengthLevel::Fair,
        StrengthLevel::Good,
        StrengthLevel::Strong,
        StrengthLevel::VeryStrong,
    ];

    /// CSS modifier, e.g. `password-strength__fill--very-strong`
    pub fn as_str(&self) -> &'static str {
        match self {
            StrengthLevel::Weak => "weak",
            StrengthLevel::Fair => "fair",
            StrengthLevel::Good => "good",
            StrengthLevel::Strong => "strong",
            StrengthLevel::VeryStrong => "very-strong",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }

    /// Level shown by the meter for a bar width in percent
    pub fn for_percent(percent: f64) -> Self {
        if percent < 20.0 {
            StrengthLevel::Weak
        } else if percent < 40.0 {
            StrengthLevel::Fair
        } else if percent < 60.0 {
            StrengthLevel::Good
        } else if percent < 80.0 {
            StrengthLevel::Strong
        } else {
            StrengthLevel::VeryStrong
        }
    }
}

impl fmt::Display for StrengthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of checking one password
#[derive(Debug, Clone, PartialEq)]
pub struct PasswordCheck {
    /// One point per satisfied rule, 0..=5
    pub score: usize,
    pub level: StrengthLevel,
    /// At most one hint: the first failed requirement, or the special
    /// character note
    pub hints: Vec<&'static str>,
    /// All required rules (length, upper, lower, digit) pass
    pub is_strictly_valid: bool,
}

impl PasswordCheck {
    /// Width of the strength bar
    pub fn percent(&self) -> f64 {
        if self.level == StrengthLevel::VeryStrong {
            return 100.0;
        }
        (self.level.index() + self.score) as f64 / 2.0 / StrengthLevel::ALL.len() as f64 * 100.0
    }

    /// Level used for the bar and text colors
    pub fn visual_level(&self) -> StrengthLevel {
        StrengthLevel::for_percent(self.percent())
    }

    /// Text shown under the field when there is no hint
    pub fn success_message(&self) -> Option<&'static str> {
        if self.hints.is_empty() {
            Some(STRONG_PASSWORD_MESSAGE)
        } else {
            None
        }
    }
}

/// Score `password` against the site's password rules
pub fn check_password(password: &str) -> PasswordCheck {
    let rules: [(bool, &'static str); 4] = [
        (
            password.encode_utf16().count() >= 8,
            "Password must be at least 8 characters long",
        ),
        (
            password.chars().any(|c| c.is_ascii_uppercase()),
            "Add at least one uppercase letter",
        ),
        (
            password.chars().any(|c| c.is_ascii_lowercase()),
            "Add at least one lowercase letter",
        ),
        (
            password.chars().any(|c| c.is_ascii_digit()),
            "Add at least one number",
        ),
    ];
    let has_special = password.chars().any(|c| SPECIAL_CHARACTERS.contains(c));

    let failures: Vec<&'static str> = rules
        .iter()
        .filter(|(passed, _)| !passed)
        .map(|(_, message)| *message)
        .collect();
    let score = rules.iter().filter(|(passed, _)| *passed).count() + usize::from(has_special);
    let is_strictly_valid = failures.is_empty();

    let hints = match failures.first() {
        Some(first) => vec![*first],
        None if !has_special => vec![SPECIAL_CHARACTER_NOTE],
        None => Vec::new(),
    };

    let level = if is_strictly_valid {
        StrengthLevel::ALL[(score - 1).min(4)]
    } else {
        StrengthLevel::Weak
    };

    PasswordCheck {
        score,
        level,
        hints,
        is_strictly_valid,
    }
}

/// Error for the confirmation field, shown only once something is typed
pub fn confirm_error(password: &str, confirmation: &str) -> Option<&'static str> {
    if !confirmation.is_empty() && password != confirmation {
        Some(MISMATCH_MESSAGE)
    } else {
        None
    }
}

/// State of a show/hide password toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Shown,
}

impl Visibility {
    /// Read the state from an input's `type` attribute
    pub fn from_input_type(input_type: &str) -> Self {
        if input_type == "text" {
            Visibility::Shown
        } else {
            Visibility::Hidden
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Visibility::Hidden => Visibility::Shown,
            Visibility::Shown => Visibility::Hidden,
        }
    }

    pub fn input_type(&self) -> &'static str {
        match self {
            Visibility::Hidden => "password",
            Visibility::Shown => "text",
        }
    }

    pub fn icon_class(&self) -> &'static str {
        match self {
            Visibility::Hidden => "form__icon--eye-closed",
            Visibility::Shown => "form__icon--eye-open",
        }
    }

    /// Value for the toggle button's `aria-expanded`
    pub fn aria_expanded(&self) -> &'static str {
        match self {
            Visibility::Hidden => "false",
            Visibility::Shown => "true",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_password() {
        let check = check_password("");
        assert_eq!(check.score, 0);
        assert_eq!(check.level, StrengthLevel::Weak);
        assert_eq!(check.hints, vec!["Password must be at least 8 characters long"]);
        assert!(!check.is_strictly_valid);
        assert_eq!(check.percent(), 0.0);
    }

    #[test]
    fn test_only_first_failure_reported() {
        let check = check_password("abcdefgh");
        assert_eq!(check.score, 2);
        assert_eq!(check.hints, vec!["Add at least one uppercase letter"]);
        assert_eq!(check.level, StrengthLevel::Weak);
        assert_eq!(check.percent(), 20.0);
        assert_eq!(check.visual_level(), StrengthLevel::Fair);
    }

    #[test]
    fn test_valid_without_special_character() {
        let check = check_password("Tomato42soup");
        assert!(check.is_strictly_valid);
        assert_eq!(check.score, 4);
        assert_eq!(check.level, StrengthLevel::Strong);
        assert_eq!(check.hints, vec![SPECIAL_CHARACTER_NOTE]);
        assert_eq!(check.percent(), 70.0);
        assert_eq!(check.visual_level(), StrengthLevel::Strong);
        assert_eq!(check.success_message(), None);
    }

    #[test]
    fn test_very_strong() {
        let check = check_password("Tomato42soup!");
        assert_eq!(check.score, 5);
        assert_eq!(check.level, StrengthLevel::VeryStrong);
        assert!(check.hints.is_empty());
        assert_eq!(check.percent(), 100.0);
        assert_eq!(check.success_message(), Some(STRONG_PASSWORD_MESSAGE));
    }

    #[test]
    fn test_special_character_without_requirements() {
        let check = check_password("short!");
        assert!(!check.is_strictly_valid);
        assert_eq!(check.level, StrengthLevel::Weak);
        assert_eq!(check.score, 2);
    }

    #[test]
    fn test_confirm_error() {
        assert_eq!(confirm_error("abc", ""), None);
        assert_eq!(confirm_error("abc", "abc"), None);
        assert_eq!(confirm_error("abc", "abd"), Some(MISMATCH_MESSAGE));
    }

    #[test]
    fn test_visibility_toggle() {
        let state = Visibility::from_input_type("password");
        assert_eq!(state, Visibility::Hidden);

        let shown = state.toggled();
        assert_eq!(shown.input_type(), "text");
        assert_eq!(shown.icon_class(), "form__icon--eye-open");
        assert_eq!(shown.aria_expanded(), "true");
        assert_eq!(shown.toggled(), Visibility::Hidden);
    }
}
