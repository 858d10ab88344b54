//! Password strength scoring shown while an operator picks a password.
//!
//! One point per satisfied rule, five rules in total.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_SCORE: u8 = 5;

static UPPERCASE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Z]").expect("valid regex"));
static LOWERCASE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-z]").expect("valid regex"));
static DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d").expect("valid regex"));
static SPECIAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[!@#$%^&*(),.?":{}|<>]"#).expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StrengthLabel {
    Weak,
    Medium,
    Strong,
}

impl StrengthLabel {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=2 => Self::Weak,
            3 => Self::Medium,
            _ => Self::Strong,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordStrength {
    pub score: u8,
    pub max_score: u8,
    pub label: StrengthLabel,
    /// Rules the password satisfies.
    pub feedback: Vec<&'static str>,
    /// Rules the password is missing.
    pub suggestions: Vec<&'static str>,
}

pub fn analyze_password_strength(password: &str) -> PasswordStrength {
    let rules: [(bool, &'static str, &'static str); 5] = [
        (
            password.chars().count() >= MIN_PASSWORD_LEN,
            "Good length",
            "Use at least 8 characters",
        ),
        (
            UPPERCASE.is_match(password),
            "Contains uppercase letters",
            "Add uppercase letters",
        ),
        (
            LOWERCASE.is_match(password),
            "Contains lowercase letters",
            "Add lowercase letters",
        ),
        (DIGIT.is_match(password), "Contains numbers", "Add numbers"),
        (
            SPECIAL.is_match(password),
            "Contains special characters",
            "Add special characters (!@#$%^&*)",
        ),
    ];

    let mut feedback = Vec::new();
    let mut suggestions = Vec::new();
    for (passed, good, missing) in rules {
        if passed {
            feedback.push(good);
        } else {
            suggestions.push(missing);
        }
    }

    let score = feedback.len() as u8;
    PasswordStrength {
        score,
        max_score: MAX_SCORE,
        label: StrengthLabel::from_score(score),
        feedback,
        suggestions,
    }
}
