use unicode_general_category::get_general_category;
use unicode_general_category::GeneralCategory;

use super::errors::PasswordError;

/// Password strength policy applied before any credential is accepted.
///
/// A password is accepted only when it is at least 8 characters long and
/// contains at least one uppercase letter, one lowercase letter, one digit
/// and one punctuation or symbol character. The rules are fixed.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordPolicy;

#[derive(Debug, Default)]
struct CharacterClasses {
    upper: bool,
    lower: bool,
    digit: bool,
    special: bool,
}

impl PasswordPolicy {
    const MIN_LENGTH: usize = 8;

    pub fn new() -> Self {
        Self
    }

    /// Validate a candidate password.
    ///
    /// Every rule is evaluated over the whole string; the outcome is a single
    /// violation regardless of which categories are missing.
    ///
    /// # Arguments
    /// * `password` - Plaintext password candidate
    ///
    /// # Errors
    /// * `PolicyViolation` - At least one rule is not satisfied
    pub fn validate(&self, password: &str) -> Result<(), PasswordError> {
        let mut length = 0;
        let mut classes = CharacterClasses::default();

        for c in password.chars() {
            length += 1;
            if c.is_uppercase() {
                classes.upper = true;
            } else if c.is_lowercase() {
                classes.lower = true;
            } else if c.is_numeric() {
                classes.digit = true;
            } else if Self::is_special(c) {
                classes.special = true;
            }
        }

        let long_enough = length >= Self::MIN_LENGTH;
        if long_enough && classes.upper && classes.lower && classes.digit && classes.special {
            Ok(())
        } else {
            Err(PasswordError::PolicyViolation)
        }
    }

    // Unicode punctuation (P*) or symbol (S*) categories only. Format and
    // mark characters such as U+200B or U+0301 do not count.
    fn is_special(c: char) -> bool {
        matches!(
            get_general_category(c),
            GeneralCategory::ConnectorPunctuation
                | GeneralCategory::DashPunctuation
                | GeneralCategory::OpenPunctuation
                | GeneralCategory::ClosePunctuation
                | GeneralCategory::InitialPunctuation
                | GeneralCategory::FinalPunctuation
                | GeneralCategory::OtherPunctuation
                | GeneralCategory::MathSymbol
                | GeneralCategory::CurrencySymbol
                | GeneralCategory::ModifierSymbol
                | GeneralCategory::OtherSymbol
        )
    }
}
