use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{SectionFilter, SectionParseError};

/// Credit awarded for a correct answer on the second try in partial-credit mode.
pub const SECOND_TRY_CREDIT: f64 = 0.5;

/// Quiz behaviour knobs chosen by the user or the host application.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuizSettings {
    partial_credit: bool,
    default_filter: SectionFilter,
}

/// Unvalidated settings as they arrive from flags, environment or storage.
#[derive(Clone, Debug, Default)]
pub struct QuizSettingsDraft {
    pub partial_credit: Option<String>,
    pub default_filter: Option<String>,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("invalid partial credit flag: {raw}")]
    InvalidPartialCredit { raw: String },
    #[error(transparent)]
    Section(#[from] SectionParseError),
}

impl QuizSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and normalize the draft.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the partial credit flag is not a boolean word or the
    /// section filter is unknown.
    pub fn validate(self) -> Result<QuizSettings, SettingsError> {
        let partial_credit = match normalize_optional(self.partial_credit) {
            None => false,
            Some(raw) => parse_flag(&raw).ok_or(SettingsError::InvalidPartialCredit { raw })?,
        };
        let default_filter = match normalize_optional(self.default_filter) {
            None => SectionFilter::All,
            Some(raw) => raw.parse()?,
        };

        Ok(QuizSettings {
            partial_credit,
            default_filter,
        })
    }
}

impl QuizSettings {
    #[must_use]
    pub fn new(partial_credit: bool, default_filter: SectionFilter) -> Self {
        Self {
            partial_credit,
            default_filter,
        }
    }

    #[must_use]
    pub fn partial_credit(&self) -> bool {
        self.partial_credit
    }

    #[must_use]
    pub fn default_filter(&self) -> SectionFilter {
        self.default_filter
    }

    /// Credit for a correct answer given how many wrong tries preceded it.
    #[must_use]
    pub fn credit_for(&self, wrong_attempts: u8) -> f64 {
        if self.partial_credit && wrong_attempts > 0 {
            SECOND_TRY_CREDIT
        } else {
            1.0
        }
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self::new(false, SectionFilter::All)
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Section;

    #[test]
    fn empty_draft_uses_defaults() {
        let settings = QuizSettingsDraft::new().validate().unwrap();
        assert_eq!(settings, QuizSettings::default());
        assert!(!settings.partial_credit());
    }

    #[test]
    fn draft_parses_flags_and_filter() {
        let settings = QuizSettingsDraft {
            partial_credit: Some(" yes ".into()),
            default_filter: Some("integrated".into()),
        }
        .validate()
        .unwrap();
        assert!(settings.partial_credit());
        assert_eq!(settings.default_filter(), SectionFilter::Only(Section::Integrated));
    }

    #[test]
    fn draft_rejects_garbage() {
        let err = QuizSettingsDraft {
            partial_credit: Some("maybe".into()),
            default_filter: None,
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, SettingsError::InvalidPartialCredit { .. }));

        let err = QuizSettingsDraft {
            partial_credit: None,
            default_filter: Some("history".into()),
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, SettingsError::Section(_)));
    }

    #[test]
    fn credit_depends_on_mode() {
        let full = QuizSettings::new(false, SectionFilter::All);
        assert_eq!(full.credit_for(0), 1.0);
        assert_eq!(full.credit_for(1), 1.0);

        let partial = QuizSettings::new(true, SectionFilter::All);
        assert_eq!(partial.credit_for(0), 1.0);
        assert_eq!(partial.credit_for(1), 0.5);
    }
}
