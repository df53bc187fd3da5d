use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Stable identifier of a question template, e.g. `q-percentage`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TemplateId(&'static str);

impl TemplateId {
    #[must_use]
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    /// Returns the underlying id string
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Debug for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TemplateId({})", self.0)
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

// ─── Sections ──────────────────────────────────────────────────────────────────

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown section: {raw}")]
pub struct SectionParseError {
    pub raw: String,
}

/// Exam section a template belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Quant,
    Verbal,
    Integrated,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Quant, Section::Verbal, Section::Integrated];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Section::Quant => "quant",
            Section::Verbal => "verbal",
            Section::Integrated => "integrated",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = SectionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Section::ALL
            .into_iter()
            .find(|section| section.as_str() == normalized)
            .ok_or_else(|| SectionParseError { raw: s.to_owned() })
    }
}

/// Which templates a quiz session draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum SectionFilter {
    #[default]
    All,
    Only(Section),
}

impl SectionFilter {
    #[must_use]
    pub fn matches(self, section: Section) -> bool {
        match self {
            SectionFilter::All => true,
            SectionFilter::Only(only) => only == section,
        }
    }
}

impl fmt::Display for SectionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionFilter::All => f.write_str("all"),
            SectionFilter::Only(section) => write!(f, "{section}"),
        }
    }
}

impl FromStr for SectionFilter {
    type Err = SectionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(SectionFilter::All);
        }
        s.parse().map(SectionFilter::Only)
    }
}

impl From<SectionFilter> for String {
    fn from(value: SectionFilter) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for SectionFilter {
    type Error = SectionParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_id_display() {
        assert_eq!(TemplateId::new("q-mixture").to_string(), "q-mixture");
    }

    #[test]
    fn section_from_str() {
        assert_eq!("quant".parse::<Section>().unwrap(), Section::Quant);
        assert_eq!(" Integrated ".parse::<Section>().unwrap(), Section::Integrated);
        assert!("geometry".parse::<Section>().is_err());
    }

    #[test]
    fn filter_from_str() {
        assert_eq!("all".parse::<SectionFilter>().unwrap(), SectionFilter::All);
        assert_eq!(
            "verbal".parse::<SectionFilter>().unwrap(),
            SectionFilter::Only(Section::Verbal)
        );
        let err = "everything".parse::<SectionFilter>().unwrap_err();
        assert_eq!(err.raw, "everything");
    }

    #[test]
    fn filter_matches() {
        assert!(SectionFilter::All.matches(Section::Verbal));
        assert!(SectionFilter::Only(Section::Quant).matches(Section::Quant));
        assert!(!SectionFilter::Only(Section::Quant).matches(Section::Integrated));
    }

    #[test]
    fn filter_roundtrip() {
        for filter in [
            SectionFilter::All,
            SectionFilter::Only(Section::Quant),
            SectionFilter::Only(Section::Integrated),
        ] {
            assert_eq!(filter.to_string().parse::<SectionFilter>().unwrap(), filter);
        }
    }
}
