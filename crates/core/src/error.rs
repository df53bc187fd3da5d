use thiserror::Error;

use crate::model::{QuestionError, SectionParseError, SettingsError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Section(#[from] SectionParseError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
