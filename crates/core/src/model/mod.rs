mod ids;
mod question;
mod settings;

pub use ids::{Section, SectionFilter, SectionParseError, TemplateId};
pub use question::{ChoiceSlot, Cheatsheet, Flashcard, QuestionError, QuestionInstance, Step};
pub use settings::{QuizSettings, QuizSettingsDraft, SettingsError};
