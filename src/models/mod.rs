pub mod question;
pub mod source_format;

pub use question::{Question, QuestionBank, QuestionOption, QuestionType, DEFAULT_DIFFICULTY};
pub use source_format::SourceFormat;
