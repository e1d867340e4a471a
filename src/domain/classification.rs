use std::fmt;

use serde::Serialize;

/// Categories the classifier is asked to choose from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassificationLabel {
    Fraud,
    Spam,
    Bot,
    None,
    /// Free text that names none of the known categories.
    Other,
}

impl ClassificationLabel {
    pub const CATEGORIES: [ClassificationLabel; 4] = [
        ClassificationLabel::Fraud,
        ClassificationLabel::Spam,
        ClassificationLabel::Bot,
        ClassificationLabel::None,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClassificationLabel::Fraud => "Fraud",
            ClassificationLabel::Spam => "Spam",
            ClassificationLabel::Bot => "Bot",
            ClassificationLabel::None => "None",
            ClassificationLabel::Other => "Other",
        }
    }

    /// Best-effort read of the classifier's answer: the first word that names a
    /// category wins.
    pub fn from_answer(answer: &str) -> Self {
        answer
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .find_map(|word| {
                Self::CATEGORIES
                    .into_iter()
                    .find(|label| label.as_str().eq_ignore_ascii_case(word))
            })
            .unwrap_or(ClassificationLabel::Other)
    }
}

impl fmt::Display for ClassificationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Successful pipeline outcome returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    pub transcription: String,
    pub analysis: String,
}
