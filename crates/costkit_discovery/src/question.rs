//! Question records and user answers.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::state::ExtractedData;

/// Kind of input a question expects
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    FreeText,
    SingleChoice,
    MultiChoice,
    Number,
}

/// A user's answer to one question
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Answer {
    Text(String),
    Choice(String),
    Choices(Vec<String>),
    Number(u64),
    /// Explicitly skipped; leaves extracted data untouched
    Skipped,
}

impl Answer {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn choice(value: impl Into<String>) -> Self {
        Self::Choice(value.into())
    }

    pub fn choices<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Choices(values.into_iter().map(Into::into).collect())
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }

    /// Numeric value, reading the first number out of textual answers
    pub fn as_number(&self) -> Option<u64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(text) | Self::Choice(text) => parse_number(text),
            Self::Choices(values) => values.iter().find_map(|v| parse_number(v)),
            Self::Skipped => None,
        }
    }

    /// Selected labels; free text is read as a comma-separated list
    pub fn labels(&self) -> Vec<&str> {
        match self {
            Self::Choice(label) => vec![label.as_str()],
            Self::Choices(labels) => labels.iter().map(String::as_str).collect(),
            Self::Text(text) => text
                .split([',', ';', '\n'])
                .flat_map(|part| part.split(" and "))
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .collect(),
            Self::Number(_) | Self::Skipped => Vec::new(),
        }
    }

    /// Short rendering for transcripts
    pub fn display(&self) -> String {
        match self {
            Self::Text(text) | Self::Choice(text) => text.clone(),
            Self::Choices(values) => values.join(", "),
            Self::Number(n) => n.to_string(),
            Self::Skipped => "(skipped)".to_string(),
        }
    }
}

/// Parse the first number in a text, accepting separators and k/m suffixes.
///
/// "about 5,000 a month" -> 5000, "12k" -> 12000, "1.5m" -> 1500000.
pub fn parse_number(text: &str) -> Option<u64> {
    let caps = number_pattern()?.captures(text)?;
    let digits: String = caps[1].chars().filter(|c| *c != ',' && *c != '_').collect();
    let value: f64 = digits.parse().ok()?;
    let scale = match caps.get(2).map(|m| m.as_str().to_ascii_lowercase()) {
        Some(ref s) if s == "k" => 1_000.0,
        Some(ref s) if s == "m" => 1_000_000.0,
        _ => 1.0,
    };
    Some((value * scale).round() as u64)
}

fn number_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"(?i)(\d[\d,_]*(?:\.\d+)?)\s*([km])?\b").ok())
        .as_ref()
}

/// Pure extraction function: answer plus everything extracted so far
pub type Extractor = fn(&Answer, &ExtractedData) -> ExtractedData;

/// One step of the discovery conversation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub kind: InputKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
    #[serde(skip)]
    pub extract: Extractor,
}

impl Question {
    pub fn new(
        id: impl Into<String>,
        prompt: impl Into<String>,
        kind: InputKind,
        extract: Extractor,
    ) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            kind,
            choices: Vec::new(),
            extract,
        }
    }

    pub fn with_choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    /// Apply this question's extraction; skipped answers change nothing
    pub fn apply(&self, answer: &Answer, data: &ExtractedData) -> ExtractedData {
        if answer.is_skipped() {
            return data.clone();
        }
        (self.extract)(answer, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_variants() {
        assert_eq!(parse_number("5000"), Some(5000));
        assert_eq!(parse_number("about 5,000 a month"), Some(5000));
        assert_eq!(parse_number("12k"), Some(12_000));
        assert_eq!(parse_number("1.5M emails"), Some(1_500_000));
        assert_eq!(parse_number("3 agents"), Some(3));
        assert_eq!(parse_number("a lot"), None);
        assert_eq!(parse_number("99999999999999999999"), Some(u64::MAX));
    }

    #[test]
    fn test_answer_labels() {
        assert_eq!(Answer::text("Email, chat and voice").labels(), vec!["Email", "chat", "voice"]);
        assert_eq!(Answer::choice("Chat").labels(), vec!["Chat"]);
        assert!(Answer::Number(4).labels().is_empty());
    }

    #[test]
    fn test_answer_numbers() {
        assert_eq!(Answer::Number(7).as_number(), Some(7));
        assert_eq!(Answer::text("roughly 2k").as_number(), Some(2000));
        assert_eq!(Answer::Skipped.as_number(), None);
    }

    #[test]
    fn test_answer_serialization_is_tagged() {
        let json = serde_json::to_string(&Answer::Number(3)).unwrap();
        assert_eq!(json, r#"{"kind":"number","value":3}"#);
        let skipped: Answer = serde_json::from_str(r#"{"kind":"skipped"}"#).unwrap();
        assert!(skipped.is_skipped());
    }

    #[test]
    fn test_skipped_answer_keeps_data() {
        fn wipe(_: &Answer, _: &ExtractedData) -> ExtractedData {
            ExtractedData {
                workflow_description: String::new(),
                ..Default::default()
            }
        }
        let question = Question::new("q", "Anything?", InputKind::FreeText, wipe);
        let data = ExtractedData::default();
        assert_eq!(question.apply(&Answer::Skipped, &data), data);
        assert!(question.apply(&Answer::text("x"), &data).workflow_description.is_empty());
    }
}
