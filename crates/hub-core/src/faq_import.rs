//! FAQ drafts and CSV import.
//!
//! The importer splits on bare commas. Quoted fields are not understood, so
//! a question or answer containing a comma is cut at that comma.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ImportError, ParseError};

/// Where an FAQ entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaqSource {
    Manual,
    Csv,
    Url,
}

impl FaqSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            FaqSource::Manual => "manual",
            FaqSource::Csv => "csv",
            FaqSource::Url => "url",
        }
    }
}

impl fmt::Display for FaqSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FaqSource {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manual" => Ok(FaqSource::Manual),
            "csv" => Ok(FaqSource::Csv),
            "url" => Ok(FaqSource::Url),
            other => Err(ParseError::FaqSource(other.to_string())),
        }
    }
}

/// An FAQ entry ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqDraft {
    pub question: String,
    pub answer: String,
    pub source: FaqSource,
    pub source_url: Option<String>,
}

impl FaqDraft {
    pub fn manual(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            source: FaqSource::Manual,
            source_url: None,
        }
    }

    pub fn csv(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            source: FaqSource::Csv,
            source_url: None,
        }
    }

    /// Placeholder entry recording a website to import FAQs from.
    pub fn website(url: impl Into<String>) -> Self {
        Self {
            question: "Website FAQ Import".to_string(),
            answer: "FAQs will be imported from the provided website URL".to_string(),
            source: FaqSource::Url,
            source_url: Some(url.into()),
        }
    }
}

/// Parse a CSV upload into FAQ drafts.
///
/// The header must have a column containing "question" and one containing
/// "answer" (case-insensitive). Rows too short to reach both columns are
/// skipped.
pub fn parse_faq_csv(text: &str) -> Result<Vec<FaqDraft>, ImportError> {
    let lines: Vec<&str> = text.split('\n').filter(|line| !line.trim().is_empty()).collect();

    if lines.len() < 2 {
        return Err(ImportError::TooFewLines);
    }

    let headers: Vec<String> = lines[0]
        .split(',')
        .map(|h| h.trim().to_lowercase())
        .collect();

    let question_index = headers.iter().position(|h| h.contains("question"));
    let answer_index = headers.iter().position(|h| h.contains("answer"));

    let (Some(question_index), Some(answer_index)) = (question_index, answer_index) else {
        return Err(ImportError::MissingColumns);
    };

    let needed = question_index.max(answer_index);
    let drafts: Vec<FaqDraft> = lines[1..]
        .iter()
        .filter_map(|line| {
            let values: Vec<&str> = line.split(',').collect();
            if values.len() > needed {
                Some(FaqDraft::csv(
                    values[question_index].trim(),
                    values[answer_index].trim(),
                ))
            } else {
                None
            }
        })
        .collect();

    if drafts.is_empty() {
        return Err(ImportError::NoEntries);
    }

    Ok(drafts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_row() {
        let drafts = parse_faq_csv("Question,Answer\nQ1,A1").unwrap();
        assert_eq!(drafts, vec![FaqDraft::csv("Q1", "A1")]);
        assert_eq!(drafts[0].source, FaqSource::Csv);
    }

    #[test]
    fn test_header_matching_is_substring_and_case_insensitive() {
        let text = "id, Customer Question ,Our ANSWER\r\n1,How long?,Two days\r\n2,Refunds?,Yes\r\n";
        let drafts = parse_faq_csv(text).unwrap();

        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].question, "How long?");
        assert_eq!(drafts[0].answer, "Two days");
        assert_eq!(drafts[1].answer, "Yes");
    }

    #[test]
    fn test_answer_column_before_question() {
        let drafts = parse_faq_csv("answer,question\nA,Q\n").unwrap();
        assert_eq!(drafts, vec![FaqDraft::csv("Q", "A")]);
    }

    #[test]
    fn test_blank_lines_ignored() {
        let drafts = parse_faq_csv("\n\nquestion,answer\n\n  \nQ1,A1\n\n").unwrap();
        assert_eq!(drafts.len(), 1);
    }

    #[test]
    fn test_missing_answer_column() {
        assert_eq!(
            parse_faq_csv("Question,Reply\nQ1,A1"),
            Err(ImportError::MissingColumns)
        );
    }

    #[test]
    fn test_header_only() {
        assert_eq!(parse_faq_csv("question,answer\n"), Err(ImportError::TooFewLines));
        assert_eq!(parse_faq_csv(""), Err(ImportError::TooFewLines));
    }

    #[test]
    fn test_short_rows_skipped() {
        let drafts = parse_faq_csv("question,answer\nonly-one-cell\nQ2,A2").unwrap();
        assert_eq!(drafts, vec![FaqDraft::csv("Q2", "A2")]);

        assert_eq!(
            parse_faq_csv("question,answer\nno comma here"),
            Err(ImportError::NoEntries)
        );
    }

    #[test]
    fn test_embedded_comma_splits_field() {
        // Quoting is not supported: the answer is cut at the first comma.
        let drafts = parse_faq_csv("question,answer\nShipping?,\"Yes, worldwide\"").unwrap();
        assert_eq!(drafts[0].answer, "\"Yes");
    }

    #[test]
    fn test_empty_cells_are_kept() {
        let drafts = parse_faq_csv("question,answer\n,A1").unwrap();
        assert_eq!(drafts[0].question, "");
    }

    #[test]
    fn test_website_draft() {
        let draft = FaqDraft::website("https://example.com/faq");
        assert_eq!(draft.source, FaqSource::Url);
        assert_eq!(draft.source_url.as_deref(), Some("https://example.com/faq"));
    }
}
