//! Wire types for the interview session, field names matching the backend.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QuestionType {
    Tech,
    Behavioral,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Tech => "TECH",
            QuestionType::Behavioral => "BEHAVIORAL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub text: String,
}

/// How one answer ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    #[serde(rename = "timeout")]
    Timeout,
    #[serde(rename = "manual")]
    Manual,
    #[serde(rename = "stt-error")]
    SttError,
}

impl EndReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndReason::Timeout => "timeout",
            EndReason::Manual => "manual",
            EndReason::SttError => "stt-error",
        }
    }
}

/// One finalized answer, created exactly once per question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: i64,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub question: String,
    pub answer_text: String,
    pub duration_sec: u32,
    pub end_reason: EndReason,
}

/// Response to session start.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    #[serde(default)]
    pub session_id: Option<String>,
    /// Per-answer time budget; absent on older backends.
    #[serde(default)]
    pub duration_sec: Option<u32>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// Final interview feedback.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    #[serde(default)]
    pub overall_score: f64,
    #[serde(default)]
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_deserializes_backend_shape() {
        let question: Question =
            serde_json::from_str(r#"{"id":3,"type":"TECH","text":"Explain ownership."}"#).unwrap();
        assert_eq!(question.kind, QuestionType::Tech);
        assert_eq!(question.id, 3);
    }

    #[test]
    fn answer_serializes_camel_case_with_reason_strings() {
        let answer = Answer {
            question_id: 3,
            kind: QuestionType::Behavioral,
            question: "Tell me about a conflict.".into(),
            answer_text: String::new(),
            duration_sec: 42,
            end_reason: EndReason::SttError,
        };
        let value = serde_json::to_value(&answer).unwrap();
        assert_eq!(value["questionId"], 3);
        assert_eq!(value["type"], "BEHAVIORAL");
        assert_eq!(value["answerText"], "");
        assert_eq!(value["durationSec"], 42);
        assert_eq!(value["endReason"], "stt-error");
    }

    #[test]
    fn session_info_tolerates_missing_fields() {
        let info: SessionInfo = serde_json::from_str(r#"{"questions":[]}"#).unwrap();
        assert!(info.session_id.is_none());
        assert!(info.duration_sec.is_none());
    }
}
