//! Coding-test endpoints: random problem fetch and submission grading.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::http::{ApiClient, read_json, send};

/// Problem difficulty as the backend spells it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(format!(
                "Unknown difficulty: {s}. Available: easy, medium, hard"
            )),
        }
    }
}

/// Submission language accepted by the grading sandbox
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Java,
    Cpp,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Java => "java",
            Language::Cpp => "cpp",
        }
    }

    /// Starter template offered when the user has no solution file yet.
    pub fn starter_template(&self) -> &'static str {
        match self {
            Language::Python => {
                "import sys\n\ndef main():\n    pass\n\nif __name__ == \"__main__\":\n    main()\n"
            }
            Language::Java => {
                "import java.io.*;\nimport java.util.*;\n\npublic class Main {\n    public static void main(String[] args) throws Exception {\n    }\n}\n"
            }
            Language::Cpp => {
                "#include <bits/stdc++.h>\nusing namespace std;\n\nint main() {\n    ios::sync_with_stdio(false);\n    cin.tie(nullptr);\n    return 0;\n}\n"
            }
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "python" | "py" => Ok(Language::Python),
            "java" => Ok(Language::Java),
            "cpp" | "c++" => Ok(Language::Cpp),
            _ => Err(format!(
                "Unknown language: {s}. Available: python, java, cpp"
            )),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SampleCase {
    #[serde(default)]
    pub input_data: String,
    #[serde(default)]
    pub expected_output: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CodingProblem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub samples: Vec<SampleCase>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    pub problem_id: i64,
    pub source_code: String,
    pub language: Language,
    pub user_id: String,
}

/// Grading outcome. The fields beyond `status` are backend-defined and
/// rendered as-is; defaults keep older backends without AI feedback working.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    #[serde(default)]
    pub submission_id: Option<i64>,
    pub status: String,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub passed_count: u32,
    #[serde(default)]
    pub total_count: u32,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub ai_feedback: Option<String>,
}

/// Fetch a random problem, optionally filtered by difficulty.
pub async fn fetch_random_problem(
    client: &ApiClient,
    difficulty: Option<Difficulty>,
) -> ApiResult<CodingProblem> {
    let mut request = client.get("/coding/problems/random");
    if let Some(difficulty) = difficulty {
        request = request.query(&[("difficulty", difficulty.as_str())]);
    }
    let response = send(request).await?;
    read_json(response).await
}

/// Submit code for grading against the full test-case set.
pub async fn submit_code(
    client: &ApiClient,
    submission: &SubmissionRequest,
) -> ApiResult<SubmissionResult> {
    let response = send(client.post("/coding/submissions").json(submission)).await?;
    read_json(response).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn problem_deserializes_from_backend_shape() {
        let raw = r#"{
            "id": 7,
            "title": "Two Sum",
            "description": "Find two numbers...",
            "difficulty": "EASY",
            "tags": ["array", "hash"],
            "samples": [{"inputData": "1 2", "expectedOutput": "3"}]
        }"#;
        let problem: CodingProblem = serde_json::from_str(raw).unwrap();
        assert_eq!(problem.difficulty, Difficulty::Easy);
        assert_eq!(problem.samples[0].expected_output, "3");
    }

    #[test]
    fn submission_serializes_camel_case() {
        let request = SubmissionRequest {
            problem_id: 7,
            source_code: "print(3)".into(),
            language: Language::Python,
            user_id: "guest".into(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["problemId"], 7);
        assert_eq!(value["sourceCode"], "print(3)");
        assert_eq!(value["language"], "python");
        assert_eq!(value["userId"], "guest");
    }

    #[test]
    fn result_tolerates_missing_optional_fields() {
        let result: SubmissionResult =
            serde_json::from_str(r#"{"status":"ACCEPTED"}"#).unwrap();
        assert_eq!(result.status, "ACCEPTED");
        assert_eq!(result.passed_count, 0);
        assert!(result.ai_feedback.is_none());
    }
}
