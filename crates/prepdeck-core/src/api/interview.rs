//! Interview session endpoints: start, speech-to-text, final feedback.

use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::http::{ApiClient, read_json, send};
use crate::interview::model::{Answer, Feedback, SessionInfo};

#[derive(Deserialize)]
struct SttResponse {
    #[serde(default)]
    text: String,
}

/// Start a session for the given repository URL. The backend analyzes the
/// repo and returns the question set.
pub async fn start_interview(client: &ApiClient, repo_url: &str) -> ApiResult<SessionInfo> {
    let body = serde_json::json!({ "repoUrl": repo_url });
    let response = send(client.post("/interview/start").json(&body)).await?;
    read_json(response).await
}

/// Submit the complete answer set and receive the overall feedback.
pub async fn request_feedback(
    client: &ApiClient,
    session_id: Option<&str>,
    answers: &[Answer],
) -> ApiResult<Feedback> {
    let body = serde_json::json!({
        "sessionId": session_id,
        "answers": answers,
    });
    let response = send(client.post("/interview/feedback").json(&body)).await?;
    read_json(response).await
}

/// Transcribe one recorded answer. The audio rides as a multipart `audio`
/// part; a missing `text` field comes back as the empty string.
pub async fn transcribe_answer(client: &ApiClient, wav_data: Vec<u8>) -> ApiResult<String> {
    let part = reqwest::multipart::Part::bytes(wav_data)
        .file_name("answer.wav")
        .mime_str("audio/wav")
        .map_err(|err| ApiError::Domain(format!("could not build the audio upload: {err}")))?;
    let form = reqwest::multipart::Form::new().part("audio", part);

    let response = send(client.post("/interview/stt").multipart(form)).await?;
    let parsed: SttResponse = read_json(response).await?;
    Ok(parsed.text)
}

#[cfg(test)]
mod tests {
    #[test]
    fn wav_mime_type_builds_a_valid_upload_part() {
        let part = reqwest::multipart::Part::bytes(vec![0u8; 4])
            .file_name("answer.wav")
            .mime_str("audio/wav");
        assert!(part.is_ok());
    }
}
