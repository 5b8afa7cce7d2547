//! Typed wrappers over the backend HTTP endpoints.
//!
//! Each function builds one request against a fixed path, attaches bearer
//! authorization through the [`ApiClient`], and maps failures into
//! [`ApiError`](crate::error::ApiError).
//!
//! [`ApiClient`]: crate::http::ApiClient

mod coding;
mod interview;
mod review;

pub use coding::{
    CodingProblem, Difficulty, Language, SampleCase, SubmissionRequest, SubmissionResult,
    fetch_random_problem, submit_code,
};
pub use interview::{request_feedback, start_interview, transcribe_answer};
pub use review::{ReviewRequest, ReviewResponse, request_review};
