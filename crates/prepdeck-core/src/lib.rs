pub mod api;
pub mod audio;
pub mod auth;
pub mod error;
pub mod http;
pub mod interview;
pub mod settings;
pub mod verbose;

pub use audio::{AudioDeviceInfo, MicRecorder, RecorderConfig, RecordingOutput, list_input_devices};
pub use auth::{AuthState, AuthStore, login_url, parse_callback};
pub use error::{ApiError, ApiResult};
pub use http::{ApiClient, DEFAULT_TIMEOUT_SECS};
pub use interview::{
    Answer, Command, Countdown, EndReason, Feedback, InterviewSession, Phase, Question,
    QuestionType, SessionEvent, SessionInfo, SessionObserver, SessionOptions, UserIntent,
    run_session,
};
pub use settings::Settings;
pub use verbose::set_verbose;
