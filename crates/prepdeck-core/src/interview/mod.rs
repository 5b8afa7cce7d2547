//! AI interview session: wire types, countdown, state machine, async runner.

pub mod model;
pub mod runner;
pub mod session;
pub mod timer;

pub use model::{Answer, EndReason, Feedback, Question, QuestionType, SessionInfo};
pub use runner::{SessionObserver, SessionOptions, UserIntent, run_session};
pub use session::{Command, InterviewSession, Phase, SessionEvent};
pub use timer::Countdown;
