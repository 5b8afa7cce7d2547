//! Interview session state machine.
//!
//! All phase transitions go through [`InterviewSession::handle`], which maps
//! one event to the next phase plus the side effects the driver must run.
//! Transcription is triggered only by the recorder's own completion, never by
//! the timer or the user action that requested the stop, so "signal to stop"
//! stays decoupled from "recording actually stopped". Late asynchronous
//! completions are discarded by comparing the turn counter stamped into each
//! `Transcribe` command against the current turn.

use crate::interview::model::{Answer, EndReason, Feedback, Question, SessionInfo};

/// Current stage of the interview flow. Exactly one is active at a time and
/// only the reducer writes it.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Loading,
    Prep { remaining: u32 },
    /// Recording an answer. Once a stop has been requested the winning
    /// reason is parked here until the recorder actually finishes.
    Answer { stopping: Option<EndReason> },
    Analyzing,
    Error { message: String },
    Done { feedback: Feedback },
}

/// External happenings fed into the reducer by the driver.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    Started(SessionInfo),
    StartFailed { message: String },
    PrepTick,
    AnswerTimeout,
    NextRequested,
    RecorderFailed { message: String },
    RecordingStopped { duration_sec: u32 },
    TranscriptReady { turn: u64, text: String },
    TranscriptFailed { turn: u64 },
    FeedbackReady(Feedback),
    FeedbackFailed { message: String },
}

/// Side effects the driver must execute after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    StartRecording,
    StopRecording,
    Transcribe { turn: u64 },
    SubmitFeedback {
        session_id: Option<String>,
        answers: Vec<Answer>,
    },
}

#[derive(Debug, Clone, Copy)]
struct PendingAnswer {
    reason: EndReason,
    duration_sec: u32,
}

pub struct InterviewSession {
    phase: Phase,
    prep_seconds: u32,
    answer_seconds: u32,
    session_id: Option<String>,
    questions: Vec<Question>,
    answers: Vec<Option<Answer>>,
    current: usize,
    /// Incremented each time a question enters its answer phase; stamps
    /// transcription work so stale completions can be told apart.
    turn: u64,
    pending: Option<PendingAnswer>,
}

impl InterviewSession {
    pub fn new(prep_seconds: u32, answer_seconds: u32) -> Self {
        Self {
            phase: Phase::Loading,
            prep_seconds,
            answer_seconds,
            session_id: None,
            questions: Vec::new(),
            answers: Vec::new(),
            current: 0,
            turn: 0,
            pending: None,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    /// Per-answer budget in seconds (may have been overridden by the
    /// session-start response).
    pub fn answer_seconds(&self) -> u32 {
        self.answer_seconds
    }

    pub fn answers(&self) -> &[Option<Answer>] {
        &self.answers
    }

    /// Apply one event, returning the commands the driver must run.
    /// Events that do not fit the current phase are discarded.
    pub fn handle(&mut self, event: SessionEvent) -> Vec<Command> {
        match event {
            SessionEvent::Started(info) => self.on_started(info),
            SessionEvent::StartFailed { message } => self.on_start_failed(message),
            SessionEvent::PrepTick => self.on_prep_tick(),
            SessionEvent::AnswerTimeout => self.on_stop_requested(EndReason::Timeout),
            SessionEvent::NextRequested => self.on_stop_requested(EndReason::Manual),
            SessionEvent::RecorderFailed { message } => self.on_recorder_failed(message),
            SessionEvent::RecordingStopped { duration_sec } => {
                self.on_recording_stopped(duration_sec)
            }
            SessionEvent::TranscriptReady { turn, text } => self.on_transcript(turn, Some(text)),
            SessionEvent::TranscriptFailed { turn } => self.on_transcript(turn, None),
            SessionEvent::FeedbackReady(feedback) => self.on_feedback_ready(feedback),
            SessionEvent::FeedbackFailed { message } => self.on_feedback_failed(message),
        }
    }

    fn on_started(&mut self, info: SessionInfo) -> Vec<Command> {
        // Session start is one-shot: anything after Loading ignores it.
        if self.phase != Phase::Loading {
            return Vec::new();
        }
        if info.questions.is_empty() {
            self.phase = Phase::Error {
                message: "no interview questions were returned".into(),
            };
            return Vec::new();
        }
        if let Some(budget) = info.duration_sec
            && budget > 0
        {
            self.answer_seconds = budget;
        }
        self.session_id = info.session_id;
        self.answers = vec![None; info.questions.len()];
        self.questions = info.questions;
        self.current = 0;
        self.phase = Phase::Prep {
            remaining: self.prep_seconds,
        };
        Vec::new()
    }

    fn on_start_failed(&mut self, message: String) -> Vec<Command> {
        if self.phase == Phase::Loading {
            self.phase = Phase::Error { message };
        }
        Vec::new()
    }

    fn on_prep_tick(&mut self) -> Vec<Command> {
        if let Phase::Prep { remaining } = &mut self.phase {
            *remaining = remaining.saturating_sub(1);
            if *remaining == 0 {
                self.turn += 1;
                self.pending = None;
                self.phase = Phase::Answer { stopping: None };
                return vec![Command::StartRecording];
            }
        }
        Vec::new()
    }

    /// Timeout and manual advance both request a stop; whichever lands first
    /// wins and the other is ignored.
    fn on_stop_requested(&mut self, reason: EndReason) -> Vec<Command> {
        if let Phase::Answer { stopping } = &mut self.phase
            && stopping.is_none()
        {
            *stopping = Some(reason);
            return vec![Command::StopRecording];
        }
        Vec::new()
    }

    fn on_recording_stopped(&mut self, duration_sec: u32) -> Vec<Command> {
        if let Phase::Answer {
            stopping: Some(reason),
        } = &self.phase
            && self.pending.is_none()
        {
            self.pending = Some(PendingAnswer {
                reason: *reason,
                duration_sec,
            });
            return vec![Command::Transcribe { turn: self.turn }];
        }
        Vec::new()
    }

    /// Finalize the current answer from a transcription outcome. `None`
    /// means the STT call failed; the answer is kept with empty text so the
    /// session still makes progress.
    fn on_transcript(&mut self, turn: u64, text: Option<String>) -> Vec<Command> {
        if turn != self.turn {
            return Vec::new();
        }
        if !matches!(
            self.phase,
            Phase::Answer {
                stopping: Some(_)
            }
        ) {
            return Vec::new();
        }
        let Some(pending) = self.pending.take() else {
            return Vec::new();
        };

        let (answer_text, end_reason) = match text {
            Some(text) => (text, pending.reason),
            None => (String::new(), EndReason::SttError),
        };

        let question = &self.questions[self.current];
        self.answers[self.current] = Some(Answer {
            question_id: question.id,
            kind: question.kind,
            question: question.text.clone(),
            answer_text,
            duration_sec: pending.duration_sec,
            end_reason,
        });

        if self.current + 1 == self.questions.len() {
            self.phase = Phase::Analyzing;
            let answers = self.answers.iter().flatten().cloned().collect();
            return vec![Command::SubmitFeedback {
                session_id: self.session_id.clone(),
                answers,
            }];
        }

        self.current += 1;
        self.phase = Phase::Prep {
            remaining: self.prep_seconds,
        };
        Vec::new()
    }

    fn on_recorder_failed(&mut self, message: String) -> Vec<Command> {
        // Microphone loss after the last answer is captured no longer matters.
        match self.phase {
            Phase::Analyzing | Phase::Done { .. } | Phase::Error { .. } => {}
            _ => {
                self.phase = Phase::Error {
                    message: format!("microphone unavailable: {message}"),
                };
            }
        }
        Vec::new()
    }

    fn on_feedback_ready(&mut self, feedback: Feedback) -> Vec<Command> {
        if self.phase == Phase::Analyzing {
            self.phase = Phase::Done { feedback };
        }
        Vec::new()
    }

    fn on_feedback_failed(&mut self, message: String) -> Vec<Command> {
        if self.phase == Phase::Analyzing {
            self.phase = Phase::Error { message };
        }
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::model::QuestionType;

    fn questions(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| Question {
                id: i as i64 + 1,
                kind: if i % 2 == 0 {
                    QuestionType::Tech
                } else {
                    QuestionType::Behavioral
                },
                text: format!("question {}", i + 1),
            })
            .collect()
    }

    fn started(n: usize) -> SessionEvent {
        SessionEvent::Started(SessionInfo {
            session_id: Some("s-1".into()),
            duration_sec: None,
            questions: questions(n),
        })
    }

    /// Tick through prep until recording starts; returns the start commands.
    fn finish_prep(session: &mut InterviewSession) -> Vec<Command> {
        for _ in 0..100 {
            let commands = session.handle(SessionEvent::PrepTick);
            if !commands.is_empty() {
                return commands;
            }
        }
        panic!("prep never finished");
    }

    /// Run one answer through stop → recorder completion, returning the turn
    /// stamped into the Transcribe command.
    fn stop_and_capture(
        session: &mut InterviewSession,
        stop: SessionEvent,
        duration_sec: u32,
    ) -> u64 {
        assert_eq!(session.handle(stop), vec![Command::StopRecording]);
        let commands = session.handle(SessionEvent::RecordingStopped { duration_sec });
        match commands.as_slice() {
            [Command::Transcribe { turn }] => *turn,
            other => panic!("expected Transcribe, got {other:?}"),
        }
    }

    #[test]
    fn start_with_questions_enters_prep() {
        let mut session = InterviewSession::new(5, 60);
        assert!(session.handle(started(3)).is_empty());
        assert_eq!(session.phase(), &Phase::Prep { remaining: 5 });
        assert_eq!(session.total_questions(), 3);
        assert_eq!(session.answers().len(), 3);
    }

    #[test]
    fn empty_question_list_is_a_domain_error() {
        let mut session = InterviewSession::new(5, 60);
        session.handle(SessionEvent::Started(SessionInfo::default()));
        assert!(matches!(session.phase(), Phase::Error { .. }));
    }

    #[test]
    fn start_failure_enters_error() {
        let mut session = InterviewSession::new(5, 60);
        session.handle(SessionEvent::StartFailed {
            message: "repo not found".into(),
        });
        assert_eq!(
            session.phase(),
            &Phase::Error {
                message: "repo not found".into()
            }
        );
    }

    #[test]
    fn duplicate_start_is_ignored() {
        let mut session = InterviewSession::new(5, 60);
        session.handle(started(3));
        session.handle(started(5));
        assert_eq!(session.total_questions(), 3);
    }

    #[test]
    fn backend_duration_overrides_default_budget() {
        let mut session = InterviewSession::new(5, 60);
        session.handle(SessionEvent::Started(SessionInfo {
            session_id: None,
            duration_sec: Some(90),
            questions: questions(1),
        }));
        assert_eq!(session.answer_seconds(), 90);
    }

    #[test]
    fn prep_countdown_starts_recording_at_zero() {
        let mut session = InterviewSession::new(3, 60);
        session.handle(started(1));
        assert!(session.handle(SessionEvent::PrepTick).is_empty());
        assert_eq!(session.phase(), &Phase::Prep { remaining: 2 });
        assert!(session.handle(SessionEvent::PrepTick).is_empty());
        assert_eq!(
            session.handle(SessionEvent::PrepTick),
            vec![Command::StartRecording]
        );
        assert_eq!(session.phase(), &Phase::Answer { stopping: None });
    }

    #[test]
    fn first_stop_request_wins_the_race() {
        let mut session = InterviewSession::new(1, 60);
        session.handle(started(1));
        finish_prep(&mut session);

        assert_eq!(
            session.handle(SessionEvent::NextRequested),
            vec![Command::StopRecording]
        );
        // A timeout landing just after the click must not stop twice.
        assert!(session.handle(SessionEvent::AnswerTimeout).is_empty());
        assert_eq!(
            session.phase(),
            &Phase::Answer {
                stopping: Some(EndReason::Manual)
            }
        );
    }

    #[test]
    fn full_run_collects_answers_in_question_order() {
        let mut session = InterviewSession::new(2, 60);
        session.handle(started(3));

        // Q1 ends by timeout with transcript "hello".
        finish_prep(&mut session);
        let turn = stop_and_capture(&mut session, SessionEvent::AnswerTimeout, 60);
        assert!(
            session
                .handle(SessionEvent::TranscriptReady {
                    turn,
                    text: "hello".into()
                })
                .is_empty()
        );
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.phase(), &Phase::Prep { remaining: 2 });

        // Q2 ends manually.
        finish_prep(&mut session);
        let turn = stop_and_capture(&mut session, SessionEvent::NextRequested, 21);
        session.handle(SessionEvent::TranscriptReady {
            turn,
            text: "second answer".into(),
        });

        // Q3 ends by timeout; its transcript completes the set.
        finish_prep(&mut session);
        let turn = stop_and_capture(&mut session, SessionEvent::AnswerTimeout, 60);
        let commands = session.handle(SessionEvent::TranscriptReady {
            turn,
            text: "third".into(),
        });

        let [Command::SubmitFeedback {
            session_id,
            answers,
        }] = commands.as_slice()
        else {
            panic!("expected SubmitFeedback, got {commands:?}");
        };
        assert_eq!(session_id.as_deref(), Some("s-1"));
        assert_eq!(answers.len(), 3);
        assert_eq!(
            answers.iter().map(|a| a.question_id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(answers[0].answer_text, "hello");
        assert_eq!(answers[0].end_reason, EndReason::Timeout);
        assert_eq!(answers[1].end_reason, EndReason::Manual);
        assert_eq!(answers[1].duration_sec, 21);
        assert_eq!(session.phase(), &Phase::Analyzing);

        let feedback = Feedback {
            overall_score: 82.0,
            summary: "solid".into(),
        };
        session.handle(SessionEvent::FeedbackReady(feedback.clone()));
        assert_eq!(session.phase(), &Phase::Done { feedback });
    }

    #[test]
    fn stt_failure_finalizes_empty_answer_and_continues() {
        let mut session = InterviewSession::new(1, 60);
        session.handle(started(3));

        // Q1 succeeds.
        finish_prep(&mut session);
        let turn = stop_and_capture(&mut session, SessionEvent::NextRequested, 10);
        session.handle(SessionEvent::TranscriptReady {
            turn,
            text: "fine".into(),
        });

        // Q2's STT call fails; the session must still advance to Q3.
        finish_prep(&mut session);
        let turn = stop_and_capture(&mut session, SessionEvent::AnswerTimeout, 60);
        session.handle(SessionEvent::TranscriptFailed { turn });

        let second = session.answers()[1].as_ref().expect("answer finalized");
        assert_eq!(second.answer_text, "");
        assert_eq!(second.end_reason, EndReason::SttError);
        assert_eq!(session.current_index(), 2);
        assert!(matches!(session.phase(), Phase::Prep { .. }));
    }

    #[test]
    fn late_transcript_for_an_earlier_question_is_discarded() {
        let mut session = InterviewSession::new(1, 60);
        session.handle(started(2));

        finish_prep(&mut session);
        let first_turn = stop_and_capture(&mut session, SessionEvent::NextRequested, 9);
        session.handle(SessionEvent::TranscriptReady {
            turn: first_turn,
            text: "first".into(),
        });

        // Q2 is already recording when a stale completion for Q1 lands.
        finish_prep(&mut session);
        assert!(
            session
                .handle(SessionEvent::TranscriptReady {
                    turn: first_turn,
                    text: "stale".into()
                })
                .is_empty()
        );
        assert_eq!(session.phase(), &Phase::Answer { stopping: None });
        assert!(session.answers()[1].is_none());
        assert_eq!(
            session.answers()[0].as_ref().unwrap().answer_text,
            "first"
        );
    }

    #[test]
    fn transcript_without_a_recorded_stop_is_ignored() {
        let mut session = InterviewSession::new(1, 60);
        session.handle(started(1));
        finish_prep(&mut session);

        // No stop was requested and the recorder never completed.
        assert!(
            session
                .handle(SessionEvent::TranscriptReady {
                    turn: 1,
                    text: "ghost".into()
                })
                .is_empty()
        );
        assert!(session.answers()[0].is_none());
    }

    #[test]
    fn feedback_failure_ends_in_error() {
        let mut session = InterviewSession::new(1, 60);
        session.handle(started(1));
        finish_prep(&mut session);
        let turn = stop_and_capture(&mut session, SessionEvent::AnswerTimeout, 60);
        session.handle(SessionEvent::TranscriptReady {
            turn,
            text: "only".into(),
        });
        assert_eq!(session.phase(), &Phase::Analyzing);

        session.handle(SessionEvent::FeedbackFailed {
            message: "model overloaded".into(),
        });
        assert_eq!(
            session.phase(),
            &Phase::Error {
                message: "model overloaded".into()
            }
        );
    }

    #[test]
    fn recorder_failure_surfaces_as_session_error() {
        let mut session = InterviewSession::new(1, 60);
        session.handle(started(1));
        finish_prep(&mut session);

        session.handle(SessionEvent::RecorderFailed {
            message: "permission denied".into(),
        });
        assert!(matches!(session.phase(), Phase::Error { .. }));
    }

    #[test]
    fn recorder_failure_during_analysis_is_ignored() {
        let mut session = InterviewSession::new(1, 60);
        session.handle(started(1));
        finish_prep(&mut session);
        let turn = stop_and_capture(&mut session, SessionEvent::NextRequested, 5);
        session.handle(SessionEvent::TranscriptReady {
            turn,
            text: "done".into(),
        });
        assert_eq!(session.phase(), &Phase::Analyzing);

        session.handle(SessionEvent::RecorderFailed {
            message: "device unplugged".into(),
        });
        assert_eq!(session.phase(), &Phase::Analyzing);
    }
}
