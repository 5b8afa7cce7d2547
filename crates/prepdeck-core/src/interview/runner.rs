//! Async driver that runs an interview session end to end.
//!
//! The reducer in [`session`](crate::interview::session) stays pure; this
//! module wires it to real resources: a dedicated recorder thread (cpal
//! streams are not `Send`), a one-second ticker for the countdowns, and
//! spawned tasks for the network calls, all funneled through one event
//! channel.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Result, anyhow};
use tokio::sync::mpsc;

use crate::api;
use crate::audio::{MicRecorder, RecorderConfig, RecordingOutput};
use crate::http::ApiClient;
use crate::interview::model::Feedback;
use crate::interview::session::{Command, InterviewSession, Phase, SessionEvent};
use crate::interview::timer::Countdown;

/// User actions forwarded into a running session.
#[derive(Debug, Clone, Copy)]
pub enum UserIntent {
    NextQuestion,
}

/// Rendering hook; the CLI implements this to draw the session.
pub trait SessionObserver {
    /// Called after every applied event.
    fn phase_changed(&mut self, _session: &InterviewSession) {}

    /// Called once per second while the answer clock runs.
    fn answer_tick(&mut self, _remaining: u32) {}
}

#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub prep_seconds: u32,
    pub answer_seconds: u32,
    pub recorder: RecorderConfig,
}

impl SessionOptions {
    pub fn from_settings(settings: &crate::settings::Settings) -> Self {
        let recorder = match &settings.microphone_device {
            Some(device) => RecorderConfig::new().with_device(device.clone()),
            None => RecorderConfig::new(),
        };
        Self {
            prep_seconds: settings.prep_seconds,
            answer_seconds: settings.answer_seconds,
            recorder,
        }
    }
}

enum RecorderCtl {
    Start,
    Stop,
}

/// Run the recorder on its own thread, reporting completions (or failures)
/// back through `done_tx`. The thread exits when the control channel closes,
/// dropping the recorder and releasing the device.
fn spawn_recorder(
    config: RecorderConfig,
    done_tx: mpsc::UnboundedSender<Result<RecordingOutput, String>>,
) -> crossbeam_channel::Sender<RecorderCtl> {
    let (ctl_tx, ctl_rx) = crossbeam_channel::unbounded();
    thread::spawn(move || {
        let mut recorder = MicRecorder::new(config);
        while let Ok(ctl) = ctl_rx.recv() {
            match ctl {
                RecorderCtl::Start => {
                    if let Err(err) = recorder.start() {
                        let _ = done_tx.send(Err(err.to_string()));
                    }
                }
                RecorderCtl::Stop => {
                    let _ = done_tx.send(recorder.stop().map_err(|e| e.to_string()));
                }
            }
        }
    });
    ctl_tx
}

/// Prep is entered on arbitrary event timing (session start, a transcript
/// landing), so the shared ticker must be reset there to give the countdown
/// a full first second instead of the remainder of the current interval.
fn entered_prep(was_prep: bool, phase: &Phase) -> bool {
    !was_prep && matches!(phase, Phase::Prep { .. })
}

/// Run one session from start to final feedback.
///
/// Returns the feedback on success; a terminal error phase becomes an `Err`
/// carrying the session's error message.
pub async fn run_session(
    client: Arc<ApiClient>,
    repo_url: &str,
    options: SessionOptions,
    mut intents: mpsc::UnboundedReceiver<UserIntent>,
    observer: &mut dyn SessionObserver,
) -> Result<Feedback> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<SessionEvent>();
    let (recorder_done_tx, mut recorder_done_rx) = mpsc::unbounded_channel();
    let recorder_ctl = spawn_recorder(options.recorder.clone(), recorder_done_tx);

    let mut session = InterviewSession::new(options.prep_seconds, options.answer_seconds);
    observer.phase_changed(&session);

    // Session start fires exactly once per run.
    {
        let client = Arc::clone(&client);
        let repo_url = repo_url.to_string();
        let event_tx = event_tx.clone();
        tokio::spawn(async move {
            let event = match api::start_interview(&client, &repo_url).await {
                Ok(info) => SessionEvent::Started(info),
                Err(err) => SessionEvent::StartFailed {
                    message: err.to_string(),
                },
            };
            let _ = event_tx.send(event);
        });
    }

    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut answer_clock = Countdown::new(options.answer_seconds);
    // Audio captured by the recorder, consumed by the next Transcribe command.
    let mut pending_audio: Option<Vec<u8>> = None;
    let mut intents_open = true;

    loop {
        match session.phase() {
            Phase::Done { feedback } => return Ok(feedback.clone()),
            Phase::Error { message } => return Err(anyhow!(message.clone())),
            _ => {}
        }

        let event = tokio::select! {
            _ = ticker.tick() => match session.phase() {
                Phase::Prep { .. } => Some(SessionEvent::PrepTick),
                Phase::Answer { stopping: None } => {
                    if answer_clock.tick() {
                        Some(SessionEvent::AnswerTimeout)
                    } else {
                        observer.answer_tick(answer_clock.remaining());
                        None
                    }
                }
                _ => None,
            },
            intent = intents.recv(), if intents_open => match intent {
                Some(UserIntent::NextQuestion) => Some(SessionEvent::NextRequested),
                None => {
                    intents_open = false;
                    None
                }
            },
            done = recorder_done_rx.recv() => match done {
                Some(Ok(output)) => {
                    pending_audio = Some(output.wav_data);
                    Some(SessionEvent::RecordingStopped {
                        duration_sec: output.duration_sec,
                    })
                }
                Some(Err(message)) => Some(SessionEvent::RecorderFailed { message }),
                None => Some(SessionEvent::RecorderFailed {
                    message: "recorder thread stopped unexpectedly".into(),
                }),
            },
            event = event_rx.recv() => event,
        };

        let Some(event) = event else { continue };
        if let SessionEvent::TranscriptFailed { .. } = &event {
            crate::warn!("speech-to-text failed; keeping an empty answer");
        }

        let was_prep = matches!(session.phase(), Phase::Prep { .. });
        let commands = session.handle(event);
        if entered_prep(was_prep, session.phase()) {
            ticker.reset();
        }
        observer.phase_changed(&session);

        for command in commands {
            match command {
                Command::StartRecording => {
                    ticker.reset();
                    answer_clock.reset_to(session.answer_seconds());
                    pending_audio = None;
                    if recorder_ctl.send(RecorderCtl::Start).is_err() {
                        let _ = event_tx.send(SessionEvent::RecorderFailed {
                            message: "recorder thread stopped unexpectedly".into(),
                        });
                    }
                }
                Command::StopRecording => {
                    let _ = recorder_ctl.send(RecorderCtl::Stop);
                }
                Command::Transcribe { turn } => {
                    let Some(wav_data) = pending_audio.take() else {
                        continue;
                    };
                    let client = Arc::clone(&client);
                    let event_tx = event_tx.clone();
                    tokio::spawn(async move {
                        let event = match api::transcribe_answer(&client, wav_data).await {
                            Ok(text) => SessionEvent::TranscriptReady { turn, text },
                            Err(err) => {
                                crate::verbose!("stt error: {err}");
                                SessionEvent::TranscriptFailed { turn }
                            }
                        };
                        let _ = event_tx.send(event);
                    });
                }
                Command::SubmitFeedback {
                    session_id,
                    answers,
                } => {
                    let client = Arc::clone(&client);
                    let event_tx = event_tx.clone();
                    tokio::spawn(async move {
                        let event =
                            match api::request_feedback(&client, session_id.as_deref(), &answers)
                                .await
                            {
                                Ok(feedback) => SessionEvent::FeedbackReady(feedback),
                                Err(err) => SessionEvent::FeedbackFailed {
                                    message: err.to_string(),
                                },
                            };
                        let _ = event_tx.send(event);
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticker_is_reset_only_when_prep_is_entered() {
        // Session start and a finalized answer both land mid-interval.
        assert!(entered_prep(false, &Phase::Prep { remaining: 5 }));
        // Ordinary prep ticks keep the interval running.
        assert!(!entered_prep(true, &Phase::Prep { remaining: 4 }));
        // Answer entry is driven by a prep tick and already aligned.
        assert!(!entered_prep(true, &Phase::Answer { stopping: None }));
        assert!(!entered_prep(false, &Phase::Analyzing));
    }
}
