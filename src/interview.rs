//! Interview session state machine: Idle -> Active -> Idle. At most one
//! session exists, and within a session at most one turn is in flight.

use thiserror::Error;

use crate::ai::{Conversation, Gateway, GatewayError};
use crate::models::{ChatTurn, JobApplication};

pub const READY_MESSAGE: &str =
    "I am ready to start the interview. Please ask the first question.";
pub const DEFAULT_GREETING: &str =
    "Hello! I'm ready to interview you. Tell me about yourself.";
pub const TURN_FALLBACK: &str =
    "Sorry — I ran into a problem answering that. Let's keep going.";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("this job has no description; add one in the tracker to enable interviews")]
    MissingDescription,
    #[error("a reply is still pending; wait for it before answering again")]
    TurnInFlight,
    #[error("no interview session is active")]
    NotActive,
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

struct Session {
    job_id: String,
    transcript: Vec<ChatTurn>,
    conversation: Conversation,
    turn_pending: bool,
}

#[derive(Default)]
pub struct InterviewManager {
    session: Option<Session>,
}

impl InterviewManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn turn_pending(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.turn_pending)
    }

    pub fn job_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.job_id.as_str())
    }

    pub fn transcript(&self) -> &[ChatTurn] {
        self.session
            .as_ref()
            .map(|s| s.transcript.as_slice())
            .unwrap_or(&[])
    }

    /// Idle -> Active. A job without a description blocks the transition
    /// before the gateway is ever touched. Any prior session is discarded.
    /// Transcript entry 0 is the assistant's opening question, or the fixed
    /// greeting when the opening turn fails or comes back empty.
    pub fn start(&mut self, gateway: &Gateway, job: &JobApplication) -> Result<(), SessionError> {
        let description = job.description_text().trim();
        if description.is_empty() {
            return Err(SessionError::MissingDescription);
        }

        self.session = None;
        let mut conversation = gateway.start_interview(description)?;

        let opening = match gateway.interview_turn(&mut conversation, READY_MESSAGE) {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            _ => DEFAULT_GREETING.to_string(),
        };

        self.session = Some(Session {
            job_id: job.id.clone(),
            transcript: vec![ChatTurn::assistant(opening)],
            conversation,
            turn_pending: false,
        });
        Ok(())
    }

    /// Appends the user's turn optimistically and marks it pending. A second
    /// submission while one is outstanding is rejected, never interleaved.
    pub fn begin_turn(&mut self, text: &str) -> Result<(), SessionError> {
        let session = self.session.as_mut().ok_or(SessionError::NotActive)?;
        if session.turn_pending {
            return Err(SessionError::TurnInFlight);
        }
        session.transcript.push(ChatTurn::user(text));
        session.turn_pending = true;
        Ok(())
    }

    /// Runs the pending turn against the gateway and records the reply, or
    /// the fallback apology on failure. Every path clears the pending flag.
    pub fn resolve_turn(&mut self, gateway: &Gateway) -> Result<(), SessionError> {
        let session = self.session.as_mut().ok_or(SessionError::NotActive)?;
        if !session.turn_pending {
            return Ok(());
        }

        let message = session
            .transcript
            .last()
            .map(|turn| turn.text.clone())
            .unwrap_or_default();

        let reply = match gateway.interview_turn(&mut session.conversation, &message) {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            _ => TURN_FALLBACK.to_string(),
        };
        session.transcript.push(ChatTurn::assistant(reply));
        session.turn_pending = false;
        Ok(())
    }

    /// Synchronous convenience for the blocking UI path.
    pub fn submit(&mut self, gateway: &Gateway, text: &str) -> Result<(), SessionError> {
        self.begin_turn(text)?;
        self.resolve_turn(gateway)
    }

    /// Active -> Idle. Unconditional; transcript and conversation handle are
    /// dropped together.
    pub fn end(&mut self) {
        self.session = None;
    }
}
