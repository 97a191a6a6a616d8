//! Top-level application state. The presentation layer renders this and
//! dispatches into it; nothing else mutates domain state.

use crate::ai::Gateway;
use crate::board::JobBoard;
use crate::interview::{InterviewManager, SessionError};
use crate::models::AnalysisResult;
use crate::resume::ResumeEditor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Resume,
    Board,
    Interview,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Resume, Tab::Board, Tab::Interview];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Resume => "Resume",
            Tab::Board => "Tracker",
            Tab::Interview => "Interview",
        }
    }
}

pub struct App {
    pub tab: Tab,
    pub editor: ResumeEditor,
    pub board: JobBoard,
    pub interview: InterviewManager,
    pub selected_job: Option<String>,
    pub analysis: Option<AnalysisResult>,
    pub status: Option<String>,
}

impl App {
    pub fn new() -> Self {
        Self {
            tab: Tab::Resume,
            editor: ResumeEditor::new(),
            board: JobBoard::new(),
            interview: InterviewManager::new(),
            selected_job: None,
            analysis: None,
            status: None,
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    /// Selecting a different job discards any analysis of the previous one.
    pub fn select_job(&mut self, id: &str) {
        if self.selected_job.as_deref() != Some(id) {
            self.analysis = None;
        }
        self.selected_job = Some(id.to_string());
    }

    pub fn clear_selection(&mut self) {
        self.selected_job = None;
        self.analysis = None;
    }

    /// Deleting a job clears every piece of view state referencing it.
    pub fn delete_job(&mut self, id: &str) -> bool {
        let removed = self.board.remove(id);
        if self.selected_job.as_deref() == Some(id) {
            self.clear_selection();
        }
        removed
    }

    /// Analysis lifecycle: the previous result is discarded when a run
    /// starts; a failed run leaves no partial result and surfaces the error.
    pub fn run_analysis(&mut self, gateway: &Gateway) {
        self.analysis = None;
        let Some(job) = self
            .selected_job
            .as_deref()
            .and_then(|id| self.board.get(id))
        else {
            self.set_status("select a job to analyze");
            return;
        };
        let description = job.description_text().trim().to_string();
        if description.is_empty() {
            self.set_status("this job has no description to analyze against");
            return;
        }

        match gateway.analyze_match(self.editor.document(), &description) {
            Ok(result) => {
                self.status = None;
                self.analysis = Some(result);
            }
            Err(e) => self.set_status(format!("analysis failed: {e}")),
        }
    }

    pub fn generate_summary(&mut self, gateway: &Gateway) {
        let summary = gateway.generate_summary(self.editor.document());
        self.editor.set_summary(summary);
    }

    pub fn start_interview(&mut self, gateway: &Gateway, job_id: &str) {
        let Some(job) = self.board.get(job_id).cloned() else {
            self.set_status("job not found");
            return;
        };
        match self.interview.start(gateway, &job) {
            Ok(()) => {
                self.selected_job = Some(job.id);
                self.status = None;
            }
            Err(e @ SessionError::MissingDescription) => self.set_status(e.to_string()),
            Err(e) => self.set_status(format!("could not start interview: {e}")),
        }
    }

    /// Ending the session also resets the job selection.
    pub fn end_interview(&mut self) {
        self.interview.end();
        self.clear_selection();
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::JobStatus;

    fn app_with_job(description: &str) -> (App, String) {
        let mut app = App::new();
        let id = app
            .board
            .add("Acme", "Engineer", JobStatus::Applied, description)
            .unwrap();
        (app, id)
    }

    #[test]
    fn test_delete_clears_dependent_view_state() {
        let (mut app, id) = app_with_job("jd");
        app.select_job(&id);
        app.analysis = Some(AnalysisResult {
            score: 50.0,
            missing_keywords: vec![],
            suggestions: vec![],
            summary: "s".into(),
        });

        assert!(app.delete_job(&id));
        assert!(app.selected_job.is_none());
        assert!(app.analysis.is_none());
    }

    #[test]
    fn test_delete_other_job_keeps_selection() {
        let (mut app, id) = app_with_job("jd");
        let other = app
            .board
            .add("Initech", "Analyst", JobStatus::Wishlist, "")
            .unwrap();
        app.select_job(&id);

        assert!(app.delete_job(&other));
        assert_eq!(app.selected_job.as_deref(), Some(id.as_str()));
    }

    #[test]
    fn test_delete_missing_id_is_noop() {
        let (mut app, id) = app_with_job("jd");
        app.select_job(&id);
        assert!(!app.delete_job("missing"));
        assert_eq!(app.board.len(), 1);
        assert_eq!(app.selected_job.as_deref(), Some(id.as_str()));
    }

    #[test]
    fn test_reselecting_job_discards_analysis() {
        let (mut app, id) = app_with_job("jd");
        let other = app
            .board
            .add("Initech", "Analyst", JobStatus::Wishlist, "jd2")
            .unwrap();
        app.select_job(&id);
        app.analysis = Some(AnalysisResult {
            score: 10.0,
            missing_keywords: vec![],
            suggestions: vec![],
            summary: "s".into(),
        });

        app.select_job(&other);
        assert!(app.analysis.is_none());
    }

    #[test]
    fn test_analysis_failure_leaves_no_partial_state() {
        let (mut app, id) = app_with_job("jd");
        app.select_job(&id);
        app.analysis = Some(AnalysisResult {
            score: 99.0,
            missing_keywords: vec![],
            suggestions: vec![],
            summary: "old".into(),
        });

        // Disconnected gateway: analyze fails with MissingCredential.
        app.run_analysis(&Gateway::disconnected());
        assert!(app.analysis.is_none());
        assert!(app.status.as_deref().unwrap().contains("analysis failed"));
    }

    #[test]
    fn test_analysis_requires_description() {
        let (mut app, id) = app_with_job("");
        app.select_job(&id);
        app.run_analysis(&Gateway::disconnected());
        assert!(app.analysis.is_none());
        assert!(app.status.as_deref().unwrap().contains("no description"));
    }

    #[test]
    fn test_interview_start_missing_description_warns() {
        let (mut app, id) = app_with_job("");
        app.start_interview(&Gateway::disconnected(), &id);
        assert!(!app.interview.is_active());
        assert!(app.status.as_deref().unwrap().contains("no description"));
    }

    #[test]
    fn test_end_interview_resets_selection() {
        let (mut app, id) = app_with_job("jd");
        app.select_job(&id);
        app.end_interview();
        assert!(app.selected_job.is_none());
        assert!(!app.interview.is_active());
    }

    #[test]
    fn test_generate_summary_with_missing_key_sets_sentinel() {
        let mut app = App::new();
        app.generate_summary(&Gateway::disconnected());
        assert_eq!(
            app.editor.document().summary,
            crate::ai::KEY_MISSING_SUMMARY
        );
    }
}
