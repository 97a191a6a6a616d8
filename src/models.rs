use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Experience {
    pub id: String,
    pub company: String,
    pub role: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: String,
}

impl Experience {
    pub fn empty() -> Self {
        Self {
            id: new_id(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Education {
    pub id: String,
    pub school: String,
    pub degree: String,
    pub graduation_date: String,
}

impl Education {
    pub fn empty() -> Self {
        Self {
            id: new_id(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub website: String,
    pub summary: String,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Wishlist,
    Applied,
    Interviewing,
    Offer,
    Rejected,
}

impl JobStatus {
    /// Fixed column order for the board.
    pub const ALL: [JobStatus; 5] = [
        JobStatus::Wishlist,
        JobStatus::Applied,
        JobStatus::Interviewing,
        JobStatus::Offer,
        JobStatus::Rejected,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            JobStatus::Wishlist => "Wishlist",
            JobStatus::Applied => "Applied",
            JobStatus::Interviewing => "Interviewing",
            JobStatus::Offer => "Offer",
            JobStatus::Rejected => "Rejected",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: String,
    pub company: String,
    pub position: String,
    pub status: JobStatus,
    pub applied_date: String,
    pub description: Option<String>,
    pub salary: Option<String>,
    pub notes: Option<String>,
}

impl JobApplication {
    pub fn new(company: String, position: String, status: JobStatus) -> Self {
        Self {
            id: new_id(),
            company,
            position,
            status,
            applied_date: chrono::Local::now().format("%Y-%m-%d").to_string(),
            description: None,
            salary: None,
            notes: None,
        }
    }

    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

/// Result of a resume-vs-job-description analysis. Field names match the
/// response schema declared to the AI service; every field is required, so a
/// response missing any of them fails to deserialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub score: f64,
    pub missing_keywords: Vec<String>,
    pub suggestions: Vec<String>,
    pub summary: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
}

impl Speaker {
    /// Role string for the generative-language wire format, which calls the
    /// assistant side "model".
    pub fn wire_role(&self) -> &'static str {
        match self {
            Speaker::User => "user",
            Speaker::Assistant => "model",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub speaker: Speaker,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_order_and_labels() {
        let labels: Vec<&str> = JobStatus::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(
            labels,
            vec!["Wishlist", "Applied", "Interviewing", "Offer", "Rejected"]
        );
    }

    #[test]
    fn test_new_ids_are_unique() {
        let a = new_id();
        let b = new_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_job_application_defaults() {
        let job = JobApplication::new("Acme".into(), "Engineer".into(), JobStatus::Wishlist);
        assert!(!job.id.is_empty());
        assert_eq!(job.status, JobStatus::Wishlist);
        assert!(job.description.is_none());
        assert_eq!(job.description_text(), "");
    }

    #[test]
    fn test_analysis_result_field_names() {
        let json = serde_json::to_value(AnalysisResult {
            score: 82.0,
            missing_keywords: vec!["Kubernetes".into()],
            suggestions: vec!["Add metrics".into()],
            summary: "Good fit".into(),
        })
        .unwrap();
        assert!(json.get("missingKeywords").is_some());
        assert!(json.get("suggestions").is_some());
    }

    #[test]
    fn test_speaker_wire_roles() {
        assert_eq!(Speaker::User.wire_role(), "user");
        assert_eq!(Speaker::Assistant.wire_role(), "model");
    }
}
