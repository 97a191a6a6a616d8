//! In-memory job-application board, grouped by status for rendering.

use anyhow::{bail, Result};

use crate::models::{JobApplication, JobStatus};

/// Per-field update command. One variant per mutable field keeps updates
/// type-safe without a field-name string in sight.
#[derive(Debug, Clone)]
pub enum JobField {
    Company(String),
    Position(String),
    AppliedDate(String),
    Description(String),
    Salary(String),
    Notes(String),
}

#[derive(Debug, Default)]
pub struct JobBoard {
    jobs: Vec<JobApplication>,
}

impl JobBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Company and position are required; everything else can be filled in
    /// later. Returns the new application's id.
    pub fn add(
        &mut self,
        company: &str,
        position: &str,
        status: JobStatus,
        description: &str,
    ) -> Result<String> {
        let company = company.trim();
        let position = position.trim();
        if company.is_empty() || position.is_empty() {
            bail!("company and position are required");
        }

        let mut job = JobApplication::new(company.to_string(), position.to_string(), status);
        if !description.trim().is_empty() {
            job.description = Some(description.to_string());
        }
        let id = job.id.clone();
        self.jobs.push(job);
        Ok(id)
    }

    pub fn get(&self, id: &str) -> Option<&JobApplication> {
        self.jobs.iter().find(|j| j.id == id)
    }

    pub fn update_status(&mut self, id: &str, status: JobStatus) -> bool {
        match self.jobs.iter_mut().find(|j| j.id == id) {
            Some(job) => {
                job.status = status;
                true
            }
            None => false,
        }
    }

    pub fn update(&mut self, id: &str, field: JobField) -> bool {
        let Some(job) = self.jobs.iter_mut().find(|j| j.id == id) else {
            return false;
        };
        match field {
            JobField::Company(v) => job.company = v,
            JobField::Position(v) => job.position = v,
            JobField::AppliedDate(v) => job.applied_date = v,
            JobField::Description(v) => {
                job.description = if v.trim().is_empty() { None } else { Some(v) }
            }
            JobField::Salary(v) => job.salary = if v.trim().is_empty() { None } else { Some(v) },
            JobField::Notes(v) => job.notes = if v.trim().is_empty() { None } else { Some(v) },
        }
        true
    }

    /// Idempotent: removing an unknown id is a no-op. Returns whether
    /// anything was removed so the caller can clear dependent view state.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.jobs.len();
        self.jobs.retain(|j| j.id != id);
        self.jobs.len() != before
    }

    pub fn with_status(&self, status: JobStatus) -> impl Iterator<Item = &JobApplication> {
        self.jobs.iter().filter(move |j| j.status == status)
    }

    pub fn count(&self, status: JobStatus) -> usize {
        self.with_status(status).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &JobApplication> {
        self.jobs.iter()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
