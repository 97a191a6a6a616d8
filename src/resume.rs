//! In-memory resume editor state. Each operation is a tagged update against
//! one field or one collection entry; the document is never replaced behind
//! the editor's back.

use crate::models::{Education, Experience, ResumeDocument};

#[derive(Debug, Clone)]
pub enum PersonalField {
    FullName(String),
    Email(String),
    Phone(String),
    Location(String),
    Website(String),
}

#[derive(Debug, Clone)]
pub enum ExperienceField {
    Company(String),
    Role(String),
    StartDate(String),
    EndDate(String),
    Current(bool),
    Description(String),
}

#[derive(Debug, Clone)]
pub enum EducationField {
    School(String),
    Degree(String),
    GraduationDate(String),
}

pub struct ResumeEditor {
    document: ResumeDocument,
}

impl ResumeEditor {
    pub fn new() -> Self {
        Self {
            document: ResumeDocument::default(),
        }
    }

    pub fn document(&self) -> &ResumeDocument {
        &self.document
    }

    pub fn set_personal(&mut self, field: PersonalField) {
        match field {
            PersonalField::FullName(v) => self.document.full_name = v,
            PersonalField::Email(v) => self.document.email = v,
            PersonalField::Phone(v) => self.document.phone = v,
            PersonalField::Location(v) => self.document.location = v,
            PersonalField::Website(v) => self.document.website = v,
        }
    }

    pub fn set_summary(&mut self, summary: String) {
        self.document.summary = summary;
    }

    /// New entries go to the front, matching how the editor displays the most
    /// recent role first.
    pub fn add_experience(&mut self) -> String {
        let entry = Experience::empty();
        let id = entry.id.clone();
        self.document.experience.insert(0, entry);
        id
    }

    pub fn update_experience(&mut self, id: &str, field: ExperienceField) -> bool {
        let Some(entry) = self.document.experience.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        match field {
            ExperienceField::Company(v) => entry.company = v,
            ExperienceField::Role(v) => entry.role = v,
            ExperienceField::StartDate(v) => entry.start_date = v,
            ExperienceField::EndDate(v) => entry.end_date = v,
            ExperienceField::Current(v) => entry.current = v,
            ExperienceField::Description(v) => entry.description = v,
        }
        true
    }

    pub fn remove_experience(&mut self, id: &str) {
        self.document.experience.retain(|e| e.id != id);
    }

    pub fn add_education(&mut self) -> String {
        let entry = Education::empty();
        let id = entry.id.clone();
        self.document.education.insert(0, entry);
        id
    }

    pub fn update_education(&mut self, id: &str, field: EducationField) -> bool {
        let Some(entry) = self.document.education.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        match field {
            EducationField::School(v) => entry.school = v,
            EducationField::Degree(v) => entry.degree = v,
            EducationField::GraduationDate(v) => entry.graduation_date = v,
        }
        true
    }

    pub fn remove_education(&mut self, id: &str) {
        self.document.education.retain(|e| e.id != id);
    }

    /// The one place a flat string becomes a structured list.
    pub fn set_skills_from_input(&mut self, input: &str) {
        self.document.skills = parse_skills(input);
    }

    pub fn skills_input(&self) -> String {
        self.document.skills.join(", ")
    }

    pub fn reset(&mut self) {
        self.document = ResumeDocument::default();
    }
}

impl Default for ResumeEditor {
    fn default() -> Self {
        Self::new()
    }
}

/// Split on commas, trim each entry, drop empties, preserve order.
pub fn parse_skills(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skills_trims_and_drops_empties() {
        assert_eq!(
            parse_skills("React, TypeScript,  , Go"),
            vec!["React", "TypeScript", "Go"]
        );
    }

    #[test]
    fn test_parse_skills_empty_input() {
        assert!(parse_skills("").is_empty());
        assert!(parse_skills(" , ,, ").is_empty());
    }

    #[test]
    fn test_personal_field_updates() {
        let mut editor = ResumeEditor::new();
        editor.set_personal(PersonalField::FullName("Ada Lovelace".into()));
        editor.set_personal(PersonalField::Email("ada@example.com".into()));
        assert_eq!(editor.document().full_name, "Ada Lovelace");
        assert_eq!(editor.document().email, "ada@example.com");
    }

    #[test]
    fn test_experience_prepends() {
        let mut editor = ResumeEditor::new();
        let first = editor.add_experience();
        let second = editor.add_experience();
        let ids: Vec<&str> = editor
            .document()
            .experience
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec![second.as_str(), first.as_str()]);
    }

    #[test]
    fn test_experience_add_then_remove_round_trips() {
        let mut editor = ResumeEditor::new();
        editor.add_experience();
        let before: Vec<String> = editor
            .document()
            .experience
            .iter()
            .map(|e| e.id.clone())
            .collect();

        let added = editor.add_experience();
        editor.remove_experience(&added);

        let after: Vec<String> = editor
            .document()
            .experience
            .iter()
            .map(|e| e.id.clone())
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_education_add_then_remove_round_trips() {
        let mut editor = ResumeEditor::new();
        let added = editor.add_education();
        editor.remove_education(&added);
        assert!(editor.document().education.is_empty());
    }

    #[test]
    fn test_update_experience_by_id() {
        let mut editor = ResumeEditor::new();
        let id = editor.add_experience();
        assert!(editor.update_experience(&id, ExperienceField::Company("Acme".into())));
        assert!(editor.update_experience(&id, ExperienceField::Current(true)));
        let entry = &editor.document().experience[0];
        assert_eq!(entry.company, "Acme");
        assert!(entry.current);
    }

    #[test]
    fn test_update_missing_id_is_noop() {
        let mut editor = ResumeEditor::new();
        assert!(!editor.update_experience("nope", ExperienceField::Role("X".into())));
        assert!(!editor.update_education("nope", EducationField::Degree("X".into())));
    }

    #[test]
    fn test_reset_restores_empty_document() {
        let mut editor = ResumeEditor::new();
        editor.set_summary("a summary".into());
        editor.add_experience();
        editor.set_skills_from_input("Rust, Go");
        editor.reset();
        assert!(editor.document().summary.is_empty());
        assert!(editor.document().experience.is_empty());
        assert!(editor.document().skills.is_empty());
    }

    #[test]
    fn test_skills_input_round_trip() {
        let mut editor = ResumeEditor::new();
        editor.set_skills_from_input("Rust,  Go , SQL");
        assert_eq!(editor.skills_input(), "Rust, Go, SQL");
    }
}
