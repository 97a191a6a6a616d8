//! Renders the resume document as a printable Markdown document. Pagination
//! and PDF conversion belong to whatever consumes the file.

use crate::models::ResumeDocument;

pub fn render_markdown(document: &ResumeDocument) -> String {
    let mut out = String::new();

    let name = if document.full_name.trim().is_empty() {
        "Your Name"
    } else {
        document.full_name.trim()
    };
    out.push_str(&format!("# {}\n\n", name));

    let contact: Vec<&str> = [
        document.email.as_str(),
        document.phone.as_str(),
        document.location.as_str(),
        document.website.as_str(),
    ]
    .into_iter()
    .filter(|s| !s.trim().is_empty())
    .collect();
    if !contact.is_empty() {
        out.push_str(&format!("{}\n\n", contact.join(" | ")));
    }

    if !document.summary.trim().is_empty() {
        out.push_str("## Summary\n\n");
        out.push_str(document.summary.trim());
        out.push_str("\n\n");
    }

    if !document.experience.is_empty() {
        out.push_str("## Experience\n\n");
        for entry in &document.experience {
            out.push_str(&format!("### {} — {}\n", entry.role, entry.company));
            let end = if entry.current {
                "Present"
            } else {
                entry.end_date.as_str()
            };
            out.push_str(&format!("*{} – {}*\n\n", entry.start_date, end));
            if !entry.description.trim().is_empty() {
                out.push_str(entry.description.trim());
                out.push_str("\n\n");
            }
        }
    }

    if !document.education.is_empty() {
        out.push_str("## Education\n\n");
        for entry in &document.education {
            out.push_str(&format!(
                "**{}**, {} ({})\n\n",
                entry.degree, entry.school, entry.graduation_date
            ));
        }
    }

    if !document.skills.is_empty() {
        out.push_str("## Skills\n\n");
        out.push_str(&document.skills.join(", "));
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Education, Experience};

    fn sample() -> ResumeDocument {
        ResumeDocument {
            full_name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            location: "London".into(),
            summary: "Engineer and analyst.".into(),
            experience: vec![
                Experience {
                    id: "e1".into(),
                    company: "Analytical Engines".into(),
                    role: "Lead Engineer".into(),
                    start_date: "2021".into(),
                    end_date: String::new(),
                    current: true,
                    description: "Designed the core loop.".into(),
                },
                Experience {
                    id: "e2".into(),
                    company: "Babbage & Co".into(),
                    role: "Analyst".into(),
                    start_date: "2018".into(),
                    end_date: "2021".into(),
                    current: false,
                    description: String::new(),
                },
            ],
            education: vec![Education {
                id: "ed1".into(),
                school: "Royal Society".into(),
                degree: "Mathematics".into(),
                graduation_date: "2017".into(),
            }],
            skills: vec!["Rust".into(), "Mathematics".into()],
            ..ResumeDocument::default()
        }
    }

    #[test]
    fn test_current_role_renders_present() {
        let md = render_markdown(&sample());
        assert!(md.contains("*2021 – Present*"));
        assert!(md.contains("*2018 – 2021*"));
    }

    #[test]
    fn test_all_sections_present() {
        let md = render_markdown(&sample());
        assert!(md.starts_with("# Ada Lovelace"));
        assert!(md.contains("ada@example.com | London"));
        assert!(md.contains("## Summary"));
        assert!(md.contains("## Experience"));
        assert!(md.contains("### Lead Engineer — Analytical Engines"));
        assert!(md.contains("## Education"));
        assert!(md.contains("**Mathematics**, Royal Society (2017)"));
        assert!(md.contains("## Skills"));
        assert!(md.contains("Rust, Mathematics"));
    }

    #[test]
    fn test_empty_sections_are_skipped() {
        let md = render_markdown(&ResumeDocument::default());
        assert!(md.starts_with("# Your Name"));
        assert!(!md.contains("## Summary"));
        assert!(!md.contains("## Experience"));
        assert!(!md.contains("## Education"));
        assert!(!md.contains("## Skills"));
    }
}
