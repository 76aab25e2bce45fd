//! Deterministic preview rendering.
//!
//! `render` is a pure function from the document model to a structured,
//! single-column document: the same projection backs the live on-screen
//! preview and the eventual export. Section order is fixed (header, summary,
//! skills, experience, projects, education, certifications, languages), a
//! section is emitted only when its backing data is non-empty, and no list
//! is ever re-sorted.

use serde::Serialize;

use crate::builder::document::{JobEntry, ResumeDocument};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredDocument {
    pub header: Header,
    pub sections: Vec<Section>,
}

/// The contact header. Name and title render as-is; the contact line holds
/// only the fields that are actually present, in a fixed order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub name: String,
    pub title: String,
    pub contact: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Section {
    Summary { text: String },
    Skills { rows: Vec<SkillRow> },
    Experience { jobs: Vec<RenderedJob> },
    Projects { projects: Vec<RenderedProject> },
    Education { entries: Vec<RenderedEducation> },
    Certifications { items: Vec<String> },
    Languages { line: String },
}

impl Section {
    pub fn heading(&self) -> &'static str {
        match self {
            Section::Summary { .. } => "Professional Summary",
            Section::Skills { .. } => "Skills",
            Section::Experience { .. } => "Work Experience",
            Section::Projects { .. } => "Projects",
            Section::Education { .. } => "Education",
            Section::Certifications { .. } => "Certifications",
            Section::Languages { .. } => "Languages",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillRow {
    pub label: &'static str,
    pub items: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedJob {
    pub title: String,
    pub company: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedProject {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedEducation {
    pub institution: String,
    pub degree: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dates: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Renders the document into its structured single-column form.
pub fn render(doc: &ResumeDocument) -> StructuredDocument {
    let mut sections = Vec::new();

    if !doc.summary.trim().is_empty() {
        sections.push(Section::Summary {
            text: doc.summary.clone(),
        });
    }

    if !doc.skills.is_empty() {
        let mut rows = Vec::new();
        if !doc.skills.core.is_empty() {
            rows.push(SkillRow {
                label: "Core",
                items: doc.skills.core.joined(),
            });
        }
        if !doc.skills.tools.is_empty() {
            rows.push(SkillRow {
                label: "Tools",
                items: doc.skills.tools.joined(),
            });
        }
        if !doc.skills.soft.is_empty() {
            rows.push(SkillRow {
                label: "Soft Skills",
                items: doc.skills.soft.joined(),
            });
        }
        sections.push(Section::Skills { rows });
    }

    if !doc.experience.is_empty() {
        sections.push(Section::Experience {
            jobs: doc.experience.iter().map(render_job).collect(),
        });
    }

    if !doc.projects.is_empty() {
        sections.push(Section::Projects {
            projects: doc
                .projects
                .iter()
                .map(|p| RenderedProject {
                    title: p.title.clone(),
                    role: present(&p.role),
                    description: p.description.clone(),
                    tools: present(&p.tools),
                    impact: present(&p.impact),
                })
                .collect(),
        });
    }

    if !doc.education.is_empty() {
        sections.push(Section::Education {
            entries: doc
                .education
                .iter()
                .map(|e| RenderedEducation {
                    institution: e.institution.clone(),
                    degree: e.degree.clone(),
                    dates: education_dates(
                        e.start_date.as_deref().unwrap_or(""),
                        e.end_date.as_deref().unwrap_or(""),
                    ),
                    notes: present(&e.notes),
                })
                .collect(),
        });
    }

    if !doc.certifications.is_empty() {
        sections.push(Section::Certifications {
            items: doc
                .certifications
                .iter()
                .map(|c| match c.date.as_deref().filter(|d| !d.is_empty()) {
                    Some(date) => format!("{} — {} ({date})", c.name, c.issuer),
                    None => format!("{} — {}", c.name, c.issuer),
                })
                .collect(),
        });
    }

    if !doc.languages.is_empty() {
        sections.push(Section::Languages {
            line: doc
                .languages
                .iter()
                .map(|l| format!("{} ({})", l.language, l.proficiency))
                .collect::<Vec<_>>()
                .join(", "),
        });
    }

    StructuredDocument {
        header: render_header(doc),
        sections,
    }
}

fn render_header(doc: &ResumeDocument) -> Header {
    let personal = &doc.personal;
    let mut contact = Vec::new();
    for field in [
        Some(&personal.email),
        Some(&personal.phone),
        personal.location.as_ref(),
        personal.linkedin.as_ref(),
        personal.portfolio.as_ref(),
    ]
    .into_iter()
    .flatten()
    {
        if !field.is_empty() {
            contact.push(field.clone());
        }
    }
    Header {
        name: personal.full_name.clone(),
        title: personal.title.clone(),
        contact,
    }
}

fn render_job(job: &JobEntry) -> RenderedJob {
    RenderedJob {
        title: job.title.clone(),
        company: job.company.clone(),
        location: present(&job.location),
        date_range: job_dates(&job.start_date, job.end_date.as_deref(), job.current),
        summary: present(&job.summary),
        bullets: job.achievements.iter().map(|a| a.text.clone()).collect(),
    }
}

/// `start – end`, or `start – Present` for a current role. The dash is
/// emitted only when a start date exists; with no start date the range
/// degrades to the end marker alone, or nothing.
fn job_dates(start: &str, end: Option<&str>, current: bool) -> Option<String> {
    let end = if current {
        Some("Present")
    } else {
        end.filter(|e| !e.is_empty())
    };
    match (start.is_empty(), end) {
        (true, None) => None,
        (true, Some(end)) => Some(end.to_string()),
        (false, None) => Some(start.to_string()),
        (false, Some(end)) => Some(format!("{start} – {end}")),
    }
}

/// Education dates use the original's `start - end` form, again with the
/// dash conditional on a start date.
fn education_dates(start: &str, end: &str) -> Option<String> {
    match (start.is_empty(), end.is_empty()) {
        (true, true) => None,
        (true, false) => Some(end.to_string()),
        (false, true) => Some(start.to_string()),
        (false, false) => Some(format!("{start} - {end}")),
    }
}

fn present(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|v| !v.is_empty()).map(str::to_string)
}

impl StructuredDocument {
    /// Plain-text single-column projection, the body shown in the ATS
    /// preview pane.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.header.name);
        out.push('\n');
        if !self.header.title.is_empty() {
            out.push_str(&self.header.title);
            out.push('\n');
        }
        if !self.header.contact.is_empty() {
            out.push_str(&self.header.contact.join(" • "));
            out.push('\n');
        }

        for section in &self.sections {
            out.push('\n');
            out.push_str(&section.heading().to_uppercase());
            out.push('\n');
            match section {
                Section::Summary { text } => {
                    out.push_str(text);
                    out.push('\n');
                }
                Section::Skills { rows } => {
                    for row in rows {
                        out.push_str(&format!("{}: {}\n", row.label, row.items));
                    }
                }
                Section::Experience { jobs } => {
                    for job in jobs {
                        match &job.date_range {
                            Some(range) => out.push_str(&format!("{} | {range}\n", job.title)),
                            None => out.push_str(&format!("{}\n", job.title)),
                        }
                        match &job.location {
                            Some(location) => {
                                out.push_str(&format!("{}, {location}\n", job.company))
                            }
                            None => out.push_str(&format!("{}\n", job.company)),
                        }
                        if let Some(summary) = &job.summary {
                            out.push_str(summary);
                            out.push('\n');
                        }
                        for bullet in &job.bullets {
                            out.push_str(&format!("• {bullet}\n"));
                        }
                    }
                }
                Section::Projects { projects } => {
                    for project in projects {
                        match &project.role {
                            Some(role) => out.push_str(&format!("{} - {role}\n", project.title)),
                            None => out.push_str(&format!("{}\n", project.title)),
                        }
                        out.push_str(&project.description);
                        out.push('\n');
                        if let Some(tools) = &project.tools {
                            out.push_str(&format!("Stack: {tools}\n"));
                        }
                        if let Some(impact) = &project.impact {
                            out.push_str(&format!("Impact: {impact}\n"));
                        }
                    }
                }
                Section::Education { entries } => {
                    for entry in entries {
                        match &entry.dates {
                            Some(dates) => {
                                out.push_str(&format!("{} | {dates}\n", entry.institution))
                            }
                            None => out.push_str(&format!("{}\n", entry.institution)),
                        }
                        out.push_str(&entry.degree);
                        out.push('\n');
                        if let Some(notes) = &entry.notes {
                            out.push_str(notes);
                            out.push('\n');
                        }
                    }
                }
                Section::Certifications { items } => {
                    for item in items {
                        out.push_str(&format!("• {item}\n"));
                    }
                }
                Section::Languages { line } => {
                    out.push_str(line);
                    out.push('\n');
                }
            }
        }
        out
    }
}
