//! The resume document model edited by the builder wizard.
//!
//! A `ResumeDocument` is the single aggregate the five wizard steps write
//! into. Steps never mutate it directly: each step validates its own draft
//! and emits a `ResumePatch`, which the wizard merges with top-level
//! overwrite semantics (see [`ResumeDocument::merge`]). The document is
//! persisted as an opaque JSON blob in the `resumes.content` column, so all
//! types here serialize with the camelCase field names the stored blobs use.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Contact block rendered at the top of the resume. All required fields are
/// enforced by the personal step, not here; a freshly created document holds
/// empty strings until step 1 is submitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub portfolio: Option<String>,
}

/// An insertion-ordered set of skill tags. Entries are deduplicated with
/// case-sensitive exact matching; insertion order is preserved and never
/// re-sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet(Vec<String>);

impl SkillSet {
    /// Adds a tag after trimming. Returns `false` (and leaves the set
    /// untouched) when the trimmed tag is empty or already present.
    pub fn add(&mut self, raw: &str) -> bool {
        let tag = raw.trim();
        if tag.is_empty() || self.0.iter().any(|t| t == tag) {
            return false;
        }
        self.0.push(tag.to_string());
        true
    }

    /// Removes the exact matching tag, if present.
    pub fn remove(&mut self, tag: &str) {
        self.0.retain(|t| t != tag);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Tags joined with `", "`, the form the renderer prints.
    pub fn joined(&self) -> String {
        self.0.join(", ")
    }
}

impl From<Vec<String>> for SkillSet {
    fn from(tags: Vec<String>) -> Self {
        let mut set = SkillSet::default();
        for tag in &tags {
            set.add(tag);
        }
        set
    }
}

/// The three skill categories of the summary step. `core` must hold at least
/// one entry before step 2 can be submitted; `tools` and `soft` are
/// unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    pub core: SkillSet,
    pub tools: SkillSet,
    pub soft: SkillSet,
}

impl Skills {
    pub fn is_empty(&self) -> bool {
        self.core.is_empty() && self.tools.is_empty() && self.soft.is_empty()
    }
}

/// One achievement bullet inside a job entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: Uuid,
    pub text: String,
}

impl Achievement {
    pub fn new(text: impl Into<String>) -> Self {
        Achievement {
            id: Uuid::new_v4(),
            text: text.into(),
        }
    }
}

/// A committed work-experience entry. Invariant: entries reach the
/// `experience` sequence only through `JobDraft::commit`, which requires at
/// least one achievement. When `current` is true the entry is open-ended and
/// `end_date` is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobEntry {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub id: Uuid,
    pub institution: String,
    pub degree: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl EducationEntry {
    /// A blank entry with a fresh id, as created by the "Add Education"
    /// affordance. Fields are filled in place before submission.
    pub fn blank() -> Self {
        EducationEntry {
            id: Uuid::new_v4(),
            institution: String::new(),
            degree: String::new(),
            start_date: None,
            end_date: None,
            notes: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub id: Uuid,
    pub name: String,
    pub issuer: String,
    #[serde(default)]
    pub date: Option<String>,
}

impl Certification {
    pub fn blank() -> Self {
        Certification {
            id: Uuid::new_v4(),
            name: String::new(),
            issuer: String::new(),
            date: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub role: Option<String>,
    pub description: String,
    /// Comma separated tool list, printed as the project's stack line.
    #[serde(default)]
    pub tools: Option<String>,
    #[serde(default)]
    pub impact: Option<String>,
}

impl Project {
    pub fn blank() -> Self {
        Project {
            id: Uuid::new_v4(),
            title: String::new(),
            role: None,
            description: String::new(),
            tools: None,
            impact: None,
        }
    }
}

/// Language entries carry no id and uniqueness is not enforced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageEntry {
    pub language: String,
    pub proficiency: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Pdf,
}

/// Output-shaping flags. No wizard step validates these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportSettings {
    pub embed_fonts: bool,
    pub export_format: ExportFormat,
}

impl Default for ExportSettings {
    fn default() -> Self {
        ExportSettings {
            embed_fonts: true,
            export_format: ExportFormat::Pdf,
        }
    }
}

/// The resume-in-progress. Created empty (or profile-seeded) when the wizard
/// mounts, mutated only by merging step patches, persisted after every step
/// transition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeDocument {
    pub personal: PersonalInfo,
    pub summary: String,
    pub skills: Skills,
    pub experience: Vec<JobEntry>,
    pub education: Vec<EducationEntry>,
    pub certifications: Vec<Certification>,
    pub projects: Vec<Project>,
    pub languages: Vec<LanguageEntry>,
    pub settings: ExportSettings,
}

/// The stored profile fields a fresh document can be seeded from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSeed {
    pub name: String,
    pub email: String,
    pub headline: Option<String>,
    pub role: Option<String>,
}

impl ResumeDocument {
    /// Pre-seeds a document from the user's stored profile: name, email and
    /// the selected role map into `personal`, the headline into `summary`.
    /// Everything else starts empty.
    pub fn from_profile(seed: &ProfileSeed) -> Self {
        ResumeDocument {
            personal: PersonalInfo {
                full_name: seed.name.clone(),
                email: seed.email.clone(),
                title: seed.role.clone().unwrap_or_default(),
                ..PersonalInfo::default()
            },
            summary: seed.headline.clone().unwrap_or_default(),
            ..ResumeDocument::default()
        }
    }

    /// Merges a step's partial output into the document.
    ///
    /// Merge is a shallow overwrite at top-level field granularity: a field
    /// present in the patch replaces the current value wholesale, sequences
    /// included. Steps therefore always emit the complete value for every
    /// field they own. Applying the same patch twice is idempotent.
    pub fn merge(mut self, patch: ResumePatch) -> Self {
        if let Some(personal) = patch.personal {
            self.personal = personal;
        }
        if let Some(summary) = patch.summary {
            self.summary = summary;
        }
        if let Some(skills) = patch.skills {
            self.skills = skills;
        }
        if let Some(experience) = patch.experience {
            self.experience = experience;
        }
        if let Some(education) = patch.education {
            self.education = education;
        }
        if let Some(certifications) = patch.certifications {
            self.certifications = certifications;
        }
        if let Some(projects) = patch.projects {
            self.projects = projects;
        }
        if let Some(languages) = patch.languages {
            self.languages = languages;
        }
        if let Some(settings) = patch.settings {
            self.settings = settings;
        }
        self
    }
}

/// A partial document emitted by a step editor. Fields absent from the patch
/// leave the corresponding document fields unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal: Option<PersonalInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Skills>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<Vec<JobEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<Vec<EducationEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Vec<Certification>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<Project>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<LanguageEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<ExportSettings>,
}
