//! Document Model: the canonical résumé schema.
//!
//! A `Document` is never mutated where someone else can observe it: every edit
//! helper takes `&self` and returns the replacement document, so snapshots held
//! by the workspace history or by an in-flight translation stay valid.
//!
//! List entries carry an `EntryId` that is unique within its list and is the
//! only key used to update or remove an entry. The serialized shape is
//! camelCase (`personalInfo`, `jobTitle`, `gradYear`) to stay compatible with
//! saves produced by the browser front-end.

use std::collections::HashSet;
use std::fmt;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::render::Direction;

/// Field name that every whole-document text transform must leave untouched.
pub const ID_FIELD: &str = "id";

#[derive(Debug, Error, PartialEq)]
pub enum DocumentError {
    #[error("{section} entry '{id}' not found")]
    EntryNotFound { section: Section, id: String },

    #[error("duplicate {section} id '{id}'")]
    DuplicateId { section: Section, id: String },

    #[error("{section} entry has an empty id")]
    EmptyId { section: Section },
}

/// The three id-keyed lists of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Experience,
    Education,
    Skills,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Skills => "skills",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable identifier of a list entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// `prefix` followed by a random suffix, e.g. `exp3f2a…`.
    pub fn generate(prefix: &str) -> Self {
        Self(format!("{prefix}{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The two content languages. Serialized by display name, which is also the
/// name handed to the generative backend as the translation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Urdu,
}

impl Language {
    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Urdu => "Urdu",
        }
    }

    /// Urdu is written right-to-left.
    pub fn is_rtl(&self) -> bool {
        matches!(self, Language::Urdu)
    }

    pub fn direction(&self) -> Direction {
        Direction::for_language(*self)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Records
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub summary: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PersonalField {
    Name,
    Title,
    Phone,
    Email,
    Address,
    Summary,
}

impl PersonalInfo {
    pub fn set(&mut self, field: PersonalField, value: String) {
        let slot = match field {
            PersonalField::Name => &mut self.name,
            PersonalField::Title => &mut self.title,
            PersonalField::Phone => &mut self.phone,
            PersonalField::Email => &mut self.email,
            PersonalField::Address => &mut self.address,
            PersonalField::Summary => &mut self.summary,
        };
        *slot = value;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: EntryId,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    /// Newline-delimited bullet fragments, each optionally prefixed with `- `.
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExperienceField {
    JobTitle,
    Company,
    StartDate,
    EndDate,
    Description,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: EntryId,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub grad_year: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EducationField {
    Degree,
    Institution,
    GradYear,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: EntryId,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SkillField {
    Name,
}

/// Root aggregate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

// ────────────────────────────────────────────────────────────────────────────
// List entries
// ────────────────────────────────────────────────────────────────────────────

/// Shared behaviour of the id-keyed list records, so edits are written once.
pub trait ListEntry: Clone + Send + Sync + 'static {
    /// Editable text fields of this record.
    type Field: Copy + DeserializeOwned + Send + 'static;

    const SECTION: Section;
    const ID_PREFIX: &'static str;

    fn blank(id: EntryId) -> Self;
    fn id(&self) -> &EntryId;
    fn set(&mut self, field: Self::Field, value: String);
    fn list(document: &Document) -> &[Self];
    fn list_mut(document: &mut Document) -> &mut Vec<Self>;
}

impl ListEntry for Experience {
    type Field = ExperienceField;
    const SECTION: Section = Section::Experience;
    const ID_PREFIX: &'static str = "exp";

    fn blank(id: EntryId) -> Self {
        Self {
            id,
            job_title: String::new(),
            company: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            description: String::new(),
        }
    }

    fn id(&self) -> &EntryId {
        &self.id
    }

    fn set(&mut self, field: ExperienceField, value: String) {
        let slot = match field {
            ExperienceField::JobTitle => &mut self.job_title,
            ExperienceField::Company => &mut self.company,
            ExperienceField::StartDate => &mut self.start_date,
            ExperienceField::EndDate => &mut self.end_date,
            ExperienceField::Description => &mut self.description,
        };
        *slot = value;
    }

    fn list(document: &Document) -> &[Self] {
        &document.experience
    }

    fn list_mut(document: &mut Document) -> &mut Vec<Self> {
        &mut document.experience
    }
}

impl ListEntry for Education {
    type Field = EducationField;
    const SECTION: Section = Section::Education;
    const ID_PREFIX: &'static str = "edu";

    fn blank(id: EntryId) -> Self {
        Self {
            id,
            degree: String::new(),
            institution: String::new(),
            grad_year: String::new(),
        }
    }

    fn id(&self) -> &EntryId {
        &self.id
    }

    fn set(&mut self, field: EducationField, value: String) {
        let slot = match field {
            EducationField::Degree => &mut self.degree,
            EducationField::Institution => &mut self.institution,
            EducationField::GradYear => &mut self.grad_year,
        };
        *slot = value;
    }

    fn list(document: &Document) -> &[Self] {
        &document.education
    }

    fn list_mut(document: &mut Document) -> &mut Vec<Self> {
        &mut document.education
    }
}

impl ListEntry for Skill {
    type Field = SkillField;
    const SECTION: Section = Section::Skills;
    const ID_PREFIX: &'static str = "skill";

    fn blank(id: EntryId) -> Self {
        Self {
            id,
            name: String::new(),
        }
    }

    fn id(&self) -> &EntryId {
        &self.id
    }

    fn set(&mut self, field: SkillField, value: String) {
        match field {
            SkillField::Name => self.name = value,
        }
    }

    fn list(document: &Document) -> &[Self] {
        &document.skills
    }

    fn list_mut(document: &mut Document) -> &mut Vec<Self> {
        &mut document.skills
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Copy-on-write edits
// ────────────────────────────────────────────────────────────────────────────

impl Document {
    pub fn entry<E: ListEntry>(&self, id: &str) -> Option<&E> {
        E::list(self).iter().find(|e| e.id().as_str() == id)
    }

    pub fn with_personal(&self, field: PersonalField, value: String) -> Document {
        let mut next = self.clone();
        next.personal_info.set(field, value);
        next
    }

    /// Appends a blank entry with a fresh id to the end of its list.
    pub fn with_entry_added<E: ListEntry>(&self) -> (Document, EntryId) {
        let mut next = self.clone();
        let id = loop {
            let candidate = EntryId::generate(E::ID_PREFIX);
            if next.entry::<E>(candidate.as_str()).is_none() {
                break candidate;
            }
        };
        E::list_mut(&mut next).push(E::blank(id.clone()));
        (next, id)
    }

    pub fn with_entry_updated<E: ListEntry>(
        &self,
        id: &str,
        field: E::Field,
        value: String,
    ) -> Result<Document, DocumentError> {
        let mut next = self.clone();
        let entry = E::list_mut(&mut next)
            .iter_mut()
            .find(|e| e.id().as_str() == id)
            .ok_or_else(|| DocumentError::EntryNotFound {
                section: E::SECTION,
                id: id.to_string(),
            })?;
        entry.set(field, value);
        Ok(next)
    }

    pub fn with_entry_removed<E: ListEntry>(&self, id: &str) -> Result<Document, DocumentError> {
        if self.entry::<E>(id).is_none() {
            return Err(DocumentError::EntryNotFound {
                section: E::SECTION,
                id: id.to_string(),
            });
        }
        let mut next = self.clone();
        E::list_mut(&mut next).retain(|e| e.id().as_str() != id);
        Ok(next)
    }

    /// Checks the id invariants of every list: non-empty and unique within the list.
    /// Documents loaded from outside (saves, PUT) must pass this before installation.
    pub fn validate(&self) -> Result<(), DocumentError> {
        check_ids::<Experience>(self)?;
        check_ids::<Education>(self)?;
        check_ids::<Skill>(self)?;
        Ok(())
    }

    /// The default résumé shown on first start.
    pub fn seed() -> Document {
        let skill = |id: &str, name: &str| Skill {
            id: id.into(),
            name: name.to_string(),
        };

        Document {
            personal_info: PersonalInfo {
                name: "Muhammad Ali".to_string(),
                title: "Software Engineer".to_string(),
                phone: "+92 300 1234567".to_string(),
                email: "muhammad.ali@example.com".to_string(),
                address: "Karachi, Pakistan".to_string(),
                summary: "A highly motivated Software Engineer with 2+ years of experience in \
                          developing scalable web applications using React and Node.js. \
                          Passionate about creating intuitive user experiences and solving \
                          complex problems."
                    .to_string(),
            },
            experience: vec![Experience {
                id: "exp1".into(),
                job_title: "Frontend Developer".to_string(),
                company: "Tech Solutions Ltd.".to_string(),
                start_date: "Jan 2022".to_string(),
                end_date: "Present".to_string(),
                description: "- Developed and maintained user interfaces for client projects using React.\n\
                              - Collaborated with designers and backend developers to implement new features.\n\
                              - Optimized application performance, resulting in a 20% reduction in load times."
                    .to_string(),
            }],
            education: vec![Education {
                id: "edu1".into(),
                degree: "BS in Computer Science".to_string(),
                institution: "National University of Computer and Emerging Sciences".to_string(),
                grad_year: "2021".to_string(),
            }],
            skills: vec![
                skill("skill1", "JavaScript"),
                skill("skill2", "React"),
                skill("skill3", "Node.js"),
                skill("skill4", "TypeScript"),
                skill("skill5", "Tailwind CSS"),
            ],
        }
    }
}

fn check_ids<E: ListEntry>(document: &Document) -> Result<(), DocumentError> {
    let mut seen = HashSet::new();
    for entry in E::list(document) {
        let id = entry.id().as_str();
        if id.trim().is_empty() {
            return Err(DocumentError::EmptyId { section: E::SECTION });
        }
        if !seen.insert(id) {
            return Err(DocumentError::DuplicateId {
                section: E::SECTION,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}
