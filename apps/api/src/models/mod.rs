pub mod document;

pub use document::{
    Document, DocumentError, Education, EntryId, Experience, ExperienceField, Language,
    ListEntry, PersonalField, Skill, ID_FIELD,
};
