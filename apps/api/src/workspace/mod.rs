//! Workspace: the single owner of the current document.
//!
//! Holds the document together with the active language and layout variant,
//! applies edits as whole-document replacements, and runs translation passes.
//!
//! # Translation protocol
//! 1. `change_language` claims the `translating` flag (a second claim fails).
//! 2. The current document is snapshotted under the read lock.
//! 3. The pass runs in its own task, so a dropped request cannot cut it short.
//! 4. The result is installed under the write lock as one replacement.
//! 5. The flag is released.
//!
//! Every edit takes the write lock and then checks the flag, so no edit can land
//! between the snapshot and the install. If the pass task fails, nothing is
//! installed and the prior document stays authoritative.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Local;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::gateway::{fallback, ContentGateway, ResumeScore};
use crate::models::{
    Document, DocumentError, EntryId, Experience, ExperienceField, Language, ListEntry,
    PersonalField,
};
use crate::render::{render_localized, RenderedDocument, Variant};
use crate::store::{SaveInfo, SessionStore, StoreError, WorkingCopy};
use crate::translation::{StructuralTranslator, TranslateError, TranslationReport};

pub const DEFAULT_TARGET_JOB: &str = "Software Engineer";
pub const DEFAULT_COMPANY: &str = "a leading company in Pakistan";

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("A translation is in progress; edits are suspended until it finishes")]
    TranslationInProgress,

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Save '{0}' not found")]
    SaveNotFound(String),

    #[error("Save '{name}' does not contain a valid document: {reason}")]
    InvalidSave { name: String, reason: String },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Translate(#[from] TranslateError),

    #[error("Translation pass aborted: {0}")]
    TranslationAborted(String),

    #[error("The document was switched from {expected} to {found} while content was being generated")]
    LanguageChanged { expected: Language, found: Language },
}

#[derive(Debug, Clone, Copy)]
pub struct WorkspaceSettings {
    /// Prior documents kept for undo.
    pub undo_depth: usize,
    /// Gateway calls in flight during one translation pass.
    pub translation_concurrency: usize,
}

impl Default for WorkspaceSettings {
    fn default() -> Self {
        Self {
            undo_depth: 50,
            translation_concurrency: 8,
        }
    }
}

/// Observable state of the workspace.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceView {
    pub document: Document,
    pub language: Language,
    pub variant: Variant,
    pub translating: bool,
    pub undo_depth: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageOutcome {
    pub language: Language,
    /// False when the requested language was already active.
    pub translated: bool,
    pub report: Option<TranslationReport>,
}

/// What the working copy file holds.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WorkingStateRef<'a> {
    language: Language,
    variant: Variant,
    document: &'a Document,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WorkingState {
    #[serde(default)]
    language: Language,
    #[serde(default)]
    variant: Variant,
    document: Document,
}

struct Session {
    document: Arc<Document>,
    language: Language,
    variant: Variant,
    history: VecDeque<(Arc<Document>, Language)>,
}

impl Session {
    fn install(&mut self, document: Arc<Document>, language: Language, depth: usize) {
        let prior = std::mem::replace(&mut self.document, document);
        self.history.push_back((prior, self.language));
        self.language = language;
        while self.history.len() > depth {
            self.history.pop_front();
        }
    }
}

pub struct Workspace {
    session: RwLock<Session>,
    translating: AtomicBool,
    translator: StructuralTranslator,
    gateway: Arc<dyn ContentGateway>,
    store: Arc<dyn SessionStore>,
    working_copy: Option<WorkingCopy>,
    undo_depth: usize,
}

/// Releases the translating flag when the pass ends, however it ends.
struct TranslationGuard(Arc<Workspace>);

impl Drop for TranslationGuard {
    fn drop(&mut self) {
        self.0.translating.store(false, Ordering::SeqCst);
    }
}

impl Workspace {
    /// A workspace on the seed document, without autosave.
    pub fn new(
        gateway: Arc<dyn ContentGateway>,
        store: Arc<dyn SessionStore>,
        settings: WorkspaceSettings,
    ) -> Self {
        Self {
            session: RwLock::new(Session {
                document: Arc::new(Document::seed()),
                language: Language::default(),
                variant: Variant::default(),
                history: VecDeque::new(),
            }),
            translating: AtomicBool::new(false),
            translator: StructuralTranslator::new(
                gateway.clone(),
                settings.translation_concurrency,
            ),
            gateway,
            store,
            working_copy: None,
            undo_depth: settings.undo_depth,
        }
    }

    /// A workspace resumed from the working copy, falling back to the seed
    /// document. Every later install is autosaved to the same file.
    pub async fn restore(
        gateway: Arc<dyn ContentGateway>,
        store: Arc<dyn SessionStore>,
        working_copy: WorkingCopy,
        settings: WorkspaceSettings,
    ) -> Self {
        let mut workspace = Self::new(gateway, store, settings);

        match working_copy.load().await {
            Ok(Some(raw)) => match parse_working_state(&raw) {
                Ok(state) => {
                    info!("Resumed working copy ({})", state.language);
                    let session = workspace.session.get_mut();
                    session.document = Arc::new(state.document);
                    session.language = state.language;
                    session.variant = state.variant;
                }
                Err(reason) => warn!("Ignoring unreadable working copy: {}", reason),
            },
            Ok(None) => info!("No working copy, starting from the default resume"),
            Err(e) => warn!("Failed to read working copy: {}", e),
        }

        workspace.working_copy = Some(working_copy);
        workspace
    }

    pub fn is_translating(&self) -> bool {
        self.translating.load(Ordering::SeqCst)
    }

    fn ensure_idle(&self) -> Result<(), WorkspaceError> {
        if self.is_translating() {
            Err(WorkspaceError::TranslationInProgress)
        } else {
            Ok(())
        }
    }

    // ────────────────────────────────────────────────────────────────────────
    // Observation
    // ────────────────────────────────────────────────────────────────────────

    pub async fn document(&self) -> Arc<Document> {
        self.session.read().await.document.clone()
    }

    pub async fn view(&self) -> WorkspaceView {
        let session = self.session.read().await;
        WorkspaceView {
            document: session.document.as_ref().clone(),
            language: session.language,
            variant: session.variant,
            translating: self.is_translating(),
            undo_depth: session.history.len(),
        }
    }

    /// The current (document, variant, direction) triple, rendered.
    pub async fn rendered(&self) -> RenderedDocument {
        let session = self.session.read().await;
        render_localized(&session.document, session.variant, session.language)
    }

    // ────────────────────────────────────────────────────────────────────────
    // Edits
    // ────────────────────────────────────────────────────────────────────────

    /// Applies `apply` to the current document and installs the result.
    async fn edit<T, F>(&self, apply: F) -> Result<(Arc<Document>, T), WorkspaceError>
    where
        F: FnOnce(&Document) -> Result<(Document, T), DocumentError> + Send,
        T: Send,
    {
        self.edit_in(None, apply).await
    }

    /// Like `edit`, but refuses to install when the active language is no
    /// longer `expected`. Used to write back text produced from an earlier
    /// snapshot.
    async fn edit_in<T, F>(
        &self,
        expected: Option<Language>,
        apply: F,
    ) -> Result<(Arc<Document>, T), WorkspaceError>
    where
        F: FnOnce(&Document) -> Result<(Document, T), DocumentError> + Send,
        T: Send,
    {
        let mut session = self.session.write().await;
        self.ensure_idle()?;
        if let Some(expected) = expected {
            if session.language != expected {
                return Err(WorkspaceError::LanguageChanged {
                    expected,
                    found: session.language,
                });
            }
        }

        let (next, out) = apply(&session.document)?;
        let next = Arc::new(next);
        let language = session.language;
        session.install(next.clone(), language, self.undo_depth);
        self.autosave(&session).await;

        Ok((next, out))
    }

    pub async fn set_personal(
        &self,
        field: PersonalField,
        value: String,
    ) -> Result<Arc<Document>, WorkspaceError> {
        let (doc, ()) = self
            .edit(move |d| Ok((d.with_personal(field, value), ())))
            .await?;
        Ok(doc)
    }

    pub async fn add_entry<E: ListEntry>(&self) -> Result<(Arc<Document>, EntryId), WorkspaceError> {
        self.edit(|d| Ok(d.with_entry_added::<E>())).await
    }

    pub async fn update_entry<E: ListEntry>(
        &self,
        id: &str,
        field: E::Field,
        value: String,
    ) -> Result<Arc<Document>, WorkspaceError> {
        let (doc, ()) = self
            .edit(move |d| Ok((d.with_entry_updated::<E>(id, field, value)?, ())))
            .await?;
        Ok(doc)
    }

    pub async fn remove_entry<E: ListEntry>(
        &self,
        id: &str,
    ) -> Result<Arc<Document>, WorkspaceError> {
        let (doc, ()) = self
            .edit(move |d| Ok((d.with_entry_removed::<E>(id)?, ())))
            .await?;
        Ok(doc)
    }

    /// Replaces the document wholesale after checking its id invariants.
    pub async fn replace_document(
        &self,
        document: Document,
    ) -> Result<Arc<Document>, WorkspaceError> {
        document.validate()?;
        let (doc, ()) = self.edit(move |_| Ok((document, ()))).await?;
        Ok(doc)
    }

    /// Reinstalls the most recent prior document and its language.
    pub async fn undo(&self) -> Result<Arc<Document>, WorkspaceError> {
        let mut session = self.session.write().await;
        self.ensure_idle()?;

        let (prior, language) = session
            .history
            .pop_back()
            .ok_or(WorkspaceError::NothingToUndo)?;
        session.document = prior.clone();
        session.language = language;
        self.autosave(&session).await;

        Ok(prior)
    }

    /// Presentation only; allowed while a translation is running.
    pub async fn set_variant(&self, variant: Variant) {
        let mut session = self.session.write().await;
        session.variant = variant;
        self.autosave(&session).await;
    }

    // ────────────────────────────────────────────────────────────────────────
    // Translation
    // ────────────────────────────────────────────────────────────────────────

    /// Switches the active language, translating the whole document when the
    /// language actually changes.
    pub async fn change_language(
        self: &Arc<Self>,
        target: Language,
    ) -> Result<LanguageOutcome, WorkspaceError> {
        if self
            .translating
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(WorkspaceError::TranslationInProgress);
        }
        let guard = TranslationGuard(self.clone());

        let (snapshot, current) = {
            let session = self.session.read().await;
            (session.document.clone(), session.language)
        };
        if current == target {
            return Ok(LanguageOutcome {
                language: target,
                translated: false,
                report: None,
            });
        }

        info!("Translating document from {} to {}", current, target);
        let workspace = self.clone();
        let pass = tokio::spawn(async move {
            let _guard = guard;
            workspace.run_translation(snapshot, target).await
        });

        match pass.await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Translation task failed: {}", e);
                Err(WorkspaceError::TranslationAborted(e.to_string()))
            }
        }
    }

    async fn run_translation(
        &self,
        snapshot: Arc<Document>,
        target: Language,
    ) -> Result<LanguageOutcome, WorkspaceError> {
        let translated = self.translator.translate(snapshot.as_ref(), target).await?;
        if translated.report.is_degraded() {
            warn!(
                "{} field(s) kept their original text: {}",
                translated.report.degraded.len(),
                translated.report.degraded.join(", ")
            );
        }

        let mut session = self.session.write().await;
        session.install(Arc::new(translated.value), target, self.undo_depth);
        self.autosave(&session).await;

        Ok(LanguageOutcome {
            language: target,
            translated: true,
            report: Some(translated.report),
        })
    }

    // ────────────────────────────────────────────────────────────────────────
    // AI content
    // ────────────────────────────────────────────────────────────────────────

    /// Generates a description for one experience entry and writes it into
    /// that entry. Failures write the placeholder text instead.
    pub async fn generate_description(
        &self,
        id: &str,
    ) -> Result<(Arc<Document>, String), WorkspaceError> {
        let (job_title, company, language) = {
            let session = self.session.read().await;
            self.ensure_idle()?;
            let entry = session.document.entry::<Experience>(id).ok_or_else(|| {
                DocumentError::EntryNotFound {
                    section: Experience::SECTION,
                    id: id.to_string(),
                }
            })?;
            (entry.job_title.clone(), entry.company.clone(), session.language)
        };

        let text =
            fallback::description_or_placeholder(self.gateway.as_ref(), &job_title, &company)
                .await;

        let written = text.clone();
        let (doc, ()) = self
            .edit_in(Some(language), move |d| {
                Ok((
                    d.with_entry_updated::<Experience>(id, ExperienceField::Description, written)?,
                    (),
                ))
            })
            .await?;
        Ok((doc, text))
    }

    /// Generates a professional summary and writes it into the personal info.
    pub async fn generate_summary(&self) -> Result<(Arc<Document>, String), WorkspaceError> {
        let (snapshot, language) = {
            let session = self.session.read().await;
            self.ensure_idle()?;
            (session.document.clone(), session.language)
        };

        let text = fallback::summary_or_placeholder(self.gateway.as_ref(), &snapshot).await;
        let written = text.clone();
        let (doc, ()) = self
            .edit_in(Some(language), move |d| {
                Ok((d.with_personal(PersonalField::Summary, written), ()))
            })
            .await?;
        Ok((doc, text))
    }

    pub async fn score(&self, target_job: Option<&str>) -> ResumeScore {
        let snapshot = self.document().await;
        let target_job = non_blank(target_job).unwrap_or(DEFAULT_TARGET_JOB);
        fallback::score_or_zero(self.gateway.as_ref(), &snapshot, target_job).await
    }

    pub async fn cover_letter(&self, target_job: Option<&str>, company: Option<&str>) -> String {
        let snapshot = self.document().await;
        let target_job = non_blank(target_job).unwrap_or(DEFAULT_TARGET_JOB);
        let company = non_blank(company).unwrap_or(DEFAULT_COMPANY);
        fallback::cover_letter_or_placeholder(self.gateway.as_ref(), &snapshot, target_job, company)
            .await
    }

    // ────────────────────────────────────────────────────────────────────────
    // Named saves
    // ────────────────────────────────────────────────────────────────────────

    /// Saves the current document. Without a name, `My CV <local date>` is used.
    pub async fn save(&self, name: Option<&str>) -> Result<SaveInfo, WorkspaceError> {
        let name = match non_blank(name) {
            Some(name) => name.to_string(),
            None => default_save_name(),
        };
        let blob = {
            let session = self.session.read().await;
            serde_json::to_string(session.document.as_ref()).map_err(StoreError::Encode)?
        };
        let info = self.store.save(&name, &blob).await?;
        info!("Saved resume as '{}'", info.name);
        Ok(info)
    }

    /// Replaces the current document with a named save.
    pub async fn load_save(&self, name: &str) -> Result<Arc<Document>, WorkspaceError> {
        self.ensure_idle()?;
        let blob = self
            .store
            .load(name)
            .await?
            .ok_or_else(|| WorkspaceError::SaveNotFound(name.to_string()))?;

        let document: Document =
            serde_json::from_str(&blob).map_err(|e| WorkspaceError::InvalidSave {
                name: name.to_string(),
                reason: e.to_string(),
            })?;
        document
            .validate()
            .map_err(|e| WorkspaceError::InvalidSave {
                name: name.to_string(),
                reason: e.to_string(),
            })?;

        let (doc, ()) = self.edit(move |_| Ok((document, ()))).await?;
        info!("Loaded save '{}'", name);
        Ok(doc)
    }

    pub async fn list_saves(&self) -> Result<Vec<SaveInfo>, WorkspaceError> {
        Ok(self.store.list().await?)
    }

    pub async fn delete_save(&self, name: &str) -> Result<(), WorkspaceError> {
        if self.store.delete(name).await? {
            Ok(())
        } else {
            Err(WorkspaceError::SaveNotFound(name.to_string()))
        }
    }

    /// Best effort: a failed autosave is logged and never fails the edit.
    async fn autosave(&self, session: &Session) {
        let Some(copy) = &self.working_copy else {
            return;
        };
        let state = WorkingStateRef {
            language: session.language,
            variant: session.variant,
            document: &session.document,
        };
        let result = match serde_json::to_string(&state) {
            Ok(blob) => copy.persist(&blob).await,
            Err(e) => Err(StoreError::Encode(e)),
        };
        if let Err(e) = result {
            warn!("Autosave failed: {}", e);
        }
    }
}

fn parse_working_state(raw: &str) -> Result<WorkingState, String> {
    let state: WorkingState = serde_json::from_str(raw).map_err(|e| e.to_string())?;
    state.document.validate().map_err(|e| e.to_string())?;
    Ok(state)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn default_save_name() -> String {
    format!("My CV {}", Local::now().format("%-m/%-d/%Y"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::fallback::DESCRIPTION_FALLBACK;
    use crate::gateway::testing::{label, FakeGateway};
    use crate::models::document::SkillField;
    use crate::models::Skill;
    use crate::store::MemoryStore;

    fn workspace_with(gateway: Arc<FakeGateway>) -> Arc<Workspace> {
        Arc::new(Workspace::new(
            gateway,
            Arc::new(MemoryStore::new()),
            WorkspaceSettings::default(),
        ))
    }

    fn workspace() -> Arc<Workspace> {
        workspace_with(Arc::new(FakeGateway::label()))
    }

    #[tokio::test]
    async fn test_edits_replace_the_document() {
        let ws = workspace();
        let before = ws.document().await;

        ws.set_personal(PersonalField::Name, "Ayesha Khan".to_string())
            .await
            .unwrap();
        let (_, id) = ws.add_entry::<Skill>().await.unwrap();
        ws.update_entry::<Skill>(id.as_str(), SkillField::Name, "Rust".to_string())
            .await
            .unwrap();
        let after = ws.remove_entry::<Skill>("skill1").await.unwrap();

        // The snapshot taken before the edits is untouched.
        assert_eq!(before.personal_info.name, "Muhammad Ali");
        assert_eq!(after.personal_info.name, "Ayesha Khan");
        assert_eq!(after.skills.len(), 5);
        assert_eq!(after.skills.last().unwrap().name, "Rust");
        assert!(after.entry::<Skill>("skill1").is_none());
    }

    #[tokio::test]
    async fn test_edit_of_unknown_entry_fails_without_change() {
        let ws = workspace();

        let err = ws
            .update_entry::<Experience>("nope", ExperienceField::Company, "X".to_string())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            WorkspaceError::Document(DocumentError::EntryNotFound { .. })
        ));
        assert_eq!(ws.view().await.undo_depth, 0);
    }

    #[tokio::test]
    async fn test_undo_walks_back_and_is_bounded() {
        let ws = Arc::new(Workspace::new(
            Arc::new(FakeGateway::echo()),
            Arc::new(MemoryStore::new()),
            WorkspaceSettings {
                undo_depth: 2,
                ..WorkspaceSettings::default()
            },
        ));
        for name in ["A", "B", "C"] {
            ws.set_personal(PersonalField::Name, name.to_string())
                .await
                .unwrap();
        }

        assert_eq!(ws.undo().await.unwrap().personal_info.name, "B");
        assert_eq!(ws.undo().await.unwrap().personal_info.name, "A");
        assert!(matches!(ws.undo().await, Err(WorkspaceError::NothingToUndo)));
        assert_eq!(ws.document().await.personal_info.name, "A");
    }

    #[tokio::test]
    async fn test_same_language_is_a_no_op() {
        let gateway = Arc::new(FakeGateway::label());
        let ws = workspace_with(gateway.clone());

        let outcome = ws.change_language(Language::English).await.unwrap();

        assert!(!outcome.translated);
        assert_eq!(gateway.calls(), 0);
        assert!(!ws.is_translating());
    }

    #[tokio::test]
    async fn test_translation_installs_whole_document_and_can_be_undone() {
        let ws = workspace();
        let original = ws.document().await;

        let outcome = ws.change_language(Language::Urdu).await.unwrap();

        assert!(outcome.translated);
        assert!(!outcome.report.unwrap().is_degraded());
        let view = ws.view().await;
        assert_eq!(view.language, Language::Urdu);
        assert_eq!(
            view.document.personal_info.name,
            label("Muhammad Ali", Language::Urdu)
        );
        assert_eq!(view.document.experience[0].id, original.experience[0].id);
        assert_eq!(view.document.skills.len(), original.skills.len());

        ws.undo().await.unwrap();
        let view = ws.view().await;
        assert_eq!(view.language, Language::English);
        assert_eq!(view.document, *original);
    }

    #[tokio::test]
    async fn test_rendered_follows_language_and_variant() {
        let ws = workspace();
        ws.change_language(Language::Urdu).await.unwrap();
        ws.set_variant(Variant::Creative).await;

        let rendered = ws.rendered().await;

        assert_eq!(rendered.variant, Variant::Creative);
        assert_eq!(rendered.direction, crate::render::Direction::Rtl);
    }

    #[tokio::test]
    async fn test_edits_are_rejected_while_translating() {
        let gateway = Arc::new(FakeGateway::label().gated());
        let ws = workspace_with(gateway.clone());

        let pass = {
            let ws = ws.clone();
            tokio::spawn(async move { ws.change_language(Language::Urdu).await })
        };
        while gateway.calls() == 0 {
            tokio::task::yield_now().await;
        }

        assert!(ws.is_translating());
        assert!(matches!(
            ws.set_personal(PersonalField::Name, "X".to_string()).await,
            Err(WorkspaceError::TranslationInProgress)
        ));
        assert!(matches!(
            ws.add_entry::<Skill>().await,
            Err(WorkspaceError::TranslationInProgress)
        ));
        assert!(matches!(
            ws.change_language(Language::English).await,
            Err(WorkspaceError::TranslationInProgress)
        ));
        assert!(ws.view().await.translating);

        gateway.open();
        let outcome = pass.await.unwrap().unwrap();

        assert!(outcome.translated);
        assert!(!ws.is_translating());
        let doc = ws
            .set_personal(PersonalField::Name, "X".to_string())
            .await
            .unwrap();
        assert_eq!(doc.personal_info.name, "X");
        assert_eq!(doc.personal_info.title, label("Software Engineer", Language::Urdu));
    }

    #[tokio::test]
    async fn test_degraded_fields_are_reported_and_kept() {
        let ws = workspace_with(Arc::new(FakeGateway::flaky("React")));

        let outcome = ws.change_language(Language::Urdu).await.unwrap();

        let report = outcome.report.unwrap();
        assert!(report.degraded.contains(&"skills[1].name".to_string()));
        let doc = ws.document().await;
        assert_eq!(doc.skills[1].name, "React");
        assert_eq!(doc.skills[0].name, label("JavaScript", Language::Urdu));
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let ws = workspace();
        ws.save(Some("cv")).await.unwrap();
        ws.set_personal(PersonalField::Name, "Changed".to_string())
            .await
            .unwrap();

        let doc = ws.load_save("cv").await.unwrap();

        assert_eq!(doc.personal_info.name, "Muhammad Ali");
        assert_eq!(ws.list_saves().await.unwrap().len(), 1);
        assert!(matches!(
            ws.load_save("missing").await,
            Err(WorkspaceError::SaveNotFound(_))
        ));
        ws.delete_save("cv").await.unwrap();
        assert!(matches!(
            ws.delete_save("cv").await,
            Err(WorkspaceError::SaveNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_default_save_name() {
        let ws = workspace();
        let info = ws.save(None).await.unwrap();
        assert!(info.name.starts_with("My CV "));
        assert!(ws.save(Some("   ")).await.unwrap().name.starts_with("My CV "));
    }

    #[tokio::test]
    async fn test_invalid_save_is_rejected() {
        let store = Arc::new(MemoryStore::new());
        store
            .save("bad", r#"{"skills":[{"id":"s"},{"id":"s"}]}"#)
            .await
            .unwrap();
        let ws = Workspace::new(
            Arc::new(FakeGateway::echo()),
            store,
            WorkspaceSettings::default(),
        );

        assert!(matches!(
            ws.load_save("bad").await,
            Err(WorkspaceError::InvalidSave { .. })
        ));
        assert_eq!(ws.document().await.skills.len(), 5);
    }

    #[tokio::test]
    async fn test_replace_document_validates() {
        let ws = workspace();
        let mut doc = Document::seed();
        doc.skills[1].id = doc.skills[0].id.clone();

        assert!(matches!(
            ws.replace_document(doc).await,
            Err(WorkspaceError::Document(DocumentError::DuplicateId { .. }))
        ));
        let replaced = ws.replace_document(Document::default()).await.unwrap();
        assert!(replaced.skills.is_empty());
    }

    #[tokio::test]
    async fn test_generated_description_is_written_into_the_entry() {
        let ws = workspace_with(Arc::new(FakeGateway::echo()));

        let (doc, text) = ws.generate_description("exp1").await.unwrap();

        assert_eq!(text, "- Frontend Developer at Tech Solutions Ltd.");
        assert_eq!(doc.experience[0].description, text);
        assert!(matches!(
            ws.generate_description("exp9").await,
            Err(WorkspaceError::Document(DocumentError::EntryNotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn test_generated_text_is_not_written_across_a_language_switch() {
        let gateway = Arc::new(FakeGateway::label().generation_gated());
        let ws = workspace_with(gateway.clone());

        let description = {
            let ws = ws.clone();
            tokio::spawn(async move { ws.generate_description("exp1").await })
        };
        let summary = {
            let ws = ws.clone();
            tokio::spawn(async move { ws.generate_summary().await })
        };
        while gateway.generations() < 2 {
            tokio::task::yield_now().await;
        }

        // A whole pass completes while both generations are held.
        ws.change_language(Language::Urdu).await.unwrap();
        let translated = ws.document().await;
        gateway.open_generation();

        assert!(matches!(
            description.await.unwrap(),
            Err(WorkspaceError::LanguageChanged {
                expected: Language::English,
                found: Language::Urdu,
            })
        ));
        assert!(matches!(
            summary.await.unwrap(),
            Err(WorkspaceError::LanguageChanged { .. })
        ));
        assert_eq!(ws.document().await, translated);
        assert_eq!(
            translated.experience[0].description,
            label(&Document::seed().experience[0].description, Language::Urdu)
        );
    }

    #[tokio::test]
    async fn test_generation_failure_writes_placeholder() {
        let ws = workspace_with(Arc::new(FakeGateway::failing()));

        let (doc, text) = ws.generate_description("exp1").await.unwrap();

        assert_eq!(text, DESCRIPTION_FALLBACK);
        assert_eq!(doc.experience[0].description, DESCRIPTION_FALLBACK);
        assert_eq!(ws.score(None).await.score, 0);
    }

    #[tokio::test]
    async fn test_summary_score_and_cover_letter_defaults() {
        let ws = workspace_with(Arc::new(FakeGateway::echo()));

        let (doc, summary) = ws.generate_summary().await.unwrap();
        assert_eq!(summary, "Summary for Muhammad Ali");
        assert_eq!(doc.personal_info.summary, summary);

        assert_eq!(ws.score(Some(" ")).await.score, 75);
        assert_eq!(
            ws.cover_letter(None, None).await,
            "Dear a leading company in Pakistan, I apply for Software Engineer."
        );
        assert_eq!(
            ws.cover_letter(Some("Designer"), Some("Acme")).await,
            "Dear Acme, I apply for Designer."
        );
    }

    #[tokio::test]
    async fn test_working_copy_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("current.json");

        let fresh = Workspace::restore(
            Arc::new(FakeGateway::label()),
            Arc::new(MemoryStore::new()),
            WorkingCopy::new(&path),
            WorkspaceSettings::default(),
        )
        .await;
        assert_eq!(*fresh.document().await, Document::seed());

        let ws = Arc::new(fresh);
        ws.set_personal(PersonalField::Name, "Sara".to_string())
            .await
            .unwrap();
        ws.set_variant(Variant::Corporate).await;
        ws.change_language(Language::Urdu).await.unwrap();

        let resumed = Workspace::restore(
            Arc::new(FakeGateway::label()),
            Arc::new(MemoryStore::new()),
            WorkingCopy::new(&path),
            WorkspaceSettings::default(),
        )
        .await;
        let view = resumed.view().await;
        assert_eq!(view.language, Language::Urdu);
        assert_eq!(view.variant, Variant::Corporate);
        assert_eq!(view.document.personal_info.name, label("Sara", Language::Urdu));
    }

    #[tokio::test]
    async fn test_unreadable_working_copy_falls_back_to_seed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("current.json");
        std::fs::write(&path, "{ not json").unwrap();

        let ws = Workspace::restore(
            Arc::new(FakeGateway::echo()),
            Arc::new(MemoryStore::new()),
            WorkingCopy::new(&path),
            WorkspaceSettings::default(),
        )
        .await;

        assert_eq!(*ws.document().await, Document::seed());
    }
}
