//! Deterministic gateway for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Semaphore;

use crate::gateway::{ContentGateway, GatewayError, ResumeScore};
use crate::models::{Document, Language};

#[derive(Debug, Clone, Copy)]
pub enum TranslateMode {
    /// Identity.
    Echo,
    /// `[Urdu] text`
    Label,
    /// Labels, but fails on any text containing the marker.
    FailOn(&'static str),
    /// Every call fails.
    Fail,
}

pub fn label(text: &str, target: Language) -> String {
    format!("[{target}] {text}")
}

/// Fake gateway. Counts translation calls, records the largest number of
/// concurrent translations, and can hold every translation behind a gate.
pub struct FakeGateway {
    mode: TranslateMode,
    fail_generation: bool,
    delay: fn(&str) -> Duration,
    gate: Option<Arc<Semaphore>>,
    generation_gate: Option<Arc<Semaphore>>,
    calls: AtomicUsize,
    generations: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeGateway {
    fn with_mode(mode: TranslateMode) -> Self {
        Self {
            mode,
            fail_generation: false,
            delay: |_| Duration::ZERO,
            gate: None,
            generation_gate: None,
            calls: AtomicUsize::new(0),
            generations: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn echo() -> Self {
        Self::with_mode(TranslateMode::Echo)
    }

    pub fn label() -> Self {
        Self::with_mode(TranslateMode::Label)
    }

    pub fn flaky(marker: &'static str) -> Self {
        Self::with_mode(TranslateMode::FailOn(marker))
    }

    /// Every operation, translation and generation alike, fails.
    pub fn failing() -> Self {
        Self {
            fail_generation: true,
            ..Self::with_mode(TranslateMode::Fail)
        }
    }

    pub fn with_delay(mut self, delay: fn(&str) -> Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Translations block until `open` is called.
    pub fn gated(mut self) -> Self {
        self.gate = Some(Arc::new(Semaphore::new(0)));
        self
    }

    pub fn open(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(Semaphore::MAX_PERMITS / 2);
        }
    }

    /// Generated content blocks until `open_generation` is called.
    /// Translations are unaffected.
    pub fn generation_gated(mut self) -> Self {
        self.generation_gate = Some(Arc::new(Semaphore::new(0)));
        self
    }

    pub fn open_generation(&self) {
        if let Some(gate) = &self.generation_gate {
            gate.add_permits(Semaphore::MAX_PERMITS / 2);
        }
    }

    /// Generation requests received so far, including ones still held.
    pub fn generations(&self) -> usize {
        self.generations.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn generation(&self, text: String) -> Result<String, GatewayError> {
        self.generations.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.generation_gate {
            let _permit = gate.acquire().await;
        }
        if self.fail_generation {
            Err(GatewayError::Unavailable("offline".to_string()))
        } else {
            Ok(text)
        }
    }
}

#[async_trait]
impl ContentGateway for FakeGateway {
    async fn translate(&self, text: &str, target: Language) -> Result<String, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(gate) = &self.gate {
            let _permit = gate.acquire().await;
        }
        let delay = (self.delay)(text);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        match self.mode {
            TranslateMode::Echo => Ok(text.to_string()),
            TranslateMode::Label => Ok(label(text, target)),
            TranslateMode::FailOn(marker) if text.contains(marker) => {
                Err(GatewayError::Unavailable(format!("cannot translate {text}")))
            }
            TranslateMode::FailOn(_) => Ok(label(text, target)),
            TranslateMode::Fail => Err(GatewayError::Unavailable("offline".to_string())),
        }
    }

    async fn generate_description(
        &self,
        job_title: &str,
        company: &str,
    ) -> Result<String, GatewayError> {
        self.generation(format!("- {job_title} at {company}")).await
    }

    async fn generate_summary(&self, document: &Document) -> Result<String, GatewayError> {
        self.generation(format!("Summary for {}", document.personal_info.name))
            .await
    }

    async fn generate_cover_letter(
        &self,
        _document: &Document,
        target_job: &str,
        company_name: &str,
    ) -> Result<String, GatewayError> {
        self.generation(format!("Dear {company_name}, I apply for {target_job}."))
            .await
    }

    async fn score_resume(
        &self,
        _document: &Document,
        _target_job: &str,
    ) -> Result<ResumeScore, GatewayError> {
        if self.fail_generation {
            return Err(GatewayError::Unavailable("offline".to_string()));
        }
        Ok(ResumeScore {
            score: 75,
            feedback: "Solid".to_string(),
            suggestions: vec!["Add metrics".to_string()],
        })
    }
}
