//! The four-step input wizard that produces a generation request.
//!
//! Steps advance strictly forward: a step must validate before [`GenerationWizard::next`]
//! moves past it, and [`GenerationWizard::build_request`] only succeeds once
//! every step validates. The resulting [`GenerationRequest`] is immutable;
//! its fields are private and there is no other way to construct one.

use std::fmt;

use thiserror::Error;

use crate::api::{CreateGenerationRequest, GenerationKind};
use crate::catalog::{Language, VoiceStyle};

/// A wizard step that has not validated yet.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("mantra text must not be empty")]
    MissingText,
    #[error("no language selected")]
    MissingLanguage,
    #[error("no voice style selected")]
    MissingVoiceStyle,
    #[error("no voice selected")]
    MissingVoice,
}

/// The ordered steps of the input wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Text,
    Language,
    VoiceStyle,
    Voice,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Text,
        WizardStep::Language,
        WizardStep::VoiceStyle,
        WizardStep::Voice,
    ];

    /// 1-based position, for "step 2/4" displays.
    pub fn position(&self) -> usize {
        match self {
            WizardStep::Text => 1,
            WizardStep::Language => 2,
            WizardStep::VoiceStyle => 3,
            WizardStep::Voice => 4,
        }
    }

    fn forward(&self) -> Option<WizardStep> {
        match self {
            WizardStep::Text => Some(WizardStep::Language),
            WizardStep::Language => Some(WizardStep::VoiceStyle),
            WizardStep::VoiceStyle => Some(WizardStep::Voice),
            WizardStep::Voice => None,
        }
    }

    fn backward(&self) -> Option<WizardStep> {
        match self {
            WizardStep::Text => None,
            WizardStep::Language => Some(WizardStep::Text),
            WizardStep::VoiceStyle => Some(WizardStep::Language),
            WizardStep::Voice => Some(WizardStep::VoiceStyle),
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardStep::Text => write!(f, "Mantra"),
            WizardStep::Language => write!(f, "Language"),
            WizardStep::VoiceStyle => write!(f, "Voice Style"),
            WizardStep::Voice => write!(f, "Voice"),
        }
    }
}

/// Collects the four inputs of a generation request.
///
/// Purely synchronous; the only state is the step cursor and the field
/// values.
#[derive(Debug)]
pub struct GenerationWizard {
    step: WizardStep,
    text: String,
    language: Option<Language>,
    voice_style: Option<VoiceStyle>,
    voice: Option<String>,
}

impl Default for GenerationWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationWizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::Text,
            text: String::new(),
            language: None,
            voice_style: None,
            voice: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = Some(language);
    }

    pub fn set_voice_style(&mut self, style: VoiceStyle) {
        self.voice_style = Some(style);
    }

    pub fn set_voice(&mut self, voice: impl Into<String>) {
        self.voice = Some(voice.into());
    }

    /// Whether the given step's field is filled in.
    pub fn step_complete(&self, step: WizardStep) -> bool {
        match step {
            WizardStep::Text => !self.text.trim().is_empty(),
            WizardStep::Language => self.language.is_some(),
            WizardStep::VoiceStyle => self.voice_style.is_some(),
            WizardStep::Voice => self
                .voice
                .as_ref()
                .is_some_and(|v| !v.trim().is_empty()),
        }
    }

    /// Whether the wizard may move past the current step.
    pub fn can_advance(&self) -> bool {
        self.step_complete(self.step())
    }

    /// Advance one step. No-op (returning `false`) when the current step
    /// has not validated or the wizard is already on the last step.
    pub fn next(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        match self.step.forward() {
            Some(step) => {
                self.step = step;
                true
            }
            None => false,
        }
    }

    /// Go back one step. No-op (returning `false`) on the first step.
    pub fn back(&mut self) -> bool {
        match self.step.backward() {
            Some(step) => {
                self.step = step;
                true
            }
            None => false,
        }
    }

    /// Produce the immutable request, failing on the first step that has
    /// not validated.
    pub fn build_request(&self) -> Result<GenerationRequest, ValidationError> {
        if !self.step_complete(WizardStep::Text) {
            return Err(ValidationError::MissingText);
        }
        let language = self.language.ok_or(ValidationError::MissingLanguage)?;
        let voice_style = self.voice_style.ok_or(ValidationError::MissingVoiceStyle)?;
        let voice = self
            .voice
            .as_ref()
            .filter(|v| !v.trim().is_empty())
            .ok_or(ValidationError::MissingVoice)?;

        Ok(GenerationRequest {
            text: self.text.clone(),
            language,
            voice_style,
            voice: voice.clone(),
        })
    }
}

/// A fully-validated generation request.
///
/// Only [`GenerationWizard::build_request`] constructs one, so holding a
/// `GenerationRequest` means every field validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    text: String,
    language: Language,
    voice_style: VoiceStyle,
    voice: String,
}

impl GenerationRequest {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn voice_style(&self) -> VoiceStyle {
        self.voice_style
    }

    pub fn voice(&self) -> &str {
        &self.voice
    }

    /// The wire body submitted to the generation service.
    pub fn into_create(self, kind: GenerationKind) -> CreateGenerationRequest {
        CreateGenerationRequest {
            input_text: self.text,
            language: self.language.as_str().to_string(),
            voice_style: self.voice_style.as_str().to_string(),
            selected_voice: self.voice,
            generation_type: kind,
        }
    }
}
