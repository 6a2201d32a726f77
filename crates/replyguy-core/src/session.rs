//! Generation session: what the options panel is doing right now.
//!
//! A session holds at most one in-flight request. [`GenerationSession::begin`]
//! claims the slot, [`PendingGeneration::run`] talks to the store and the
//! generator without borrowing the session, and
//! [`GenerationSession::finish`] releases the slot and records any error for
//! display.

use replyguy_protocols::{
    CustomProfile, ExtractedContext, GenerationRequest, Generator, PostCategory, PresetTone,
    SettingsStore,
};
use tracing::{debug, info, warn};

use crate::error::SessionError;

/// One button in the options panel.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOption {
    Tone(PresetTone),
    Category(PostCategory),
    Profile(CustomProfile),
    CustomInstruction(String),
}

impl GenerationOption {
    /// The value sent to the generator as tone or category.
    pub fn option_key(&self) -> String {
        match self {
            Self::Tone(tone) => tone.as_str().to_string(),
            Self::Category(category) => category.as_str().to_string(),
            Self::Profile(profile) => profile.name.clone(),
            Self::CustomInstruction(_) => PostCategory::Custom.as_str().to_string(),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::Tone(tone) => tone.label().to_string(),
            Self::Category(category) => category.label().to_string(),
            Self::Profile(profile) => profile.name.clone(),
            Self::CustomInstruction(_) => PostCategory::Custom.label().to_string(),
        }
    }

    pub fn custom_description(&self) -> Option<String> {
        match self {
            Self::Profile(profile) => Some(profile.description.clone()),
            Self::CustomInstruction(text) => Some(text.trim().to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct GenerationSession {
    loading: Option<String>,
    error: Option<String>,
}

impl GenerationSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key of the option being generated, if any.
    pub fn loading(&self) -> Option<&str> {
        self.loading.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.loading.is_some()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Claim the session for `option`. `subject` is `None` in post mode.
    pub fn begin(
        &mut self,
        option: GenerationOption,
        subject: Option<ExtractedContext>,
    ) -> Result<PendingGeneration, SessionError> {
        if let Some(current) = &self.loading {
            debug!("generation refused: '{}' still loading", current);
            return Err(SessionError::Busy);
        }
        if let GenerationOption::CustomInstruction(text) = &option {
            if text.trim().is_empty() {
                let err = SessionError::EmptyCustomInstruction;
                self.error = Some(err.to_string());
                return Err(err);
            }
        }
        self.loading = Some(option.option_key());
        self.error = None;
        Ok(PendingGeneration { option, subject })
    }

    /// Release the session. Returns the generated text on success; on
    /// failure the message is kept for display.
    pub fn finish(&mut self, result: Result<String, SessionError>) -> Option<String> {
        self.loading = None;
        match result {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("generation failed: {}", e);
                self.error = Some(e.to_string());
                None
            }
        }
    }
}

/// A claimed request that has not been sent yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingGeneration {
    option: GenerationOption,
    subject: Option<ExtractedContext>,
}

impl PendingGeneration {
    pub fn option(&self) -> &GenerationOption {
        &self.option
    }

    pub fn subject(&self) -> Option<&ExtractedContext> {
        self.subject.as_ref()
    }

    /// Build the request from stored settings and call the generator.
    pub async fn run(
        self,
        store: &dyn SettingsStore,
        generator: &dyn Generator,
    ) -> Result<String, SessionError> {
        let settings = store.get_settings().await?;
        if !settings.has_api_key() {
            return Err(SessionError::MissingApiKey);
        }

        let key = self.option.option_key();
        let mut request = match self.subject {
            Some(subject) => GenerationRequest::reply(subject, key),
            None => GenerationRequest::post(key),
        };
        if let Some(description) = self.option.custom_description() {
            request = request.with_custom_description(description);
        }
        let request = request.with_credentials(settings.model.as_str(), settings.api_key.trim());

        info!(
            "generating {:?} for '{}' with {}",
            request.mode(),
            request.option,
            request.model
        );
        Ok(generator.generate(request).await?)
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
