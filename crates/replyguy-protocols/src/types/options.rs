//! Generation presets offered by the overlay.

use serde::{Deserialize, Serialize};

/// Preset reply tones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetTone {
    Friendly,
    Casual,
    Supportive,
    Humorous,
    Thoughtful,
    Analytical,
    Creative,
}

impl PresetTone {
    pub const ALL: [PresetTone; 7] = [
        Self::Friendly,
        Self::Casual,
        Self::Supportive,
        Self::Humorous,
        Self::Thoughtful,
        Self::Analytical,
        Self::Creative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Friendly => "friendly",
            Self::Casual => "casual",
            Self::Supportive => "supportive",
            Self::Humorous => "humorous",
            Self::Thoughtful => "thoughtful",
            Self::Analytical => "analytical",
            Self::Creative => "creative",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Friendly => "Friendly",
            Self::Casual => "Casual",
            Self::Supportive => "Supportive",
            Self::Humorous => "Humorous",
            Self::Thoughtful => "Thoughtful",
            Self::Analytical => "Analytical",
            Self::Creative => "Creative",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Friendly => "\u{1f60a}",
            Self::Casual => "\u{1f44b}",
            Self::Supportive => "\u{1f4aa}",
            Self::Humorous => "\u{1f604}",
            Self::Thoughtful => "\u{1f914}",
            Self::Analytical => "\u{1f4ca}",
            Self::Creative => "\u{2728}",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

/// Post categories for the top-level composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostCategory {
    Insight,
    Question,
    Announcement,
    Tip,
    Story,
    Opinion,
    Fun,
    Custom,
}

impl PostCategory {
    /// Categories shown as buttons; `Custom` is driven by free text instead.
    pub const PRESETS: [PostCategory; 7] = [
        Self::Insight,
        Self::Question,
        Self::Announcement,
        Self::Tip,
        Self::Story,
        Self::Opinion,
        Self::Fun,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Insight => "insight",
            Self::Question => "question",
            Self::Announcement => "announcement",
            Self::Tip => "tip",
            Self::Story => "story",
            Self::Opinion => "opinion",
            Self::Fun => "fun",
            Self::Custom => "custom",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Insight => "Insight",
            Self::Question => "Question",
            Self::Announcement => "News",
            Self::Tip => "Tip",
            Self::Story => "Story",
            Self::Opinion => "Opinion",
            Self::Fun => "Fun",
            Self::Custom => "Custom",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Insight => "\u{1f4a1}",
            Self::Question => "\u{2753}",
            Self::Announcement => "\u{1f4e2}",
            Self::Tip => "\u{2728}",
            Self::Story => "\u{1f4d6}",
            Self::Opinion => "\u{1f4ad}",
            Self::Fun => "\u{1f389}",
            Self::Custom => "\u{270d}",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::PRESETS
            .into_iter()
            .chain(std::iter::once(Self::Custom))
            .find(|c| c.as_str() == value)
    }
}

/// Supported completion models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OpenAIModel {
    #[serde(rename = "gpt-4")]
    Gpt4,
    #[serde(rename = "gpt-4-turbo")]
    Gpt4Turbo,
    #[default]
    #[serde(rename = "gpt-3.5-turbo")]
    Gpt35Turbo,
}

impl OpenAIModel {
    pub const ALL: [OpenAIModel; 3] = [Self::Gpt4, Self::Gpt4Turbo, Self::Gpt35Turbo];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gpt4 => "gpt-4",
            Self::Gpt4Turbo => "gpt-4-turbo",
            Self::Gpt35Turbo => "gpt-3.5-turbo",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == value)
    }
}

impl std::fmt::Display for OpenAIModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
