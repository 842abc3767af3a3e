use std::fmt;

use serde::{Deserialize, Serialize};

/// Languages the synthesis backend accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Sanskrit,
    Hindi,
    Tamil,
    Telugu,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::Sanskrit,
        Language::Hindi,
        Language::Tamil,
        Language::Telugu,
    ];

    /// Wire value, as the backend expects it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Sanskrit => "sanskrit",
            Language::Hindi => "hindi",
            Language::Tamil => "tamil",
            Language::Telugu => "telugu",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Language::Sanskrit => "Sanskrit",
            Language::Hindi => "Hindi",
            Language::Tamil => "Tamil",
            Language::Telugu => "Telugu",
        }
    }

    /// Whether the language is written in Devanagari script.
    pub fn devanagari(&self) -> bool {
        matches!(self, Language::Sanskrit | Language::Hindi)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The emotional register of the synthesized voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceStyle {
    Devotional,
    Meditative,
    Energetic,
}

impl VoiceStyle {
    pub const ALL: [VoiceStyle; 3] = [
        VoiceStyle::Devotional,
        VoiceStyle::Meditative,
        VoiceStyle::Energetic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VoiceStyle::Devotional => "devotional",
            VoiceStyle::Meditative => "meditative",
            VoiceStyle::Energetic => "energetic",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VoiceStyle::Devotional => "Devotional",
            VoiceStyle::Meditative => "Meditative",
            VoiceStyle::Energetic => "Energetic",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            VoiceStyle::Devotional => "Warm and reverent",
            VoiceStyle::Meditative => "Calm and peaceful",
            VoiceStyle::Energetic => "Vibrant and uplifting",
        }
    }
}

impl fmt::Display for VoiceStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry in the voice catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Voice {
    pub id: &'static str,
    pub label: &'static str,
    pub style: VoiceStyle,
}

pub const VOICES: &[Voice] = &[
    Voice {
        id: "krishna",
        label: "Krishna Voice",
        style: VoiceStyle::Devotional,
    },
    Voice {
        id: "shiva",
        label: "Shiva Voice",
        style: VoiceStyle::Devotional,
    },
    Voice {
        id: "rama",
        label: "Rama Voice",
        style: VoiceStyle::Meditative,
    },
    Voice {
        id: "ganesha",
        label: "Ganesha Voice",
        style: VoiceStyle::Energetic,
    },
    Voice {
        id: "lakshmi",
        label: "Lakshmi Voice",
        style: VoiceStyle::Devotional,
    },
    Voice {
        id: "saraswati",
        label: "Saraswati Voice",
        style: VoiceStyle::Meditative,
    },
];

/// Look a voice up by its catalog id.
pub fn find_voice(id: &str) -> Option<&'static Voice> {
    VOICES.iter().find(|voice| voice.id == id)
}

/// The voices offered for a given style.
pub fn voices_for_style(style: VoiceStyle) -> impl Iterator<Item = &'static Voice> {
    VOICES.iter().filter(move |voice| voice.style == style)
}
