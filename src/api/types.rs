//! Tipos de dados para requisições e respostas da API de gerações.
//!
//! Todas as structs derivam `Serialize` e `Deserialize` para conversão JSON
//! conforme o formato esperado pelos endpoints `/generations` do backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Estado de um job de geração, reportado pelo backend.
///
/// As transições são monotônicas: `pending → processing → {completed|failed}`.
/// Nenhum job sai de um estado terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl GenerationStatus {
    /// `true` para `completed` e `failed`, estados dos quais o job não sai.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GenerationStatus::Completed | GenerationStatus::Failed)
    }
}

impl fmt::Display for GenerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationStatus::Pending => write!(f, "pending"),
            GenerationStatus::Processing => write!(f, "processing"),
            GenerationStatus::Completed => write!(f, "completed"),
            GenerationStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Tipo de conteúdo a gerar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationKind {
    /// Áudio devocional a partir do texto do mantra.
    #[serde(rename = "tts_mantra")]
    TtsMantra,
    /// Vídeo com a letra sincronizada sobre o áudio gerado.
    #[serde(rename = "lyric_video")]
    LyricVideo,
}

/// Corpo da requisição `POST /generations/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGenerationRequest {
    /// Texto do mantra a sintetizar.
    pub input_text: String,
    /// Idioma do texto (ex.: "sanskrit").
    pub language: String,
    /// Estilo vocal (ex.: "devotional").
    pub voice_style: String,
    /// Identificador da voz escolhida no catálogo.
    pub selected_voice: String,
    /// Tipo de geração solicitada.
    pub generation_type: GenerationKind,
}

/// Um job de geração como o backend o reporta.
///
/// O monitor trata instâncias deste tipo como snapshots somente-leitura;
/// o dono do registro é o backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub id: u64,
    pub status: GenerationStatus,
    pub input_text: String,
    pub language: String,
    pub voice_style: String,
    pub selected_voice: String,
    /// URL do áudio gerado. Presente apenas após conclusão.
    pub audio_url: Option<String>,
    /// URL do vídeo gerado. Presente apenas para gerações de vídeo concluídas.
    pub video_url: Option<String>,
    /// Motivo da falha reportado pelo worker, quando `status == failed`.
    #[serde(default)]
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}
