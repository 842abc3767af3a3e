//! Configuração do mantra carregada a partir de `mantra.toml`.
//!
//! A struct [`MantraConfig`] contém todos os parâmetros configuráveis.
//! Valores não presentes no arquivo usam defaults sensíveis.
//! A variável de ambiente `MANTRA_API_TOKEN` tem precedência sobre o
//! arquivo para o token de acesso.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::MantraError;
use crate::monitor::MonitorConfig;
use crate::quota::UsageCounter;

/// Configuração de nível superior carregada de `mantra.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct MantraConfig {
    /// URL base da API de gerações.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Token de acesso (bearer). Vazio quando não autenticado.
    #[serde(default)]
    pub api_token: String,

    /// Intervalo entre polls de status, em milissegundos.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Orçamento total de monitoramento por tentativa, em milissegundos.
    #[serde(default = "default_deadline_ms")]
    pub deadline_ms: u64,

    /// Gerações já consumidas no período corrente, conforme a conta.
    #[serde(default)]
    pub generations_used: u32,

    /// Limite de gerações do plano corrente.
    #[serde(default = "default_generations_limit")]
    pub generations_limit: u32,
}

// URL padrão do backend local de desenvolvimento.
fn default_api_url() -> String {
    "http://localhost:8000/api/v1".to_string()
}

// Intervalo padrão entre polls: 2000ms.
fn default_poll_interval_ms() -> u64 {
    2000
}

// Orçamento padrão de monitoramento: 5 minutos.
fn default_deadline_ms() -> u64 {
    300_000
}

// Limite padrão de gerações do plano creator.
fn default_generations_limit() -> u32 {
    100
}

impl Default for MantraConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_token: String::new(),
            poll_interval_ms: default_poll_interval_ms(),
            deadline_ms: default_deadline_ms(),
            generations_used: 0,
            generations_limit: default_generations_limit(),
        }
    }
}

impl MantraConfig {
    /// Carrega a configuração de `mantra.toml` no diretório atual.
    /// Usa valores padrão se o arquivo não existir.
    pub fn load() -> Result<Self, MantraError> {
        Self::load_from(Path::new("mantra.toml"))
    }

    pub fn load_from(path: &Path) -> Result<Self, MantraError> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<MantraConfig>(&contents)?
        } else {
            Self::default()
        };

        // Variável de ambiente tem precedência sobre o arquivo para o token.
        if let Ok(token) = std::env::var("MANTRA_API_TOKEN")
            && !token.is_empty()
        {
            config.api_token = token;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), MantraError> {
        if self.poll_interval_ms == 0 {
            return Err(MantraError::Config(
                "poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.deadline_ms == 0 {
            return Err(MantraError::Config(
                "deadline_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Token de acesso, se configurado.
    pub fn token(&self) -> Option<String> {
        if self.api_token.is_empty() {
            None
        } else {
            Some(self.api_token.clone())
        }
    }

    /// Contador de uso conhecido localmente.
    pub fn usage(&self) -> UsageCounter {
        UsageCounter::new(self.generations_used, self.generations_limit)
    }

    /// Parâmetros de tempo do monitor.
    pub fn monitor_config(&self) -> MonitorConfig {
        MonitorConfig {
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            deadline: Duration::from_millis(self.deadline_ms),
        }
    }
}
