//! Interface de linha de comando do mantra baseada em clap.
//!
//! Define a struct [`Cli`] com subcomandos [`Command`] (generate, status,
//! list, demo) e flags globais (--api-url, --verbose).

use clap::{Parser, Subcommand, ValueEnum};

use crate::api::GenerationKind;
use crate::catalog::{Language, VoiceStyle};

/// mantra — Geração devocional de áudio e vídeo por IA.
#[derive(Debug, Parser)]
#[command(name = "mantra", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// URL base da API de gerações (sobrepõe `mantra.toml`).
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Habilita saída detalhada (verbose).
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

/// Idioma aceito pela CLI, mapeado para [`Language`] internamente.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LanguageArg {
    Sanskrit,
    Hindi,
    Tamil,
    Telugu,
}

impl From<LanguageArg> for Language {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::Sanskrit => Language::Sanskrit,
            LanguageArg::Hindi => Language::Hindi,
            LanguageArg::Tamil => Language::Tamil,
            LanguageArg::Telugu => Language::Telugu,
        }
    }
}

/// Estilo vocal aceito pela CLI, mapeado para [`VoiceStyle`] internamente.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StyleArg {
    /// Caloroso e reverente.
    Devotional,
    /// Calmo e tranquilo.
    Meditative,
    /// Vibrante e animado.
    Energetic,
}

impl From<StyleArg> for VoiceStyle {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Devotional => VoiceStyle::Devotional,
            StyleArg::Meditative => VoiceStyle::Meditative,
            StyleArg::Energetic => VoiceStyle::Energetic,
        }
    }
}

/// Tipo de geração aceito pela CLI.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    /// Somente áudio do mantra.
    TtsMantra,
    /// Vídeo com letra sincronizada.
    LyricVideo,
}

impl From<KindArg> for GenerationKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::TtsMantra => GenerationKind::TtsMantra,
            KindArg::LyricVideo => GenerationKind::LyricVideo,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Gera conteúdo devocional a partir do texto do mantra e acompanha
    /// o job até a conclusão.
    Generate {
        /// Texto do mantra a sintetizar.
        text: String,

        /// Idioma do texto.
        #[arg(long, value_enum, default_value = "sanskrit")]
        language: LanguageArg,

        /// Estilo vocal.
        #[arg(long = "style", value_enum, default_value = "devotional")]
        voice_style: StyleArg,

        /// Voz do catálogo.
        #[arg(long, default_value = "krishna")]
        voice: String,

        /// Tipo de conteúdo a gerar.
        #[arg(long, value_enum, default_value = "tts-mantra")]
        kind: KindArg,
    },

    /// Consulta o status de uma geração existente.
    Status {
        /// Identificador do job no backend.
        id: u64,
    },

    /// Lista as gerações recentes da conta.
    List {
        #[arg(long, default_value_t = 0)]
        skip: u32,

        #[arg(long, default_value_t = 20)]
        limit: u32,
    },

    /// Mostra o catálogo de idiomas, estilos e vozes.
    Catalog {
        /// Filtra as vozes por estilo.
        #[arg(long, value_enum)]
        style: Option<StyleArg>,
    },

    /// Executa a demonstração embutida do ciclo de vida de uma geração.
    Demo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_generate_with_defaults() {
        let cli = Cli::parse_from(["mantra", "generate", "ॐ नमः शिवाय"]);
        match cli.command {
            Command::Generate {
                text,
                language,
                voice_style,
                voice,
                kind,
            } => {
                assert_eq!(text, "ॐ नमः शिवाय");
                assert!(matches!(language, LanguageArg::Sanskrit));
                assert!(matches!(voice_style, StyleArg::Devotional));
                assert_eq!(voice, "krishna");
                assert!(matches!(kind, KindArg::TtsMantra));
            }
            _ => panic!("expected Generate command"),
        }
    }

    #[test]
    fn cli_parses_generate_flags() {
        let cli = Cli::parse_from([
            "mantra",
            "generate",
            "हरे कृष्ण",
            "--language",
            "hindi",
            "--style",
            "meditative",
            "--voice",
            "rama",
            "--kind",
            "lyric-video",
        ]);
        match cli.command {
            Command::Generate {
                language,
                voice_style,
                voice,
                kind,
                ..
            } => {
                assert!(matches!(language, LanguageArg::Hindi));
                assert!(matches!(voice_style, StyleArg::Meditative));
                assert_eq!(voice, "rama");
                assert!(matches!(kind, KindArg::LyricVideo));
            }
            _ => panic!("expected Generate command"),
        }
    }

    #[test]
    fn cli_parses_status_subcommand() {
        let cli = Cli::parse_from(["mantra", "status", "42"]);
        match cli.command {
            Command::Status { id } => assert_eq!(id, 42),
            _ => panic!("expected Status command"),
        }
    }

    #[test]
    fn cli_parses_list_pagination() {
        let cli = Cli::parse_from(["mantra", "list", "--skip", "10", "--limit", "5"]);
        match cli.command {
            Command::List { skip, limit } => {
                assert_eq!(skip, 10);
                assert_eq!(limit, 5);
            }
            _ => panic!("expected List command"),
        }
    }

    #[test]
    fn cli_parses_global_flags() {
        let cli = Cli::parse_from([
            "mantra",
            "--api-url",
            "https://api.example.com/api/v1",
            "--verbose",
            "demo",
        ]);
        assert!(cli.verbose);
        assert_eq!(
            cli.api_url.as_deref(),
            Some("https://api.example.com/api/v1")
        );
        assert!(matches!(cli.command, Command::Demo));
    }

    #[test]
    fn cli_parses_catalog_filter() {
        let cli = Cli::parse_from(["mantra", "catalog", "--style", "energetic"]);
        match cli.command {
            Command::Catalog { style } => assert!(matches!(style, Some(StyleArg::Energetic))),
            _ => panic!("expected Catalog command"),
        }

        let cli = Cli::parse_from(["mantra", "catalog"]);
        assert!(matches!(cli.command, Command::Catalog { style: None }));
    }

    #[test]
    fn arg_enums_map_to_domain_enums() {
        assert_eq!(Language::from(LanguageArg::Tamil), Language::Tamil);
        assert_eq!(VoiceStyle::from(StyleArg::Energetic), VoiceStyle::Energetic);
        assert_eq!(
            GenerationKind::from(KindArg::LyricVideo),
            GenerationKind::LyricVideo
        );
    }

    #[test]
    fn cli_verify() {
        Cli::command().debug_assert();
    }
}
