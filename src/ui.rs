//! Interface de terminal do mantra — spinners e saída colorida.
//!
//! Usa as crates `indicatif` para o spinner de progresso e `console` para
//! estilização com cores. O [`GenerationProgress`] acompanha visualmente
//! uma tentativa de geração no terminal.

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::api::{GenerationRecord, GenerationStatus};
use crate::state_machine::{AttemptReport, MonitorOutcome, MonitorSnapshot, RunState};

/// Indicador visual de progresso para uma tentativa de geração.
///
/// Exibe um spinner animado enquanto o job é monitorado e mensagens
/// coloridas para o desfecho: sucesso (verde), falha (vermelho),
/// estouro de prazo e cancelamento (amarelo).
#[derive(Clone)]
pub struct GenerationProgress {
    // Barra de progresso/spinner do indicatif.
    pb: ProgressBar,
    // Estilo verde para mensagens de sucesso.
    green: Style,
    // Estilo vermelho para mensagens de falha.
    red: Style,
    // Estilo amarelo para avisos.
    yellow: Style,
}

impl GenerationProgress {
    /// Inicia o spinner com um trecho do texto do mantra.
    pub fn start(text: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("invalid template"),
        );
        pb.set_message(format!("SUBMITTING: {}", excerpt(text)));
        pb.enable_steady_tick(std::time::Duration::from_millis(100));

        Self {
            pb,
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
            yellow: Style::new().yellow(),
        }
    }

    /// Atualiza a mensagem do spinner com o snapshot mais recente.
    pub fn observe(&self, snapshot: &MonitorSnapshot) {
        let job = match snapshot.job_id {
            Some(id) => format!(" — job {id}"),
            None => String::new(),
        };
        self.pb
            .set_message(format!("{} {}%{job}", snapshot.state, snapshot.progress));
    }

    /// Finaliza o spinner e exibe o desfecho da tentativa.
    pub fn finish(&self, outcome: &MonitorOutcome) {
        self.pb.finish_and_clear();
        match outcome {
            MonitorOutcome::Completed { .. } => {
                println!(
                    "  {} Generation complete! Your devotional content is ready.",
                    self.green.apply_to("✓")
                );
            }
            MonitorOutcome::Failed { source } => {
                println!("  {} Generation failed: {source}", self.red.apply_to("✗"));
                if source.is_transport() {
                    println!(
                        "  {} The job itself may be fine — retry the attempt.",
                        self.yellow.apply_to("↻")
                    );
                }
            }
            MonitorOutcome::TimedOut => {
                println!(
                    "  {} Generation taking longer than expected — check your dashboard for updates.",
                    self.yellow.apply_to("…")
                );
            }
            MonitorOutcome::Cancelled => {
                println!("  {} Generation cancelled.", self.yellow.apply_to("✗"));
            }
        }
    }
}

/// Rótulo e estilo do badge de cada status reportado pelo backend.
pub fn status_badge(status: GenerationStatus) -> (&'static str, Style) {
    match status {
        GenerationStatus::Pending => ("Pending", Style::new().yellow()),
        GenerationStatus::Processing => ("Processing", Style::new().cyan()),
        GenerationStatus::Completed => ("Completed", Style::new().green().bold()),
        GenerationStatus::Failed => ("Failed", Style::new().red().bold()),
    }
}

/// Imprime um registro de geração em detalhe (subcomando `status`).
pub fn print_record(record: &GenerationRecord) {
    let (label, style) = status_badge(record.status);
    println!("#{} [{}] {}", record.id, style.apply_to(label), excerpt(&record.input_text));
    println!(
        "    {} · {} · {}",
        record.language, record.voice_style, record.selected_voice
    );
    println!("    created: {}", record.created_at);
    if let Some(completed) = &record.completed_at {
        println!("    completed: {completed}");
    }
    if let Some(url) = &record.audio_url {
        println!("    audio: {url}");
    }
    if let Some(url) = &record.video_url {
        println!("    video: {url}");
    }
    if let Some(message) = &record.error_message {
        println!("    error: {message}");
    }
}

/// Imprime um registro em uma linha (subcomando `list`).
pub fn print_record_line(record: &GenerationRecord) {
    let (label, style) = status_badge(record.status);
    println!(
        "#{} [{}] {} ({})",
        record.id,
        style.apply_to(label),
        excerpt(&record.input_text),
        record.created_at.format("%Y-%m-%d %H:%M")
    );
}

/// Imprime o relatório da tentativa formatado em JSON.
pub fn print_report(report: &AttemptReport) {
    let style = match report.state {
        RunState::Completed => Style::new().green().bold(),
        RunState::Failed => Style::new().red().bold(),
        _ => Style::new().yellow(),
    };
    println!();
    println!("{}", style.apply_to("─── Attempt Report ───"));
    println!(
        "{}",
        serde_json::to_string_pretty(report).unwrap_or_default()
    );
}

// Trecho curto do texto para caber em uma linha do terminal.
fn excerpt(text: &str) -> String {
    const MAX: usize = 40;
    let mut out: String = text.chars().take(MAX).collect();
    if text.chars().count() > MAX {
        out.push('…');
    }
    out
}
