mod api;
mod catalog;
mod cli;
mod config;
mod error;
mod monitor;
mod quota;
mod state_machine;
mod ui;
mod wizard;

use anyhow::Result;
use clap::Parser;
use console::Style;

use crate::api::{GenerationApi, GenerationClient, GenerationKind, GenerationStatus};
use crate::catalog::{Language, VoiceStyle};
use crate::cli::{Cli, Command};
use crate::config::MantraConfig;
use crate::error::MantraError;
use crate::monitor::JobMonitor;
use crate::quota::{GateDecision, UsageCounter, UsageGate};
use crate::state_machine::{Attempt, AttemptReport, MonitorEvent, MonitorOutcome};
use crate::ui::GenerationProgress;
use crate::wizard::{GenerationRequest, GenerationWizard, WizardStep};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("{} {err}", Style::new().red().bold().apply_to("✗"));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = MantraConfig::load()?;
    let api_url = cli.api_url.unwrap_or_else(|| config.api_url.clone());
    let client = GenerationClient::with_base_url(config.token(), api_url);

    match cli.command {
        Command::Generate {
            text,
            language,
            voice_style,
            voice,
            kind,
        } => {
            let request = prepare_request(text, language.into(), voice_style.into(), voice)?;
            generate(client, &config, cli.verbose, request, kind.into()).await
        }
        Command::Status { id } => {
            let record = client.get(id).await.map_err(MantraError::from)?;
            ui::print_record(&record);
            if !record.status.is_terminal() {
                println!("    still in progress — check again soon");
            }
            Ok(())
        }
        Command::List { skip, limit } => {
            let records = client.list(skip, limit).await.map_err(MantraError::from)?;
            if records.is_empty() {
                println!("No generations yet.");
            }
            for record in &records {
                ui::print_record_line(record);
            }
            Ok(())
        }
        Command::Catalog { style } => {
            print_catalog(style.map(VoiceStyle::from));
            Ok(())
        }
        Command::Demo => {
            demo();
            Ok(())
        }
    }
}

/// Validate the inputs against the catalog and walk them through the wizard.
fn prepare_request(
    text: String,
    language: Language,
    style: VoiceStyle,
    voice: String,
) -> Result<GenerationRequest, MantraError> {
    let entry =
        catalog::find_voice(&voice).ok_or_else(|| MantraError::UnknownVoice(voice.clone()))?;
    if entry.style != style {
        return Err(MantraError::VoiceUnavailable {
            voice,
            style: style.to_string(),
        });
    }

    let mut wizard = GenerationWizard::new();
    wizard.set_text(text);
    wizard.next();
    wizard.set_language(language);
    wizard.next();
    wizard.set_voice_style(style);
    wizard.next();
    wizard.set_voice(voice);
    Ok(wizard.build_request()?)
}

async fn generate(
    client: GenerationClient,
    config: &MantraConfig,
    verbose: bool,
    request: GenerationRequest,
    kind: GenerationKind,
) -> Result<()> {
    // The quota resolves locally, before anything touches the network.
    let usage = config.usage();
    if let GateDecision::Deny { .. } = UsageGate::check(&usage) {
        return Err(MantraError::QuotaExceeded {
            used: usage.used,
            limit: usage.limit,
        }
        .into());
    }
    if usage.nearing_limit() {
        println!(
            "{} You've used {} of {} generations ({} remaining).",
            Style::new().yellow().apply_to("!"),
            usage.used,
            usage.limit,
            usage.remaining()
        );
    }

    let progress = GenerationProgress::start(request.text());
    let (monitor, mut handle) = JobMonitor::new(client, config.monitor_config());

    let mut rx = handle.watch();
    let follower = {
        let progress = progress.clone();
        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let snapshot = rx.borrow().clone();
                progress.observe(&snapshot);
                if snapshot.state.is_terminal() {
                    break;
                }
            }
        })
    };
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            handle.cancel();
        }
    });

    let (outcome, report) = monitor.run(request.into_create(kind)).await;
    let _ = follower.await;
    progress.finish(&outcome);
    if verbose {
        ui::print_report(&report);
    }

    match outcome {
        MonitorOutcome::Completed { record } => {
            if let Some(url) = &record.audio_url {
                println!("  audio: {url}");
            }
            if let Some(url) = &record.video_url {
                println!("  video: {url}");
            }
            Ok(())
        }
        MonitorOutcome::Failed { source } => Err(MantraError::from(source).into()),
        // Advisory outcomes, not failures: the job may still finish
        // server-side.
        MonitorOutcome::TimedOut | MonitorOutcome::Cancelled => Ok(()),
    }
}

/// List every language, voice style and voice the product offers.
fn print_catalog(style: Option<VoiceStyle>) {
    let bold = Style::new().bold();

    println!("{}", bold.apply_to("Languages"));
    for language in Language::ALL {
        let script = if language.devanagari() {
            " — Devanagari script"
        } else {
            ""
        };
        println!("  {:<10} {}{script}", language.as_str(), language.label());
    }

    println!();
    println!("{}", bold.apply_to("Voice styles"));
    for entry in VoiceStyle::ALL {
        println!(
            "  {:<12} {} — {}",
            entry.as_str(),
            entry.label(),
            entry.description()
        );
    }

    println!();
    println!("{}", bold.apply_to("Voices"));
    match style {
        Some(style) => {
            for voice in catalog::voices_for_style(style) {
                println!("  {:<10} {} ({})", voice.id, voice.label, voice.style);
            }
        }
        None => {
            for voice in catalog::VOICES {
                println!("  {:<10} {} ({})", voice.id, voice.label, voice.style);
            }
        }
    }
}

/// Walk the wizard, the quota gate and the monitor state machine through
/// a scripted lifecycle without touching the network.
fn demo() {
    let cyan = Style::new().cyan().bold();
    let green = Style::new().green().bold();
    let yellow = Style::new().yellow();

    println!("{}", cyan.apply_to("mantra — generation lifecycle demo"));

    // Collect the request step by step, including a detour back to review
    // an earlier answer.
    println!();
    println!("{}", cyan.apply_to("input wizard"));
    let mut wizard = GenerationWizard::new();
    wizard.set_text("ॐ नमो भगवते वासुदेवाय");
    wizard.next();
    wizard.set_language(Language::Sanskrit);
    wizard.next();
    wizard.set_voice_style(VoiceStyle::Devotional);
    wizard.back();
    wizard.next();
    wizard.next();
    wizard.set_voice("krishna");
    for step in WizardStep::ALL {
        let mark = if wizard.step_complete(step) {
            green.apply_to("✓")
        } else {
            yellow.apply_to("…")
        };
        println!("  {} step {}/4 — {}", mark, step.position(), step);
    }
    let request = match wizard.build_request() {
        Ok(request) => request,
        Err(err) => {
            println!("  {} {err}", yellow.apply_to("!"));
            return;
        }
    };
    println!(
        "  request: {} / {} / {}",
        request.language().label(),
        request.voice_style().label(),
        request.voice()
    );

    // The quota gate resolves before any network call would happen.
    println!();
    println!("{}", cyan.apply_to("usage gate"));
    let usage = UsageCounter::new(45, 100);
    match UsageGate::check(&usage) {
        GateDecision::Allow => println!(
            "  {} {}/{} used — submission allowed",
            green.apply_to("✓"),
            usage.used,
            usage.limit
        ),
        GateDecision::Deny { reason } => println!("  {} {reason}", yellow.apply_to("✗")),
    }

    println!();
    println!("{}", cyan.apply_to("monitor state machine"));
    let mut attempt = Attempt::new();
    let script = [
        ("submit request", MonitorEvent::SubmitIssued),
        (
            "backend accepts the job",
            MonitorEvent::CreateSucceeded { job_id: 101 },
        ),
        (
            "poll #1",
            MonitorEvent::PollReturned(GenerationStatus::Pending),
        ),
        (
            "poll #2",
            MonitorEvent::PollReturned(GenerationStatus::Processing),
        ),
        (
            "poll #3",
            MonitorEvent::PollReturned(GenerationStatus::Completed),
        ),
    ];

    for (label, event) in script {
        attempt.apply(&event);
        println!("  {label:<24} → {} ({}%)", attempt.state, attempt.progress);
    }

    // A late cancel finds the attempt settled and is discarded.
    if attempt.apply(&MonitorEvent::CancelRequested).is_none() {
        println!();
        println!(
            "  {} late cancel discarded — the attempt already settled",
            yellow.apply_to("↻")
        );
    }
    println!("  {} one attempt, one terminal state", green.apply_to("✓"));

    ui::print_report(&AttemptReport::from_attempt(&attempt));
}
