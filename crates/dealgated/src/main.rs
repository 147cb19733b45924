//! dealgated - reference host for the deal cooldown gate
//!
//! Wires together:
//! - Configuration loading and reload (SIGHUP or the `reload` command)
//! - The gate engine and its cooldown registry
//! - A tick loop that sweeps expired cooldowns
//! - A JSON-lines command stream on stdin, results on stdout

mod protocol;

use anyhow::{Context, Result};
use clap::Parser;
use dealgate_config::{SettingsHandle, load_config, load_config_or_default};
use dealgate_core::{CoreEvent, DealGate};
use dealgate_host_api::Notifier;
use dealgate_util::{EntityId, GameClock, GameTime, default_config_path};
use protocol::{Command, Output, OutputBody};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal::unix::{SignalKind, signal};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// dealgated - Deal cooldown gate host
#[derive(Parser, Debug)]
#[command(name = "dealgated")]
#[command(about = "Gates repeated deal offers behind a configurable cooldown", long_about = None)]
struct Args {
    /// Configuration file path (or set DEALGATE_CONFIG env var)
    #[arg(short, long, default_value_os_t = default_config_path())]
    config: PathBuf,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Sweep interval in milliseconds
    #[arg(long, default_value_t = 1000)]
    tick_ms: u64,

    /// Never emit registry views from the tick loop
    #[arg(long)]
    no_view: bool,
}

/// Writes notifications as output records
struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn notify(&self, message: &str) {
        emit(OutputBody::Notification {
            message: message.to_string(),
        });
    }
}

fn emit(body: OutputBody) {
    println!("{}", Output::new(body).to_line());
}

/// Host state, confined to the main task
struct Host {
    gate: DealGate,
    config_path: PathBuf,
    auto_view: bool,
}

impl Host {
    fn new(config_path: PathBuf, settings: SettingsHandle, auto_view: bool) -> Self {
        Self {
            gate: DealGate::new(settings, Arc::new(StdoutNotifier)),
            config_path,
            auto_view,
        }
    }

    fn handle_line(&mut self, line: &str, now: GameTime) -> Vec<OutputBody> {
        let line = line.trim();
        if line.is_empty() {
            return Vec::new();
        }

        match serde_json::from_str::<Command>(line) {
            Ok(command) => self.handle_command(command, now),
            Err(e) => {
                warn!(error = %e, "Malformed command");
                vec![OutputBody::Error {
                    message: format!("malformed command: {}", e),
                }]
            }
        }
    }

    fn handle_command(&mut self, command: Command, now: GameTime) -> Vec<OutputBody> {
        match command {
            Command::Offer(offer) => vec![self.gate.check_offer(&offer, now).into()],

            Command::Complete { customer } => {
                let customer = EntityId::new(customer);
                let was_tracked = self.gate.record_completed(&customer);
                vec![OutputBody::Completed {
                    customer,
                    was_tracked,
                }]
            }

            Command::View => vec![self.view(now)],

            Command::Reload => vec![self.reload()],
        }
    }

    fn tick(&mut self, now: GameTime) -> Vec<OutputBody> {
        let events = self.gate.tick(now);
        let any_expired = !events.is_empty();

        let mut outputs: Vec<OutputBody> = events
            .into_iter()
            .filter_map(|event| match event {
                CoreEvent::CooldownExpired { entity } => {
                    Some(OutputBody::Expired { customer: entity })
                }
                CoreEvent::SettingsChanged { .. } => None,
            })
            .collect();

        if self.auto_view && self.gate.settings().display().show_window {
            let display = self.gate.settings().display();
            let view = self.gate.view(now);
            if view.became_visible || any_expired {
                outputs.push(OutputBody::view(view, display.window_x, display.window_y));
            }
        }

        outputs
    }

    fn view(&mut self, now: GameTime) -> OutputBody {
        let display = self.gate.settings().display();
        OutputBody::view(self.gate.view(now), display.window_x, display.window_y)
    }

    fn reload(&mut self) -> OutputBody {
        match load_config(&self.config_path) {
            Ok(settings) => {
                let changes: Vec<String> = self
                    .gate
                    .apply_settings(settings)
                    .into_iter()
                    .filter_map(|event| match event {
                        CoreEvent::SettingsChanged { change } => Some(change.to_string()),
                        CoreEvent::CooldownExpired { .. } => None,
                    })
                    .collect();

                info!(
                    config_path = %self.config_path.display(),
                    change_count = changes.len(),
                    "Configuration reloaded"
                );
                OutputBody::Reloaded { changes }
            }
            Err(e) => {
                warn!(error = %e, "Reload failed, keeping current settings");
                OutputBody::Error {
                    message: format!("reload failed: {}", e),
                }
            }
        }
    }
}

async fn run(mut host: Host, tick_interval: Duration) -> Result<()> {
    let clock = GameClock::start();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let mut sigterm =
        signal(SignalKind::terminate()).context("Failed to create SIGTERM handler")?;
    let mut sigint =
        signal(SignalKind::interrupt()).context("Failed to create SIGINT handler")?;
    let mut sighup = signal(SignalKind::hangup()).context("Failed to create SIGHUP handler")?;

    let mut tick_timer = tokio::time::interval(tick_interval);

    info!("dealgated running");

    loop {
        tokio::select! {
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down");
                break;
            }
            _ = sigint.recv() => {
                info!("Received SIGINT, shutting down");
                break;
            }

            // SIGHUP - reload configuration
            _ = sighup.recv() => {
                info!("Received SIGHUP, reloading configuration");
                emit(host.reload());
            }

            _ = tick_timer.tick() => {
                for output in host.tick(clock.now()) {
                    emit(output);
                }
            }

            line = lines.next_line() => {
                match line.context("Failed to read stdin")? {
                    Some(line) => {
                        for output in host.handle_line(&line, clock.now()) {
                            emit(output);
                        }
                    }
                    None => {
                        debug!("stdin closed");
                        break;
                    }
                }
            }
        }
    }

    info!(tracked = host.gate.registry().len(), "Shutdown complete");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries the protocol
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "dealgated starting"
    );

    let settings = load_config_or_default(&args.config)
        .with_context(|| format!("Failed to load config from {:?}", args.config))?;

    info!(
        config_path = %args.config.display(),
        cooldown_multiplier = %settings.economy.cooldown_scale,
        log_verbosity = %settings.economy.log_verbosity,
        "Configuration loaded"
    );

    let host = Host::new(args.config.clone(), SettingsHandle::new(settings), !args.no_view);
    run(host, Duration::from_millis(args.tick_ms.max(1))).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealgate_core::DenialReason;
    use std::io::Write;

    fn make_host(config_path: PathBuf) -> Host {
        Host::new(config_path, SettingsHandle::default(), true)
    }

    fn t(secs: f64) -> GameTime {
        GameTime::from_secs(secs)
    }

    #[test]
    fn test_offer_line_produces_decision() {
        let mut host = make_host(PathBuf::from("/nonexistent"));
        let line = r#"{"cmd":"offer","customer":"A","since_completed":0,"since_offered":1000,"pending_offer":false,"pending_instant_deal":false}"#;

        let outputs = host.handle_line(line, t(0.0));
        assert_eq!(
            outputs,
            vec![OutputBody::Decision {
                customer: EntityId::new("A"),
                allowed: false,
                reason: Some(DenialReason::RecentlyCompleted),
                remaining_secs: 360.0,
                message: "Customer recently completed a deal (360s remaining)".into(),
            }]
        );
    }

    #[test]
    fn test_incomplete_offer_falls_through() {
        let mut host = make_host(PathBuf::from("/nonexistent"));
        let outputs = host.handle_line(r#"{"cmd":"offer","customer":"A"}"#, t(0.0));

        assert!(matches!(outputs[0], OutputBody::FallThrough { .. }));
        assert!(host.gate.registry().is_empty());
    }

    #[test]
    fn test_malformed_and_blank_lines() {
        let mut host = make_host(PathBuf::from("/nonexistent"));
        assert!(host.handle_line("   ", t(0.0)).is_empty());
        assert!(matches!(
            host.handle_line("not json", t(0.0))[0],
            OutputBody::Error { .. }
        ));
    }

    #[test]
    fn test_tick_emits_view_on_edge_and_expiry() {
        let mut host = make_host(PathBuf::from("/nonexistent"));
        host.handle_line(
            r#"{"cmd":"offer","customer":"A","since_completed":350,"since_offered":1000,"pending_offer":false,"pending_instant_deal":false}"#,
            t(0.0),
        );

        // Became visible
        let outputs = host.tick(t(1.0));
        assert!(matches!(
            outputs.as_slice(),
            [OutputBody::View { became_visible: true, .. }]
        ));

        // Nothing new
        assert!(host.tick(t(2.0)).is_empty());

        // Expired
        let outputs = host.tick(t(10.0));
        assert_eq!(outputs.len(), 2);
        assert!(matches!(outputs[0], OutputBody::Expired { .. }));
        assert!(matches!(&outputs[1], OutputBody::View { rows, .. } if rows.is_empty()));
    }

    #[test]
    fn test_reload_applies_new_scale() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "config_version = 1\n[economy]\ndeal_cooldown_multiplier = 0.0").unwrap();

        let mut host = make_host(file.path().to_path_buf());
        let outputs = host.handle_line(r#"{"cmd":"reload"}"#, t(0.0));
        assert_eq!(
            outputs,
            vec![OutputBody::Reloaded {
                changes: vec!["Deal cooldown changed: 1.0x -> 0.0x (0s)".into()],
            }]
        );
        assert_eq!(host.gate.settings().cooldown_scale().get(), 0.0);
    }

    #[test]
    fn test_failed_reload_keeps_settings() {
        let mut host = make_host(PathBuf::from("/nonexistent/dealgate.toml"));
        let outputs = host.handle_line(r#"{"cmd":"reload"}"#, t(0.0));

        assert!(matches!(outputs[0], OutputBody::Error { .. }));
        assert_eq!(host.gate.settings().cooldown_scale().get(), 1.0);
    }

    #[test]
    fn test_complete_stops_tracking() {
        let mut host = make_host(PathBuf::from("/nonexistent"));
        host.handle_line(
            r#"{"cmd":"offer","customer":"A","since_completed":0,"since_offered":0,"pending_offer":false,"pending_instant_deal":false}"#,
            t(0.0),
        );

        let outputs = host.handle_line(r#"{"cmd":"complete","customer":"A"}"#, t(360.0));
        assert_eq!(
            outputs,
            vec![OutputBody::Completed {
                customer: EntityId::new("A"),
                was_tracked: true,
            }]
        );
        assert!(host.gate.registry().is_empty());
    }
}
