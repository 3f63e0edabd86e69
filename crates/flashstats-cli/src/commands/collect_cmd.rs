use anyhow::{Context, Result};
use clap::Args;
use flashstats::{Collector, CollectorConfig, Credentials, MqttSession, SaveOutcome, SubscriptionProfile};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Args)]
pub struct CollectCommand {
    /// Configuration file (JSON, or TOML with a .toml extension)
    #[arg(long, short, env = "FLASHSTATS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Snapshot file to read and update
    #[arg(long, short = 's')]
    pub state_file: Option<PathBuf>,

    /// Collection window in seconds
    #[arg(long, short)]
    pub duration: Option<u64>,

    /// MQTT broker host
    #[arg(long, short = 'H')]
    pub host: Option<String>,

    /// MQTT broker TLS port
    #[arg(long, short)]
    pub port: Option<u16>,

    /// Topic prefix shared by every device topic
    #[arg(long)]
    pub prefix: Option<String>,

    /// Which topics to subscribe to (stats, serial or debug)
    #[arg(long, value_parser = parse_profile)]
    pub profile: Option<SubscriptionProfile>,

    /// Client ID (defaults to flashstats-collector-<unix seconds>)
    #[arg(long)]
    pub client_id: Option<String>,

    /// Seconds to wait for the broker to accept the connection
    #[arg(long)]
    pub connect_timeout: Option<u64>,

    /// Do not count a serial disconnect as a completed flash
    #[arg(long)]
    pub no_disconnect_heuristic: bool,

    /// Collect and report, but leave the snapshot file untouched
    #[arg(long)]
    pub dry_run: bool,
}

fn parse_profile(s: &str) -> Result<SubscriptionProfile, String> {
    s.parse().map_err(|e: flashstats::CollectorError| e.to_string())
}

impl CollectCommand {
    /// Applies command-line overrides on top of `config`
    fn apply(&self, mut config: CollectorConfig) -> CollectorConfig {
        if let Some(path) = &self.state_file {
            config = config.with_state_file(path.clone());
        }
        if let Some(secs) = self.duration {
            config = config.with_collection_window(Duration::from_secs(secs));
        }
        if self.host.is_some() || self.port.is_some() {
            let host = self.host.clone().unwrap_or_else(|| config.broker_host.clone());
            let port = self.port.unwrap_or(config.broker_port);
            config = config.with_broker(host, port);
        }
        if let Some(prefix) = &self.prefix {
            config = config.with_topic_prefix(prefix.clone());
        }
        if let Some(profile) = self.profile {
            config = config.with_profile(profile);
        }
        if let Some(client_id) = &self.client_id {
            config = config.with_client_id(client_id.clone());
        }
        if let Some(secs) = self.connect_timeout {
            config = config.with_connect_timeout(Duration::from_secs(secs));
        }
        if self.no_disconnect_heuristic {
            config = config.with_disconnect_heuristic(false);
        }
        config
    }
}

pub async fn execute(cmd: CollectCommand) -> Result<()> {
    let base = match &cmd.config {
        Some(path) => CollectorConfig::from_file(path)
            .await
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None => CollectorConfig::default(),
    };
    let config = cmd.apply(base);
    config.validate().context("Invalid configuration")?;

    // fail before touching the network
    let credentials = Credentials::from_env().context("Broker credentials are not set")?;

    info!(
        broker = %config.broker_url(),
        profile = %config.profile,
        state_file = %config.state_file.display(),
        window_secs = config.collection_secs,
        "Starting collection"
    );

    let session = MqttSession::new();
    let mut collector = Collector::load(config).await;

    if cmd.dry_run {
        let report = collector
            .collect(&session, &credentials)
            .await
            .context("Collection failed")?;
        let store = collector.store();
        info!(
            received = report.received,
            devices = store.devices().len(),
            events = store.events().len(),
            changed = store.is_dirty(),
            "Dry run, snapshot not written"
        );
        return Ok(());
    }

    let summary = collector
        .run(&session, &credentials)
        .await
        .context("Collection failed")?;

    match summary.save {
        SaveOutcome::Written { devices, events } => info!(
            path = %collector.store().path().display(),
            devices,
            events,
            "💾 Snapshot saved"
        ),
        SaveOutcome::Unchanged => info!("No changes, snapshot left as is"),
    }
    if summary.report.dropped > 0 {
        warn!(dropped = summary.report.dropped, "Some messages were dropped");
    }
    Ok(())
}
