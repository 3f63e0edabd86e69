use anyhow::{Context, Result};
use clap::Args;
use flashstats::constants::DEFAULT_STATE_FILE;
use flashstats::Snapshot;
use std::fmt::Write as _;
use std::path::PathBuf;

#[derive(Args)]
pub struct ShowCommand {
    /// Snapshot file to read
    #[arg(long, short = 's', default_value = DEFAULT_STATE_FILE)]
    pub state_file: PathBuf,

    /// Number of recent events to list
    #[arg(long, short = 'n', default_value = "10")]
    pub events: usize,

    /// Print the raw snapshot as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(cmd: ShowCommand) -> Result<()> {
    let content = tokio::fs::read(&cmd.state_file)
        .await
        .with_context(|| format!("Failed to read snapshot: {}", cmd.state_file.display()))?;
    let snapshot: Snapshot = serde_json::from_slice(&content)
        .with_context(|| format!("Invalid snapshot: {}", cmd.state_file.display()))?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", render(&snapshot, cmd.events));
    }
    Ok(())
}

fn render(snapshot: &Snapshot, max_events: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Snapshot v{} (updated {})",
        snapshot.version, snapshot.last_update
    );

    let flashes = snapshot
        .devices
        .values()
        .map(|d| d.flash_count)
        .fold(0, u64::saturating_add);
    let erases = snapshot
        .devices
        .values()
        .map(|d| d.erase_count)
        .fold(0, u64::saturating_add);
    let _ = writeln!(
        out,
        "{} devices, {flashes} flashes, {erases} erases\n",
        snapshot.devices.len()
    );

    for (name, device) in &snapshot.devices {
        let _ = writeln!(
            out,
            "  {} {name:<24} flash {:>5}  erase {:>5}  v{}  last seen {}",
            if device.online { "●" } else { "○" },
            device.flash_count,
            device.erase_count,
            device.app_version,
            device.last_seen,
        );
    }

    if max_events > 0 && !snapshot.events.is_empty() {
        let _ = writeln!(out, "\nRecent events:");
        for event in snapshot.events.iter().take(max_events) {
            let _ = writeln!(out, "  {} [{}] {}", event.timestamp, event.kind, event.message);
        }
    }
    out
}
