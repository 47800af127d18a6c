mod script;

use anyhow::Context;
use std::{env, fs};
use zone_config::{HandleTuning, ServiceConfig};
use zone_observability::{ObservabilityConfig, init, log_startup};

fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::from_env("zone-replay");
    let tuning = HandleTuning::from_env();
    let handle = init(&ObservabilityConfig::from_service(&config));
    log_startup(&handle, &tuning);

    let path = env::args()
        .nth(1)
        .context("usage: zone-replay <script.json>")?;
    let raw = fs::read_to_string(&path).with_context(|| format!("reading script {path}"))?;
    let script: script::Script =
        serde_json::from_str(&raw).with_context(|| format!("parsing script {path}"))?;

    tracing::info!(
        path = %path,
        zones = script.zones.len(),
        events = script.events.len(),
        "replaying session script"
    );
    let summary = script::replay(script, tuning)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
