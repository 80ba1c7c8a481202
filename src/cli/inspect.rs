//! Output for the inspection subcommands

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use tiered_config::{Origin, Section, Settings};

pub fn show(settings: &Settings, compact: bool) -> Result<()> {
    let value = settings.to_value();
    let rendered =
        if compact { serde_json::to_string(&value)? } else { serde_json::to_string_pretty(&value)? };
    println!("{}", rendered);
    Ok(())
}

pub fn get(settings: &Settings, key: &str) -> Result<()> {
    let Some(value) = settings.get(key) else {
        anyhow::bail!("Key not found: {}", key);
    };

    // Strings print bare so the output can be used directly in scripts.
    match value {
        Value::String(s) => println!("{}", s),
        other => println!("{}", serde_json::to_string_pretty(other)?),
    }
    Ok(())
}

pub fn section(settings: &Settings, section: Section) -> Result<()> {
    let map = settings.section(section)?;
    println!("{}", serde_json::to_string_pretty(map)?);
    Ok(())
}

#[derive(Serialize)]
struct SourcesReport<'a> {
    tier: &'static str,
    source: &'a Origin,
    keys: Vec<KeyOrigin<'a>>,
}

#[derive(Serialize)]
struct KeyOrigin<'a> {
    key: &'a str,
    origin: &'a Origin,
}

pub fn sources(settings: &Settings, json: bool) -> Result<()> {
    let report = SourcesReport {
        tier: settings.source().tier_name(),
        source: settings.source(),
        keys: settings.origins().map(|(key, origin)| KeyOrigin { key, origin }).collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Tier: {}", report.tier);
    println!("Defaults: {}", report.source);
    println!("Keys:");
    for entry in &report.keys {
        println!("  {} <- {}", entry.key, entry.origin);
    }
    Ok(())
}
