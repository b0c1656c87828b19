use crate::domain::models::{Receipt, Session, Template, Users, UtilizationEntry};
use std::collections::BTreeMap;
use std::path::PathBuf;

fn config_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")?;
    Ok(PathBuf::from(home).join(".config/taxflow"))
}

fn read_or_default<T: serde::de::DeserializeOwned + Default>(name: &str) -> anyhow::Result<T> {
    let p = config_dir()?.join(name);
    if !p.exists() {
        return Ok(T::default());
    }
    let raw = std::fs::read_to_string(p)?;
    Ok(serde_json::from_str(&raw)?)
}

fn write_pretty<T: serde::Serialize>(name: &str, value: &T) -> anyhow::Result<()> {
    let p = config_dir()?.join(name);
    if let Some(parent) = p.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(p, serde_json::to_string_pretty(value)?)?;
    Ok(())
}

pub fn load_session() -> anyhow::Result<Session> {
    read_or_default("state.json")
}

pub fn save_session(s: &Session) -> anyhow::Result<()> {
    write_pretty("state.json", s)
}

pub fn load_users() -> anyhow::Result<Users> {
    read_or_default("users.json")
}

pub fn save_users(u: &Users) -> anyhow::Result<()> {
    write_pretty("users.json", u)
}

pub fn load_receipts() -> anyhow::Result<Vec<Receipt>> {
    read_or_default("receipts.json")
}

pub fn save_receipts(r: &[Receipt]) -> anyhow::Result<()> {
    write_pretty("receipts.json", &r)
}

pub fn load_templates() -> anyhow::Result<Vec<Template>> {
    read_or_default("templates.json")
}

pub fn save_templates(t: &[Template]) -> anyhow::Result<()> {
    write_pretty("templates.json", &t)
}

pub fn load_utilization() -> anyhow::Result<Vec<UtilizationEntry>> {
    read_or_default("utilization.json")
}

pub fn save_utilization(u: &[UtilizationEntry]) -> anyhow::Result<()> {
    write_pretty("utilization.json", &u)
}

/// Default admin caps from the shipped configuration.
pub fn default_caps() -> BTreeMap<String, u32> {
    [
        ("education", 30),
        ("healthcare", 25),
        ("infrastructure", 20),
        ("defense", 15),
        ("other", 10),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

pub fn load_caps() -> anyhow::Result<BTreeMap<String, u32>> {
    let p = config_dir()?.join("caps.json");
    if !p.exists() {
        return Ok(default_caps());
    }
    let raw = std::fs::read_to_string(p)?;
    Ok(serde_json::from_str(&raw)?)
}

pub fn save_caps(caps: &BTreeMap<String, u32>) -> anyhow::Result<()> {
    write_pretty("caps.json", caps)
}

/// Append a structured event to the action log. Best-effort: a failed audit
/// write never fails the command that triggered it.
pub fn audit(action: &str, data: serde_json::Value) {
    let Ok(dir) = config_dir() else {
        return;
    };
    let _ = std::fs::create_dir_all(&dir);
    let event = serde_json::json!({
        "ts": chrono::Utc::now().to_rfc3339(),
        "action": action,
        "data": data
    });
    let line = format!("{}\n", event);
    let _ = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("audit.jsonl"))
        .and_then(|mut f| std::io::Write::write_all(&mut f, line.as_bytes()));
}
