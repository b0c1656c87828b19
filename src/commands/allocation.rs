use crate::*;
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize)]
struct PresetApplied {
    label: &'static str,
    rationale: &'static str,
    #[serde(flatten)]
    view: AllocationView,
}

/// Snapshot of the session mix against the catalog, used by `show` and after
/// every mutation so the user always sees the rebalanced state.
pub fn allocation_view(catalog: &Catalog, session: &Session) -> AllocationView {
    let rows = catalog
        .sectors
        .iter()
        .map(|s| {
            let percent = session.mix.get(&s.key).copied().unwrap_or(0.0);
            AllocationRow {
                key: s.key.clone(),
                label: s.label.clone(),
                min: s.min,
                max: s.max,
                locked: session.locks.get(&s.key).copied().unwrap_or(false),
                percent,
                rupees: (session.amount as f64 * percent / 100.0).round().max(0.0) as u64,
            }
        })
        .collect::<Vec<_>>();
    let total = rows.iter().map(|r| (r.percent * 10.0).round() as i64).sum::<i64>() as f64 / 10.0;
    AllocationView {
        amount: session.amount,
        preset: session.preset.clone(),
        total,
        rows,
        violations: evaluate_guardrails(catalog, &session.mix),
    }
}

fn print_view(cli: &Cli, view: AllocationView) -> anyhow::Result<()> {
    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut {
                ok: true,
                data: view
            })?
        );
        return Ok(());
    }
    println!(
        "amount: ₹{}  preset: {}",
        format_inr(view.amount),
        view.preset.as_deref().unwrap_or("custom")
    );
    for r in &view.rows {
        println!(
            "{:<16} {:>5.1}% [{}] ₹{:>12} (min {}, max {}){}",
            r.label,
            r.percent,
            percent_bar(r.percent, 20),
            format_inr(r.rupees),
            r.min,
            r.max,
            if r.locked { " [locked]" } else { "" }
        );
    }
    println!("total: {:.1}%", view.total);
    for v in &view.violations {
        println!("warning: {}", v.detail);
    }
    Ok(())
}

pub fn handle_allocation_commands(
    cli: &Cli,
    catalog: &Catalog,
    session: &mut Session,
) -> anyhow::Result<bool> {
    let Commands::Allocation { command } = &cli.command else {
        return Ok(false);
    };

    match command {
        AllocationCommands::Show => {
            print_view(cli, allocation_view(catalog, session))?;
        }
        AllocationCommands::Preset { name } => {
            let preset = preset_by_key(name)
                .ok_or_else(|| anyhow::anyhow!("unknown preset: {}", name))?;
            session.mix = apply_preset(catalog, &preset.mix());
            session.preset = Some(preset.key.to_string());
            save_session(session)?;
            audit("allocation.preset", serde_json::json!({"preset": preset.key}));
            let view = allocation_view(catalog, session);
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut {
                        ok: true,
                        data: PresetApplied {
                            label: preset.label,
                            rationale: preset.rationale,
                            view,
                        }
                    })?
                );
            } else {
                println!("{}: {}", preset.label, preset.rationale);
                print_view(cli, view)?;
            }
        }
        AllocationCommands::Set { sector, value } => {
            session.mix = edit_sector(catalog, &session.mix, &session.locks, sector, *value)?;
            session.preset = None;
            save_session(session)?;
            audit(
                "allocation.set",
                serde_json::json!({"sector": sector, "value": value}),
            );
            print_view(cli, allocation_view(catalog, session))?;
        }
        AllocationCommands::Lock { sector } | AllocationCommands::Unlock { sector } => {
            if catalog.get(sector).is_none() {
                anyhow::bail!("unknown sector: {}", sector);
            }
            let lock = matches!(command, AllocationCommands::Lock { .. });
            if lock {
                session.locks.insert(sector.clone(), true);
            } else {
                session.locks.remove(sector);
            }
            save_session(session)?;
            audit(
                "allocation.lock",
                serde_json::json!({"sector": sector, "locked": lock}),
            );
            print_one(cli.json, (sector.clone(), lock), |(s, l)| {
                format!("{} {}", if *l { "locked" } else { "unlocked" }, s)
            })?;
        }
        AllocationCommands::Amount { rupees } => {
            session.amount = *rupees;
            save_session(session)?;
            audit("allocation.amount", serde_json::json!({"rupees": rupees}));
            print_view(cli, allocation_view(catalog, session))?;
        }
        AllocationCommands::Check => {
            let violations = evaluate_guardrails(catalog, &session.mix);
            let report = CheckReport {
                compliant: violations.is_empty(),
                violations,
            };
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut {
                        ok: true,
                        data: report
                    })?
                );
            } else if report.compliant {
                println!("allocation compliant");
            } else {
                for v in &report.violations {
                    println!("{}", v.detail);
                }
            }
        }
    }

    Ok(true)
}

pub fn handle_template_commands(
    cli: &Cli,
    catalog: &Catalog,
    session: &mut Session,
    policy: &PolicyFile,
) -> anyhow::Result<bool> {
    let Commands::Template { command } = &cli.command else {
        return Ok(false);
    };

    match command {
        TemplateCommands::Save { name } => {
            let violations = evaluate_guardrails(catalog, &session.mix);
            enforce_template_save(policy, &violations)?;
            let mut templates = load_templates()?;
            let template = Template {
                id: Uuid::new_v4(),
                name: name.clone(),
                mix: session.mix.clone(),
                created_at: chrono::Utc::now().to_rfc3339(),
            };
            // Saving under an existing name replaces it.
            templates.retain(|t| t.name != *name);
            templates.insert(0, template.clone());
            save_templates(&templates)?;
            audit("template.save", serde_json::json!({"name": name}));
            print_one(cli.json, template, |t| format!("saved template {}", t.name))?;
        }
        TemplateCommands::List => {
            let templates = load_templates()?;
            print_out(cli.json, &templates, |t| {
                format!("{}\t{}\t{}", t.name, t.id, t.created_at)
            })?;
        }
        TemplateCommands::Apply { name } => {
            let templates = load_templates()?;
            let template = templates
                .iter()
                .find(|t| t.name == *name)
                .ok_or_else(|| anyhow::anyhow!("template not found: {}", name))?;
            // Re-normalize on apply; catalog bounds may have changed since save.
            session.mix = apply_preset(catalog, &template.mix);
            session.preset = None;
            save_session(session)?;
            audit("template.apply", serde_json::json!({"name": name}));
            print_view(cli, allocation_view(catalog, session))?;
        }
        TemplateCommands::Remove { name } => {
            let mut templates = load_templates()?;
            let before = templates.len();
            templates.retain(|t| t.name != *name);
            save_templates(&templates)?;
            let removed = before.saturating_sub(templates.len());
            audit("template.remove", serde_json::json!({"name": name}));
            print_one(cli.json, removed, |r| format!("removed {} templates", r))?;
        }
    }

    Ok(true)
}
