use crate::*;
use crate::services::{profile, utilization};
use std::collections::BTreeMap;

fn caps_rows(catalog: &Catalog, caps: &BTreeMap<String, u32>) -> Vec<(String, u32)> {
    catalog
        .sectors
        .iter()
        .map(|s| (s.label.clone(), caps.get(&s.key).copied().unwrap_or(0)))
        .collect()
}

pub fn handle_caps_commands(cli: &Cli, catalog: &Catalog) -> anyhow::Result<bool> {
    let Commands::Caps { command } = &cli.command else {
        return Ok(false);
    };

    match command {
        CapsCommands::Show => {
            let caps = load_caps()?;
            let total: u32 = caps.values().sum();
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut {
                        ok: true,
                        data: &caps
                    })?
                );
            } else {
                for (label, value) in caps_rows(catalog, &caps) {
                    println!("{:<16} {}%", label, value);
                }
                println!("total: {}%", total);
            }
        }
        CapsCommands::Set { sector, value } => {
            if catalog.get(sector).is_none() {
                anyhow::bail!("unknown sector: {}", sector);
            }
            if *value > 100 {
                anyhow::bail!("cap must be between 0 and 100");
            }
            let mut caps = load_caps()?;
            caps.insert(sector.clone(), *value);
            save_caps(&caps)?;
            audit("caps.set", serde_json::json!({"sector": sector, "value": value}));
            print_one(cli.json, &caps, |c| {
                format!("{} cap set; total {}%", sector, c.values().sum::<u32>())
            })?;
        }
        CapsCommands::Normalize => {
            let caps = normalize_caps(&load_caps()?);
            save_caps(&caps)?;
            audit("caps.normalize", serde_json::json!({}));
            print_one(cli.json, &caps, |c| {
                format!("normalized; total {}%", c.values().sum::<u32>())
            })?;
        }
        CapsCommands::Reset => {
            let caps = default_caps();
            save_caps(&caps)?;
            audit("caps.reset", serde_json::json!({}));
            print_one(cli.json, &caps, |_| "caps reset to defaults".to_string())?;
        }
        CapsCommands::Export { out } => {
            let caps = load_caps()?;
            let raw = serde_json::to_string_pretty(&caps)?;
            match out {
                Some(path) => {
                    std::fs::write(path, raw)?;
                    print_one(cli.json, path.display().to_string(), |p| {
                        format!("exported to {}", p)
                    })?;
                }
                None => {
                    if cli.json {
                        println!(
                            "{}",
                            serde_json::to_string_pretty(&JsonOut {
                                ok: true,
                                data: &caps
                            })?
                        );
                    } else {
                        println!("{}", raw);
                    }
                }
            }
        }
        CapsCommands::Import { path } => {
            let raw = std::fs::read_to_string(path)?;
            let caps: BTreeMap<String, u32> = serde_json::from_str(&raw)?;
            for (key, value) in &caps {
                if catalog.get(key).is_none() {
                    anyhow::bail!("unknown sector in import: {}", key);
                }
                if *value > 100 {
                    anyhow::bail!("cap for {} must be between 0 and 100", key);
                }
            }
            save_caps(&caps)?;
            audit("caps.import", serde_json::json!({"path": path.display().to_string()}));
            print_one(cli.json, &caps, |c| {
                format!("imported {} caps", c.len())
            })?;
        }
    }

    Ok(true)
}

pub fn handle_utilization_commands(cli: &Cli, catalog: &Catalog) -> anyhow::Result<bool> {
    let Commands::Utilization { command } = &cli.command else {
        return Ok(false);
    };

    match command {
        UtilizationCommands::Add {
            sector,
            amount,
            description,
            date,
        } => {
            let mut entries = load_utilization()?;
            let entry = utilization::add_entry(
                catalog,
                &mut entries,
                sector,
                *amount,
                description,
                date.as_deref(),
            )?;
            save_utilization(&entries)?;
            audit(
                "utilization.add",
                serde_json::json!({"sector": entry.sector, "amount": entry.amount}),
            );
            print_one(cli.json, entry, |e| {
                format!("published {} for {}", e.id, e.sector)
            })?;
        }
        UtilizationCommands::List => {
            let entries = load_utilization()?;
            print_out(cli.json, &entries, |e| {
                format!(
                    "{}\t{}\t₹{}\t{}",
                    e.date,
                    catalog.label_for(&e.sector),
                    format_inr(e.amount),
                    e.description
                )
            })?;
        }
    }

    Ok(true)
}

pub fn handle_audit_command(cli: &Cli, catalog: &Catalog) -> anyhow::Result<bool> {
    let Commands::Audit { query, days } = &cli.command else {
        return Ok(false);
    };

    let entries = load_utilization()?;
    let report = utilization::audit_view(catalog, &entries, query.as_deref(), *days);
    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut {
                ok: true,
                data: report
            })?
        );
    } else {
        for row in &report.rows {
            println!(
                "{}\t{}\t{}\t₹{}\t{}",
                row.at,
                row.actor,
                row.sector,
                format_inr(row.amount),
                row.description
            );
        }
        for (sector, total) in &report.sector_totals {
            println!("{:<16} ₹{}", catalog.label_for(sector), format_inr(*total));
        }
    }

    Ok(true)
}

pub fn handle_profile_commands(cli: &Cli) -> anyhow::Result<bool> {
    let Commands::Profile { command } = &cli.command else {
        return Ok(false);
    };

    match command {
        ProfileCommands::Register {
            name,
            email,
            password,
            pan,
        } => {
            let mut users = load_users()?;
            let account = profile::register(
                &mut users,
                name.as_deref(),
                email,
                password,
                pan.as_deref(),
            )?;
            save_users(&users)?;
            audit("profile.register", serde_json::json!({"email": account.email}));
            print_one(cli.json, profile::summarize(&account), |s| {
                format!("registered {} <{}>", s.name, s.email)
            })?;
        }
        ProfileCommands::Login { email, password } => {
            let mut users = load_users()?;
            let account = profile::login(&mut users, email, password)?;
            save_users(&users)?;
            audit("profile.login", serde_json::json!({"email": account.email}));
            print_one(cli.json, profile::summarize(&account), |s| {
                format!("signed in as {} <{}>", s.name, s.email)
            })?;
        }
        ProfileCommands::Show => {
            let users = load_users()?;
            let account = profile::current_account(&users)
                .ok_or_else(|| anyhow::anyhow!("not signed in"))?;
            print_one(cli.json, profile::summarize(account), |s| {
                format!(
                    "{} <{}>{}",
                    s.name,
                    s.email,
                    s.pan_masked
                        .as_deref()
                        .map(|p| format!(" PAN {}", p))
                        .unwrap_or_default()
                )
            })?;
        }
        ProfileCommands::Logout => {
            let mut users = load_users()?;
            profile::logout(&mut users);
            save_users(&users)?;
            audit("profile.logout", serde_json::json!({}));
            print_one(cli.json, "signed out", |s| s.to_string())?;
        }
    }

    Ok(true)
}
