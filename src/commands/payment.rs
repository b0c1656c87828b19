use crate::*;
use crate::services::{profile, receipts};

pub fn handle_pay_command(
    cli: &Cli,
    catalog: &Catalog,
    session: &Session,
    policy: &PolicyFile,
) -> anyhow::Result<bool> {
    let Commands::Pay { force } = &cli.command else {
        return Ok(false);
    };

    let violations = evaluate_guardrails(catalog, &session.mix);
    let users = load_users()?;
    let account = profile::current_account(&users);
    enforce_pay(policy, &violations, account.is_some(), *force)?;

    let receipt = receipts::build_receipt(catalog, session, account.map(profile::summarize));
    let mut history = load_receipts()?;
    history.insert(0, receipt.clone());
    receipts::trim_history(&mut history, policy.general.max_receipt_history);
    save_receipts(&history)?;
    audit(
        "pay",
        serde_json::json!({"receipt": receipt.id, "amount": receipt.amount, "forced": force}),
    );

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut {
                ok: true,
                data: receipt
            })?
        );
    } else {
        println!(
            "paid ₹{} ({})",
            format_inr(receipt.amount),
            receipt.status
        );
        println!("receipt: {}", receipt.id);
        for s in &catalog.sectors {
            let rupees = receipt.breakdown.get(&s.key).copied().unwrap_or(0);
            println!("{:<16} ₹{}", s.label, format_inr(rupees));
        }
    }

    Ok(true)
}

pub fn handle_receipt_commands(cli: &Cli, catalog: &Catalog) -> anyhow::Result<bool> {
    let Commands::Receipt { command } = &cli.command else {
        return Ok(false);
    };

    match command {
        ReceiptCommands::List => {
            let history = load_receipts()?;
            print_out(cli.json, &history, |r| {
                format!(
                    "{}\t{}\t₹{}\t{}",
                    r.id,
                    r.created_at,
                    format_inr(r.amount),
                    r.status
                )
            })?;
        }
        ReceiptCommands::Show { id } => {
            let history = load_receipts()?;
            let receipt = receipts::find_receipt(&history, id)?.clone();
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut {
                        ok: true,
                        data: receipt
                    })?
                );
            } else {
                println!("receipt: {}", receipt.id);
                println!("paid at: {}", receipt.created_at);
                println!("amount: ₹{}", format_inr(receipt.amount));
                println!("status: {} ({})", receipt.status, receipt.source);
                if let Some(user) = &receipt.user {
                    println!(
                        "payer: {} <{}>{}",
                        user.name,
                        user.email,
                        user.pan_masked
                            .as_deref()
                            .map(|p| format!(" PAN {}", p))
                            .unwrap_or_default()
                    );
                }
                for s in &catalog.sectors {
                    let rupees = receipt.breakdown.get(&s.key).copied().unwrap_or(0);
                    println!("{:<16} ₹{}", s.label, format_inr(rupees));
                }
            }
        }
        ReceiptCommands::Export { id, out } => {
            let history = load_receipts()?;
            let receipt = receipts::find_receipt(&history, id)?;
            std::fs::write(out, serde_json::to_string_pretty(receipt)?)?;
            audit("receipt.export", serde_json::json!({"receipt": receipt.id}));
            print_one(cli.json, out.display().to_string(), |p| {
                format!("exported to {}", p)
            })?;
        }
        ReceiptCommands::Share { id } => {
            let history = load_receipts()?;
            let receipt = receipts::find_receipt(&history, id)?;
            let link = receipts::share_link(receipt)?;
            print_one(cli.json, link, |l| l.clone())?;
        }
        ReceiptCommands::Remove { id } => {
            let mut history = load_receipts()?;
            let target = receipts::find_receipt(&history, id)?.id;
            history.retain(|r| r.id != target);
            save_receipts(&history)?;
            audit("receipt.remove", serde_json::json!({"receipt": target}));
            print_one(cli.json, target.to_string(), |t| format!("removed {}", t))?;
        }
    }

    Ok(true)
}
