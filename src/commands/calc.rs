use crate::*;
use serde::Serialize;

#[derive(Serialize)]
struct CalcReport {
    #[serde(flatten)]
    comparison: TaxComparison,
    chosen: Regime,
    payable: u64,
}

pub fn handle_calc_command(cli: &Cli, session: &mut Session) -> anyhow::Result<bool> {
    let Commands::Calc {
        income,
        sec80c,
        sec80d,
        nps,
        hra,
        regime,
    } = &cli.command
    else {
        return Ok(false);
    };

    let deductions = Deductions {
        sec80c: *sec80c,
        sec80d: *sec80d,
        nps: *nps,
        hra: *hra,
    };
    let comparison = compute_tax(*income, deductions);
    let chosen = match regime {
        RegimeChoice::Old => Regime::Old,
        RegimeChoice::New => Regime::New,
        RegimeChoice::Suggested => comparison.suggested,
    };
    let payable = match chosen {
        Regime::Old => comparison.tax_old,
        Regime::New => comparison.tax_new,
    };

    session.tax = Some(comparison.clone());
    save_session(session)?;
    audit(
        "calc",
        serde_json::json!({"income": income, "chosen": format!("{:?}", chosen).to_lowercase()}),
    );

    let report = CalcReport {
        comparison,
        chosen,
        payable,
    };
    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut {
                ok: true,
                data: report
            })?
        );
    } else {
        println!("income: ₹{}", format_inr(report.comparison.income));
        println!("old regime: ₹{}", format_inr(report.comparison.tax_old));
        println!("new regime: ₹{}", format_inr(report.comparison.tax_new));
        println!(
            "suggested: {:?} regime",
            report.comparison.suggested
        );
        println!("payable ({:?}): ₹{}", report.chosen, format_inr(report.payable));
    }

    Ok(true)
}
