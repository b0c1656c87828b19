mod cli;
mod commands;
mod domain;
mod engine;
mod services;

pub use cli::*;
pub use domain::models::*;
pub use engine::*;
pub use services::output::*;
pub use services::policy::*;
pub use services::storage::*;

use clap::Parser;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        if cli.json {
            let code = err
                .downcast_ref::<CodedError>()
                .map(|c| c.code)
                .unwrap_or("ERROR");
            let envelope = serde_json::json!({
                "ok": false,
                "error": { "code": code, "message": err.to_string() }
            });
            println!("{}", serde_json::to_string_pretty(&envelope).unwrap_or_default());
        } else {
            eprintln!("error: {}", err);
        }
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let catalog = match &cli.catalog {
        Some(path) => Catalog::load(path)?,
        None => Catalog::default_catalog(),
    };
    let policy = load_policy()?;
    let mut session = load_session()?;

    let handled = commands::handle_calc_command(cli, &mut session)?
        || commands::handle_allocation_commands(cli, &catalog, &mut session)?
        || commands::handle_template_commands(cli, &catalog, &mut session, &policy)?
        || commands::handle_pay_command(cli, &catalog, &session, &policy)?
        || commands::handle_receipt_commands(cli, &catalog)?
        || commands::handle_caps_commands(cli, &catalog)?
        || commands::handle_utilization_commands(cli, &catalog)?
        || commands::handle_audit_command(cli, &catalog)?
        || commands::handle_profile_commands(cli)?;
    anyhow::ensure!(handled, "unhandled command");
    Ok(())
}
