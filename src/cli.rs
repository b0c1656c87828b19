use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "taxflow", version, about = "TaxFlow CLI - estimate, allocate, pay, track")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        help = "Path to a custom sector catalog file (JSON)"
    )]
    pub catalog: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Estimate tax under both regimes and store the result in the session.
    Calc {
        #[arg(long)]
        income: u64,
        #[arg(long, default_value_t = 0)]
        sec80c: u64,
        #[arg(long, default_value_t = 0)]
        sec80d: u64,
        #[arg(long, default_value_t = 0)]
        nps: u64,
        #[arg(long, default_value_t = 0)]
        hra: u64,
        #[arg(long, value_enum, default_value_t = RegimeChoice::Suggested)]
        regime: RegimeChoice,
    },
    Allocation {
        #[command(subcommand)]
        command: AllocationCommands,
    },
    Template {
        #[command(subcommand)]
        command: TemplateCommands,
    },
    /// Simulate a payment of the session amount and store a receipt.
    Pay {
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    Receipt {
        #[command(subcommand)]
        command: ReceiptCommands,
    },
    Caps {
        #[command(subcommand)]
        command: CapsCommands,
    },
    Utilization {
        #[command(subcommand)]
        command: UtilizationCommands,
    },
    /// Filtered audit trail over published utilization entries.
    Audit {
        #[arg(long)]
        query: Option<String>,
        #[arg(long)]
        days: Option<u32>,
    },
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum AllocationCommands {
    Show,
    /// Apply a named preset mix through the normalizer.
    Preset { name: String },
    /// Edit one sector's share; unlocked sectors rebalance around it.
    Set { sector: String, value: f64 },
    Lock { sector: String },
    Unlock { sector: String },
    /// Set the contribution amount in rupees.
    Amount { rupees: u64 },
    Check,
}

#[derive(Subcommand, Debug)]
pub enum TemplateCommands {
    Save { name: String },
    List,
    Apply { name: String },
    Remove { name: String },
}

#[derive(Subcommand, Debug)]
pub enum ReceiptCommands {
    List,
    Show { id: String },
    Export {
        id: String,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a shareable link encoding the receipt payload.
    Share { id: String },
    Remove { id: String },
}

#[derive(Subcommand, Debug)]
pub enum CapsCommands {
    Show,
    Set { sector: String, value: u32 },
    /// Scale all caps so they sum to 100.
    Normalize,
    Reset,
    Export {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    Import { path: PathBuf },
}

#[derive(Subcommand, Debug)]
pub enum UtilizationCommands {
    Add {
        #[arg(long)]
        sector: String,
        #[arg(long)]
        amount: u64,
        #[arg(long)]
        description: String,
        #[arg(long)]
        date: Option<String>,
    },
    List,
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    Register {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        pan: Option<String>,
    },
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Show,
    Logout,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RegimeChoice {
    Old,
    New,
    Suggested,
}
