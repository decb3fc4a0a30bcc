//! RepairMate CLI - Command-line front end for repair shop record keeping

use clap::{Parser, Subcommand};
use repairmate::config::{self, RepairMateConfig};
use repairmate::output::{self, OutputMode};
use repairmate::ui::{self, Icons};
use repairmate::{NewRepair, RepairDesk, RepairStore, Role};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "repairmate")]
#[command(version)]
#[command(about = "RepairMate - Track customers, devices and repair jobs")]
#[command(long_about = r#"
RepairMate keeps a local database of shop customers, their devices and
the repair jobs opened against them, and exports per-device invoices.

Example usage:
  repairmate customer add --name "Ada Lovelace" --email ada@example.com
  repairmate device add --email ada@example.com --model "Pixel 7" --serial SN-7
  repairmate --role technician repair add --serial SN-7 --technician Bob --issue "Battery"
  repairmate search pending
  repairmate invoice SN-7
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit machine-readable JSON instead of human output
    #[arg(long, global = true)]
    json: bool,

    /// Path to the database file (overrides the config file)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Role to act as (admin, technician)
    #[arg(short, long, global = true)]
    role: Option<Role>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default repairmate.toml
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    #[command(flatten)]
    Request(Request),
}

/// Commands served against the repair database
#[derive(Subcommand)]
enum Request {
    /// Manage customers
    Customer {
        #[command(subcommand)]
        action: CustomerAction,
    },

    /// Manage devices
    Device {
        #[command(subcommand)]
        action: DeviceAction,
    },

    /// Manage repair jobs
    Repair {
        #[command(subcommand)]
        action: RepairAction,
    },

    /// Search repairs by device model or status (case-insensitive regex)
    Search {
        /// Pattern matched against "<model> <status>"
        pattern: String,
    },

    /// Total a device's repairs and export the invoice as CSV
    Invoice {
        /// Device serial number
        serial: String,

        /// Directory the invoice file is written to
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },

    /// Show record counts
    Stats,
}

#[derive(Subcommand)]
enum CustomerAction {
    /// Register a new customer
    Add {
        #[arg(short, long, default_value = "")]
        name: String,
        #[arg(short, long, default_value = "")]
        email: String,
    },
}

#[derive(Subcommand)]
enum DeviceAction {
    /// Register a device for an existing customer
    Add {
        /// Email of the owning customer
        #[arg(short, long, default_value = "")]
        email: String,
        #[arg(short, long, default_value = "")]
        model: String,
        #[arg(short, long, default_value = "")]
        serial: String,
    },
}

#[derive(Subcommand)]
enum RepairAction {
    /// Open a repair job on a device
    Add {
        /// Serial number of the device
        #[arg(short, long, default_value = "")]
        serial: String,
        #[arg(short, long, default_value = "")]
        technician: String,
        #[arg(short, long, default_value = "")]
        issue: String,
        /// Initial status (defaults to Pending)
        #[arg(long)]
        status: Option<String>,
        /// Cost of the job (defaults to 0)
        #[arg(long, allow_negative_numbers = true)]
        cost: Option<f64>,
    },
}

impl Request {
    fn name(&self) -> &'static str {
        match self {
            Request::Customer { .. } => "customer.add",
            Request::Device { .. } => "device.add",
            Request::Repair { .. } => "repair.add",
            Request::Search { .. } => "search",
            Request::Invoice { .. } => "invoice",
            Request::Stats => "stats",
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for results
    let filter = if cli.verbose {
        EnvFilter::new(log_level(true))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level(false)))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let mode = if cli.json { OutputMode::Json } else { OutputMode::Human };
    let file_config = config::load_config(cli.config.as_deref())?.unwrap_or_default();

    match cli.command {
        Commands::Init { force } => {
            let path = cli.config.unwrap_or_else(config::default_config_path);
            run_init(&path, cli.database, cli.role, &file_config, force, mode)
        }
        Commands::Request(request) => {
            let database = cli.database.unwrap_or_else(|| file_config.database_path());
            config::ensure_db_dir(&database)?;
            // A store that cannot be opened or initialized is fatal
            let store = RepairStore::open(&database)?;
            let desk = RepairDesk::new(&store, cli.role.or(file_config.role));
            run_request(&desk, &store, request, &file_config, mode)
        }
    }
}

/// Default log level; rejected requests are logged at `warn`
fn log_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

fn run_init(
    path: &Path,
    database: Option<PathBuf>,
    role: Option<Role>,
    current: &RepairMateConfig,
    force: bool,
    mode: OutputMode,
) -> anyhow::Result<ExitCode> {
    let new_config = RepairMateConfig {
        database: Some(
            database
                .unwrap_or_else(|| current.database_path())
                .display()
                .to_string(),
        ),
        export_dir: Some(current.export_dir().display().to_string()),
        role: role.or(current.role),
    };

    config::write_config(path, &new_config, force)?;
    tracing::info!("Wrote config to {}", path.display());

    if mode.is_human() {
        ui::success(&format!("Config written to {}", path.display()));
    } else {
        println!("{}", output::success_json("init", &new_config)?);
    }
    Ok(ExitCode::SUCCESS)
}

/// Serve one request; domain errors are reported here and never escape
fn run_request(
    desk: &RepairDesk<'_>,
    store: &RepairStore,
    request: Request,
    file_config: &RepairMateConfig,
    mode: OutputMode,
) -> anyhow::Result<ExitCode> {
    let command = request.name();

    let outcome = match request {
        Request::Customer { action: CustomerAction::Add { name, email } } => desk
            .create_customer(&name, &email)
            .map(|id| Report::Created { icon: Icons::PERSON, what: "Customer", id }),
        Request::Device { action: DeviceAction::Add { email, model, serial } } => desk
            .create_device(&email, &model, &serial)
            .map(|id| Report::Created { icon: Icons::PHONE, what: "Device", id }),
        Request::Repair { action: RepairAction::Add { serial, technician, issue, status, cost } } => {
            let request = NewRepair { serial, technician, issue, status, cost };
            desk.create_repair(&request)
                .map(|id| Report::Created { icon: Icons::WRENCH, what: "Repair order", id })
        }
        Request::Search { pattern } => desk.search_repairs(&pattern).map(Report::Search),
        Request::Invoice { serial, out_dir } => {
            let out_dir = out_dir.unwrap_or_else(|| file_config.export_dir());
            desk.generate_invoice(&serial, &out_dir).map(Report::Invoice)
        }
        Request::Stats => store.stats().map(Report::Stats),
    };

    match outcome {
        Ok(report) => {
            report.emit(command, mode)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            if mode.is_human() {
                ui::error(err.kind().title(), &err.to_string());
            } else {
                println!("{}", output::error_json(command, &err)?);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Successful outcome of a command, rendered per output mode
enum Report {
    Created { icon: &'static str, what: &'static str, id: i64 },
    Search(Vec<repairmate::storage::RepairRow>),
    Invoice(repairmate::service::InvoiceExport),
    Stats(repairmate::storage::DbStats),
}

impl Report {
    fn emit(&self, command: &str, mode: OutputMode) -> anyhow::Result<()> {
        if !mode.is_human() {
            let data = match self {
                Report::Created { id, .. } => serde_json::json!({ "id": id }),
                Report::Search(rows) => serde_json::json!({ "matches": rows }),
                Report::Invoice(export) => serde_json::json!({
                    "invoice": export.invoice,
                    "path": export.path.display().to_string(),
                }),
                Report::Stats(stats) => serde_json::to_value(stats)?,
            };
            println!("{}", output::success_json(command, data)?);
            return Ok(());
        }

        if output::is_quiet() {
            return Ok(());
        }

        match self {
            Report::Created { icon, what, id } => {
                ui::header(icon, &format!("{} saved.", what));
                ui::summary_row("ID:", &id.to_string());
            }
            Report::Search(rows) => {
                if rows.is_empty() {
                    ui::info("Search Results", "No matches found.");
                } else {
                    ui::header(Icons::SEARCH, &format!("Search Results ({})", rows.len()));
                    println!("{}", ui::search_table(rows));
                }
            }
            Report::Invoice(export) => print_invoice(export),
            Report::Stats(stats) => {
                let mut table = ui::TableBuilder::new();
                table.add_row("Customers", &stats.customers.to_string());
                table.add_row("Devices", &stats.devices.to_string());
                table.add_row("Repairs", &stats.repairs.to_string());
                ui::header(Icons::STATS, "RepairMate Statistics");
                println!("{}", table.build());
            }
        }
        Ok(())
    }
}

fn print_invoice(export: &repairmate::service::InvoiceExport) {
    let totals = &export.invoice.totals;
    ui::header(Icons::FILE, &format!("Invoice for {}", export.invoice.serial));
    println!("{}", ui::invoice_table(&export.invoice.lines));
    ui::section("Totals");
    ui::summary_row("Total:", &ui::amount(totals.total));
    ui::summary_row("Tax (7%):", &ui::amount(totals.tax));
    ui::summary_row("Grand Total:", &ui::amount(totals.grand_total));
    println!();
    ui::success(&format!("Invoice saved as {}", display_path(&export.path)));
}

fn display_path(path: &Path) -> String {
    path.strip_prefix(".").unwrap_or(path).display().to_string()
}
