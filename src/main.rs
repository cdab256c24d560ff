// src/main.rs - Command line entry point

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use dealer_oxide::config::{AppConfig, ConfigManager};
use dealer_oxide::data::{aggregate, DatasetStore, Role};
use dealer_oxide::error::{Error, Result, ResultExt};
use dealer_oxide::LoggingManager;

#[derive(Parser)]
#[command(
    name = "dealer_oxide",
    version = dealer_oxide::VERSION,
    about = "Synthetic dealership datasets and role-based KPIs",
    long_about = None
)]
struct Cli {
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Seed; overrides the configured seed
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// RFC 3339 instant dates are generated around; runs are reproducible
    /// only when both a seed and an anchor are set
    #[arg(short, long, global = true, value_name = "INSTANT")]
    anchor: Option<DateTime<Utc>>,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print collection sizes and headline roll-ups
    Summary,
    /// Print the KPI cards for a role
    Kpis {
        /// Role identifier, e.g. general-manager or service_advisor
        #[arg(short, long)]
        role: Option<String>,
    },
    /// Write the dataset as JSON
    Export {
        #[arg(long)]
        pretty: bool,

        /// Destination file; stdout when omitted
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Generate a dataset and verify every cross-reference
    Check,
    /// Validate configuration
    ValidateConfig,
}

fn main() {
    let cli = Cli::parse();

    let (config, _logging) = match load_config(&cli).and_then(|config| {
        let logging = setup_logging(&cli, &config)?;
        Ok((config, logging))
    }) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("❌ {}", e);
            process::exit(2);
        }
    };

    let result = match &cli.command {
        Some(Commands::Summary) | None => show_summary(&config),
        Some(Commands::Kpis { role }) => show_kpis(&config, role.as_deref()),
        Some(Commands::Export { pretty, output }) => export(&config, *pretty, output.as_deref()),
        Some(Commands::Check) => check(&config),
        Some(Commands::ValidateConfig) => validate_config(cli.config.as_deref()),
    };

    if let Err(e) = result {
        tracing::error!(error_id = %e.id, "{}", e);
        eprintln!("❌ {}", e);
        for cause in &e.causes {
            eprintln!("   caused by: {}", cause);
        }
        process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let manager = ConfigManager::standard(cli.config.as_deref())?;
    let mut config = manager.load()?;
    if let Some(seed) = cli.seed {
        config.generation.seed = Some(seed);
    }
    if let Some(anchor) = cli.anchor {
        config.generation.anchor = Some(anchor);
    }
    Ok(config)
}

fn setup_logging(cli: &Cli, config: &AppConfig) -> Result<LoggingManager> {
    let mut logging_config = config.logging.clone();
    if cli.debug {
        logging_config.level = "debug".to_string();
    } else if cli.verbose {
        logging_config.level = "info".to_string();
    }

    let mut manager = LoggingManager::new(logging_config);
    manager.init()?;
    Ok(manager)
}

fn build_store(config: &AppConfig) -> Result<DatasetStore> {
    DatasetStore::from_config(&config.generation).with_context(|| {
        "Failed to generate dataset; run validate-config to check the counts".to_string()
    })
}

fn show_summary(config: &AppConfig) -> Result<()> {
    let store = build_store(config)?;
    let dataset = store.snapshot();
    let summary = dataset.summary();

    println!("Dealer Oxide Dataset");
    println!("====================");
    println!("Generated at:    {}", dataset.generated_at().to_rfc3339());
    println!("Stores:          {}", summary.stores);
    println!("Employees:       {}", summary.employees);
    println!("Customers:       {}", summary.customers);
    println!("Vehicles:        {}", summary.vehicles);
    println!("Deals:           {}", summary.deals);
    println!("Appointments:    {}", summary.appointments);
    println!("Repair orders:   {}", summary.repair_orders);
    println!("Orders:          {}", summary.orders);
    println!();

    println!("Gross by store:");
    for store in aggregate::gross_by_store(&dataset) {
        println!(
            "  {:<32} {:>4} deals  {}",
            store.store_name, store.deals, store.total_gross
        );
    }
    println!("Total gross: {}", aggregate::total_gross(&dataset));
    println!();

    println!("Top salespeople:");
    for (rank, standing) in aggregate::salesperson_leaderboard(&dataset)
        .iter()
        .take(5)
        .enumerate()
    {
        println!(
            "  {}. {:<24} {:>3} units  {}",
            rank + 1,
            standing.name,
            standing.units,
            standing.total_gross
        );
    }
    println!();

    println!("Repair orders by status:");
    for status in aggregate::repair_orders_by_status(&dataset) {
        println!("  {:<18} {}", status.label, status.count);
    }

    Ok(())
}

fn show_kpis(config: &AppConfig, role: Option<&str>) -> Result<()> {
    let store = build_store(config)?;
    let roles: Vec<String> = match role {
        Some(role) => vec![role.to_string()],
        None => Role::ALL.iter().map(|r| r.id().to_string()).collect(),
    };

    for role in roles {
        let kpis = store.kpis_for(&role)?;
        if kpis.is_empty() {
            println!("No KPIs for role '{}'", role);
            println!(
                "Known roles: {}",
                Role::ALL.iter().map(|r| r.id()).collect::<Vec<_>>().join(", ")
            );
            continue;
        }

        let title = role.parse::<Role>().map(|r| r.label().to_string()).unwrap_or(role);
        println!("{}", title);
        println!("{}", "=".repeat(title.len()));
        for kpi in &kpis {
            let target = kpi
                .target_progress()
                .map(|p| format!("  ({:.1}% of target)", p))
                .unwrap_or_default();
            println!(
                "  {:<30} {:>14}  {}{}",
                kpi.title,
                kpi.display_value(),
                kpi.display_change(),
                target
            );
        }
        println!();
    }
    Ok(())
}

fn export(config: &AppConfig, pretty: bool, output: Option<&Path>) -> Result<()> {
    let store = build_store(config)?;
    let dataset = store.snapshot();
    let json = if pretty {
        serde_json::to_string_pretty(&*dataset)?
    } else {
        serde_json::to_string(&*dataset)?
    };

    match output {
        Some(path) => {
            fs::write(path, json)?;
            tracing::info!(path = %path.display(), "Dataset exported");
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn check(config: &AppConfig) -> Result<()> {
    let store = build_store(config)?;
    let dataset = store.snapshot();
    let problems = dataset.validate_references();

    if problems.is_empty() {
        println!(
            "✅ {} records, all references resolve",
            dataset.summary().total()
        );
        return Ok(());
    }

    for problem in &problems {
        println!("❌ {}", problem);
    }
    dataset.ensure_consistent()
}

fn validate_config(config_path: Option<&Path>) -> Result<()> {
    println!("Validating configuration...");

    let manager = ConfigManager::standard(config_path)?;
    let errors = manager.validate()?;

    if errors.is_empty() {
        let config = manager.load()?;
        println!("✅ Configuration is valid");
        println!("   Layers: {}", manager.layer_names().join(", "));
        println!("   Currency: {}", config.generation.currency);
        match config.generation.seed {
            Some(seed) => println!("   Seed: {}", seed),
            None => println!("   Seed: random"),
        }
        match config.generation.anchor {
            Some(anchor) => println!("   Anchor: {}", anchor.to_rfc3339()),
            None => println!("   Anchor: current time"),
        }
        return Ok(());
    }

    Err(errors.iter().fold(
        Error::validation(
            "config",
            format!("Configuration has {} problem(s)", errors.len()),
        ),
        |error, problem| error.caused_by(problem),
    ))
}
