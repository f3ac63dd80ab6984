//! Command-line interface for vkquality

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use vkquality::{
    evaluate_with, DeviceSnapshot, Evaluation, MitigationDatabase, StartupDecision, StartupFlags,
};

#[derive(Parser)]
#[command(name = "vkquality")]
#[command(version = vkquality::VERSION)]
#[command(about = "Startup mitigation check for Vulkan quality recommendations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output verbosity
    #[arg(short, long, value_enum, default_value_t = Verbosity::Normal)]
    verbosity: Verbosity,

    /// JSON rule table replacing the embedded one
    #[arg(long, env = "VKQUALITY_RULES")]
    rules: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a device against the mitigation table
    Check {
        /// Manufacturer brand
        #[arg(short, long, default_value = "")]
        brand: String,

        /// Device codename
        #[arg(short, long, default_value = "")]
        device: String,

        /// Chipset model
        #[arg(short, long)]
        soc: Option<String>,

        /// Platform API level
        #[arg(short, long)]
        api_level: i32,

        /// Security patch, YYYY-MM-DD
        #[arg(short, long)]
        patch: Option<String>,

        /// Skip the mitigation table entirely
        #[arg(long)]
        skip_mitigation: bool,

        /// Recommend GLES on every mitigated device
        #[arg(long)]
        gles_only: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the rule table
    Rules {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Verbosity {
    Minimal,
    Normal,
    Detailed,
    Debug,
}

impl Verbosity {
    fn level(self) -> log::LevelFilter {
        match self {
            Verbosity::Minimal => log::LevelFilter::Error,
            Verbosity::Normal => log::LevelFilter::Warn,
            Verbosity::Detailed => log::LevelFilter::Info,
            Verbosity::Debug => log::LevelFilter::Debug,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct CheckReport<'a> {
    evaluated_at: DateTime<Utc>,
    device: &'a DeviceSnapshot,
    flags: i32,
    evaluation: &'a Evaluation,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbosity.level())
        .parse_default_env()
        .init();

    let database = match &cli.rules {
        Some(path) => MitigationDatabase::from_json_file(path)
            .with_context(|| format!("Failed to load rule table from {}", path))?,
        None => MitigationDatabase::standard(),
    };

    match cli.command {
        Commands::Check {
            brand,
            device,
            soc,
            api_level,
            patch,
            skip_mitigation,
            gles_only,
            format,
        } => {
            let snapshot = DeviceSnapshot::from_raw(api_level, &brand, &device, soc.as_deref(), patch.as_deref());

            let mut flags = StartupFlags::NONE;
            if skip_mitigation {
                flags = flags | StartupFlags::SKIP_STARTUP_MITIGATION;
            }
            if gles_only {
                flags = flags | StartupFlags::GLES_ONLY_ON_MITIGATED_DEVICES;
            }

            let evaluation = evaluate_with(&database, &snapshot, flags);
            match format {
                OutputFormat::Text => print_evaluation_text(&snapshot, &evaluation),
                OutputFormat::Json => {
                    let report = CheckReport {
                        evaluated_at: Utc::now(),
                        device: &snapshot,
                        flags: flags.bits(),
                        evaluation: &evaluation,
                    };
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
            }
        }

        Commands::Rules { format } => match format {
            OutputFormat::Text => print_rules_text(&database),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(database.rules())?),
        },

        Commands::Version => {
            println!("vkquality v{}", vkquality::version());
            println!("Startup mitigation for Vulkan quality recommendations");
        }
    }

    Ok(())
}

fn print_evaluation_text(snapshot: &DeviceSnapshot, evaluation: &Evaluation) {
    println!("📱 Device:");
    println!("===================");
    println!("Brand: {}", snapshot.brand);
    println!("Device: {}", snapshot.device);
    println!("SoC: {}", snapshot.soc);
    println!("API level: {}", snapshot.api_level);
    println!("Security patch: {}", snapshot.security_patch);
    println!();
    println!("{}", evaluation.verdict.diagnostic);

    match evaluation.decision {
        StartupDecision::Mitigated(recommendation) => {
            println!("🛡️  Mitigation active: {}", recommendation);
        }
        StartupDecision::RunEngine => {
            println!("✅ Mitigation inactive: quality engine can be started");
        }
    }
}

fn print_rules_text(database: &MitigationDatabase) {
    if database.is_empty() {
        println!("❌ Rule table is empty.");
        return;
    }

    println!("📋 {} mitigation rule(s):", database.len());
    for (i, rule) in database.rules().iter().enumerate() {
        let record = &rule.record;
        println!(
            "  {:2}. brand={:?} device={:?} soc={:?} affected<={} fixed>={} fixed_patch={} vulkan_patch={}",
            i + 1,
            record.brand,
            record.device,
            record.soc,
            rule.affected_api_max,
            rule.fixed_api_min,
            rule.fixed_patch_date,
            rule.vulkan_patch_date
        );
    }
}
