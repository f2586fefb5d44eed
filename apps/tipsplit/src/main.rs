//! tipsplit - split a restaurant bill and ask a language model how much to tip.
//!
//! ```bash
//! tipsplit calc --bill 84.20 --tip 18 --people 3
//! tipsplit calc --bill 49.50 --people 3 --round --json
//! GEMINI_API_KEY=... tipsplit suggest --bill 84.20 --service "Friendly and fast" --apply
//! tipsplit --config tipsplit.yaml --print-config
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
// CLI tools are expected to print to stdout/stderr
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod config;
mod format;
mod logging;
mod render;

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use tip_split::{GeminiSuggestionClient, TipSession};
use tip_split_sdk::TipSuggestionClientV1;

use crate::config::AppConfig;

/// Bill splitter with AI tip suggestions
#[derive(Parser, Debug)]
#[command(name = "tipsplit")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Print effective configuration (YAML) and exit
    #[arg(long, global = true)]
    print_config: bool,

    /// Output results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute tip, total and per-person amounts
    Calc(BillArgs),
    /// Ask the language model for a tip percentage
    Suggest(SuggestArgs),
    /// Validate configuration and exit
    Check,
}

#[derive(Args, Debug)]
struct BillArgs {
    /// Bill amount before tip
    #[arg(long, value_name = "AMOUNT", allow_negative_numbers = true)]
    bill: f64,

    /// Tip percentage (0-100); defaults to `defaults.tip_percentage`
    #[arg(long, value_name = "PCT", allow_negative_numbers = true)]
    tip: Option<f64>,

    /// Number of people sharing the bill; defaults to `defaults.party_size`
    #[arg(long, value_name = "N")]
    people: Option<u32>,

    /// Round the total to the nearest whole unit
    #[arg(long)]
    round: bool,
}

#[derive(Args, Debug)]
struct SuggestArgs {
    #[command(flatten)]
    bill: BillArgs,

    /// Free-text description of the service
    #[arg(long, value_name = "TEXT")]
    service: String,

    /// Apply the suggested percentage and print the resulting split
    #[arg(long)]
    apply: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Layered config: defaults -> YAML (if provided) -> env (TIPSPLIT__*) -> CLI
    let config = AppConfig::load(cli.config.as_deref())?;
    logging::init(&config.logging, cli.verbose);

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command {
        Some(Commands::Calc(args)) => calc(&config, &args, cli.json),
        Some(Commands::Suggest(args)) => suggest(&config, &args, cli.json).await,
        Some(Commands::Check) => check(&config, cli.json),
        None => bail!("no command given; run with --help for usage"),
    }
}

fn session_for(config: &AppConfig, args: &BillArgs) -> TipSession {
    let mut session = TipSession::with_defaults(config.defaults.to_form());
    session.set_bill_amount(Some(args.bill));
    if let Some(tip) = args.tip {
        session.set_tip_percentage(Some(tip));
    }
    if let Some(people) = args.people {
        session.set_party_size(Some(people));
    }
    session.set_round_total(args.round);
    session
}

fn print_current_split(session: &TipSession, json: bool) -> Result<()> {
    let (Some(input), Some(result)) = (session.form().to_input(), session.result()) else {
        bail!(
            "nothing to compute: the bill must be above zero, the tip non-negative and the party at least one person"
        );
    };
    if json {
        render::print_json(&render::split_json(&input, result))
    } else {
        render::print_split(&input, result);
        Ok(())
    }
}

fn calc(config: &AppConfig, args: &BillArgs, json: bool) -> Result<()> {
    let session = session_for(config, args);
    print_current_split(&session, json)
}

async fn suggest(config: &AppConfig, args: &SuggestArgs, json: bool) -> Result<()> {
    let mut session = session_for(config, &args.bill);
    session.set_service_quality(args.service.as_str());

    // Field checks run before the client is built so they win over a missing key.
    let ticket = session.begin_suggestion()?;
    let outcome = match GeminiSuggestionClient::new(&config.suggestion) {
        Ok(client) => client.suggest(ticket.request()).await,
        Err(e) => Err(e),
    };
    let notice = session.complete_suggestion(ticket, outcome);

    let Some(suggestion) = session.suggestion().cloned() else {
        if json {
            render::print_json(&serde_json::json!({
                "error": { "title": notice.title(), "description": notice.description() }
            }))?;
        }
        bail!("{}: {}", notice.title(), notice.description());
    };

    if !args.apply {
        if json {
            return render::print_json(
                &serde_json::json!({ "suggestion": render::suggestion_json(&suggestion) }),
            );
        }
        render::print_notice(&notice);
        render::print_suggestion(&suggestion);
        return Ok(());
    }

    let Some(applied) = session.apply_suggestion() else {
        bail!("suggestion was discarded before it could be applied");
    };
    if json {
        let split = match (session.form().to_input(), session.result()) {
            (Some(input), Some(result)) => render::split_json(&input, result),
            _ => serde_json::Value::Null,
        };
        return render::print_json(&serde_json::json!({
            "suggestion": render::suggestion_json(&suggestion),
            "split": split,
        }));
    }

    render::print_notice(&notice);
    render::print_suggestion(&suggestion);
    render::print_notice(&applied);
    print_current_split(&session, false)
}

fn check(config: &AppConfig, json: bool) -> Result<()> {
    tracing::info!("Checking configuration...");
    let suggestions = GeminiSuggestionClient::new(&config.suggestion)
        .map(|client| client.endpoint().to_owned())
        .map_err(|e| e.to_string());

    if json {
        let status = match &suggestions {
            Ok(endpoint) => serde_json::json!({ "enabled": true, "endpoint": endpoint }),
            Err(reason) => serde_json::json!({ "enabled": false, "reason": reason }),
        };
        return render::print_json(&serde_json::json!({ "valid": true, "suggestions": status }));
    }

    println!("Configuration is valid");
    match suggestions {
        Ok(endpoint) => println!("Suggestions: enabled ({endpoint})"),
        Err(reason) => println!("Suggestions: disabled ({reason})"),
    }
    Ok(())
}
