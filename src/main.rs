use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use shwary::config::DEFAULT_BASE_URL;
use shwary::domain::validators::validate_transaction_id;
use shwary::interfaces::csv::outcome_writer::{OutcomeWriter, PaymentOutcome};
use shwary::interfaces::csv::payment_reader::PaymentReader;
use shwary::{
    CallbackPolicy, ClientConfig, LoggingConfig, MerchantCredentials, ShwaryClient,
    configure_logging,
};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Merchant identifier (UUID)
    #[arg(long, env = "SHWARY_MERCHANT_ID")]
    merchant_id: String,

    /// Merchant secret key
    #[arg(long, env = "SHWARY_MERCHANT_KEY", hide_env_values = true)]
    merchant_key: String,

    /// Use the sandbox endpoints
    #[arg(long, env = "SHWARY_SANDBOX")]
    sandbox: bool,

    #[arg(long, env = "SHWARY_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Reject callback URLs that are not absolute http(s) URLs
    #[arg(long)]
    enforce_callback_url: bool,

    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    /// Also write logs to this file (rotated daily)
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Initiate a payment and print the API response as JSON
    Pay {
        /// DRC, KE or UG
        #[arg(long)]
        country: String,
        #[arg(long, allow_negative_numbers = true)]
        amount: Decimal,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        callback_url: Option<String>,
    },
    /// Print a transaction as JSON
    Transaction { id: String },
    /// Initiate every payment of a CSV file (country,amount,phone[,callback_url])
    Batch { input: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    configure_logging(&LoggingConfig {
        level: cli.log_level,
        log_file: cli.log_file.clone(),
    })
    .into_diagnostic()?;

    let callback_policy = if cli.enforce_callback_url {
        CallbackPolicy::Enforce
    } else {
        CallbackPolicy::Advisory
    };
    let config = ClientConfig::new(MerchantCredentials::new(cli.merchant_id, cli.merchant_key))
        .with_sandbox(cli.sandbox)
        .with_base_url(cli.base_url)
        .with_timeout(Duration::from_secs(cli.timeout_secs))
        .with_callback_policy(callback_policy);
    let client = Arc::new(ShwaryClient::new(config).into_diagnostic()?);

    let outcome = run(&client, cli.command).await;
    client.close().await;
    outcome
}

async fn run(client: &Arc<ShwaryClient>, command: Command) -> Result<()> {
    match command {
        Command::Pay {
            country,
            amount,
            phone,
            callback_url,
        } => {
            let response = client
                .initiate_payment(&country, amount, &phone, callback_url.as_deref())
                .await
                .into_diagnostic()?;
            println!("{}", serde_json::to_string_pretty(&response).into_diagnostic()?);
        }
        Command::Transaction { id } => {
            if !validate_transaction_id(&id) {
                tracing::warn!("transaction id does not look like a UUID");
            }
            let record = client.get_transaction(&id).await.into_diagnostic()?;
            println!("{}", serde_json::to_string_pretty(&record).into_diagnostic()?);
        }
        Command::Batch { input } => {
            let file = File::open(input).into_diagnostic()?;
            let mut outcomes = Vec::new();
            let mut tasks = JoinSet::new();

            for (index, row) in PaymentReader::new(file).instructions().enumerate() {
                let row_number = index + 1;
                match row {
                    Ok(instruction) => {
                        let client = Arc::clone(client);
                        tasks.spawn(async move {
                            let result = client
                                .initiate_payment(
                                    &instruction.country,
                                    instruction.amount,
                                    &instruction.phone,
                                    instruction.callback_url.as_deref(),
                                )
                                .await;
                            PaymentOutcome::from_result(row_number, &result)
                        });
                    }
                    Err(e) => {
                        eprintln!("Error reading payment on row {row_number}: {e}");
                        outcomes.push(PaymentOutcome::failed(row_number, &e));
                    }
                }
            }

            while let Some(joined) = tasks.join_next().await {
                outcomes.push(joined.into_diagnostic()?);
            }

            let stdout = io::stdout();
            OutcomeWriter::new(stdout.lock())
                .write_outcomes(outcomes)
                .into_diagnostic()?;
        }
    }
    Ok(())
}
