use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

use oppwa_gateway::{CardBrand, CardDetails, Gateway, GatewayConfig, ResponseEnvelope};

/// Send debits, pre-authorizations, reversals and refunds to the OPPWA gateway.
///
/// Credentials come from OPPWA_USER_ID, OPPWA_PASSWORD and OPPWA_ENTITY_ID
/// (a .env file is honoured).
#[derive(Parser, Debug)]
#[command(name = "oppwa", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Debit a card, or pre-authorize it with --auth-only.
    Debit(DebitArgs),

    /// Reverse a transaction, or refund part of it with --amount.
    Reverse(ReverseArgs),
}

#[derive(Args, Debug)]
struct DebitArgs {
    #[arg(long)]
    amount: Decimal,
    #[arg(long, default_value = "ZAR")]
    currency: String,
    #[arg(long)]
    brand: String,
    #[arg(long)]
    number: String,
    #[arg(long)]
    holder: String,
    #[arg(long)]
    expiry_month: String,
    #[arg(long)]
    expiry_year: String,
    #[arg(long)]
    cvv: String,
    /// Pre-authorize only (paymentType=PA).
    #[arg(long)]
    auth_only: bool,
    /// Register the card for recurring payments.
    #[arg(long)]
    register: bool,
}

#[derive(Args, Debug)]
struct ReverseArgs {
    transaction_id: String,
    /// Refund this amount instead of reversing the whole transaction.
    #[arg(long)]
    amount: Option<Decimal>,
    #[arg(long)]
    currency: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(envelope) => {
            println!("succeeded: {}", envelope.succeeded());
            println!("{}", envelope.raw_body());
            if envelope.succeeded() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> Result<ResponseEnvelope> {
    let config = GatewayConfig::from_env().context("failed to load gateway configuration")?;
    tracing::info!("Using gateway at {}", config.base_uri());

    let gateway = Gateway::from_config(config).context("failed to create gateway client")?;

    let envelope = match cli.command {
        Commands::Debit(args) => {
            let brand: CardBrand = args.brand.parse()?;
            let card = CardDetails::new(
                brand,
                args.number,
                args.holder,
                args.expiry_month,
                args.expiry_year,
                args.cvv,
            );

            gateway
                .debit(card)
                .amount(args.amount)
                .currency(args.currency)
                .auth_only(args.auth_only)
                .create_registration(args.register)
                .process()
                .await
                .context("payment request failed")?
        }
        Commands::Reverse(args) => match args.amount {
            Some(amount) => gateway
                .refund(args.transaction_id, amount, args.currency.as_deref())
                .process()
                .await
                .context("refund request failed")?,
            None => gateway
                .reverse(args.transaction_id)
                .process()
                .await
                .context("reversal request failed")?,
        },
    };

    Ok(envelope)
}
