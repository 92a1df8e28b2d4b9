use account_ledger::application::context::{LedgerContext, provision_default_roles};
use account_ledger::application::engine::PaymentRequest;
use account_ledger::application::session::Registration;
use account_ledger::config::LedgerConfig;
use account_ledger::domain::ports::LedgerRepository;
use account_ledger::interfaces::csv::payment_reader::PaymentReader;
use account_ledger::interfaces::csv::report_writer::ReportWriter;
use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON config file (optional). Missing keys keep their defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the snapshot files. Overrides the config file.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Seed the default merchant and customer roles
    Init,
    /// Register a new account
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Role name, repeatable
        #[arg(long = "role", required = true)]
        roles: Vec<String>,
    },
    /// Activate an account
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Deactivate an account
    Logout {
        #[arg(long)]
        account: String,
    },
    /// Process a single payment
    Pay {
        #[arg(long)]
        payer: String,
        #[arg(long)]
        payee: String,
        #[arg(long, allow_hyphen_values = true)]
        amount: Decimal,
    },
    /// Process payments from a CSV file with a payer,payee,amount header
    PayBatch { input: PathBuf },
    /// Print the transaction history of an account as JSON
    History {
        #[arg(long)]
        account: String,
    },
    /// Print all accounts as CSV
    Accounts,
    /// Print the full ledger as CSV
    Ledger,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_ledger=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => LedgerConfig::from_file(path).into_diagnostic()?,
        None => LedgerConfig::default(),
    };
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    let ctx = LedgerContext::open(&config);
    let stdout = io::stdout();

    match cli.command {
        Command::Init => {
            if provision_default_roles(&config).into_diagnostic()? {
                println!("roles written to {}", config.roles_path().display());
            } else {
                println!("roles already provisioned");
            }
        }
        Command::Register {
            username,
            email,
            password,
            roles,
        } => {
            let account = ctx
                .sessions
                .register(Registration {
                    username,
                    email,
                    password,
                    roles,
                })
                .await
                .into_diagnostic()?;
            println!("registered account {}", account.id);
        }
        Command::Login { username, password } => {
            let account = ctx
                .sessions
                .login(&username, &password)
                .await
                .into_diagnostic()?;
            println!("account {} is active", account.id);
        }
        Command::Logout { account } => {
            let account = ctx.sessions.logout(&account).await.into_diagnostic()?;
            println!("account {} is inactive", account.id);
        }
        Command::Pay {
            payer,
            payee,
            amount,
        } => {
            let receipt = ctx
                .payments
                .process_payment(PaymentRequest::new(payer, payee, amount))
                .await
                .into_diagnostic()?;
            serde_json::to_writer_pretty(stdout.lock(), &receipt).into_diagnostic()?;
            println!();
        }
        Command::PayBatch { input } => {
            let file = File::open(input).into_diagnostic()?;
            let reader = PaymentReader::new(file);
            for request in reader.requests() {
                match request {
                    Ok(request) => {
                        if let Err(e) = ctx.payments.process_payment(request).await {
                            eprintln!("Error processing payment: {}", e);
                        }
                    }
                    Err(e) => {
                        eprintln!("Error reading payment: {}", e);
                    }
                }
            }

            let profiles = ctx.sessions.directory().await.into_diagnostic()?;
            ReportWriter::new(stdout.lock())
                .write_accounts(&profiles)
                .into_diagnostic()?;
        }
        Command::History { account } => {
            let summary = ctx
                .payments
                .transaction_history(&account)
                .await
                .into_diagnostic()?;
            serde_json::to_writer_pretty(stdout.lock(), &summary).into_diagnostic()?;
            println!();
        }
        Command::Accounts => {
            let profiles = ctx.sessions.directory().await.into_diagnostic()?;
            ReportWriter::new(stdout.lock())
                .write_accounts(&profiles)
                .into_diagnostic()?;
        }
        Command::Ledger => {
            let transactions = ctx.ledger.list_all().await.into_diagnostic()?;
            ReportWriter::new(stdout.lock())
                .write_transactions(&transactions)
                .into_diagnostic()?;
        }
    }

    Ok(())
}
