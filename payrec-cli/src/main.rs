//! Payment Record CLI
//!
//! Command-line interface for the payment record API.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use payrec_client::PaymentRecordsClient;
use payrec_types::{Decimal, OrderId, PaymentId, PaymentMethodId, PaymentRecordView, PaymentStatus};

#[derive(Parser)]
#[command(name = "payrec")]
#[command(author, version, about = "Payment record API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the payment record API
    #[arg(long, env = "PAYREC_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Payment record operations
    Payment {
        #[command(subcommand)]
        action: PaymentCommands,
    },
    /// Check API health
    Health,
}

#[derive(Subcommand)]
enum PaymentCommands {
    /// List payment records one page at a time
    List {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        size: u32,
        /// Sort as `field` or `field,asc|desc`
        #[arg(long)]
        sort: Option<String>,
    },
    /// Get a payment record
    Get {
        /// Payment record ID
        id: String,
    },
    /// Create a payment record
    Create(PaymentFields),
    /// Replace every field of a payment record
    Update {
        /// Payment record ID
        id: String,
        #[command(flatten)]
        fields: PaymentFields,
    },
    /// Delete a payment record
    Delete {
        /// Payment record ID
        id: String,
    },
}

#[derive(Args)]
struct PaymentFields {
    #[arg(long)]
    amount: String,
    #[arg(long)]
    holder_name: String,
    #[arg(long)]
    card_number: String,
    /// Card expiry, e.g. 07/28
    #[arg(long)]
    expiry: String,
    #[arg(long)]
    security_code: String,
    /// CREATED, CONFIRMED or CANCELLED
    #[arg(long, default_value = "CREATED")]
    status: String,
    #[arg(long)]
    order_id: i64,
    #[arg(long)]
    payment_method_id: i64,
}

impl PaymentFields {
    fn into_view(self) -> Result<PaymentRecordView> {
        let amount: Decimal = self
            .amount
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid amount: {}", self.amount))?;
        let status: PaymentStatus = self.status.parse()?;

        Ok(PaymentRecordView {
            id: None,
            amount,
            holder_name: self.holder_name,
            card_number: self.card_number,
            expiry: self.expiry,
            security_code: self.security_code,
            status,
            order_id: OrderId::new(self.order_id),
            payment_method_id: PaymentMethodId::new(self.payment_method_id),
        })
    }
}

fn parse_payment_id(s: &str) -> Result<PaymentId> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Invalid payment ID: {}", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let client = PaymentRecordsClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Payment { action } => match action {
            PaymentCommands::List { page, size, sort } => {
                let records = client.list_payments(page, size, sort.as_deref()).await?;
                println!("{}", serde_json::to_string_pretty(&records)?);
            }
            PaymentCommands::Get { id } => {
                let id = parse_payment_id(&id)?;
                let record = client.get_payment(id).await?;
                println!("{}", serde_json::to_string_pretty(&record)?);
            }
            PaymentCommands::Create(fields) => {
                let record = client.create_payment(&fields.into_view()?).await?;
                println!("{}", serde_json::to_string_pretty(&record)?);
            }
            PaymentCommands::Update { id, fields } => {
                let id = parse_payment_id(&id)?;
                let record = client.update_payment(id, &fields.into_view()?).await?;
                println!("{}", serde_json::to_string_pretty(&record)?);
            }
            PaymentCommands::Delete { id } => {
                let id = parse_payment_id(&id)?;
                client.delete_payment(id).await?;
                println!("✓ Payment record {} deleted", id);
            }
        },
    }

    Ok(())
}
