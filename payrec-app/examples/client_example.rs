//! Client example walking a payment record through its whole lifecycle.
//!
//! Run with: cargo run -p payrec-app --example client_example

use payrec_client::PaymentRecordsClient;
use payrec_hex::{PaymentRecordService, inbound::HttpServer};
use payrec_repo::build_repo;
use payrec_types::{Decimal, OrderId, PaymentMethodId, PaymentRecordView, PaymentStatus};
use std::net::SocketAddr;
use tempfile::tempdir;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Find an available port
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;
    let port = addr.port();
    drop(listener);

    // Use a temp file-backed SQLite DB
    let tmp = tempdir()?;
    let db_path = tmp.path().join("payrec.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    println!("🚀 Starting server on port {port}...");
    println!("   Database: {db_url}");

    let repo = build_repo(&db_url).await?;
    let router = HttpServer::new(PaymentRecordService::new(repo)).router();

    let server_addr = format!("127.0.0.1:{port}");
    tokio::spawn(async move {
        axum::serve(
            TcpListener::bind(&server_addr).await.unwrap(),
            router.into_make_service(),
        )
        .await
        .unwrap();
    });

    // Wait for server to start
    tokio::time::sleep(std::time::Duration::from_millis(500)).await;

    let client = PaymentRecordsClient::new(format!("http://127.0.0.1:{port}"));

    let health = client.health().await?;
    println!("✅ Server health: {health}");

    let view = PaymentRecordView {
        id: None,
        amount: Decimal::new(3225, 2),
        holder_name: "Bach".to_string(),
        card_number: "294737375583726632".to_string(),
        expiry: "07/08".to_string(),
        security_code: "585".to_string(),
        status: PaymentStatus::Created,
        order_id: OrderId::new(1),
        payment_method_id: PaymentMethodId::new(2),
    };

    let created = client.create_payment(&view).await?;
    let id = created
        .id
        .ok_or_else(|| anyhow::anyhow!("server returned no id"))?;
    println!("✅ Created payment {id}: {} for {}", created.amount, created.holder_name);

    let mut change = view.clone();
    change.amount = Decimal::new(100, 0);
    let updated = client.update_payment(id, &change).await?;
    println!("✅ Updated payment {id}: amount now {}", updated.amount);

    let page = client.list_payments(0, 10, None).await?;
    println!("📋 {} payment(s) stored", page.total_elements);

    client.delete_payment(id).await?;
    println!("✅ Deleted payment {id}");

    match client.get_payment(id).await {
        Err(e) => println!("✅ Lookup after delete fails as expected: {e}"),
        Ok(_) => anyhow::bail!("payment {id} still present after delete"),
    }

    println!("\n🎉 Example completed successfully!");

    Ok(())
}
