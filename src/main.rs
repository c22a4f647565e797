use chatshop::application::engine::{ShopConfig, ShopEngine};
use chatshop::domain::ports::{CatalogBox, MessengerBox, OrderLedgerBox, SessionStoreBox};
use chatshop::domain::product::Product;
use chatshop::infrastructure::in_memory::{InMemoryCatalog, InMemorySessionStore};
use chatshop::infrastructure::json_ledger::JsonFileLedger;
use chatshop::interfaces::script::EventReader;
use chatshop::interfaces::stdout::StdoutMessenger;
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input event script (JSON lines, one event per line)
    script: PathBuf,

    /// Path to the order ledger file
    #[arg(long, default_value = "orders.json")]
    ledger: PathBuf,

    /// User id of the shop administrator
    #[arg(long, env = "SHOP_ADMIN_ID")]
    admin_id: i64,
}

/// The stock catalog the shop starts with.
fn seed_products() -> miette::Result<Vec<Product>> {
    [
        ("apple", "Apple", 50),
        ("banana", "Banana", 70),
        ("orange", "Orange", 80),
        ("bread", "Bread", 40),
    ]
    .into_iter()
    .map(|(id, name, price)| Product::new(id, name, price).into_diagnostic())
    .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let catalog: CatalogBox = Box::new(
        InMemoryCatalog::with_products(seed_products()?)
            .await
            .into_diagnostic()?,
    );
    let sessions: SessionStoreBox = Box::new(InMemorySessionStore::new());
    let ledger: OrderLedgerBox = Box::new(JsonFileLedger::new(cli.ledger));
    let messenger: MessengerBox = Box::new(StdoutMessenger::new());

    let engine = ShopEngine::new(
        catalog,
        sessions,
        ledger,
        messenger,
        ShopConfig::new(cli.admin_id),
    );

    let file = File::open(cli.script).into_diagnostic()?;
    let reader = EventReader::new(BufReader::new(file));
    for event_result in reader.events() {
        match event_result {
            Ok(event) => {
                if let Err(e) = engine.handle_event(event).await {
                    eprintln!("Error handling event: {}", e);
                }
            }
            Err(e) => {
                eprintln!("Error reading event: {}", e);
            }
        }
    }

    Ok(())
}
