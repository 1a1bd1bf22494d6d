use clap::Parser;
use starling_client::{Space, StarlingAccount};

#[derive(Parser, Debug)]
#[command(name = "starling")]
#[command(about = "Summarise a Starling account from the command line")]
struct Cli {
    /// Personal access token (also read from `STARLING_API_TOKEN`).
    #[arg(long, env = "STARLING_API_TOKEN", hide_env_values = true)]
    token: String,

    /// Use the sandbox environment instead of production.
    #[arg(long)]
    sandbox: bool,

    /// Log level for the starling crates.
    #[arg(long, default_value = "info")]
    level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "starling={level},starling_client={level}",
            level = cli.level
        ))
        .init();

    tracing::info!("Fetching account data...");
    let account = StarlingAccount::builder()
        .token(&cli.token)
        .sandbox(cli.sandbox)
        .eager_update(true)
        .build()
        .await?;

    println!("Account {} ({})", account.account_uid(), account.currency());
    if let Some(identifiers) = account.identifiers() {
        println!("  IBAN {}  BIC {}", identifiers.iban, identifiers.bic);
    }
    if let Some(balance) = account.balance() {
        println!("  Cleared balance:      {}", balance.cleared_balance);
        println!("  Effective balance:    {}", balance.effective_balance);
        println!("  Pending transactions: {}", balance.pending_transactions);
    }

    let mut saving: Vec<_> = account.saving_spaces().iter().collect();
    saving.sort_by_key(|space| space.sort_order());
    if !saving.is_empty() {
        println!("Saving spaces:");
        for space in saving {
            match space.target() {
                Some(target) => println!(
                    "  {}: {} of {} [{}]",
                    space.name(),
                    space.total_saved(),
                    target,
                    space.state()
                ),
                None => println!(
                    "  {}: {} [{}]",
                    space.name(),
                    space.total_saved(),
                    space.state()
                ),
            }
        }
    }

    let mut spending: Vec<_> = account.spending_spaces().iter().collect();
    spending.sort_by_key(|space| space.sort_order());
    if !spending.is_empty() {
        println!("Spending spaces:");
        for space in spending {
            println!("  {}: {} [{}]", space.name(), space.balance(), space.state());
        }
    }

    Ok(())
}
