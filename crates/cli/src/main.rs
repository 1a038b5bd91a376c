use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ward_core::{CoreConfig, SessionService};
use ward_types::NonEmptyText;

mod shell;

#[derive(Parser)]
#[command(name = "ward")]
#[command(about = "Ward clinical record and billing console")]
struct Cli {
    /// Username for the seeded administrator account
    /// (falls back to WARD_ADMIN_USER, then "admin")
    #[arg(long)]
    admin_user: Option<String>,
    /// Password for the seeded administrator account
    /// (falls back to WARD_ADMIN_PASS, then "admin123")
    #[arg(long)]
    admin_pass: Option<String>,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ward=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let admin_user = cli
        .admin_user
        .or_else(|| std::env::var("WARD_ADMIN_USER").ok())
        .unwrap_or_else(|| "admin".to_owned());
    let admin_pass = cli
        .admin_pass
        .or_else(|| std::env::var("WARD_ADMIN_PASS").ok())
        .unwrap_or_else(|| "admin123".to_owned());

    let cfg = CoreConfig::new(
        NonEmptyText::new(&admin_user).context("administrator username cannot be empty")?,
        NonEmptyText::new(&admin_pass).context("administrator password cannot be empty")?,
    );

    println!("Seeded administrator account: username='{admin_user}'");
    shell::run(SessionService::new(&cfg))
}
