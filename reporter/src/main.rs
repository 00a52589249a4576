use chess_summary_reporter::{config::Config, weekly_stats};
use tracing::Instrument;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer());
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::load()?;

    weekly_stats::run(&config, chrono::Utc::now())
        .instrument(tracing::info_span!("Weekly chess summary"))
        .await?;
    tracing::info!("Weekly summary finished");

    Ok(())
}
