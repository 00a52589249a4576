use anyhow::Context;
use chrono::{DateTime, Utc};
use shared::{
    chesscom::{ChessApi, ChessComClient},
    discord::DiscordWebhook,
    latest_archive, StatsRecord, WeeklyWindow,
};
use tracing::{debug, info, instrument};

use crate::{
    config::Config,
    notify::send_summary,
    svg::{generate_png_summary, load_font},
};

/// Builds the record of one user for the week ending at `now`.
#[instrument(skip(api, now))]
pub async fn fetch_user_stats<A: ChessApi + ?Sized>(
    api: &A,
    username: &str,
    now: DateTime<Utc>,
) -> anyhow::Result<StatsRecord> {
    let window = WeeklyWindow::ending_at(now);
    let archives = api.archives(username).await?;
    let Some(archive_url) = latest_archive(&archives.archives) else {
        info!("No game archives found for {username}");
        return Ok(StatsRecord::empty(username));
    };

    let archive = api.archive(archive_url).await?;
    let stats = api.stats(username).await?;
    let record = StatsRecord::from_games(username, &archive.games, &stats, &window);
    debug!(?record, "Collected weekly stats");
    Ok(record)
}

/// Collects records one user at a time, in the given order.
///
/// The first failing user aborts the whole batch.
pub async fn collect_weekly_stats<A: ChessApi + ?Sized>(
    api: &A,
    users: &[String],
    now: DateTime<Utc>,
) -> anyhow::Result<Vec<StatsRecord>> {
    let mut records = Vec::with_capacity(users.len());
    for username in users {
        let record = fetch_user_stats(api, username, now)
            .await
            .with_context(|| format!("Failed to collect weekly stats for {username}"))?;
        records.push(record);
    }
    Ok(records)
}

/// Fetches, renders and posts the summary for the week ending at `now`.
pub async fn run(config: &Config, now: DateTime<Utc>) -> anyhow::Result<()> {
    let fontdb = load_font(&config.font_path)?;
    let chess = ChessComClient::new(&config.chess_api_url)?;

    info!("Collecting weekly stats for {} players", config.users.len());
    let records = collect_weekly_stats(&chess, &config.users, now).await?;

    let png = generate_png_summary(&records, fontdb)?;
    tokio::fs::write(&config.output_path, &png)
        .await
        .with_context(|| format!("Failed to write {}", config.output_path.display()))?;
    info!("Saved summary to {}", config.output_path.display());

    let webhook = DiscordWebhook::new(config.webhook_url.clone());
    send_summary(&webhook, &records, png).await
}
