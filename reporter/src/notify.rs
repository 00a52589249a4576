use shared::{
    discord::{Attachment, DiscordWebhook, Embed, WebhookMessage, MAX_EMBEDS, MAX_EMBED_FIELDS},
    StatsRecord,
};
use tracing::{info, instrument, warn};

use crate::consts::{EMBED_COLOR, EMBED_DESCRIPTION, EMBED_TITLE, SUMMARY_FILENAME};

/// Summary embed with the attached image and one field per highlight game.
///
/// Fields that do not fit into the first embed continue in untitled embeds.
pub fn summary_message(records: &[StatsRecord]) -> WebhookMessage {
    let mut embeds = vec![Embed::new(EMBED_TITLE, EMBED_DESCRIPTION, EMBED_COLOR)
        .with_attached_image(SUMMARY_FILENAME)];

    let highlights: Vec<&StatsRecord> = records
        .iter()
        .filter(|record| !record.highlight_game().is_empty())
        .collect();
    let capacity = MAX_EMBEDS * MAX_EMBED_FIELDS;
    if highlights.len() > capacity {
        warn!(
            "Only {capacity} of {} highlight games fit into the message",
            highlights.len()
        );
    }

    for (index, chunk) in highlights
        .chunks(MAX_EMBED_FIELDS)
        .take(MAX_EMBEDS)
        .enumerate()
    {
        if index > 0 {
            embeds.push(Embed::new("", "", EMBED_COLOR));
        }
        if let Some(embed) = embeds.last_mut() {
            for record in chunk {
                embed.add_field(
                    format!("{}'s highlight", record.username()),
                    record.highlight_game(),
                    false,
                );
            }
        }
    }

    WebhookMessage {
        content: None,
        embeds,
    }
}

#[instrument(skip_all, fields(players = records.len()))]
pub async fn send_summary(
    webhook: &DiscordWebhook,
    records: &[StatsRecord],
    png: Vec<u8>,
) -> anyhow::Result<()> {
    let message = summary_message(records);
    webhook
        .execute(&message, vec![Attachment::png(SUMMARY_FILENAME, png)])
        .await?;
    info!("Posted the weekly summary");
    Ok(())
}
