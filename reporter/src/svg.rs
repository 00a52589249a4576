use std::{path::Path, sync::Arc};

use anyhow::Context;
use shared::{chess::GameMode, top_performer, IntoEnumIterator, StatsRecord};
use usvg::{fontdb, Options, Tree};

use crate::consts::SUMMARY_TITLE;

const TEMPLATE: &str = include_str!("../templates/summary.svg");

pub const IMAGE_SIZE: u32 = 1080;

// Layout of the player rows, in pixels from the top of the image.
const HEADER_HEIGHT: u32 = 120;
const LINE_HEIGHT: u32 = 50;
const PLAYER_GAP: u32 = 20;
const BODY_FONT_SIZE: u32 = 40;
const TEXT_X: u32 = 40;

const TEXT_COLOR: &str = "#000000";
const RATINGS_COLOR: &str = "#444444";
const TOP_PERFORMER_COLOR: &str = "#006400";

/// Loads a single font file and makes it the document's sans-serif family.
pub fn load_font(path: &Path) -> anyhow::Result<Arc<fontdb::Database>> {
    let mut font = fontdb::Database::new();
    font.load_font_file(path)
        .with_context(|| format!("Failed to load font {}", path.display()))?;

    let family = font
        .faces()
        .next()
        .and_then(|face| face.families.first())
        .map(|(name, _)| name.clone())
        .ok_or_else(|| anyhow::anyhow!("No font faces found in {}", path.display()))?;
    font.set_sans_serif_family(family);

    Ok(Arc::new(font))
}

pub fn summary_svg(records: &[StatsRecord]) -> String {
    let mut rows = String::new();
    let mut top = HEADER_HEIGHT;
    for record in records {
        push_line(&mut rows, top, &record_line(record), TEXT_COLOR);
        push_line(&mut rows, top + LINE_HEIGHT, &ratings_line(record), RATINGS_COLOR);
        top += 2 * LINE_HEIGHT + PLAYER_GAP;
    }

    if let Some(performer) = top_performer(records) {
        let line = format!(
            "Top Performer: {} with {} wins!",
            performer.username(),
            performer.wins()
        );
        // One empty line below the last player block.
        top = top - PLAYER_GAP + LINE_HEIGHT;
        push_line(&mut rows, top, &line, TOP_PERFORMER_COLOR);
        top += LINE_HEIGHT;
    }

    if top > IMAGE_SIZE {
        tracing::warn!(
            "Summary of {} players does not fit into the image and will be cut off",
            records.len()
        );
    }

    TEMPLATE
        .replace("{title}", &escape(SUMMARY_TITLE))
        .replace("{rows}", &rows)
}

pub fn generate_png_summary(
    records: &[StatsRecord],
    fontdb: Arc<fontdb::Database>,
) -> anyhow::Result<Vec<u8>> {
    postprocess_svg_to_png(summary_svg(records), fontdb)
}

fn record_line(record: &StatsRecord) -> String {
    format!(
        "{}: {} games | {}W/{}L",
        record.username(),
        record.games_played(),
        record.wins(),
        record.losses()
    )
}

fn ratings_line(record: &StatsRecord) -> String {
    GameMode::iter()
        .map(|mode| format!("{mode} {}", record.rating(mode)))
        .collect::<Vec<_>>()
        .join(" | ")
}

// `top` is the upper edge of the line; svg positions text by its baseline.
fn push_line(rows: &mut String, top: u32, text: &str, fill: &str) {
    rows.push_str(&format!(
        "    <text x=\"{TEXT_X}\" y=\"{}\" font-size=\"{BODY_FONT_SIZE}\" fill=\"{fill}\">{}</text>\n",
        top + BODY_FONT_SIZE,
        escape(text)
    ));
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn postprocess_svg_to_png(svg: String, fontdb: Arc<fontdb::Database>) -> anyhow::Result<Vec<u8>> {
    let tree = Tree::from_str(
        &svg,
        &Options {
            fontdb,
            ..Default::default()
        },
    )?;

    let pixmap_size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(pixmap_size.width(), pixmap_size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to create pixmap"))?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
    Ok(pixmap.encode_png()?)
}
