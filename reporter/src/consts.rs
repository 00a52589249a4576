// Summary image
pub const SUMMARY_FILENAME: &str = "weekly_chess_summary.png";
pub const SUMMARY_TITLE: &str = "Weekly Chess Summary ♟";

// Webhook message
pub const EMBED_TITLE: &str = "♟ Weekly Chess Summary";
pub const EMBED_DESCRIPTION: &str = "Here’s how everyone did this week:";
pub const EMBED_COLOR: u32 = 242424;

// Defaults for the environment
pub const DEFAULT_CONFIG_PATH: &str = "config.json";
pub const DEFAULT_FONT_PATH: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf";
