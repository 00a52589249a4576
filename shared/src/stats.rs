use crate::chess::{Game, GameMode, Outcome, PlayerStats};
use crate::timeperiod::WeeklyWindow;

/// One user's results over the trailing week.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsRecord {
    username: String,
    games_played: u32,
    wins: u32,
    losses: u32,
    rating_blitz: u32,
    rating_rapid: u32,
    rating_bullet: u32,
    highlight_game: String,
}

impl StatsRecord {
    /// Record for a user without any archived games.
    pub fn empty(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Default::default()
        }
    }

    pub fn from_games(
        username: impl Into<String>,
        games: &[Game],
        stats: &PlayerStats,
        window: &WeeklyWindow,
    ) -> Self {
        let username = username.into();
        let games: Vec<&Game> = games
            .iter()
            .filter(|game| game.end_time.map_or(false, |t| window.contains_unix(t)))
            .collect();

        let mut wins = 0;
        let mut losses = 0;
        for game in &games {
            match game.outcome_for(&username) {
                Outcome::Win => wins += 1,
                Outcome::Loss => losses += 1,
                Outcome::Other => {}
            }
        }

        let highlight_game = highlight_game(&username, &games)
            .map(|game| game.url.clone())
            .unwrap_or_default();

        Self {
            games_played: games.len() as u32,
            wins,
            losses,
            rating_blitz: stats.last_rating(GameMode::Blitz),
            rating_rapid: stats.last_rating(GameMode::Rapid),
            rating_bullet: stats.last_rating(GameMode::Bullet),
            highlight_game,
            username,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub const fn games_played(&self) -> u32 {
        self.games_played
    }

    pub const fn wins(&self) -> u32 {
        self.wins
    }

    pub const fn losses(&self) -> u32 {
        self.losses
    }

    pub const fn rating(&self, mode: GameMode) -> u32 {
        match mode {
            GameMode::Blitz => self.rating_blitz,
            GameMode::Rapid => self.rating_rapid,
            GameMode::Bullet => self.rating_bullet,
        }
    }

    /// Url of the highlight game, empty when the user played nothing this week.
    pub fn highlight_game(&self) -> &str {
        &self.highlight_game
    }
}

// First game wins ties, so only a strictly higher rating replaces the pick.
fn highlight_game<'a>(username: &str, games: &[&'a Game]) -> Option<&'a Game> {
    let mut best: Option<(u32, &'a Game)> = None;
    for &game in games {
        let Some(rating) = game.seat_of(username).and_then(|player| player.rating) else {
            continue;
        };
        if best.map_or(true, |(top, _)| rating > top) {
            best = Some((rating, game));
        }
    }
    best.map(|(_, game)| game)
}

/// The record with the most wins, the earliest one on ties.
pub fn top_performer(records: &[StatsRecord]) -> Option<&StatsRecord> {
    records.iter().fold(None, |best: Option<&StatsRecord>, record| match best {
        Some(top) if top.wins >= record.wins => Some(top),
        _ => Some(record),
    })
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use serde_json::json;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 3, 12, 0, 0).unwrap()
    }

    fn game(url: &str, ended: DateTime<Utc>, white: (&str, u32, &str), black: (&str, u32, &str)) -> Game {
        serde_json::from_value(json!({
            "url": url,
            "end_time": ended.timestamp(),
            "white": { "username": white.0, "rating": white.1, "result": white.2 },
            "black": { "username": black.0, "rating": black.1, "result": black.2 },
        }))
        .unwrap()
    }

    fn stats() -> PlayerStats {
        serde_json::from_value(json!({
            "chess_blitz": { "last": { "rating": 1510 } },
            "chess_bullet": { "last": { "rating": 1320 } },
        }))
        .unwrap()
    }

    fn record(username: &str, wins: u32) -> StatsRecord {
        StatsRecord {
            username: username.to_string(),
            games_played: wins,
            wins,
            ..Default::default()
        }
    }

    #[test]
    fn counts_wins_and_losses_inside_window() {
        let window = WeeklyWindow::ending_at(now());
        let games = vec![
            game("g1", now() - Duration::days(1), ("Alice", 1500, "win"), ("Bob", 1400, "checkmated")),
            game("g2", now() - Duration::days(2), ("Carol", 1600, "win"), ("alice", 1490, "timeout")),
            game("g3", now() - Duration::days(3), ("ALICE", 1480, "checkmated"), ("Dan", 1500, "win")),
            game("g4", now() - Duration::days(4), ("Alice", 1470, "resigned"), ("Eve", 1450, "win")),
            game("g5", now() - Duration::days(5), ("Frank", 1450, "agreed"), ("Alice", 1475, "agreed")),
            game("old", now() - Duration::days(9), ("Alice", 1800, "win"), ("Bob", 1400, "checkmated")),
        ];

        let record = StatsRecord::from_games("alice", &games, &stats(), &window);

        assert_eq!(record.username(), "alice");
        assert_eq!(record.games_played(), 5);
        assert_eq!(record.wins(), 1);
        assert_eq!(record.losses(), 2);
        assert!(record.wins() + record.losses() <= record.games_played());
        assert_eq!(record.rating(GameMode::Blitz), 1510);
        assert_eq!(record.rating(GameMode::Rapid), 0);
        assert_eq!(record.rating(GameMode::Bullet), 1320);
        assert_eq!(record.highlight_game(), "g1");
    }

    #[test]
    fn game_ending_on_window_start_is_excluded() {
        let window = WeeklyWindow::ending_at(now());
        let games = vec![
            game("edge", window.start(), ("Alice", 1500, "win"), ("Bob", 1400, "checkmated")),
            game(
                "inside",
                window.start() + Duration::seconds(1),
                ("Alice", 1400, "win"),
                ("Bob", 1400, "checkmated"),
            ),
        ];

        let record = StatsRecord::from_games("Alice", &games, &stats(), &window);
        assert_eq!(record.games_played(), 1);
        assert_eq!(record.wins(), 1);
        assert_eq!(record.highlight_game(), "inside");
    }

    #[test]
    fn highlight_prefers_first_game_on_equal_rating() {
        let window = WeeklyWindow::ending_at(now());
        let games = vec![
            game("low", now() - Duration::hours(3), ("Alice", 1400, "win"), ("Bob", 1400, "checkmated")),
            game("first-top", now() - Duration::hours(2), ("Bob", 1400, "win"), ("Alice", 1550, "timeout")),
            game("second-top", now() - Duration::hours(1), ("Alice", 1550, "agreed"), ("Bob", 1400, "agreed")),
        ];

        let record = StatsRecord::from_games("alice", &games, &stats(), &window);
        assert_eq!(record.highlight_game(), "first-top");
    }

    #[test]
    fn games_without_end_time_or_rating() {
        let window = WeeklyWindow::ending_at(now());
        let games: Vec<Game> = serde_json::from_value(json!([
            { "url": "no-end", "white": { "username": "Alice", "rating": 2000, "result": "win" } },
            { "url": "no-rating", "end_time": now().timestamp() - 60,
              "white": { "username": "Alice", "result": "win" } },
        ]))
        .unwrap();

        let record = StatsRecord::from_games("alice", &games, &PlayerStats::default(), &window);
        assert_eq!(record.games_played(), 1);
        assert_eq!(record.wins(), 1);
        assert_eq!(record.highlight_game(), "");
        assert_eq!(record.rating(GameMode::Blitz), 0);
    }

    #[test]
    fn no_games_matches_empty_record() {
        let window = WeeklyWindow::ending_at(now());
        let record = StatsRecord::from_games("bob", &[], &PlayerStats::default(), &window);
        assert_eq!(record, StatsRecord::empty("bob"));
        assert_eq!(record.games_played(), 0);
        assert_eq!(record.highlight_game(), "");
    }

    #[test]
    fn top_performer_is_first_with_most_wins() {
        let records = vec![record("a", 3), record("b", 5), record("c", 5), record("d", 1)];
        assert_eq!(top_performer(&records).map(StatsRecord::username), Some("b"));
        assert_eq!(top_performer(&records[3..]).map(StatsRecord::username), Some("d"));
        assert!(top_performer(&[]).is_none());

        let all_zero = vec![record("x", 0), record("y", 0)];
        assert_eq!(top_performer(&all_zero).map(StatsRecord::username), Some("x"));
    }
}
