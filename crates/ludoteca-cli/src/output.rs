//! Plain-text rendering of catalogue listings

use ludoteca_core::{ALL_CATEGORIES, CategoryCounts, GameSummary, category_label};

const TITLE_WIDTH: usize = 40;

/// Truncate to `width` characters, marking the cut with an ellipsis
fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let cut: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

pub fn game_row(game: &GameSummary) -> String {
    let year = game.year_published.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string());
    let players = game.player_range().unwrap_or_else(|| "-".to_string());
    let time = game.playing_time.map(|t| format!("{}m", t)).unwrap_or_else(|| "-".to_string());
    let rating = game.average_rating.map(|r| format!("{:.1}", r)).unwrap_or_else(|| "-".to_string());
    let nz = if game.nz_designer { " [NZ]" } else { "" };

    format!(
        "{:>6}  {:<width$}  {:>4}  {:>7}  {:>5}  {:>4}{}",
        game.id,
        fit(&game.title, TITLE_WIDTH),
        year,
        players,
        time,
        rating,
        nz,
        width = TITLE_WIDTH
    )
}

pub fn game_table_header() -> String {
    format!(
        "{:>6}  {:<width$}  {:>4}  {:>7}  {:>5}  {:>4}",
        "ID",
        "Title",
        "Year",
        "Players",
        "Time",
        "Rate",
        width = TITLE_WIDTH
    )
}

/// One line per category, the catalogue total first
pub fn category_lines(counts: &CategoryCounts) -> Vec<String> {
    let mut lines = vec![format!("{:<28} {:>6}", category_label(ALL_CATEGORIES), counts.all)];
    for key in counts.keys() {
        lines.push(format!(
            "{:<28} {:>6}  ({})",
            category_label(key),
            counts.count(key),
            key
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_fit_truncates_long_titles() {
        assert_eq!(fit("Azul", 10), "Azul");
        assert_eq!(fit("Twilight Imperium", 8), "Twiligh…");
    }

    #[test]
    fn test_game_row_columns() {
        let mut game = GameSummary::new(42, "Kiwis Keep Counting");
        game.year_published = Some(2021);
        game.min_players = Some(2);
        game.max_players = Some(5);
        game.playing_time = Some(45);
        game.average_rating = Some(7.25);
        game.nz_designer = true;

        let row = game_row(&game);
        assert!(row.starts_with("    42  Kiwis Keep Counting"));
        assert!(row.contains("2021"));
        assert!(row.contains("2-5"));
        assert!(row.contains("45m"));
        assert!(row.contains("7.2") || row.contains("7.3"));
        assert!(row.ends_with("[NZ]"));
        assert_eq!(game_table_header().len(), row.trim_end_matches(" [NZ]").len());
    }

    #[test]
    fn test_category_lines() {
        let mut map = BTreeMap::new();
        map.insert("PARTY".to_string(), 3);
        map.insert("COOP_ADVENTURE".to_string(), 7);
        let counts = CategoryCounts { all: 10, counts: map };

        let lines = category_lines(&counts);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("All"));
        assert!(lines[0].ends_with("10"));
        assert!(lines[1].starts_with("Coop Adventure"));
        assert!(lines[1].ends_with("(COOP_ADVENTURE)"));
    }
}
