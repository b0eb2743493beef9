//! Game link extraction.
//!
//! Only QuakeWorld Hub game pages are recognised, with a strictly numeric id:
//! `https://hub.quakeworld.nu/games/?gameId=<digits>`.

use std::sync::LazyLock;

use regex::Regex;

/// ASCII digits only; `\d` would also accept other Unicode decimal digits.
const GAME_URL_PATTERN: &str = r"https://hub\.quakeworld\.nu/games/\?gameId=[0-9]+";

static GAME_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(GAME_URL_PATTERN).expect("game URL pattern is valid"));

/// Return every non-overlapping game link in `text`, in order of appearance.
///
/// Repeats are kept; see [`crate::batch::dedupe_and_limit`].
pub fn extract_urls(text: &str) -> Vec<String> {
    GAME_URL
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_yields_nothing() {
        assert!(extract_urls("").is_empty());
    }

    #[test]
    fn finds_link_inside_sentence() {
        let urls = extract_urls("check https://hub.quakeworld.nu/games/?gameId=123 please");
        assert_eq!(urls, vec!["https://hub.quakeworld.nu/games/?gameId=123"]);
    }

    #[test]
    fn keeps_order_and_repeats() {
        let text = "https://hub.quakeworld.nu/games/?gameId=2 \
                    https://hub.quakeworld.nu/games/?gameId=1 \
                    https://hub.quakeworld.nu/games/?gameId=2";
        assert_eq!(
            extract_urls(text),
            vec![
                "https://hub.quakeworld.nu/games/?gameId=2",
                "https://hub.quakeworld.nu/games/?gameId=1",
                "https://hub.quakeworld.nu/games/?gameId=2",
            ]
        );
    }

    #[test]
    fn adjacent_links_without_separator() {
        let text =
            "https://hub.quakeworld.nu/games/?gameId=7https://hub.quakeworld.nu/games/?gameId=8";
        assert_eq!(extract_urls(text).len(), 2);
    }

    #[test]
    fn link_in_angle_brackets_and_markdown() {
        let text = "<https://hub.quakeworld.nu/games/?gameId=42> and \
                    [game](https://hub.quakeworld.nu/games/?gameId=43)";
        assert_eq!(
            extract_urls(text),
            vec![
                "https://hub.quakeworld.nu/games/?gameId=42",
                "https://hub.quakeworld.nu/games/?gameId=43",
            ]
        );
    }

    #[test]
    fn rejects_other_hosts_schemes_and_ids() {
        let text = "http://hub.quakeworld.nu/games/?gameId=1 \
                    https://hub.quakeworld.com/games/?gameId=1 \
                    https://hubXquakeworld.nu/games/?gameId=1 \
                    https://hub.quakeworld.nu/game/?gameId=1 \
                    https://hub.quakeworld.nu/games/?gameId= \
                    https://hub.quakeworld.nu/games/?gameId=abc \
                    https://hub.quakeworld.nu/games/?gameId=\u{0663}";
        assert!(extract_urls(text).is_empty());
    }

    #[test]
    fn every_match_is_a_full_pattern_match() {
        let anchored = Regex::new(&format!("^{GAME_URL_PATTERN}$")).unwrap();
        let text = "x https://hub.quakeworld.nu/games/?gameId=99999, \
                    https://hub.quakeworld.nu/games/?gameId=5abc \
                    (https://hub.quakeworld.nu/games/?gameId=0)";
        let urls = extract_urls(text);
        assert_eq!(urls.len(), 3);
        for url in &urls {
            assert!(anchored.is_match(url), "partial match: {url}");
        }
        assert_eq!(urls[1], "https://hub.quakeworld.nu/games/?gameId=5");
    }
}
