use std::collections::HashSet;

use serde::Serialize;

/// Upper bound on links forwarded per message event.
pub const MAX_BATCH_URLS: usize = 10;

/// Ordered, duplicate-free set of game links, at most [`MAX_BATCH_URLS`] long.
///
/// Only [`dedupe_and_limit`] builds one, so both bounds hold by construction.
/// Serializes as the webhook payload: `{"urls": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlBatch {
    urls: Vec<String>,
}

impl UrlBatch {
    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// Keep the first occurrence of each URL, preserving order, capped at
/// [`MAX_BATCH_URLS`].
pub fn dedupe_and_limit<I, S>(urls: I) -> UrlBatch
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for url in urls {
        if out.len() == MAX_BATCH_URLS {
            break;
        }
        let url = url.into();
        if seen.insert(url.clone()) {
            out.push(url);
        }
    }

    UrlBatch { urls: out }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(id: usize) -> String {
        format!("https://hub.quakeworld.nu/games/?gameId={id}")
    }

    #[test]
    fn empty_input_gives_empty_batch() {
        let batch = dedupe_and_limit(Vec::<String>::new());
        assert!(batch.is_empty());
    }

    #[test]
    fn keeps_first_seen_order() {
        let batch = dedupe_and_limit([game(3), game(1), game(3), game(2), game(1)]);
        assert_eq!(batch.urls(), &[game(3), game(1), game(2)]);
    }

    #[test]
    fn caps_at_max_unique() {
        let batch = dedupe_and_limit((0..25).map(game));
        assert_eq!(batch.len(), MAX_BATCH_URLS);
        assert_eq!(batch.urls()[0], game(0));
        assert_eq!(batch.urls()[9], game(9));
    }

    #[test]
    fn repeats_do_not_count_towards_cap() {
        // 12 entries, only 3 distinct.
        let input: Vec<String> = (0..12).map(|i| game(i % 3)).collect();
        let batch = dedupe_and_limit(input);
        assert_eq!(batch.urls(), &[game(0), game(1), game(2)]);
    }

    #[test]
    fn cap_applies_after_dedup() {
        let mut input = vec![game(0); 15];
        input.extend((1..=12).map(game));
        let batch = dedupe_and_limit(input);
        assert_eq!(batch.len(), MAX_BATCH_URLS);
        assert_eq!(batch.urls()[0], game(0));
        assert_eq!(batch.urls()[9], game(9));
    }

    #[test]
    fn exact_string_equality() {
        let batch = dedupe_and_limit([game(1), format!("{} ", game(1))]);
        assert_eq!(batch.len(), 2);
    }

    #[test]
    fn idempotent_on_bounded_batch() {
        let input: Vec<String> = (0..30).map(|i| game(i % 14)).collect();
        let once = dedupe_and_limit(input);
        let twice = dedupe_and_limit(once.urls().to_vec());
        assert_eq!(once, twice);
    }

    #[test]
    fn serializes_as_webhook_payload() {
        let batch = dedupe_and_limit([game(123)]);
        let json = serde_json::to_value(&batch).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "urls": ["https://hub.quakeworld.nu/games/?gameId=123"] })
        );
    }
}
