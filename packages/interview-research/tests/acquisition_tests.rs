//! Corpus budget and throttle behavior of content acquisition.

mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use common::{acquisition, results, usable_page};
use interview_research::acquisition::{MAX_URL_LEN, TRUNCATION_MARKER};
use interview_research::testing::{MockFetcher, MockSearcher};
use interview_research::{ContentAcquisition, SearchResult, Throttle};

fn long_url() -> String {
    format!("https://overlong.test/{}", "a".repeat(MAX_URL_LEN))
}

/// Ten pages of varying length plus one pathological URL up front.
fn corpus_fixture() -> (Vec<SearchResult>, MockFetcher) {
    let mut fetcher = MockFetcher::new().with_page(long_url(), usable_page("never fetched"));
    let mut hits = vec![SearchResult::new(long_url())];

    for i in 0..10 {
        let url = format!("https://site{}.test/page", i);
        fetcher = fetcher.with_page(url.clone(), "é".repeat(30 + i * 97));
        hits.push(SearchResult::new(url).with_title(format!("Page {}", i)));
    }
    (hits, fetcher)
}

#[tokio::test]
async fn test_output_never_exceeds_budget() {
    let (hits, fetcher) = corpus_fixture();
    let acq = acquisition(&MockSearcher::new(), &fetcher);

    for max_chars in [0, 1, 10, 57, 200, 999, 5_000, 100_000] {
        for max_urls in [0, 1, 3, 20] {
            let gathered = acq.gather_content(&hits, max_chars, max_urls).await;

            assert!(
                gathered.text.chars().count() <= max_chars + TRUNCATION_MARKER.len(),
                "max_chars={} max_urls={} got {} chars",
                max_chars,
                max_urls,
                gathered.text.chars().count()
            );
            assert!(gathered.fetched <= max_urls);
            assert!(gathered.sources.len() <= max_urls);
        }
    }

    assert!(!fetcher.calls().contains(&long_url()));
}

#[tokio::test]
async fn test_failed_fetches_count_toward_max_urls() {
    let fetcher = MockFetcher::new().with_page("https://ok.test", usable_page("ok"));
    let acq = acquisition(&MockSearcher::new(), &fetcher);

    let gathered = acq
        .gather_content(
            &results(&["https://gone1.test", "https://gone2.test", "https://ok.test"]),
            10_000,
            2,
        )
        .await;

    assert!(gathered.is_empty());
    assert_eq!(fetcher.calls(), vec!["https://gone1.test", "https://gone2.test"]);
}

#[tokio::test]
async fn test_blank_urls_are_not_processed() {
    let fetcher = MockFetcher::new().with_page("https://ok.test", usable_page("ok"));
    let acq = acquisition(&MockSearcher::new(), &fetcher);

    let gathered = acq
        .gather_content(&results(&["", "   ", "https://ok.test"]), 10_000, 1)
        .await;

    assert_eq!(gathered.sources, vec!["https://ok.test"]);
    assert_eq!(fetcher.calls(), vec!["https://ok.test"]);
}

#[tokio::test]
async fn test_title_header_included() {
    let fetcher = MockFetcher::new().with_page("https://ok.test", "body text");
    let acq = acquisition(&MockSearcher::new(), &fetcher);
    let hits = vec![SearchResult::new("https://ok.test").with_title("Careers at Acme")];

    let gathered = acq.gather_content(&hits, 10_000, 5).await;

    assert!(gathered
        .text
        .starts_with("## Source: https://ok.test\n### Careers at Acme\n"));
}

#[tokio::test]
async fn test_throttle_spaces_every_outbound_call() {
    let searcher = MockSearcher::new().with_urls("acme", &["https://a.test", "https://b.test"]);
    let fetcher = MockFetcher::new()
        .with_page("https://a.test", usable_page("a"))
        .with_page("https://b.test", usable_page("b"));
    let acq = ContentAcquisition::new(
        Arc::new(searcher),
        Arc::new(fetcher),
        Arc::new(Throttle::new(Duration::from_millis(40))),
    );

    let start = Instant::now();
    let hits = acq.search("acme", 5).await;
    acq.gather_content(&hits, 10_000, 5).await;

    // search + two fetches: two full intervals after the first call
    assert!(
        start.elapsed() >= Duration::from_millis(75),
        "elapsed {:?}",
        start.elapsed()
    );
}
