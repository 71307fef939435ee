// Common test utilities
#![allow(dead_code)]

use std::sync::Arc;

use interview_research::testing::{MockFetcher, MockModel, MockSearcher};
use interview_research::{ContentAcquisition, Extractor, ResearchPipeline, SearchResult, Throttle};

/// Page text long enough to count as usable content.
pub fn usable_page(topic: &str) -> String {
    format!("{} is described on this page. ", topic).repeat(5)
}

pub fn results(urls: &[&str]) -> Vec<SearchResult> {
    urls.iter().map(|u| SearchResult::new(*u)).collect()
}

pub fn acquisition(searcher: &MockSearcher, fetcher: &MockFetcher) -> ContentAcquisition {
    ContentAcquisition::new(
        Arc::new(searcher.clone()),
        Arc::new(fetcher.clone()),
        Arc::new(Throttle::disabled()),
    )
}

/// Pipeline over mocks, no throttling.
pub fn pipeline(searcher: &MockSearcher, fetcher: &MockFetcher, model: &MockModel) -> ResearchPipeline {
    ResearchPipeline::new(
        acquisition(searcher, fetcher),
        Extractor::new(Arc::new(model.clone())),
    )
}
