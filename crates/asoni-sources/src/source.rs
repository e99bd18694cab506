use asoni_types::SourceText;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Produces raw texts for the word extractor.
///
/// Individual pages or files that fail are logged and skipped; only what
/// was fetched successfully is returned. Cancelling stops the crawl early
/// and returns the texts collected so far.
#[async_trait]
pub trait TextSource: Send + Sync {
    fn name(&self) -> &str;

    async fn collect(&self, cancel: &CancellationToken) -> Vec<SourceText>;
}
