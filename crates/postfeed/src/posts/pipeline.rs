use log::debug;
use postfeed_core::posts::{transform_batch, FetchError, PostRecord, BATCH_SIZE};
use rand::Rng;

use super::client::PostSource;

/// Source of the current time in milliseconds since the Unix epoch
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Fetch, truncate and transform posts
///
/// The source, clock and RNG are injected so tests can swap each of them.
#[derive(Debug)]
pub struct Pipeline<S, C, R> {
    source: S,
    clock: C,
    rng: R,
    batch_size: usize,
}

impl<S, C, R> Pipeline<S, C, R>
where
    S: PostSource,
    C: Clock,
    R: Rng + Send,
{
    pub fn new(source: S, clock: C, rng: R) -> Self {
        Self {
            source,
            clock,
            rng,
            batch_size: BATCH_SIZE,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Run one fetch and transform the first `batch_size` posts
    ///
    /// Source errors are returned as is, without retrying.
    pub async fn fetch_and_transform(&mut self) -> Result<Vec<PostRecord>, FetchError> {
        let raw = self.source.fetch_raw_posts().await?;
        debug!(
            "Fetched {} raw posts, keeping {}",
            raw.len(),
            raw.len().min(self.batch_size)
        );

        let clock = &self.clock;
        Ok(transform_batch(raw, self.batch_size, &mut self.rng, || {
            clock.now_millis()
        }))
    }
}
