use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of records kept from each fetch.
pub const BATCH_SIZE: usize = 5;

/// Prefix of every synthesized image URL. The seed is appended as the
/// `random` query value.
pub const IMAGE_URL_BASE: &str = "https://picsum.photos/600/200?random=";

const SENTENCE_DELIMITER: &str = ". ";
const UPDATED_SUFFIX: &str = " (Updated)";

/// Post as returned by the `/posts` endpoint
///
/// Only the fields the pipeline needs are decoded. Anything else the API
/// sends (including an `imageUrl`) is dropped here.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct RawPost {
    pub id: i64,
    pub title: String,
    pub body: String,
}

/// Post after transformation, ready to be shown
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PostRecord {
    pub id: i64,
    pub title: String,
    pub body: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

/// Failure to obtain the raw post list
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchError {
    /// No usable response: DNS, connect, timeout or an undecodable body.
    #[error("Failed to fetch posts: {0}")]
    Network(String),

    /// A response arrived with a non-success status.
    #[error("Failed to fetch posts: {0}")]
    Http(String),
}

impl FetchError {
    /// The message without the "Failed to fetch posts" prefix
    pub fn message(&self) -> &str {
        match self {
            FetchError::Network(msg) | FetchError::Http(msg) => msg,
        }
    }
}

/// Shuffle the space separated words of a title
///
/// The words are split on single spaces, so runs of spaces produce empty
/// words that are shuffled along with the rest. The word multiset never
/// changes.
pub fn shuffle_title<R: Rng + ?Sized>(text: &str, rng: &mut R) -> String {
    let mut words: Vec<&str> = text.split(' ').collect();
    words.shuffle(rng);
    words.join(" ")
}

/// Reverse one random sentence of a body and mark it as updated
///
/// Sentences are split on `". "`. With a single sentence nothing is
/// reversed. The `" (Updated)"` suffix is always appended.
pub fn mutate_body<R: Rng + ?Sized>(text: &str, rng: &mut R) -> String {
    let mut sentences: Vec<String> = text
        .split(SENTENCE_DELIMITER)
        .map(String::from)
        .collect();

    if sentences.len() > 1 {
        let index = rng.gen_range(0..sentences.len());
        sentences[index] = sentences[index].chars().rev().collect();
    }

    format!("{}{UPDATED_SUFFIX}", sentences.join(SENTENCE_DELIMITER))
}

/// Build a cache-busting image URL for a post
///
/// `now_millis` is milliseconds since the Unix epoch, read once per post.
pub fn synthesize_image_url(post_id: i64, now_millis: i64) -> String {
    format!("{IMAGE_URL_BASE}{}", now_millis.wrapping_add(post_id))
}

/// Keep the first `limit` posts in their original order
pub fn take_batch(raw: Vec<RawPost>, limit: usize) -> Vec<RawPost> {
    raw.into_iter().take(limit).collect()
}

/// Transform a single raw post
pub fn transform_post<R: Rng + ?Sized>(
    raw: &RawPost,
    now_millis: i64,
    rng: &mut R,
) -> PostRecord {
    PostRecord {
        id: raw.id,
        title: shuffle_title(&raw.title, rng),
        body: mutate_body(&raw.body, rng),
        image_url: synthesize_image_url(raw.id, now_millis),
    }
}

/// Truncate to `limit` and transform every remaining post in order
///
/// `now_millis` is called once per post so each record gets its own
/// timestamp.
pub fn transform_batch<R, F>(
    raw: Vec<RawPost>,
    limit: usize,
    rng: &mut R,
    mut now_millis: F,
) -> Vec<PostRecord>
where
    R: Rng + ?Sized,
    F: FnMut() -> i64,
{
    take_batch(raw, limit)
        .iter()
        .map(|post| transform_post(post, now_millis(), &mut *rng))
        .collect()
}
