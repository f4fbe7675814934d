use crate::prelude::{println, *};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub mod client;
pub mod fetch;
pub mod pipeline;
pub mod session;

pub use client::{HttpPostSource, PostSource};
pub use pipeline::{Clock, Pipeline, SystemClock};

// Re-export domain types from core
pub use postfeed_core::posts::{FetchError, PostRecord, RawPost, BATCH_SIZE};

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Pipeline wired to the real API, the system clock and an OS seeded RNG
pub type HttpPipeline = Pipeline<HttpPostSource, SystemClock, StdRng>;

#[derive(Debug, clap::Parser)]
#[command(name = "posts")]
#[command(about = "Fetch and browse posts")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Fetch one batch of transformed posts and print it
    #[clap(name = "fetch")]
    Fetch(fetch::FetchOptions),

    /// Browse posts interactively: fetch, show, delete
    #[clap(name = "session")]
    Session(session::SessionOptions),
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Posts API Base: {}", global.base_url);
        println!();
    }

    match app.command {
        Commands::Fetch(options) => fetch::run(options, global).await,
        Commands::Session(options) => session::run(options, global).await,
    }
}

/// Build the pipeline described by the global options
pub fn build_pipeline(global: &crate::Global, limit: usize) -> Result<HttpPipeline> {
    let source = HttpPostSource::new(&global.base_url)?;
    let rng = match global.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    Ok(Pipeline::new(source, SystemClock, rng).with_batch_size(limit))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_global(base_url: &str, seed: Option<u64>) -> crate::Global {
        crate::Global {
            base_url: base_url.to_string(),
            seed,
            verbose: false,
        }
    }

    #[test]
    fn test_build_pipeline_default_base_url() {
        let pipeline = build_pipeline(&create_global(DEFAULT_BASE_URL, None), BATCH_SIZE).unwrap();
        assert_eq!(
            pipeline.source().posts_url(),
            "https://jsonplaceholder.typicode.com/posts"
        );
        assert_eq!(pipeline.batch_size(), BATCH_SIZE);
    }

    #[test]
    fn test_build_pipeline_invalid_base_url() {
        let result = build_pipeline(&create_global("not a url", Some(1)), BATCH_SIZE);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid base URL"));
    }
}
