//! Core library for postfeed
//!
//! This crate is the **Functional Core** of postfeed. It holds the post
//! models and every transformation applied to them, with zero I/O. The
//! `postfeed` binary crate is the Imperative Shell: it talks to the network,
//! reads the clock and the terminal, and calls into this crate.
//!
//! Randomness is always passed in as a [`rand::Rng`], so a seeded generator
//! makes every transformation reproducible in tests.
//!
//! # Module Organization
//!
//! - [`posts`]: Post models, fetch errors and the title/body/image transforms
//! - [`collection`]: The in-memory collection of transformed posts
//! - [`session`]: Command parsing and state for an interactive session
//!
//! # Example Usage
//!
//! ```rust
//! use postfeed_core::posts::{transform_batch, RawPost, BATCH_SIZE};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let raw = vec![RawPost {
//!     id: 1,
//!     title: "sunt aut facere".to_string(),
//!     body: "quia et suscipit. nostrum rerum".to_string(),
//! }];
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let posts = transform_batch(raw, BATCH_SIZE, &mut rng, || 1_700_000_000_000);
//!
//! assert_eq!(posts.len(), 1);
//! assert!(posts[0].body.ends_with(" (Updated)"));
//! assert_eq!(posts[0].image_url, "https://picsum.photos/600/200?random=1700000000001");
//! ```

pub mod collection;
pub mod posts;
pub mod session;
