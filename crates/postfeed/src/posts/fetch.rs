use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use postfeed_core::posts::{PostRecord, BATCH_SIZE};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct FetchOptions {
    /// Number of posts to keep from the fetched list
    #[arg(short, long, env = "POSTFEED_LIMIT", default_value_t = BATCH_SIZE)]
    pub limit: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: FetchOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Fetching posts...");
    }

    let posts = fetch_posts_data(&global, options.limit).await?;

    if options.json {
        println!("{}", format_posts_json(&posts)?);
    } else {
        print!("{}", format_posts_text(&posts));
    }

    Ok(())
}

/// Run the pipeline once and return the transformed posts
pub async fn fetch_posts_data(global: &crate::Global, limit: usize) -> Result<Vec<PostRecord>> {
    let mut pipeline = super::build_pipeline(global, limit)?;
    let posts = pipeline.fetch_and_transform().await.map_err(Error::Fetch)?;
    log::info!("Fetched {} posts", posts.len());
    Ok(posts)
}

fn format_posts_json(posts: &[PostRecord]) -> Result<String> {
    serde_json::to_string_pretty(posts).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

fn format_posts_text(posts: &[PostRecord]) -> String {
    let mut result = String::new();

    result.push_str(&f!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&f!(
        "{}\n",
        f!("POSTS ({})", posts.len()).bright_cyan().bold()
    ));
    result.push_str(&f!("{}\n", "=".repeat(80).bright_cyan()));

    if posts.is_empty() {
        result.push_str(&f!("\n{}\n", "No posts returned.".yellow()));
    }

    for post in posts {
        result.push_str(&f!(
            "\n{} {}\n",
            f!("[{}]", post.id).yellow().bold(),
            post.title.white().bold()
        ));
        result.push_str(&f!("    {}\n", post.body.bright_black()));
        result.push_str(&f!(
            "    {}: {}\n",
            "Image".green(),
            post.image_url.cyan().underline()
        ));
    }

    result.push('\n');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use postfeed_core::posts::synthesize_image_url;

    fn create_test_post(id: i64, title: &str) -> PostRecord {
        PostRecord {
            id,
            title: title.to_string(),
            body: "Body text. txet ydoB (Updated)".to_string(),
            image_url: synthesize_image_url(id, 1_000),
        }
    }

    #[test]
    fn test_format_posts_json() {
        let posts = vec![create_test_post(1, "Test Post"), create_test_post(2, "Other")];

        let json = format_posts_json(&posts).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.as_array().unwrap().len(), 2);
        assert_eq!(parsed[0]["id"], 1);
        assert_eq!(parsed[0]["title"], "Test Post");
        assert_eq!(
            parsed[1]["imageUrl"],
            "https://picsum.photos/600/200?random=1002"
        );
    }

    #[test]
    fn test_format_posts_json_empty() {
        assert_eq!(format_posts_json(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_format_posts_text() {
        let posts = vec![create_test_post(7, "Test Post")];

        let formatted = format_posts_text(&posts);

        assert!(formatted.contains("POSTS (1)"));
        assert!(formatted.contains("[7]"));
        assert!(formatted.contains("Test Post"));
        assert!(formatted.contains("(Updated)"));
        assert!(formatted.contains("https://picsum.photos/600/200?random=1007"));
    }

    #[test]
    fn test_format_posts_text_empty() {
        let formatted = format_posts_text(&[]);
        assert!(formatted.contains("No posts returned."));
    }
}
