//! Catalog download over HTTP

use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

/// Download a catalog and decode it as UTF-8 text.
pub fn fetch_catalog(url: &str) -> Result<String, Box<dyn std::error::Error>> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Downloading {}...", url));

    // Use tokio runtime for the async client
    let rt = tokio::runtime::Runtime::new()?;
    let bytes = rt.block_on(async {
        let response = reqwest::get(url).await?.error_for_status()?;
        let bytes = response.bytes().await?;
        Ok::<_, reqwest::Error>(bytes)
    });

    let bytes = match bytes {
        Ok(bytes) => bytes,
        Err(e) => {
            pb.finish_and_clear();
            return Err(format!("Failed to download {}: {}", url, e).into());
        }
    };

    pb.finish_with_message(format!("{} ({} bytes)", "Downloaded".green(), bytes.len()));
    log::debug!("Fetched {} bytes from {}", bytes.len(), url);

    Ok(gutindex::decode_bytes(&bytes)?)
}

/// Check that a string looks like an HTTP(S) URL.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_url() {
        assert!(is_url("http://gutenberg.readingroo.ms/GUTINDEX.2019"));
        assert!(is_url("https://www.gutenberg.org/dirs/GUTINDEX.2019"));
        assert!(!is_url("GUTINDEX.2019"));
        assert!(!is_url("ftp://example.org/GUTINDEX"));
    }
}
