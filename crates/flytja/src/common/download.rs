//! Checkpoint file download utilities.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};

/// Get the default cache directory.
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .expect("No cache directory found")
        .join("flytja")
}

/// Local cache directory for one checkpoint.
pub fn model_cache_dir(cache_dir: &Path, model: &str) -> PathBuf {
    cache_dir.join(model.replace('/', "--"))
}

/// Resolve a file URL inside a hub checkpoint repository.
pub fn hub_url(model: &str, file: &str) -> String {
    format!("https://huggingface.co/{model}/resolve/main/{file}")
}

/// Download one file into `dir`, skipping the fetch if it already exists.
pub async fn download_file(dir: &Path, filename: &str, url: &str) -> Result<PathBuf> {
    let local_path = dir.join(filename);
    if local_path.exists() {
        return Ok(local_path);
    }
    if let Some(parent) = local_path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let client = reqwest::Client::new();
    let mut req = client.get(url);
    if let Ok(token) = std::env::var("HF_TOKEN") {
        req = req.header("Authorization", format!("Bearer {}", token));
    }

    let response = req.send().await?;
    if !response.status().is_success() {
        return Err(anyhow!(
            "Failed to download {}: HTTP {}",
            filename,
            response.status()
        ));
    }

    let bytes = response.bytes().await?;
    tokio::fs::write(&local_path, &bytes).await?;
    Ok(local_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_cache_dir_flattens_repo_ids() {
        let dir = model_cache_dir(Path::new("/tmp/cache"), "cointegrated/LaBSE-en-ru");
        assert_eq!(dir, PathBuf::from("/tmp/cache/cointegrated--LaBSE-en-ru"));
    }

    #[test]
    fn test_hub_url_layout() {
        assert_eq!(
            hub_url("cointegrated/LaBSE-en-ru", "config.json"),
            "https://huggingface.co/cointegrated/LaBSE-en-ru/resolve/main/config.json"
        );
    }

    #[tokio::test]
    async fn test_existing_file_is_not_refetched() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.json"), "{}").unwrap();

        // The URL is unreachable on purpose; an existing file short-circuits.
        let path = download_file(dir.path(), "config.json", "http://127.0.0.1:1/nope")
            .await
            .unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "{}");
    }
}
