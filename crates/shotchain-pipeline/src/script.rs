//! Prompt script loading for the CLI entry point.

use std::path::Path;

/// Load shot prompts from a text file, one per line.
///
/// Blank lines and `#` comment lines are skipped.
pub async fn load_prompts(path: impl AsRef<Path>) -> std::io::Result<Vec<String>> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}
