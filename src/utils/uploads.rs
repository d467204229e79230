use std::path::Path;

use uuid::Uuid;

/// Keeps the last path component of a client supplied file name and replaces anything
/// outside `[A-Za-z0-9._-]` with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        String::from("upload")
    } else {
        cleaned.to_string()
    }
}

/// Writes `bytes` to `<root>/<category>/<uuid>_<name>` and returns the path relative to
/// `root`, always `/`-separated so it can be used as a URL suffix.
pub async fn store_upload(
    root: &Path,
    category: &str,
    file_name: &str,
    bytes: &[u8],
) -> std::io::Result<String> {
    let dir = root.join(category);
    tokio::fs::create_dir_all(&dir).await?;

    let stored_name = format!(
        "{}_{}",
        Uuid::new_v4().simple(),
        sanitize_file_name(file_name)
    );
    tokio::fs::write(dir.join(&stored_name), bytes).await?;

    tracing::debug!("stored upload {}/{}", category, stored_name);
    Ok(format!("{}/{}", category, stored_name))
}
