// src/transforms/scripts.rs

use anyhow::{Context, Result};

use crate::pipeline::FileData;

/// Minify a JavaScript file with `minifier`.
pub fn minify_js(file: FileData) -> Result<FileData> {
    let FileData {
        rel_path,
        origin,
        contents,
    } = file;

    let source = String::from_utf8(contents)
        .with_context(|| format!("{} is not valid UTF-8", origin.display()))?;
    let minified = minifier::js::minify(&source).to_string();

    Ok(FileData {
        rel_path,
        origin,
        contents: minified.into_bytes(),
    })
}
