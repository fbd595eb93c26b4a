// src/transforms/banner.rs

use chrono::{Datelike, Utc};

use crate::config::model::BannerConfig;
use crate::pipeline::FileData;

/// Render the banner comment from the `[banner]` metadata.
pub fn render(meta: &BannerConfig) -> String {
    let year = Utc::now().year();
    let copyright = match meta.copyright_start {
        Some(start) if start < year => format!("{start}-{year}"),
        _ => year.to_string(),
    };

    format!(
        "/*!\n * {} v{} ({})\n * Copyright {} {}\n * Licensed under {} ({})\n */\n",
        meta.title,
        meta.version,
        meta.homepage,
        copyright,
        meta.author,
        meta.license,
        meta.license_url
    )
}

/// Prepend the rendered banner to the file contents.
pub fn prepend(file: FileData, text: &str) -> FileData {
    let FileData {
        rel_path,
        origin,
        contents,
    } = file;

    let mut combined = Vec::with_capacity(text.len() + contents.len());
    combined.extend_from_slice(text.as_bytes());
    combined.extend_from_slice(&contents);

    FileData {
        rel_path,
        origin,
        contents: combined,
    }
}
