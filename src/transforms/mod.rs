// src/transforms/mod.rs

//! Content transforms backing [`TransformStep`].
//!
//! Each transform is a pure function `FileData -> Result<FileData>`; the
//! pipeline executor decides what a failure means (log and drop the file).
//! The heavy lifting is delegated to the collaborator crates: `grass` for
//! SCSS, `lightningcss` for CSS targeting and minification, `minifier` for
//! JavaScript.

pub mod banner;
pub mod rename;
pub mod scripts;
pub mod styles;

use anyhow::Result;

use crate::pipeline::{FileData, TransformStep};

/// Apply one step to one file.
pub fn apply(step: &TransformStep, file: FileData) -> Result<FileData> {
    match step {
        TransformStep::CompileSass => styles::compile_sass(file),
        TransformStep::Autoprefix { compat } => styles::autoprefix(file, compat),
        TransformStep::MinifyCss { compat } => styles::minify_css(file, compat),
        TransformStep::MinifyJs => scripts::minify_js(file),
        TransformStep::Banner { text } => Ok(banner::prepend(file, text)),
        TransformStep::Rename { prefix, suffix } => {
            Ok(rename::apply(file, prefix.as_deref(), suffix.as_deref()))
        }
    }
}
