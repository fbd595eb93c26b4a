// src/pipeline/step.rs

/// A named content operation with its configuration.
///
/// Steps are stateless and pure per file: each receives one [`FileData`]
/// (contents plus relative path) and returns the transformed file, or an
/// error that drops the file from the stream. A step may change file content
/// or file name, but never the set of files in flight.
///
/// [`FileData`]: crate::pipeline::FileData
#[derive(Debug, Clone)]
pub enum TransformStep {
    /// Compile SCSS to CSS (renames `.scss` → `.css`).
    CompileSass,

    /// Add vendor prefixes for the configured compat targets.
    Autoprefix { compat: String },

    /// Minify CSS (prefixing for the compat targets happens in the same pass).
    MinifyCss { compat: String },

    /// Minify JavaScript.
    MinifyJs,

    /// Prepend a pre-rendered banner comment.
    Banner { text: String },

    /// Rewrite the file name with a stem prefix and/or pre-extension suffix.
    Rename {
        prefix: Option<String>,
        suffix: Option<String>,
    },
}
