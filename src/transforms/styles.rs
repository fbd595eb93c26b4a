// src/transforms/styles.rs

//! Stylesheet transforms: SCSS compilation (`grass`) and CSS targeting /
//! minification (`lightningcss`).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};
use lightningcss::targets::{Browsers, Targets};

use crate::pipeline::FileData;

/// Compile an SCSS file to CSS. The relative path's extension is rewritten
/// to `.css`; `@import`s resolve next to the source file.
pub fn compile_sass(file: FileData) -> Result<FileData> {
    let FileData {
        mut rel_path,
        origin,
        contents,
    } = file;

    let source = String::from_utf8(contents)
        .with_context(|| format!("{} is not valid UTF-8", origin.display()))?;

    let load_dir = origin
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let options = grass::Options::default()
        .style(grass::OutputStyle::Expanded)
        .load_path(load_dir);

    let css = grass::from_string(source, &options)
        .map_err(|err| anyhow!("compiling {}: {err}", origin.display()))?;

    rel_path.set_extension("css");
    Ok(FileData {
        rel_path,
        origin,
        contents: css.into_bytes(),
    })
}

/// Add vendor prefixes for the compat targets, keeping readable output.
pub fn autoprefix(file: FileData, compat: &str) -> Result<FileData> {
    css_transform(file, compat, false)
}

/// Minify CSS; prefixing for the compat targets happens in the same pass.
pub fn minify_css(file: FileData, compat: &str) -> Result<FileData> {
    css_transform(file, compat, true)
}

fn css_transform(file: FileData, compat: &str, minify_output: bool) -> Result<FileData> {
    let FileData {
        rel_path,
        origin,
        contents,
    } = file;

    let browsers = parse_compat(compat)?;
    let source = String::from_utf8(contents)
        .with_context(|| format!("{} is not valid UTF-8", origin.display()))?;

    let mut sheet = StyleSheet::parse(
        &source,
        ParserOptions {
            filename: origin.display().to_string(),
            ..ParserOptions::default()
        },
    )
    .map_err(|err| anyhow!("{}", describe_css_error(&err)))?;

    sheet
        .minify(MinifyOptions {
            targets: targets_for(browsers),
            ..MinifyOptions::default()
        })
        .map_err(|err| anyhow!("{}", describe_css_error(&err)))?;

    let output = sheet
        .to_css(PrinterOptions {
            minify: minify_output,
            targets: targets_for(browsers),
            ..PrinterOptions::default()
        })
        .map_err(|err| anyhow!("{}", describe_css_error(&err)))?;

    Ok(FileData {
        rel_path,
        origin,
        contents: output.code.into_bytes(),
    })
}

fn targets_for(browsers: Option<Browsers>) -> Targets {
    Targets {
        browsers,
        ..Targets::default()
    }
}

/// Parse a compat token like `"ie8"`, `"chrome50"` or `"safari 11"` into
/// browser targets. `"none"` (or empty) disables targeting; only major
/// versions are supported.
pub fn parse_compat(token: &str) -> Result<Option<Browsers>> {
    let token = token.trim().to_lowercase();
    if token.is_empty() || token == "none" {
        return Ok(None);
    }

    let split = token
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(|| anyhow!("compat token '{token}' has no version number (expected e.g. \"ie8\")"))?;
    let (name, version) = token.split_at(split);
    let major: u32 = version
        .trim()
        .parse()
        .with_context(|| format!("invalid version '{version}' in compat token '{token}'"))?;

    // lightningcss encodes versions as major << 16 | minor << 8 | patch.
    let encoded = major << 16;

    let mut browsers = Browsers::default();
    match name.trim() {
        "ie" => browsers.ie = Some(encoded),
        "edge" => browsers.edge = Some(encoded),
        "chrome" => browsers.chrome = Some(encoded),
        "firefox" => browsers.firefox = Some(encoded),
        "safari" => browsers.safari = Some(encoded),
        "opera" => browsers.opera = Some(encoded),
        "android" => browsers.android = Some(encoded),
        "ios" => browsers.ios_saf = Some(encoded),
        other => return Err(anyhow!("unsupported browser '{other}' in compat token")),
    }
    Ok(Some(browsers))
}

fn describe_css_error<T: std::fmt::Display>(err: &lightningcss::error::Error<T>) -> String {
    match &err.loc {
        Some(loc) => format!(
            "{}:{}:{}: {}",
            loc.filename,
            loc.line + 1,
            loc.column,
            err.kind
        ),
        None => err.kind.to_string(),
    }
}
