// src/config/model.rs

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

/// Top-level configuration as read from `siteforge.toml`.
///
/// ```toml
/// [paths]
/// source = "src"
/// dist = "dist"
///
/// [banner]
/// title = "My Site"
/// version = "1.2.0"
///
/// [output]
/// minify_prefix = "hes-"
///
/// [serve]
/// port = 3000
/// ```
///
/// All sections are optional and have defaults mirroring the conventional
/// `src`/`dist` layout.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    /// Base directories and file groups from `[paths]`.
    #[serde(default)]
    pub paths: PathConfig,

    /// Banner metadata from `[banner]`, rendered into minified script output.
    #[serde(default)]
    pub banner: BannerConfig,

    /// Output naming and compat options from `[output]`.
    #[serde(default)]
    pub output: OutputConfig,

    /// Preview server options from `[serve]`.
    #[serde(default)]
    pub serve: ServeConfig,
}

/// `[paths]` section: base directories plus the named glob groups selecting
/// which files belong to each asset class.
///
/// Note that `[paths.groups]`, when present, *replaces* the default groups
/// rather than merging with them; a built-in task referencing a group the
/// config no longer declares is rejected when the task graph is built.
#[derive(Debug, Clone, Deserialize)]
pub struct PathConfig {
    /// Source root the site is authored under.
    #[serde(default = "default_source_root")]
    pub source: PathBuf,

    /// Distribution root the build writes to.
    #[serde(default = "default_dist_root")]
    pub dist: PathBuf,

    /// Named glob groups, matched relative to the source root.
    #[serde(default = "default_groups")]
    pub groups: BTreeMap<String, FileGroup>,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            source: default_source_root(),
            dist: default_dist_root(),
            groups: default_groups(),
        }
    }
}

/// A set of include/exclude glob patterns selecting zero or more files.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct FileGroup {
    #[serde(default)]
    pub include: Vec<String>,

    #[serde(default)]
    pub exclude: Vec<String>,
}

impl FileGroup {
    pub fn new<S: Into<String> + Clone>(include: &[S], exclude: &[S]) -> Self {
        Self {
            include: include.iter().cloned().map(Into::into).collect(),
            exclude: exclude.iter().cloned().map(Into::into).collect(),
        }
    }
}

/// `[banner]` section: metadata interpolated into the banner comment
/// prepended to minified script output.
#[derive(Debug, Clone, Deserialize)]
pub struct BannerConfig {
    #[serde(default = "default_banner_title")]
    pub title: String,

    #[serde(default = "default_banner_version")]
    pub version: String,

    #[serde(default)]
    pub homepage: String,

    #[serde(default)]
    pub author: String,

    #[serde(default = "default_license")]
    pub license: String,

    #[serde(default = "default_license_url")]
    pub license_url: String,

    /// First year of the copyright range; the range ends at the current year.
    #[serde(default)]
    pub copyright_start: Option<i32>,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            title: default_banner_title(),
            version: default_banner_version(),
            homepage: String::new(),
            author: String::new(),
            license: default_license(),
            license_url: default_license_url(),
            copyright_start: None,
        }
    }
}

/// `[output]` section: minified file naming and CSS compatibility target.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Browser-compat token for the CSS transforms, e.g. `"ie8"`,
    /// `"chrome50"`, or `"none"` to disable targeting.
    #[serde(default = "default_css_compat")]
    pub css_compat: String,

    /// Stem prefix applied by the `minify-js` rename step.
    #[serde(default = "default_minify_prefix")]
    pub minify_prefix: String,

    /// Pre-extension suffix applied by the minify rename steps.
    #[serde(default = "default_minify_suffix")]
    pub minify_suffix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            css_compat: default_css_compat(),
            minify_prefix: default_minify_prefix(),
            minify_suffix: default_minify_suffix(),
        }
    }
}

/// `[serve]` section: preview server bind address.
#[derive(Debug, Clone, Deserialize)]
pub struct ServeConfig {
    #[serde(default = "default_serve_host")]
    pub host: String,

    #[serde(default = "default_serve_port")]
    pub port: u16,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            host: default_serve_host(),
            port: default_serve_port(),
        }
    }
}

fn default_source_root() -> PathBuf {
    PathBuf::from("src")
}

fn default_dist_root() -> PathBuf {
    PathBuf::from("dist")
}

/// Default asset-class groups for the conventional site layout.
fn default_groups() -> BTreeMap<String, FileGroup> {
    let mut groups = BTreeMap::new();

    groups.insert(
        "scripts".to_string(),
        FileGroup::new(&["js/**/*.js"], &["js/libs/**/*.js"]),
    );
    groups.insert(
        "packages".to_string(),
        FileGroup::new(&["packages/**/*.js", "packages/**/*.css"], &[]),
    );
    groups.insert(
        "styles".to_string(),
        FileGroup::new(
            &[
                "css/**/*.css",
                "css/images/**/*.jpg",
                "css/images/**/*.png",
                "css/images/**/*.svg",
                "css/images/**/*.gif",
                "css/vendor/**",
                "css/web-fonts/**",
            ],
            &[],
        ),
    );
    groups.insert("markup".to_string(), FileGroup::new(&["*.html"], &[]));
    groups.insert(
        "images".to_string(),
        FileGroup::new(
            &[
                "images/**/*.png",
                "images/**/*.jpg",
                "images/**/*.svg",
                "images/**/*.gif",
            ],
            &[],
        ),
    );
    groups.insert(
        "extras".to_string(),
        FileGroup::new(
            &["crossdomain.xml", "humans.txt", "robots.txt", "favicon.ico"],
            &[],
        ),
    );

    groups
}

fn default_banner_title() -> String {
    "Untitled site".to_string()
}

fn default_banner_version() -> String {
    "0.0.0".to_string()
}

fn default_license() -> String {
    "MIT".to_string()
}

fn default_license_url() -> String {
    "https://opensource.org/licenses/MIT".to_string()
}

fn default_css_compat() -> String {
    "ie8".to_string()
}

fn default_minify_prefix() -> String {
    "hes-".to_string()
}

fn default_minify_suffix() -> String {
    ".min".to_string()
}

fn default_serve_host() -> String {
    "127.0.0.1".to_string()
}

fn default_serve_port() -> u16 {
    3000
}
