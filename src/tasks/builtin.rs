// src/tasks/builtin.rs

//! The built-in site-build registry: the fixed task graph and watch plans,
//! constructed from a loaded configuration.

use crate::config::model::ConfigFile;
use crate::errors::GraphError;
use crate::pipeline::{FileSelection, Pipeline, TransformStep};
use crate::tasks::graph::TaskGraph;
use crate::transforms::banner;
use crate::watch::{WatchAction, WatchPlan, WatchRule};

/// Build the task graph.
///
/// Dependency chains: `clean` → `copy`/`scripts` → `minify-js`, and
/// `sass` → `autoprefixme` → `minify-css`. Prerequisites are the only
/// ordering mechanism; no task assumes another already ran.
pub fn build_graph(cfg: &ConfigFile) -> Result<TaskGraph, GraphError> {
    let src = &cfg.paths.source;
    let dist = &cfg.paths.dist;

    let banner_text = banner::render(&cfg.banner);
    let compat = cfg.output.css_compat.clone();
    let prefix = cfg.output.minify_prefix.clone();
    let suffix = cfg.output.minify_suffix.clone();

    // `copy` mirrors each asset class into dist verbatim.
    let copy_pipelines: Vec<Pipeline> = ["markup", "styles", "packages", "extras", "images"]
        .into_iter()
        .map(|group| Pipeline::transform(FileSelection::group(src, group), None, vec![], dist))
        .collect();

    TaskGraph::builder()
        .task("clean", &[], vec![Pipeline::Clean { dir: dist.clone() }])
        .task("copy", &["clean"], copy_pipelines)
        .task(
            "scripts",
            &["clean"],
            vec![Pipeline::transform(
                FileSelection::group(src, "scripts"),
                None,
                vec![TransformStep::MinifyJs],
                dist,
            )],
        )
        .task(
            "sass",
            &[],
            vec![Pipeline::transform(
                FileSelection::patterns(src, &["scss/**/*.scss"], &["scss/**/_*.scss"]),
                Some("scss"),
                vec![TransformStep::CompileSass],
                src.join("css"),
            )],
        )
        .task(
            "autoprefixme",
            &["sass"],
            vec![Pipeline::transform(
                FileSelection::patterns(src, &["css/*.css"], &[]),
                Some("css"),
                vec![TransformStep::Autoprefix {
                    compat: compat.clone(),
                }],
                dist.join("css"),
            )],
        )
        .task(
            "minify-css",
            &["autoprefixme"],
            vec![Pipeline::transform(
                FileSelection::patterns(src, &["css/*.css"], &[]),
                Some("css"),
                vec![
                    TransformStep::MinifyCss { compat },
                    TransformStep::Rename {
                        prefix: None,
                        suffix: Some(suffix.clone()),
                    },
                ],
                dist.join("css"),
            )],
        )
        .task(
            "minify-js",
            &["scripts"],
            vec![Pipeline::transform(
                // The exclude keeps already-renamed output out of a re-run.
                FileSelection::patterns(dist, &["js/*.js"], &["js/*.min.js"]),
                Some("js"),
                vec![
                    TransformStep::MinifyJs,
                    TransformStep::Banner { text: banner_text },
                    TransformStep::Rename {
                        prefix: Some(prefix),
                        suffix: Some(suffix),
                    },
                ],
                dist.join("js"),
            )],
        )
        .task("default", &["clean", "copy"], vec![])
        .build(&cfg.paths)
}

/// Build the long-running watch plans.
///
/// All patterns are matched relative to the source root, which is also what
/// the preview server serves.
pub fn build_watch_plans(_cfg: &ConfigFile) -> Vec<WatchPlan> {
    let reload_sources = ["*.html", "css/**/*.css", "js/**/*.js"];

    vec![
        WatchPlan {
            name: "serve".to_string(),
            serve: true,
            init_tasks: vec![],
            rules: vec![WatchRule::new(&reload_sources, WatchAction::Reload)],
        },
        WatchPlan {
            name: "browser-sync".to_string(),
            serve: true,
            init_tasks: vec![],
            rules: vec![],
        },
        WatchPlan {
            name: "sass:watch".to_string(),
            serve: false,
            init_tasks: vec![],
            rules: vec![WatchRule::new(
                &["scss/**/*.scss"],
                WatchAction::run("sass", false),
            )],
        },
        WatchPlan {
            name: "watch-all".to_string(),
            serve: true,
            // `clean` runs inside the minify-js chain, so scripts build
            // before the stylesheet outputs land in dist.
            init_tasks: vec!["minify-js".to_string(), "minify-css".to_string()],
            rules: vec![
                WatchRule::new(&["scss/**/*.scss"], WatchAction::run("sass", false)),
                WatchRule::new(&["css/**/*.css"], WatchAction::run("minify-css", true)),
                WatchRule::new(&["js/**/*.js"], WatchAction::run("minify-js", true)),
                WatchRule::new(&["*.html"], WatchAction::Reload),
            ],
        },
    ]
}
