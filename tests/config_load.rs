use std::error::Error;
use std::path::PathBuf;

use siteforge::config::{ConfigFile, load_and_validate, load_or_default, validate_config};
use siteforge::tasks::{build_graph, build_watch_plans};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn missing_config_falls_back_to_defaults() -> TestResult {
    let temp = tempfile::tempdir()?;
    let cfg = load_or_default(temp.path().join("siteforge.toml"))?;

    assert_eq!(cfg.paths.source, PathBuf::from("src"));
    assert_eq!(cfg.paths.dist, PathBuf::from("dist"));
    for group in ["scripts", "packages", "styles", "markup", "images", "extras"] {
        assert!(cfg.paths.groups.contains_key(group), "missing group {group}");
    }
    assert_eq!(cfg.output.minify_prefix, "hes-");
    assert_eq!(cfg.output.minify_suffix, ".min");
    assert_eq!(cfg.serve.port, 3000);
    Ok(())
}

#[test]
fn toml_values_override_the_defaults() -> TestResult {
    let temp = tempfile::tempdir()?;
    let path = temp.path().join("siteforge.toml");
    std::fs::write(
        &path,
        r#"
[paths]
source = "web"
dist = "out"

[banner]
title = "Harbour"
version = "2.1.0"
author = "The Harbour Team"
copyright_start = 2017

[output]
css_compat = "chrome50"
minify_prefix = "hb-"

[serve]
port = 4040
"#,
    )?;

    let cfg = load_and_validate(&path)?;

    assert_eq!(cfg.paths.source, PathBuf::from("web"));
    assert_eq!(cfg.paths.dist, PathBuf::from("out"));
    // `[paths.groups]` was omitted, so the default groups still apply.
    assert!(cfg.paths.groups.contains_key("markup"));
    assert_eq!(cfg.banner.title, "Harbour");
    assert_eq!(cfg.banner.copyright_start, Some(2017));
    assert_eq!(cfg.output.css_compat, "chrome50");
    assert_eq!(cfg.output.minify_prefix, "hb-");
    // Unset keys keep their defaults.
    assert_eq!(cfg.output.minify_suffix, ".min");
    assert_eq!(cfg.serve.port, 4040);
    Ok(())
}

#[test]
fn overlapping_roots_are_rejected() -> TestResult {
    let mut cfg = ConfigFile::default();
    cfg.paths.dist = cfg.paths.source.clone();
    assert!(validate_config(&cfg).is_err());

    let mut cfg = ConfigFile::default();
    cfg.paths.source = PathBuf::from("dist/src");
    cfg.paths.dist = PathBuf::from("dist");
    assert!(validate_config(&cfg).is_err());
    Ok(())
}

#[test]
fn invalid_group_glob_is_rejected() -> TestResult {
    let temp = tempfile::tempdir()?;
    let path = temp.path().join("siteforge.toml");
    std::fs::write(
        &path,
        r#"
[paths.groups.scripts]
include = ["js/[oops"]
"#,
    )?;

    assert!(load_and_validate(&path).is_err());
    Ok(())
}

#[test]
fn unknown_compat_token_is_rejected() {
    let mut cfg = ConfigFile::default();
    cfg.output.css_compat = "netscape4".to_string();
    assert!(validate_config(&cfg).is_err());

    let mut cfg = ConfigFile::default();
    cfg.output.css_compat = "none".to_string();
    assert!(validate_config(&cfg).is_ok());
}

#[test]
fn builtin_graph_builds_from_defaults() -> TestResult {
    let cfg = ConfigFile::default();
    let graph = build_graph(&cfg)?;

    for task in [
        "clean",
        "copy",
        "scripts",
        "sass",
        "autoprefixme",
        "minify-css",
        "minify-js",
        "default",
    ] {
        assert!(graph.contains(task), "missing task {task}");
    }

    assert_eq!(
        graph.resolution_order("minify-css")?,
        vec!["sass", "autoprefixme", "minify-css"]
    );
    assert_eq!(
        graph.resolution_order("minify-js")?,
        vec!["clean", "scripts", "minify-js"]
    );
    Ok(())
}

#[test]
fn builtin_graph_rejects_a_config_missing_a_referenced_group() -> TestResult {
    let temp = tempfile::tempdir()?;
    let path = temp.path().join("siteforge.toml");
    // Declaring [paths.groups] replaces the defaults wholesale; the built-in
    // copy task still references the other groups.
    std::fs::write(
        &path,
        r#"
[paths.groups.scripts]
include = ["js/**/*.js"]
"#,
    )?;

    let cfg = load_and_validate(&path)?;
    assert!(build_graph(&cfg).is_err());
    Ok(())
}

#[test]
fn watch_plans_are_registered() {
    let plans = build_watch_plans(&ConfigFile::default());
    let names: Vec<&str> = plans.iter().map(|plan| plan.name.as_str()).collect();

    for expected in ["serve", "browser-sync", "watch-all", "sass:watch"] {
        assert!(names.contains(&expected), "missing watch plan {expected}");
    }

    let watch_all = plans.iter().find(|plan| plan.name == "watch-all").unwrap();
    assert!(watch_all.serve);
    assert_eq!(watch_all.init_tasks, vec!["minify-js", "minify-css"]);
}
