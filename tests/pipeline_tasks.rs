use std::error::Error;
use std::fs;
use std::path::Path;

use siteforge::config::ConfigFile;
use siteforge::tasks::{Runner, build_graph};
use siteforge::transforms::banner;

type TestResult = Result<(), Box<dyn Error>>;

fn write(root: &Path, rel: &str, contents: &str) -> TestResult {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(())
}

fn read(root: &Path, rel: &str) -> Result<String, Box<dyn Error>> {
    Ok(fs::read_to_string(root.join(rel))?)
}

#[test]
fn clean_empties_a_populated_dist_and_ignores_a_missing_one() -> TestResult {
    let temp = tempfile::tempdir()?;
    let root = temp.path();
    write(root, "dist/css/app.css", "body{}")?;
    write(root, "dist/index.html", "<html></html>")?;

    let cfg = ConfigFile::default();
    let graph = build_graph(&cfg)?;
    let runner = Runner::new(&graph, root, cfg.paths.clone());

    runner.run("clean")?;
    assert!(!root.join("dist").exists());

    // Absent dist is a no-op, not an error.
    runner.run("clean")?;
    assert!(!root.join("dist").exists());
    Ok(())
}

#[test]
fn zero_match_pipeline_succeeds_with_no_output() -> TestResult {
    let temp = tempfile::tempdir()?;
    let root = temp.path();
    fs::create_dir_all(root.join("src"))?;

    let cfg = ConfigFile::default();
    let graph = build_graph(&cfg)?;
    let runner = Runner::new(&graph, root, cfg.paths.clone());

    let report = runner.run("scripts")?;
    assert_eq!(report.files_written, 0);
    assert!(!root.join("dist/js").exists());
    Ok(())
}

#[test]
fn copy_mirrors_assets_into_dist() -> TestResult {
    let temp = tempfile::tempdir()?;
    let root = temp.path();
    write(root, "src/index.html", "<html><body>hi</body></html>")?;
    write(root, "src/css/app.css", "body { color: blue; }")?;
    write(root, "src/packages/widget/widget.js", "var w = 1;")?;
    write(root, "src/robots.txt", "User-agent: *\n")?;
    write(root, "src/images/logo.svg", "<svg></svg>")?;

    let cfg = ConfigFile::default();
    let graph = build_graph(&cfg)?;
    let runner = Runner::new(&graph, root, cfg.paths.clone());

    let report = runner.run("copy")?;
    assert_eq!(report.executed, vec!["clean", "copy"]);

    assert_eq!(read(root, "dist/index.html")?, "<html><body>hi</body></html>");
    assert_eq!(read(root, "dist/css/app.css")?, "body { color: blue; }");
    assert_eq!(read(root, "dist/packages/widget/widget.js")?, "var w = 1;");
    assert_eq!(read(root, "dist/robots.txt")?, "User-agent: *\n");
    assert_eq!(read(root, "dist/images/logo.svg")?, "<svg></svg>");
    Ok(())
}

#[test]
fn excluded_library_scripts_are_not_minified() -> TestResult {
    let temp = tempfile::tempdir()?;
    let root = temp.path();
    write(root, "src/js/app.js", "var a = 1;")?;
    write(root, "src/js/libs/vendor.js", "var v = 2;")?;

    let cfg = ConfigFile::default();
    let graph = build_graph(&cfg)?;
    let runner = Runner::new(&graph, root, cfg.paths.clone());

    runner.run("scripts")?;
    assert!(root.join("dist/js/app.js").exists());
    assert!(!root.join("dist/js/libs/vendor.js").exists());
    Ok(())
}

#[test]
fn sass_compiles_the_valid_file_and_skips_the_broken_one() -> TestResult {
    let temp = tempfile::tempdir()?;
    let root = temp.path();
    write(
        root,
        "src/scss/site.scss",
        "$accent: #336699;\nbody {\n  color: $accent;\n}\n",
    )?;
    write(root, "src/scss/broken.scss", "body {\n  color: \n")?;

    let cfg = ConfigFile::default();
    let graph = build_graph(&cfg)?;
    let runner = Runner::new(&graph, root, cfg.paths.clone());

    let report = runner.run("sass")?;

    let compiled = read(root, "src/css/site.css")?;
    assert!(compiled.contains("color: #336699"));
    assert!(!root.join("src/css/broken.css").exists());
    assert_eq!(report.files_failed, 1);
    Ok(())
}

#[test]
fn sass_partials_are_importable_but_not_emitted() -> TestResult {
    let temp = tempfile::tempdir()?;
    let root = temp.path();
    write(root, "src/scss/_colors.scss", "$accent: #112233;\n")?;
    write(
        root,
        "src/scss/site.scss",
        "@import \"colors\";\nbody {\n  color: $accent;\n}\n",
    )?;

    let cfg = ConfigFile::default();
    let graph = build_graph(&cfg)?;
    let runner = Runner::new(&graph, root, cfg.paths.clone());

    runner.run("sass")?;
    assert!(read(root, "src/css/site.css")?.contains("#112233"));
    assert!(!root.join("src/css/_colors.css").exists());
    Ok(())
}

#[test]
fn minify_css_renames_and_shrinks() -> TestResult {
    let temp = tempfile::tempdir()?;
    let root = temp.path();
    let source = "body {\n  margin: 0px;\n  color: #ff0000;\n}\n";
    write(root, "src/css/app.css", source)?;

    let cfg = ConfigFile::default();
    let graph = build_graph(&cfg)?;
    let runner = Runner::new(&graph, root, cfg.paths.clone());

    let report = runner.run("minify-css")?;
    // The chain runs sass (no-op here) and autoprefixme first.
    assert_eq!(report.executed, vec!["sass", "autoprefixme", "minify-css"]);

    // autoprefixme keeps a readable copy in dist.
    assert!(root.join("dist/css/app.css").exists());

    let minified = read(root, "dist/css/app.min.css")?;
    assert!(!minified.contains('\n'));
    assert!(minified.len() < source.len());
    Ok(())
}

#[test]
fn minify_js_applies_banner_prefix_and_suffix() -> TestResult {
    let temp = tempfile::tempdir()?;
    let root = temp.path();
    write(
        root,
        "src/js/app.js",
        "function add(first, second) {\n  return first + second;\n}\n",
    )?;

    let cfg = ConfigFile::default();
    let graph = build_graph(&cfg)?;
    let runner = Runner::new(&graph, root, cfg.paths.clone());

    let report = runner.run("minify-js")?;
    assert_eq!(report.executed, vec!["clean", "scripts", "minify-js"]);

    let output = read(root, "dist/js/hes-app.min.js")?;
    let banner_text = banner::render(&cfg.banner);
    assert!(output.starts_with(&banner_text));
    assert!(output.len() > banner_text.len());

    // The un-renamed scripts output is still there.
    assert!(root.join("dist/js/app.js").exists());
    Ok(())
}

#[test]
fn rerunning_minify_js_does_not_chew_its_own_output() -> TestResult {
    let temp = tempfile::tempdir()?;
    let root = temp.path();
    write(root, "src/js/app.js", "var answer = 42;\n")?;

    let cfg = ConfigFile::default();
    let graph = build_graph(&cfg)?;
    let runner = Runner::new(&graph, root, cfg.paths.clone());

    runner.run("minify-js")?;
    runner.run("minify-js")?;

    assert!(root.join("dist/js/hes-app.min.js").exists());
    assert!(!root.join("dist/js/hes-hes-app.min.min.js").exists());
    Ok(())
}

#[test]
fn default_builds_a_clean_copy() -> TestResult {
    let temp = tempfile::tempdir()?;
    let root = temp.path();
    write(root, "src/index.html", "<html></html>")?;
    // Stale output that clean must remove.
    write(root, "dist/old.html", "<html>old</html>")?;

    let cfg = ConfigFile::default();
    let graph = build_graph(&cfg)?;
    let runner = Runner::new(&graph, root, cfg.paths.clone());

    runner.run("default")?;

    assert!(root.join("dist/index.html").exists());
    assert!(!root.join("dist/old.html").exists());
    Ok(())
}
