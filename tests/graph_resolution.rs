use std::error::Error;
use std::path::PathBuf;

use siteforge::config::PathConfig;
use siteforge::errors::{GraphError, TaskError};
use siteforge::pipeline::{FileSelection, Pipeline};
use siteforge::tasks::{Runner, TaskGraph};

type TestResult = Result<(), Box<dyn Error>>;

fn runner_root() -> PathBuf {
    // Tasks without pipelines never touch the filesystem.
    std::env::temp_dir()
}

#[test]
fn prerequisites_run_in_listed_order_before_task() -> TestResult {
    let graph = TaskGraph::builder()
        .task("a", &[], vec![])
        .task("b", &["a"], vec![])
        .task("c", &["b"], vec![])
        .build(&PathConfig::default())?;

    let runner = Runner::new(&graph, runner_root(), PathConfig::default());
    let report = runner.run("c")?;

    assert_eq!(report.executed, vec!["a", "b", "c"]);
    Ok(())
}

#[test]
fn listed_order_of_multiple_prerequisites_is_kept() -> TestResult {
    let graph = TaskGraph::builder()
        .task("clean", &[], vec![])
        .task("copy", &["clean"], vec![])
        .task("default", &["clean", "copy"], vec![])
        .build(&PathConfig::default())?;

    let runner = Runner::new(&graph, runner_root(), PathConfig::default());
    let report = runner.run("default")?;

    // No memoization: `clean` is reached twice, once directly and once
    // through `copy`.
    assert_eq!(report.executed, vec!["clean", "clean", "copy", "default"]);
    Ok(())
}

#[test]
fn shared_prerequisite_runs_once_per_path_that_reaches_it() -> TestResult {
    let graph = TaskGraph::builder()
        .task("a", &[], vec![])
        .task("x", &["a"], vec![])
        .task("y", &["a"], vec![])
        .task("z", &["x", "y"], vec![])
        .build(&PathConfig::default())?;

    let runner = Runner::new(&graph, runner_root(), PathConfig::default());
    let report = runner.run("z")?;

    assert_eq!(report.executed, vec!["a", "x", "a", "y", "z"]);
    Ok(())
}

#[test]
fn mutual_dependency_is_rejected_at_build_time() {
    let result = TaskGraph::builder()
        .task("a", &["b"], vec![])
        .task("b", &["a"], vec![])
        .build(&PathConfig::default());

    assert!(matches!(result, Err(GraphError::Cycle(_))));
}

#[test]
fn longer_cycle_is_rejected_at_build_time() {
    let result = TaskGraph::builder()
        .task("a", &["c"], vec![])
        .task("b", &["a"], vec![])
        .task("c", &["b"], vec![])
        .build(&PathConfig::default());

    assert!(matches!(result, Err(GraphError::Cycle(_))));
}

#[test]
fn self_dependency_is_rejected() {
    let result = TaskGraph::builder()
        .task("a", &["a"], vec![])
        .build(&PathConfig::default());

    assert!(matches!(result, Err(GraphError::SelfDependency { .. })));
}

#[test]
fn unknown_prerequisite_is_rejected() {
    let result = TaskGraph::builder()
        .task("a", &["missing"], vec![])
        .build(&PathConfig::default());

    match result {
        Err(GraphError::UnknownPrerequisite { task, prerequisite }) => {
            assert_eq!(task, "a");
            assert_eq!(prerequisite, "missing");
        }
        other => panic!("expected UnknownPrerequisite, got {other:?}"),
    }
}

#[test]
fn duplicate_task_name_is_rejected() {
    let result = TaskGraph::builder()
        .task("a", &[], vec![])
        .task("a", &[], vec![])
        .build(&PathConfig::default());

    assert!(matches!(result, Err(GraphError::DuplicateTask(name)) if name == "a"));
}

#[test]
fn undeclared_group_reference_is_rejected() {
    let pipeline = Pipeline::transform(FileSelection::group("src", "never-declared"), None, vec![], "dist");
    let result = TaskGraph::builder()
        .task("a", &[], vec![pipeline])
        .build(&PathConfig::default());

    match result {
        Err(GraphError::UnknownGroup { task, group }) => {
            assert_eq!(task, "a");
            assert_eq!(group, "never-declared");
        }
        other => panic!("expected UnknownGroup, got {other:?}"),
    }
}

#[test]
fn invalid_glob_pattern_is_rejected() {
    let pipeline = Pipeline::transform(
        FileSelection::patterns("src", &["css/[oops"], &[]),
        None,
        vec![],
        "dist",
    );
    let result = TaskGraph::builder()
        .task("a", &[], vec![pipeline])
        .build(&PathConfig::default());

    assert!(matches!(result, Err(GraphError::BadPattern { .. })));
}

#[test]
fn running_an_unknown_task_errors() -> TestResult {
    let graph = TaskGraph::builder()
        .task("a", &[], vec![])
        .build(&PathConfig::default())?;

    let runner = Runner::new(&graph, runner_root(), PathConfig::default());
    let result = runner.run("nope");

    assert!(matches!(result, Err(TaskError::UnknownTask(name)) if name == "nope"));
    Ok(())
}

#[test]
fn prerequisite_failure_aborts_the_dependent() -> TestResult {
    let temp = tempfile::tempdir()?;
    // `Clean` on a regular file fails, which makes a handy failing pipeline.
    std::fs::write(temp.path().join("not-a-dir"), b"x")?;

    let graph = TaskGraph::builder()
        .task(
            "bad",
            &[],
            vec![Pipeline::Clean {
                dir: PathBuf::from("not-a-dir"),
            }],
        )
        .task("dependent", &["bad"], vec![])
        .build(&PathConfig::default())?;

    let runner = Runner::new(&graph, temp.path(), PathConfig::default());
    let result = runner.run("dependent");

    match result {
        Err(TaskError::Failed { task, .. }) => assert_eq!(task, "bad"),
        other => panic!("expected the prerequisite failure to propagate, got {other:?}"),
    }
    Ok(())
}
