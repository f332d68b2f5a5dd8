//! End-to-end pipeline tests over synthetic legacy projects

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tempfile::TempDir;

use relic_core::{
    AccessChannel, AnalysisSession, CrudOperation, ErrorKind, ProjectRunner, ReferenceCatalog,
    RunnerConfig, ERROR_SINK_NAME,
};

fn write(root: &Path, name: &str, content: &str) {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn test_full_project_run() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write(root, "db.php", "<?php\nfunction db_connect($dsn) { return $dsn; }\n");
    write(
        root,
        "index.php",
        "<?php\nrequire 'db.php';\nif ($mode == 1) { $query = 'SELECT * FROM orders JOIN customers ON orders.cid = customers.id'; } else { $query = 'DELETE FROM logs'; }\n",
    );
    write(root, "app.js", "function load() { fetch('/api/items'); }\n");
    write(
        root,
        "page.html",
        "<html><a href=\"https://example.com/x\">x</a><form action=\"https://example.com/submit\"></form></html>",
    );

    let session = AnalysisSession::with_error_sink(root);
    let runner = ProjectRunner::new(RunnerConfig::new(root));
    let report = runner.run(&session);

    assert_eq!(report.stats.files_analyzed, 4);
    assert_eq!(report.stats.failures, 0);
    assert!(report.errors.is_empty());

    let index = report
        .results
        .iter()
        .find(|r| r.file.ends_with("index.php"))
        .unwrap();
    assert!(index.dependencies.iter().any(|d| d.ends_with("db.php")));
    assert_eq!(index.variants.len(), 2);
    assert_eq!(index.variants[0].conditions, vec!["$mode == 1"]);
    assert_eq!(index.variants[0].query.tables, vec!["orders", "customers"]);
    assert_eq!(index.variants[1].conditions, vec!["else"]);
    assert!(index
        .crud
        .iter()
        .any(|c| c.table == "orders" && c.operation == CrudOperation::Select));
    assert!(index
        .crud
        .iter()
        .any(|c| c.table == "logs" && c.operation == CrudOperation::Delete));

    let js = report
        .results
        .iter()
        .find(|r| r.file.ends_with("app.js"))
        .unwrap();
    assert!(js
        .external
        .iter()
        .any(|e| e.channel == AccessChannel::ApiCall && e.target == "/api/items"));
    assert!(js.functions.iter().any(|f| f.name == "load"));

    let html = report
        .results
        .iter()
        .find(|r| r.file.ends_with("page.html"))
        .unwrap();
    assert!(html
        .external
        .iter()
        .any(|e| e.channel == AccessChannel::ExternalLink));
    assert!(html
        .external
        .iter()
        .any(|e| e.channel == AccessChannel::FormSubmission));
    assert!(!html.markup.is_empty());

    // project-level shapes
    assert!(report
        .files
        .iter()
        .any(|f| f.file.ends_with("index.php") && !f.queries.is_empty()));
    assert!(report.crud.iter().any(|c| c.file.ends_with("index.php")));
    assert_eq!(report.conditional.len(), 2);
}

#[test]
fn test_catalog_annotation_and_symbol_injection() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write(root, "views.list", "# known views\nactive_orders\n");
    write(root, "procs.list", "sp_cleanup\n");
    write(root, "lib/util.php", "<?php $q = 'SELECT id FROM active_orders';\n");
    write(root, "main.php", "<?php include LIB_PATH . '/util.php';\n");

    let session = AnalysisSession::new();
    let mut constants = HashMap::new();
    constants.insert(
        "LIB_PATH".to_string(),
        root.join("lib").display().to_string(),
    );
    session.inject(&constants);

    let catalog =
        ReferenceCatalog::load(&root.join("views.list"), &root.join("procs.list")).unwrap();
    let runner = ProjectRunner::with_catalog(RunnerConfig::new(root), catalog);
    let report = runner.run(&session);

    let main = report
        .results
        .iter()
        .find(|r| r.file.ends_with("main.php"))
        .unwrap();
    assert!(main.dependencies.iter().any(|d| d.ends_with("util.php")));
    assert_eq!(report.views, vec!["active_orders"]);
    assert!(report.procedures.is_empty());
}

#[test]
fn test_failures_do_not_abort_run() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write(root, "ok.php", "<?php $q = 'SELECT id FROM users';\n");
    write(root, "broken.php", "<?php function partial($a) { if ( }\n");

    let session = AnalysisSession::with_error_sink(root);
    let runner = ProjectRunner::new(RunnerConfig::new(root));
    let report = runner.run(&session);

    assert_eq!(report.stats.files_analyzed, 2);
    // the malformed file is still analyzed via the fallback, not failed
    assert_eq!(report.stats.failures, 0);
    assert_eq!(session.errors.count(ErrorKind::SyntaxParseFailure), 1);

    let broken = report
        .results
        .iter()
        .find(|r| r.file.ends_with("broken.php"))
        .unwrap();
    assert!(broken.functions.iter().any(|f| f.name == "partial"));

    // the sink mirrors the log
    let sink = fs::read_to_string(root.join(ERROR_SINK_NAME)).unwrap();
    assert!(sink.contains("syntax_parse_failure"));
}

#[test]
fn test_sequential_matches_parallel() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write(root, "a.php", "<?php $q = 'SELECT id FROM t1';\n");
    write(root, "b.php", "<?php $q = 'DELETE FROM t2';\n");

    let parallel_session = AnalysisSession::new();
    let parallel_report =
        ProjectRunner::new(RunnerConfig::new(root)).run(&parallel_session);

    let mut sequential_config = RunnerConfig::new(root);
    sequential_config.parallel = false;
    let sequential_session = AnalysisSession::new();
    let sequential_report = ProjectRunner::new(sequential_config).run(&sequential_session);

    let parallel_files: Vec<&String> =
        parallel_report.results.iter().map(|r| &r.file).collect();
    let sequential_files: Vec<&String> =
        sequential_report.results.iter().map(|r| &r.file).collect();
    assert_eq!(parallel_files, sequential_files);
    assert_eq!(
        parallel_report.results[0].queries,
        sequential_report.results[0].queries
    );
}

#[test]
fn test_session_reset_between_runs() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "a.php", "<?php $q = 'SELECT id FROM t1';\n");

    let session = AnalysisSession::new();
    let runner = ProjectRunner::new(RunnerConfig::new(root));

    let first = runner.run(&session);
    assert_eq!(first.crud.len(), 1);

    session.reset();
    let second = runner.run(&session);
    // no stale accumulation from the first run
    assert_eq!(second.crud.len(), 1);
    assert_eq!(second.crud[0].records.len(), 1);
}

#[test]
fn test_report_serializes_with_stable_field_names() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "a.php", "<?php $q = 'SELECT id FROM t1';\n");

    let session = AnalysisSession::new();
    let report = ProjectRunner::new(RunnerConfig::new(root)).run(&session);
    let json = report.to_json().unwrap();

    for field in [
        "\"root\"", "\"files\"", "\"crud\"", "\"views\"", "\"procedures\"",
        "\"conditional\"", "\"results\"", "\"errors\"", "\"stats\"",
    ] {
        assert!(json.contains(field), "missing {}", field);
    }
    assert!(json.contains("\"SELECT\""));
}
