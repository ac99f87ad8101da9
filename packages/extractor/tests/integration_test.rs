//! End-to-end tests for the extraction pipeline.
//!
//! Uses a small fixture corpus of two family pages and the matching family
//! index under `tests/fixtures/corpus`.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

use family_extractor::consistency::{check_consistency, read_index};
use family_extractor::scanner::PageScanner;
use family_extractor::types::{ContentFragment, PersonRecord, Relation};
use family_extractor::yaml::{extract_people, generate_yaml, read_families};
use family_extractor::CorpusWalker;

fn corpus_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("corpus")
}

/// Walk the fixture corpus, ordering pages by name for stable assertions.
fn walk_corpus() -> Vec<PersonRecord> {
    let mut people: Vec<PersonRecord> = CorpusWalker::in_dir(&corpus_dir(), "f?.htm")
        .expect("valid pattern")
        .collect();
    // Stable sort keeps the in-page order
    people.sort_by(|a, b| a.source.cmp(&b.source));
    people
}

fn fragment(key: Option<&str>, value: &str, href: Option<&str>) -> ContentFragment {
    ContentFragment {
        key: key.map(String::from),
        value: value.to_string(),
        href: href.map(String::from),
    }
}

#[test]
fn test_walk_fixture_corpus() {
    let people = walk_corpus();

    let summary: Vec<_> = people
        .iter()
        .map(|p| (p.source.as_str(), p.family.as_str(), p.relation, p.name.as_str()))
        .collect();
    assert_eq!(
        summary,
        [
            ("f1.htm", "f1", Relation::Husband, "John Smith"),
            ("f1.htm", "f1", Relation::Wife, "Mary Jones"),
            ("f1.htm", "f1", Relation::Child, "Ann Smith"),
            ("f1.htm", "f1", Relation::Child, "Tom Smith"),
            ("f2.htm", "f2", Relation::Husband, "Thomas Jones"),
            ("f2.htm", "f2", Relation::Wife, "Sarah Brown"),
            ("f2.htm", "f2", Relation::Child, "Mary Jones (see f1)"),
            ("f2.htm", "f21", Relation::Husband, "Thomas Jones"),
            ("f2.htm", "f21", Relation::Wife, "Ellen White"),
        ]
    );
}

#[test]
fn test_fixture_content_and_links() {
    let people = walk_corpus();

    let john = &people[0];
    assert_eq!(john.link.as_deref(), Some("../people/p1.htm"));
    assert_eq!(
        john.content,
        [
            fragment(Some("Born"), "12 May 1850, Leeds", None),
            fragment(Some("Occupation"), "Carpenter", None),
        ]
    );

    let mary = &people[1];
    assert_eq!(
        mary.content,
        [
            fragment(Some("Born"), "3 Jun 1852", None),
            fragment(Some("Father"), "Thomas Jones", Some("f2.htm#f2")),
        ]
    );

    assert!(people[2].content.is_empty());

    let tom = &people[3];
    assert_eq!(
        tom.content,
        [
            fragment(None, "Emigrated to Canada", None),
            fragment(Some("Died"), "1920, Toronto", None),
        ]
    );

    let ellen = &people[8];
    assert_eq!(ellen.content, [fragment(Some("Married"), "1870 & again 1880", None)]);
}

#[test]
fn test_walker_reports_unrecognized_anchor() {
    let mut walker = CorpusWalker::in_dir(&corpus_dir(), "f?.htm").expect("valid pattern");
    let _: Vec<_> = walker.by_ref().collect();

    assert_eq!(walker.warnings().len(), 1);
    let warning = &walker.warnings()[0];
    assert_eq!(warning.source, "f1.htm");
    assert_eq!(warning.warning.anchor, "note1");
    assert_eq!(warning.warning.line, 15);
    assert!(walker.skipped().is_empty());
}

#[test]
fn test_walk_is_idempotent() {
    assert_eq!(walk_corpus(), walk_corpus());
}

#[test]
fn test_fixture_corpus_matches_index() {
    let people = walk_corpus();
    let index = read_index(&corpus_dir().join("gendex.txt")).expect("index readable");

    let report = check_consistency(&people, index);
    assert!(report.is_consistent(), "unexpected mismatches: {report:?}");
}

#[test]
fn test_index_mismatch_is_reported() {
    let mut people = walk_corpus();
    people.pop();
    let index = read_index(&corpus_dir().join("gendex.txt")).expect("index readable");

    let report = check_consistency(&people, index);
    assert!(report.extra_in_corpus.is_empty());
    assert_eq!(report.extra_in_index.get("f2.htm#f21"), Some(&1));
}

#[test]
fn test_scanner_matches_walker_for_single_page() {
    let page = fs::read_to_string(corpus_dir().join("f2.htm")).expect("fixture readable");
    let scanned: Vec<_> = PageScanner::new(page.lines())
        .map(|p| p.with_source("f2.htm"))
        .collect();
    let walked: Vec<_> = walk_corpus()
        .into_iter()
        .filter(|p| p.source == "f2.htm")
        .collect();
    assert_eq!(scanned, walked);
}

#[test]
fn test_yaml_round_trip_of_corpus() {
    let people = walk_corpus();
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("people.yaml"), generate_yaml(&people).expect("yaml"))
        .expect("write");

    let read_back = extract_people(&read_families(dir.path()).expect("read")).expect("people");
    let without_source: Vec<_> = people
        .into_iter()
        .map(|p| p.with_source(""))
        .collect();
    assert_eq!(read_back, without_source);
}

#[test]
fn test_cli_extract_to_stdout() {
    Command::new(env!("CARGO_BIN_EXE_family-extractor"))
        .args(["extract", "f?.htm", "--dir"])
        .arg(corpus_dir())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("---\nPeople:\n"))
        .stdout(predicate::str::contains("name: John Smith"))
        .stdout(predicate::str::contains("relation: child"))
        .stderr(predicate::str::contains("People: 9"));
}

#[test]
fn test_cli_extract_to_file() {
    let dir = tempdir().expect("tempdir");
    let output = dir.path().join("people.yaml");

    Command::new(env!("CARGO_BIN_EXE_family-extractor"))
        .args(["extract", "--dir"])
        .arg(corpus_dir())
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let families = read_families(dir.path()).expect("read back");
    assert_eq!(families[0].people.len(), 9);
}

#[test]
fn test_cli_check_passes() {
    Command::new(env!("CARGO_BIN_EXE_family-extractor"))
        .args(["check", "--dir"])
        .arg(corpus_dir())
        .assert()
        .success()
        .stderr(predicate::str::contains("9 people match the index"));
}

#[test]
fn test_cli_check_reports_mismatch() {
    let dir = tempdir().expect("tempdir");
    let index = dir.path().join("gendex.txt");
    fs::write(&index, "f1.htm#f1|Smith|John\nf9.htm#f9|Nobody|\n").expect("write index");

    Command::new(env!("CARGO_BIN_EXE_family-extractor"))
        .args(["check", "--dir"])
        .arg(corpus_dir())
        .arg("--index")
        .arg(&index)
        .assert()
        .failure()
        .stdout(predicate::str::contains("f1.htm#f1\t+3"))
        .stdout(predicate::str::contains("f2.htm#f21\t+2"))
        .stdout(predicate::str::contains("f9.htm#f9\t-1"))
        .stderr(predicate::str::contains("Corpus does not match index"));
}
