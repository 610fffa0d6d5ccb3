//! Integration tests for the rewrite engine and file walk, using the
//! in-memory branch sources instead of a network.

use std::fs;
use std::path::{Path, PathBuf};

use relink_core::fakes::StaticBranchSource;
use relink_core::{branch_url_pattern, rewrite_urls_in_file, walk_and_rewrite};
use relink_core::{BranchOracle, RepositoryIdentity};

fn oracle(branches: &[&str]) -> BranchOracle<StaticBranchSource> {
    BranchOracle::new(
        StaticBranchSource::new(branches),
        RepositoryIdentity::parse("acme/widget").unwrap(),
    )
}

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[tokio::test]
async fn file_without_matches_is_left_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let content = "nothing to see here\nhttps://example.com/acme/widget/blob/main/x\n";
    let path = write_file(dir.path(), "plain.md", content);

    let oracle = oracle(&["main"]);
    let pattern = branch_url_pattern(oracle.repo()).unwrap();
    let result = rewrite_urls_in_file(&path, &pattern, &oracle, "release-2")
        .await
        .unwrap();

    assert!(!result.modified);
    assert_eq!(result.substitutions, 0);
    assert_eq!(fs::read_to_string(&path).unwrap(), content);
}

#[tokio::test]
async fn single_substitution_replaces_branch_segment() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "readme.md",
        "see https://host.github.com/acme/widget/blob/feature-x/readme.md",
    );

    let oracle = oracle(&["feature-x", "release-2"]);
    let pattern = branch_url_pattern(oracle.repo()).unwrap();
    let result = rewrite_urls_in_file(&path, &pattern, &oracle, "release-2")
        .await
        .unwrap();

    assert!(result.modified);
    assert_eq!(result.substitutions, 1);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "see https://host.github.com/acme/widget/blob/release-2/readme.md"
    );
}

/// Two valid matches with opposite length deltas: the first replacement is
/// longer than its segment, the second shorter. Each must land at the
/// correct post-substitution position.
#[tokio::test]
async fn multiple_substitutions_with_differing_length_deltas() {
    let dir = tempfile::tempdir().unwrap();
    let original = "a https://github.com/acme/widget/blob/dev/a.md \
                    b https://github.com/acme/widget/blob/very-long-branch/b.md end";
    let path = write_file(dir.path(), "links.md", original);

    let oracle = oracle(&["dev", "very-long-branch", "release"]);
    let pattern = branch_url_pattern(oracle.repo()).unwrap();
    let result = rewrite_urls_in_file(&path, &pattern, &oracle, "release")
        .await
        .unwrap();

    let expected = original
        .replace("blob/dev/", "blob/release/")
        .replace("blob/very-long-branch/", "blob/release/");
    assert_eq!(result.substitutions, 2);
    assert_eq!(fs::read_to_string(&path).unwrap(), expected);
}

#[tokio::test]
async fn non_branch_segment_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let original = "wiki: https://github.com/acme/widget/wiki/Home-Page \
                    code: https://github.com/acme/widget/blob/main/src/lib.rs";
    let path = write_file(dir.path(), "mixed.md", original);

    let oracle = oracle(&["main", "release-2"]);
    let pattern = branch_url_pattern(oracle.repo()).unwrap();
    let result = rewrite_urls_in_file(&path, &pattern, &oracle, "release-2")
        .await
        .unwrap();

    // "wiki" satisfies the URL shape but is not a branch; only the blob
    // link is rewritten.
    assert_eq!(result.substitutions, 1);
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("wiki/Home-Page"));
    assert!(content.contains("blob/release-2/src/lib.rs"));
}

#[tokio::test]
async fn second_run_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "readme.md",
        "https://github.com/acme/widget/blob/dev/readme.md",
    );

    let oracle = oracle(&["dev", "release-2"]);
    let pattern = branch_url_pattern(oracle.repo()).unwrap();

    let first = rewrite_urls_in_file(&path, &pattern, &oracle, "release-2")
        .await
        .unwrap();
    assert_eq!(first.substitutions, 1);
    let after_first = fs::read_to_string(&path).unwrap();

    let second = rewrite_urls_in_file(&path, &pattern, &oracle, "release-2")
        .await
        .unwrap();
    assert!(!second.modified);
    assert_eq!(second.substitutions, 0);
    assert_eq!(fs::read_to_string(&path).unwrap(), after_first);
}

#[tokio::test]
async fn walk_returns_updated_files_in_input_order() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(
        dir.path(),
        "a.md",
        "https://github.com/acme/widget/blob/dev/a.md",
    );
    let b = write_file(dir.path(), "b.md", "no links");
    let c = write_file(
        dir.path(),
        "c.md",
        "https://github.com/acme/widget/blob/dev/c.md",
    );

    let oracle = oracle(&["dev", "main"]);
    let files = vec![a.clone(), b, c.clone()];
    let report = walk_and_rewrite(&oracle, "main", &files).await.unwrap();

    assert_eq!(report.updated, vec![a, c]);
    assert_eq!(report.unchanged, 1);
    assert!(report.clean());
}

#[tokio::test]
async fn invalid_target_branch_short_circuits_the_walk() {
    let dir = tempfile::tempdir().unwrap();
    let real = write_file(
        dir.path(),
        "a.md",
        "https://github.com/acme/widget/blob/dev/a.md",
    );
    // A missing path would show up as a failure if the walk read any file.
    let missing = dir.path().join("missing.md");

    let oracle = oracle(&["dev"]);
    let report = walk_and_rewrite(&oracle, "not-a-branch", &[real.clone(), missing])
        .await
        .unwrap();

    assert_eq!(report, relink_core::WalkReport::default());
    assert_eq!(
        fs::read_to_string(&real).unwrap(),
        "https://github.com/acme/widget/blob/dev/a.md"
    );
}

#[tokio::test]
async fn unreadable_file_is_recorded_and_walk_continues() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.md");
    let good = write_file(
        dir.path(),
        "good.md",
        "https://github.com/acme/widget/blob/dev/x.md",
    );

    let oracle = oracle(&["dev", "main"]);
    let report = walk_and_rewrite(&oracle, "main", &[missing.clone(), good.clone()])
        .await
        .unwrap();

    assert_eq!(report.updated, vec![good]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].path, missing);
    assert!(!report.clean());
}
