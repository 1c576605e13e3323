use assert_fs::TempDir;
use bitlog::ObjectId;
use predicates::prelude::predicate;
use rstest::rstest;

mod common;
use common::{DiskRepository, linear_history, oneline, run_bitlog_command};

fn stdout_lines(output: &std::process::Output) -> Vec<String> {
    String::from_utf8(output.stdout.clone())
        .expect("stdout is utf-8")
        .lines()
        .map(str::to_string)
        .collect()
}

#[rstest]
fn log_lists_history_newest_first(
    linear_history: (DiskRepository, Vec<ObjectId>),
) -> Result<(), Box<dyn std::error::Error>> {
    let (repository, ids) = linear_history;

    let output = run_bitlog_command(repository.path(), &["log", "--oneline"])
        .assert()
        .success();

    assert_eq!(
        stdout_lines(output.get_output()),
        vec![
            oneline(&ids[0], "Update README again"),
            oneline(&ids[1], "Fix typo in notes"),
            oneline(&ids[2], "Update README"),
            oneline(&ids[3], "Add notes"),
            oneline(&ids[4], "Initial commit"),
        ]
    );

    Ok(())
}

#[rstest]
#[case("0", vec![0, 1])]
#[case("1", vec![0, 1])]
#[case("2", vec![2, 3])]
#[case("3", vec![4])]
#[case("4", vec![])]
fn log_paginates(
    linear_history: (DiskRepository, Vec<ObjectId>),
    #[case] page: &str,
    #[case] expected: Vec<usize>,
) {
    let (repository, ids) = linear_history;

    let output = run_bitlog_command(
        repository.path(),
        &["log", "--page", page, "--size", "2", "--format", "oneline"],
    )
    .assert()
    .success();

    let listed: Vec<String> = stdout_lines(output.get_output())
        .iter()
        .map(|line| line.split(' ').next().unwrap_or_default().to_string())
        .collect();
    let expected: Vec<String> = expected.iter().map(|&n| ids[n].to_string()).collect();

    assert_eq!(listed, expected);
}

#[rstest]
fn log_rejects_zero_page_size(linear_history: (DiskRepository, Vec<ObjectId>)) {
    let (repository, _) = linear_history;

    run_bitlog_command(repository.path(), &["log", "--size", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("page size must be greater than zero"));
}

#[rstest]
fn log_filters_by_path(linear_history: (DiskRepository, Vec<ObjectId>)) {
    let (repository, ids) = linear_history;

    run_bitlog_command(repository.path(), &["log", "--oneline", "--path", "notes.txt"])
        .assert()
        .success()
        .stdout(format!(
            "{}\n{}\n",
            oneline(&ids[1], "Fix typo in notes"),
            oneline(&ids[3], "Add notes")
        ));
}

#[rstest]
fn log_from_a_revision_expression(linear_history: (DiskRepository, Vec<ObjectId>)) {
    let (repository, ids) = linear_history;

    run_bitlog_command(repository.path(), &["log", "--oneline", "main~3"])
        .assert()
        .success()
        .stdout(format!(
            "{}\n{}\n",
            oneline(&ids[3], "Add notes"),
            oneline(&ids[4], "Initial commit")
        ));
}

#[rstest]
fn log_from_an_annotated_tag(linear_history: (DiskRepository, Vec<ObjectId>)) {
    let (repository, ids) = linear_history;
    repository.tag("v1.0", &ids[1]);

    run_bitlog_command(repository.path(), &["log", "--oneline", "--size", "2", "v1.0"])
        .assert()
        .success()
        .stdout(format!(
            "{}\n{}\n",
            oneline(&ids[1], "Fix typo in notes"),
            oneline(&ids[2], "Update README")
        ));
}

#[rstest]
fn log_in_medium_format(linear_history: (DiskRepository, Vec<ObjectId>)) {
    let (repository, ids) = linear_history;

    run_bitlog_command(repository.path(), &["log", "--size", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("commit {}\nAuthor: ", ids[0])))
        .stdout(predicate::str::contains(format!(
            "\n\ncommit {}\nAuthor: ",
            ids[1]
        )))
        .stdout(predicate::str::contains(
            "    Fix typo in notes\n    \n    The second paragraph\n    spans two lines.\n",
        ));
}

#[rstest]
fn search_matches_messages(linear_history: (DiskRepository, Vec<ObjectId>)) {
    let (repository, ids) = linear_history;

    run_bitlog_command(repository.path(), &["search", "^Update", "--oneline"])
        .assert()
        .success()
        .stdout(format!(
            "{}\n{}\n",
            oneline(&ids[0], "Update README again"),
            oneline(&ids[2], "Update README")
        ));

    run_bitlog_command(repository.path(), &["search", "^Update", "-n", "1", "--oneline"])
        .assert()
        .success()
        .stdout(format!("{}\n", oneline(&ids[0], "Update README again")));
}

#[rstest]
fn search_with_path_and_multiline_pattern(linear_history: (DiskRepository, Vec<ObjectId>)) {
    let (repository, ids) = linear_history;

    run_bitlog_command(
        repository.path(),
        &["search", "(?m)^spans", "--path", "notes.txt", "--oneline"],
    )
    .assert()
    .success()
    .stdout(format!("{}\n", oneline(&ids[1], "Fix typo in notes")));
}

#[rstest]
fn search_rejects_invalid_patterns(linear_history: (DiskRepository, Vec<ObjectId>)) {
    let (repository, _) = linear_history;

    run_bitlog_command(repository.path(), &["search", "(unclosed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid search pattern"));
}

#[rstest]
fn last_commit_finds_the_latest_change(linear_history: (DiskRepository, Vec<ObjectId>)) {
    let (repository, ids) = linear_history;

    run_bitlog_command(repository.path(), &["last-commit", "notes.txt", "--oneline"])
        .assert()
        .success()
        .stdout(format!("{}\n", oneline(&ids[1], "Fix typo in notes")));

    run_bitlog_command(
        repository.path(),
        &["last-commit", "notes.txt", "HEAD~2", "--oneline"],
    )
    .assert()
    .success()
    .stdout(format!("{}\n", oneline(&ids[3], "Add notes")));
}

#[rstest]
fn last_commit_for_untouched_path_fails(linear_history: (DiskRepository, Vec<ObjectId>)) {
    let (repository, ids) = linear_history;

    run_bitlog_command(repository.path(), &["last-commit", "missing.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(format!(
            "revision does not exist [rev: {}, path: missing.txt]",
            ids[0]
        )));
}

#[rstest]
#[case("HEAD~2", 2)]
#[case("@^", 1)]
#[case("main", 0)]
#[case("refs/heads/main^^^^", 4)]
fn show_resolves_revisions(
    linear_history: (DiskRepository, Vec<ObjectId>),
    #[case] revision: &str,
    #[case] expected: usize,
) {
    let (repository, ids) = linear_history;

    run_bitlog_command(repository.path(), &["show", revision, "--abbrev-commit"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "commit {}\n",
            ids[expected].to_short_oid()
        )));
}

#[rstest]
fn show_accepts_abbreviated_ids_and_packed_tags(linear_history: (DiskRepository, Vec<ObjectId>)) {
    let (repository, ids) = linear_history;
    repository.set_packed_refs(&[("refs/tags/v1.0", &ids[3])]);
    let short = ids[2].to_string()[..8].to_string();

    run_bitlog_command(repository.path(), &["show", &short, "--oneline"])
        .assert()
        .success()
        .stdout(format!("{}\n", oneline(&ids[2], "Update README")));

    run_bitlog_command(repository.path(), &["show", "v1.0", "--oneline"])
        .assert()
        .success()
        .stdout(format!("{}\n", oneline(&ids[3], "Add notes")));
}

#[rstest]
fn show_unknown_revision_fails(linear_history: (DiskRepository, Vec<ObjectId>)) {
    let (repository, _) = linear_history;

    run_bitlog_command(repository.path(), &["show", "topic"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "revision does not exist [rev: topic, path: ]",
        ));
}

#[rstest]
#[case(&[], "5\n")]
#[case(&["--path", "README.md"], "3\n")]
#[case(&["--path", "notes.txt"], "2\n")]
#[case(&["HEAD~3"], "2\n")]
fn count_reachable_commits(
    linear_history: (DiskRepository, Vec<ObjectId>),
    #[case] extra_args: &[&str],
    #[case] expected: &str,
) {
    let (repository, _) = linear_history;
    let mut args = vec!["count"];
    args.extend_from_slice(extra_args);

    run_bitlog_command(repository.path(), &args)
        .assert()
        .success()
        .stdout(expected.to_string());
}

#[rstest]
fn repository_can_come_from_the_environment(
    linear_history: (DiskRepository, Vec<ObjectId>),
) -> Result<(), Box<dyn std::error::Error>> {
    let (repository, _) = linear_history;

    assert_cmd::Command::cargo_bin("bitlog")?
        .env("BITLOG_DIR", repository.path())
        .arg("count")
        .assert()
        .success()
        .stdout("5\n");

    Ok(())
}

#[test]
fn plain_directory_is_not_a_repository() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    run_bitlog_command(dir.path(), &["log"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a git repository"));

    Ok(())
}
