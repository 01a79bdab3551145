use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{NOTES, SHEET, init_db, init_db_with_notes, rsl, setup_test_db, write_input};

#[test]
fn test_import_free_text_file() {
    let db_path = setup_test_db("import_free_text_file");
    init_db(&db_path);
    let input = write_input("import_free_text_file", NOTES);

    rsl()
        .args(["--db", &db_path, "--test", "import", "--file", &input, "--yes"])
        .assert()
        .success()
        .stdout(contains("free text"))
        .stdout(contains("2024-06-16"))
        .stdout(contains("Woke up"))
        .stdout(contains("this line has no date at all"))
        .stdout(contains("Committed 3 of 3 record(s), 0 failed."));

    rsl()
        .args(["--db", &db_path, "--test", "list"])
        .assert()
        .success()
        .stdout(contains("2024-03-03"))
        .stdout(contains("08:30"))
        .stdout(contains("2024-06-18"))
        .stdout(contains("07:15"))
        .stdout(contains("After eating"))
        .stdout(contains("3 record(s)."));
}

#[test]
fn test_import_csv_from_stdin() {
    let db_path = setup_test_db("import_csv_from_stdin");
    init_db(&db_path);

    rsl()
        .args(["--db", &db_path, "--test", "import", "--yes"])
        .write_stdin(SHEET)
        .assert()
        .success()
        .stdout(contains("CSV"))
        .stdout(contains("not a date"))
        .stdout(contains("Committed 2 of 2 record(s), 0 failed."));

    rsl()
        .args(["--db", &db_path, "--test", "list", "--period", "2024-06"])
        .assert()
        .success()
        .stdout(contains("Fever"))
        .stdout(contains("0:40"))
        .stdout(contains("woke up, then stiff"));
}

#[test]
fn test_import_dry_run_writes_nothing() {
    let db_path = setup_test_db("import_dry_run");
    init_db(&db_path);
    let input = write_input("import_dry_run", NOTES);

    rsl()
        .args(["--db", &db_path, "--test", "import", "--file", &input, "--dry-run"])
        .assert()
        .success()
        .stdout(contains("Dry run: 3 record(s) would be imported."));

    rsl()
        .args(["--db", &db_path, "--test", "list"])
        .assert()
        .success()
        .stdout(contains("No seizures recorded"));
}

#[test]
fn test_import_with_exclusions() {
    let db_path = setup_test_db("import_with_exclusions");
    init_db(&db_path);
    let input = write_input("import_with_exclusions", NOTES);

    rsl()
        .args([
            "--db", &db_path, "--test", "import", "--file", &input, "--exclude", "1,3", "--yes",
        ])
        .assert()
        .success()
        .stdout(contains("Committed 1 of 1 record(s)"));

    rsl()
        .args(["--db", &db_path, "--test", "list"])
        .assert()
        .success()
        .stdout(contains("2024-06-18"))
        .stdout(contains("2024-06-16").not())
        .stdout(contains("2024-03-03").not());
}

#[test]
fn test_import_rejects_out_of_range_exclusion() {
    let db_path = setup_test_db("import_bad_exclusion");
    init_db(&db_path);
    let input = write_input("import_bad_exclusion", NOTES);

    rsl()
        .args([
            "--db", &db_path, "--test", "import", "--file", &input, "--exclude", "9", "--yes",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid row number"));
}

#[test]
fn test_import_year_for_yearless_dates() {
    let db_path = setup_test_db("import_year_for_yearless");
    init_db(&db_path);
    let input = write_input("import_year_for_yearless", "Jun 20 around 3:30pm, fever\n");

    rsl()
        .args([
            "--db", &db_path, "--test", "import", "--file", &input, "--year", "2023", "--yes",
        ])
        .assert()
        .success();

    rsl()
        .args(["--db", &db_path, "--test", "list", "--period", "2023"])
        .assert()
        .success()
        .stdout(contains("2023-06-20"))
        .stdout(contains("15:30"))
        .stdout(contains("Fever"));
}

#[test]
fn test_import_nothing_parsable() {
    let db_path = setup_test_db("import_nothing_parsable");
    init_db(&db_path);
    let input = write_input("import_nothing_parsable", "hello\nworld\n");

    rsl()
        .args(["--db", &db_path, "--test", "import", "--file", &input, "--yes"])
        .assert()
        .success()
        .stdout(contains("Nothing could be parsed"));
}

#[test]
fn test_import_is_audited() {
    let db_path = setup_test_db("import_is_audited");
    init_db_with_notes(&db_path, "import_is_audited");

    rsl()
        .args(["--db", &db_path, "--test", "log", "--print"])
        .assert()
        .success()
        .stdout(contains("Imported 3 record(s), 0 failed"));
}
