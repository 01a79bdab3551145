#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rsl() -> Command {
    cargo_bin_cmd!("rseizurelog")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rseizurelog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Write an import file into tempdir and return its path
pub fn write_input(name: &str, content: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_in.txt", name));
    fs::write(&path, content).expect("write input file");
    path.to_string_lossy().to_string()
}

/// Initialize an empty test DB
pub fn init_db(db_path: &str) {
    rsl()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

pub const NOTES: &str = "June 16, 2024 9pm - 2 min seizure, woke up suddenly\n\
6/18/24 at 7:15am, 45 sec, after eating breakfast\n\
this line has no date at all\n\
3rd of March 2024 around 0830h, 1 min 30 sec, stress at school\n";

pub const SHEET: &str = "Date,Time,Duration (min),Duration (sec),Trigger,Description\n\
6/16/2024,21:00,2,0,Woke up,\"woke up, then stiff\"\n\
6/17/2024,08:00,0,40,Fever,hot all day\n\
not a date,09:30,1,0,Stress,exam day\n";

/// Initialize DB and import the free-text notes (3 parsable lines)
pub fn init_db_with_notes(db_path: &str, name: &str) {
    init_db(db_path);
    let input = write_input(name, NOTES);
    rsl()
        .args(["--db", db_path, "--test", "import", "--file", &input, "--yes"])
        .assert()
        .success();
}
