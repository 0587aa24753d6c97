use assert_cmd::Command;
use predicates::prelude::*;

fn numprops() -> Command {
    Command::cargo_bin("numprops").expect("binary should be built")
}

#[test]
fn test_sequential_output_lines() {
    let output = numprops()
        .args(["sequential", "--start", "1", "--end", "30", "-q"])
        .output()
        .expect("Failed to execute numprops");

    if !output.status.success() {
        eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        panic!("numprops failed");
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();

    // 29 records plus the timing line
    assert_eq!(lines.len(), 30);
    assert_eq!(lines[0], "Number: 1, Sum of Squares: 1, Perfect: false");
    assert_eq!(lines[5], "Number: 6, Sum of Squares: 91, Perfect: true");
    assert_eq!(lines[27], "Number: 28, Sum of Squares: 7714, Perfect: true");
    assert!(lines[29].starts_with("Done in "));
    assert!(lines[29].ends_with(" seconds"));
}

#[test]
fn test_pool_lines_name_their_worker() {
    let output = numprops()
        .args(["pool", "--end", "50", "-j", "2", "-q"])
        .output()
        .expect("Failed to execute numprops");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let records: Vec<&str> = stdout.lines().filter(|l| l.contains("Number:")).collect();
    assert_eq!(records.len(), 49);
    assert!(records.iter().all(|l| l.starts_with("Worker PoolWorker-")));
}

#[test]
fn test_spawn_strategy_succeeds() {
    numprops()
        .args(["spawn", "--start", "490", "--end", "500", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Number: 496, Sum of Squares: 40797736, Perfect: true",
        ))
        .stdout(predicate::str::is_match(r"Done in \d+\.\d{4} seconds\n$").unwrap());
}

#[test]
fn test_timing_line_has_four_decimals() {
    numprops()
        .args(["sequential", "--end", "2", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"(?m)^Done in \d+\.\d{4} seconds$").unwrap());
}

#[test]
fn test_inverted_range_fails() {
    numprops()
        .args(["sequential", "--start", "10", "--end", "5", "-q"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("greater than end"));
}

#[test]
fn test_large_numbers_within_limit() {
    numprops()
        .args(["sequential", "--start", "10000000000000", "--end", "10000000000001", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Number: 10000000000000, Sum of Squares: 333333333333383333333333335000000000000, Perfect: false",
        ));
}

#[test]
fn test_range_past_largest_sum_fails() {
    numprops()
        .args(["sequential", "--start", "10069012961345", "--end", "10069012961346", "-q"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("do not fit in u128"));
}

#[test]
fn test_unknown_strategy_rejected() {
    numprops().arg("fibers").assert().failure();
}
