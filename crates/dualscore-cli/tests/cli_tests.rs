//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const HEADER: &str =
    "Name,Age,Geography,Ethnicity,Income,Legacy,Local,GPA,Test,Extra,Essay,Rec,FirstGen,Disability";

fn dualscore(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("dualscore").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("DUALSCORE_MAX_TEST")
        .env_remove("DUALSCORE_LOW_INCOME")
        .env_remove("DUALSCORE_CUTOFF");
    cmd
}

fn write_csv(dir: &TempDir, rows: &[&str]) -> std::path::PathBuf {
    let path = dir.path().join("applicants.csv");
    let mut content = String::from(HEADER);
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    content.push('\n');
    std::fs::write(&path, content).unwrap();
    path
}

/// Blind 0.775 (rejected), low-income bonus lifts aware to 0.825 (admitted).
const UPSHIFT_ROW: &str = "Ada,18,Urban,X,\"$20,000\",No,No,2.0,1600,1.0,1.0,1.0,No,No";
/// Perfect merit, no context flags.
const PERFECT_ROW: &str = "Bo,18,Urban,X,100000,No,No,4.0,1600,1.0,1.0,1.0,No,No";

#[test]
fn run_reports_upshift() {
    let dir = TempDir::new().unwrap();
    write_csv(&dir, &[UPSHIFT_ROW, PERFECT_ROW]);

    dualscore(dir.path())
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Admissions Results (cutoff = 0.82)"))
        .stdout(predicate::str::contains("Ada"))
        .stdout(predicate::str::contains("Low income +0.05"))
        .stdout(predicate::str::contains("Rejected→Admitted (Aware uplift): 1"))
        .stdout(predicate::str::contains("Admitted→Rejected (Aware downshift): 0"))
        .stdout(predicate::str::contains("=== Group: Low income ==="))
        .stdout(predicate::str::contains("=== Group: Local ==="));
}

#[test]
fn run_with_cutoff_override() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, &[UPSHIFT_ROW, PERFECT_ROW]);

    dualscore(dir.path())
        .arg("run")
        .arg("--input")
        .arg(&csv)
        .arg("--cutoff")
        .arg("0.5")
        .assert()
        .success()
        .stdout(predicate::str::contains("cutoff = 0.5"))
        .stdout(predicate::str::contains("Rejected→Admitted (Aware uplift): 0"));
}

#[test]
fn run_with_malformed_cutoff_falls_back() {
    let dir = TempDir::new().unwrap();
    write_csv(&dir, &[PERFECT_ROW]);

    dualscore(dir.path())
        .arg("run")
        .arg("--cutoff")
        .arg("abc")
        .assert()
        .success()
        .stdout(predicate::str::contains("cutoff = 0.82"));
}

#[test]
fn run_with_env_overrides() {
    let dir = TempDir::new().unwrap();
    write_csv(&dir, &[PERFECT_ROW]);

    dualscore(dir.path())
        .env("DUALSCORE_CUTOFF", "0.9")
        .env("DUALSCORE_MAX_TEST", "not-a-number")
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains("cutoff = 0.9"));
}

#[test]
fn run_with_config_file() {
    let dir = TempDir::new().unwrap();
    write_csv(&dir, &[UPSHIFT_ROW]);
    let config = dir.path().join("custom.toml");
    std::fs::write(&config, "cutoff = 0.7\n[bonuses]\nlow_income = 0.0\n").unwrap();

    dualscore(dir.path())
        .arg("run")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("cutoff = 0.7"))
        .stdout(predicate::str::contains("Rejected→Admitted (Aware uplift): 0"));
}

#[test]
fn run_rejects_non_finite_config() {
    let dir = TempDir::new().unwrap();
    write_csv(&dir, &[PERFECT_ROW]);
    let config = dir.path().join("bad.toml");
    std::fs::write(&config, "[weights]\ngpa = nan\n").unwrap();

    dualscore(dir.path())
        .arg("run")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("weight 'gpa' must be finite"));
}

#[test]
fn run_accepts_tab_separated_input() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("applicants.tsv");
    let content = format!(
        "{}\n{}\n",
        HEADER.replace(',', "\t"),
        "Tess\t18\tUrban\tX\t20000\tNo\tNo\t2.0\t1600\t1.0\t1.0\t1.0\tNo\tNo"
    );
    std::fs::write(&path, content).unwrap();

    dualscore(dir.path())
        .arg("run")
        .arg("--input")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Tess"))
        .stdout(predicate::str::contains("Rejected→Admitted (Aware uplift): 1"));
}

#[test]
fn run_with_missing_config_fails() {
    let dir = TempDir::new().unwrap();
    write_csv(&dir, &[PERFECT_ROW]);

    dualscore(dir.path())
        .arg("run")
        .arg("--config")
        .arg("nope.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn run_empty_input_fails_cleanly() {
    let dir = TempDir::new().unwrap();
    write_csv(&dir, &[]);

    dualscore(dir.path())
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No applicants found"));
}

#[test]
fn run_duplicate_names_fails() {
    let dir = TempDir::new().unwrap();
    write_csv(&dir, &[PERFECT_ROW, PERFECT_ROW]);

    dualscore(dir.path())
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate applicant name 'Bo'"));
}

#[test]
fn run_missing_input_fails() {
    let dir = TempDir::new().unwrap();

    dualscore(dir.path())
        .arg("run")
        .arg("--input")
        .arg("missing.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn run_saves_json_report() {
    let dir = TempDir::new().unwrap();
    write_csv(&dir, &[UPSHIFT_ROW, PERFECT_ROW]);
    let out = dir.path().join("out");

    dualscore(dir.path())
        .arg("run")
        .arg("--output")
        .arg(&out)
        .arg("--format")
        .arg("json")
        .assert()
        .success();

    let reports: Vec<_> = std::fs::read_dir(&out)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    assert_eq!(reports.len(), 1);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&reports[0]).unwrap()).unwrap();
    assert_eq!(json["rows"].as_array().unwrap().len(), 2);
    assert_eq!(json["disagreement"]["upshift_count"], 1);
    assert_eq!(json["rows"][0]["shift"], "upshift");
}

#[test]
fn run_saves_all_formats() {
    let dir = TempDir::new().unwrap();
    write_csv(&dir, &[PERFECT_ROW]);
    let out = dir.path().join("out");

    dualscore(dir.path())
        .arg("run")
        .arg("--output")
        .arg(&out)
        .arg("--format")
        .arg("all")
        .assert()
        .success();

    let mut extensions: Vec<String> = std::fs::read_dir(&out)
        .unwrap()
        .filter_map(|e| {
            e.unwrap()
                .path()
                .extension()
                .map(|ext| ext.to_string_lossy().into_owned())
        })
        .collect();
    extensions.sort();
    assert_eq!(extensions, vec!["html", "json", "md"]);
}

#[test]
fn run_reports_unwritable_output_directory() {
    let dir = TempDir::new().unwrap();
    write_csv(&dir, &[PERFECT_ROW]);
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();

    dualscore(dir.path())
        .arg("run")
        .arg("--output")
        .arg(blocker.join("out"))
        .arg("--format")
        .arg("json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to create output directory"));
}

#[test]
fn validate_clean_input() {
    let dir = TempDir::new().unwrap();
    write_csv(&dir, &[UPSHIFT_ROW, PERFECT_ROW]);

    dualscore(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Applicants: 2"))
        .stdout(predicate::str::contains("All applicants valid."));
}

#[test]
fn validate_reports_out_of_range_and_duplicates() {
    let dir = TempDir::new().unwrap();
    write_csv(
        &dir,
        &[
            PERFECT_ROW,
            "Bo,18,Urban,X,100000,No,No,4.0,1600,1.0,1.0,1.0,No,No",
            "Cy,18,Urban,X,100000,No,No,4.5,1600,1.3,1.0,1.0,No,No",
        ],
    );

    dualscore(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("duplicate applicant name: Bo"))
        .stdout(predicate::str::contains("[Cy] WARNING: gpa 4.5"))
        .stdout(predicate::str::contains("extra 1.3"))
        .stdout(predicate::str::contains("warning(s) found"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    dualscore(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created dualscore.toml"))
        .stdout(predicate::str::contains("Created applicants.csv"));

    assert!(dir.path().join("dualscore.toml").exists());
    assert!(dir.path().join("applicants.csv").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    dualscore(dir.path()).arg("init").assert().success();

    dualscore(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn init_output_is_runnable() {
    let dir = TempDir::new().unwrap();

    dualscore(dir.path()).arg("init").assert().success();

    dualscore(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Applicants: 6"))
        .stdout(predicate::str::contains("All applicants valid."));

    dualscore(dir.path())
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Farah Aziz"));
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();
    dualscore(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Compare blind and equity-aware admissions scoring",
        ));
}

#[test]
fn version_output() {
    let dir = TempDir::new().unwrap();
    dualscore(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dualscore"));
}
