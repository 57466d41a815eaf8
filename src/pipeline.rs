//! The batch aggregation pipeline.
//!
//! One linear pass: discover `.dat` files, parse each, accumulate
//! salary values, compute summary statistics, and write the combined
//! CSV. Files are processed one at a time; a file that fails to parse
//! is reported and skipped.

use crate::analysis;
use crate::config::Config;
use crate::models::{RunOutcome, Table};
use crate::parser;
use crate::report;
use crate::scanner;
use anyhow::{Context, Result};
use tracing::{debug, info, warn};

/// Run the full aggregation job described by `config`.
///
/// Summary statistics, the gross-salary column, and the output rows
/// all come from the last successfully parsed table; the salary values
/// accumulated across every file feed only the no-data check.
///
/// Returns `Ok` with a [`RunOutcome`] for the recognized conditions
/// (missing source folder, no salary data, completed). Structural
/// problems in parsed data, such as a missing `basic_salary` or
/// `allowances` column, propagate as errors.
pub fn run(config: &Config) -> Result<RunOutcome> {
    let source = &config.job.source_folder;

    if !source.exists() {
        return Ok(RunOutcome::SourceFolderMissing);
    }

    let files = scanner::find_data_files(source)?;
    info!(
        "Found {} data file(s) in {}",
        files.len(),
        source.display()
    );

    let mut all_salaries: Vec<Option<f64>> = Vec::new();
    let mut tables: Vec<Table> = Vec::new();
    let mut files_skipped = 0usize;

    for path in &files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let table = match parser::parse_dat_file(path) {
            Ok(table) => table,
            Err(e) => {
                warn!("Error parsing '{}': {}", name, e);
                files_skipped += 1;
                continue;
            }
        };

        debug!("Parsed '{}': {} row(s)", name, table.row_count());

        let salaries = analysis::numeric_column(&table, analysis::BASIC_SALARY)
            .with_context(|| format!("in '{}'", name))?;
        all_salaries.extend(salaries);
        tables.push(table);
    }

    if all_salaries.is_empty() {
        return Ok(RunOutcome::NoSalaryData);
    }

    let files_merged = tables.len();

    // Only the most recently parsed table reaches the output; the
    // cross-file accumulator above exists for the emptiness check.
    let Some(mut last) = tables.pop() else {
        return Ok(RunOutcome::NoSalaryData);
    };

    let basic = analysis::numeric_column(&last, analysis::BASIC_SALARY)
        .context("computing summary statistics")?;
    let average = analysis::mean(&basic);
    let second_highest = analysis::second_highest(&basic);

    analysis::add_gross_salary(&mut last).context("computing gross salary")?;

    let footer = report::footer_cells(average, second_highest);
    let combined = report::append_footer(last, &footer);

    let output_path = config
        .job
        .destination_folder
        .join(&config.job.output_filename);
    report::write_csv(&combined, &output_path)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    info!("Wrote combined CSV: {}", output_path.display());

    Ok(RunOutcome::Completed {
        output_path,
        files_merged,
        files_skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    fn job_config(source: &Path, dest: &Path) -> Config {
        let mut config = Config::default();
        config.job.source_folder = source.to_path_buf();
        config.job.destination_folder = dest.to_path_buf();
        config
    }

    fn write_dat(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    fn result_path(dest: &Path) -> PathBuf {
        dest.join("result.csv")
    }

    #[test]
    fn test_missing_source_folder_writes_nothing() {
        let dest = tempdir().unwrap();
        let config = job_config(Path::new("no/such/folder"), dest.path());

        let outcome = run(&config).unwrap();

        assert_eq!(outcome, RunOutcome::SourceFolderMissing);
        assert!(!result_path(dest.path()).exists());
    }

    #[test]
    fn test_empty_source_folder_yields_no_data() {
        let source = tempdir().unwrap();
        let dest = tempdir().unwrap();
        let config = job_config(source.path(), dest.path());

        let outcome = run(&config).unwrap();

        assert_eq!(outcome, RunOutcome::NoSalaryData);
        assert!(!result_path(dest.path()).exists());
    }

    #[test]
    fn test_all_files_malformed_yields_no_data() {
        let source = tempdir().unwrap();
        let dest = tempdir().unwrap();
        write_dat(
            source.path(),
            "broken.dat",
            "basic_salary\tallowances\n1000\t100\textra\n",
        );
        let config = job_config(source.path(), dest.path());

        let outcome = run(&config).unwrap();

        assert_eq!(outcome, RunOutcome::NoSalaryData);
        assert!(!result_path(dest.path()).exists());
    }

    #[test]
    fn test_single_file_full_output() {
        let source = tempdir().unwrap();
        let dest = tempdir().unwrap();
        write_dat(
            source.path(),
            "salaries.dat",
            "basic_salary\tallowances\n1000\t100\n3000\t200\n",
        );
        let config = job_config(source.path(), dest.path());

        let outcome = run(&config).unwrap();

        match outcome {
            RunOutcome::Completed {
                files_merged,
                files_skipped,
                ..
            } => {
                assert_eq!(files_merged, 1);
                assert_eq!(files_skipped, 0);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }

        let content = fs::read_to_string(result_path(dest.path())).unwrap();
        assert_eq!(
            content,
            "basic_salary,allowances,gross_salary\n\
             1000,100,1100\n\
             3000,200,3200\n\
             Average Salary: 2000.00,Second Highest Salary: 1000.00,\n"
        );
    }

    #[test]
    fn test_single_row_file_does_not_crash() {
        let source = tempdir().unwrap();
        let dest = tempdir().unwrap();
        write_dat(
            source.path(),
            "solo.dat",
            "basic_salary\tallowances\n500\t50\n",
        );
        let config = job_config(source.path(), dest.path());

        run(&config).unwrap();

        let content = fs::read_to_string(result_path(dest.path())).unwrap();
        assert!(content.contains("Average Salary: 500.00"));
        assert!(content.contains("Second Highest Salary: 500.00"));
        assert!(content.contains("500,50,550"));
    }

    #[test]
    fn test_malformed_file_is_skipped_and_others_survive() {
        let source = tempdir().unwrap();
        let dest = tempdir().unwrap();
        write_dat(
            source.path(),
            "broken.dat",
            "basic_salary\tallowances\n1000\t100\tunexpected\n",
        );
        write_dat(
            source.path(),
            "valid.dat",
            "basic_salary\tallowances\n1000\t100\n3000\t200\n",
        );
        let config = job_config(source.path(), dest.path());

        let outcome = run(&config).unwrap();

        match outcome {
            RunOutcome::Completed {
                files_merged,
                files_skipped,
                ..
            } => {
                assert_eq!(files_merged, 1);
                assert_eq!(files_skipped, 1);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }

        let content = fs::read_to_string(result_path(dest.path())).unwrap();
        assert!(content.contains("1000,100,1100"));
        assert!(content.contains("3000,200,3200"));
    }

    #[test]
    fn test_rows_survive_in_order_before_footer() {
        let source = tempdir().unwrap();
        let dest = tempdir().unwrap();
        write_dat(
            source.path(),
            "ordered.dat",
            "name\tbasic_salary\tallowances\nfirst\t10\t1\nsecond\t20\t2\nthird\t30\t3\n",
        );
        let config = job_config(source.path(), dest.path());

        run(&config).unwrap();

        let content = fs::read_to_string(result_path(dest.path())).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "name,basic_salary,allowances,gross_salary");
        assert_eq!(lines[1], "first,10,1,11");
        assert_eq!(lines[2], "second,20,2,22");
        assert_eq!(lines[3], "third,30,3,33");
        assert!(lines[4].starts_with("Average Salary: 20.00"));
    }

    #[test]
    fn test_rerun_overwrites_with_identical_content() {
        let source = tempdir().unwrap();
        let dest = tempdir().unwrap();
        write_dat(
            source.path(),
            "salaries.dat",
            "basic_salary\tallowances\n1000\t100\n3000\t200\n",
        );
        let config = job_config(source.path(), dest.path());

        run(&config).unwrap();
        let first = fs::read_to_string(result_path(dest.path())).unwrap();

        run(&config).unwrap();
        let second = fs::read_to_string(result_path(dest.path())).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_unparseable_salary_values_become_missing() {
        let source = tempdir().unwrap();
        let dest = tempdir().unwrap();
        write_dat(
            source.path(),
            "gaps.dat",
            "basic_salary\tallowances\nabc\t100\n3000\t200\n",
        );
        let config = job_config(source.path(), dest.path());

        run(&config).unwrap();

        let content = fs::read_to_string(result_path(dest.path())).unwrap();
        // Invalid basic salary leaves the gross cell empty; the mean
        // ignores it entirely.
        assert!(content.contains("abc,100,\n"));
        assert!(content.contains("Average Salary: 3000.00"));
    }

    #[test]
    fn test_missing_required_column_is_an_error() {
        let source = tempdir().unwrap();
        let dest = tempdir().unwrap();
        write_dat(source.path(), "odd.dat", "name\twage\nalice\t1000\n");
        let config = job_config(source.path(), dest.path());

        assert!(run(&config).is_err());
        assert!(!result_path(dest.path()).exists());
    }

    #[test]
    fn test_custom_output_filename() {
        let source = tempdir().unwrap();
        let dest = tempdir().unwrap();
        write_dat(
            source.path(),
            "salaries.dat",
            "basic_salary\tallowances\n500\t50\n",
        );
        let mut config = job_config(source.path(), dest.path());
        config.job.output_filename = "combined.csv".to_string();

        let outcome = run(&config).unwrap();

        match outcome {
            RunOutcome::Completed { output_path, .. } => {
                assert!(output_path.ends_with("combined.csv"));
                assert!(output_path.exists());
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
