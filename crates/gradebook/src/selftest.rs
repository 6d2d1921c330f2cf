//! Built-in self-checks, run from the menu or with `gradebook test`.
//!
//! Each check builds its own small gradebook, so the checks never touch the
//! data the user is working with.

use std::io::{self, Write};

use tracing::{debug, warn};

use crate::config::default_subjects;
use crate::error::{Error, Result};
use crate::gradebook::{Gradebook, SortOrder};
use crate::student::{parse_grade, Student};

/// Outcome of a self-test run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestSummary {
    /// Checks that passed.
    pub passed: usize,
    /// Checks that failed.
    pub failed: usize,
    /// Description of every failure.
    pub errors: Vec<String>,
}

impl TestSummary {
    /// Whether every check passed.
    #[must_use]
    pub fn success(&self) -> bool {
        self.failed == 0
    }

    /// Number of checks run.
    #[must_use]
    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    /// Percentage of checks that passed.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn success_rate(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.passed as f64 / self.total() as f64 * 100.0
        }
    }

    fn record(&mut self, name: &str, outcome: std::result::Result<(), String>) {
        match outcome {
            Ok(()) => {
                debug!(check = name, "self-test passed");
                self.passed += 1;
            }
            Err(reason) => {
                warn!(check = name, %reason, "self-test failed");
                self.failed += 1;
                self.errors.push(format!("{name}: {reason}"));
            }
        }
    }

    /// Print the totals and any failures.
    ///
    /// # Errors
    ///
    /// Returns any error from the writer.
    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "Test Results:")?;
        writeln!(out, "  Passed: {}", self.passed)?;
        writeln!(out, "  Failed: {}", self.failed)?;
        writeln!(out, "  Success rate: {:.1}%", self.success_rate())?;
        if !self.errors.is_empty() {
            writeln!(out, "Failures:")?;
            for error in &self.errors {
                writeln!(out, "  - {error}")?;
            }
        }
        Ok(())
    }
}

type Check = fn() -> std::result::Result<(), String>;

const CHECKS: &[(&str, Check)] = &[
    ("missing student lookup", check_missing_student),
    ("duplicate student", check_duplicate_student),
    ("grade boundaries", check_grade_boundaries),
    ("bubble sort by name", check_bubble_sort),
    ("name search tiers", check_search_tiers),
    ("empty gradebook", check_empty_gradebook),
    ("class average", check_class_average),
];

fn ensure(condition: bool, reason: impl Into<String>) -> std::result::Result<(), String> {
    if condition {
        Ok(())
    } else {
        Err(reason.into())
    }
}

fn book_with(names: &[&str]) -> std::result::Result<Gradebook, String> {
    let mut book = Gradebook::new(&default_subjects()).map_err(|e| e.to_string())?;
    for name in names {
        book.add_student(name).map_err(|e| e.to_string())?;
    }
    Ok(book)
}

fn check_missing_student() -> std::result::Result<(), String> {
    let mut book = book_with(&["Alice"])?;
    ensure(
        book.student("Nobody").is_err_and(|e| e.is_not_found()),
        "lookup of an unknown name did not report StudentNotFound",
    )?;
    ensure(
        book.remove("Nobody").is_err_and(|e| e.is_not_found()),
        "removing an unknown name did not report StudentNotFound",
    )?;
    ensure(book.len() == 1, "failed removal changed the gradebook")
}

fn check_duplicate_student() -> std::result::Result<(), String> {
    let mut book = book_with(&["Alice"])?;
    ensure(
        matches!(book.add_student("Alice"), Err(Error::DuplicateStudent { .. })),
        "second Alice was accepted",
    )
}

fn check_grade_boundaries() -> std::result::Result<(), String> {
    for input in ["0", "50", "100", "75.5"] {
        ensure(parse_grade(input).is_ok(), format!("{input} was rejected"))?;
    }
    for input in ["-1", "101", "invalid"] {
        ensure(
            parse_grade(input).is_err_and(|e| e.is_invalid_grade()),
            format!("{input} was accepted"),
        )?;
    }
    let mut student = Student::new("Alice", &default_subjects()).map_err(|e| e.to_string())?;
    ensure(
        student.add_grade("Mathematics", 100.5).is_err(),
        "out-of-range grade was stored",
    )?;
    ensure(student.grade_count() == 0, "rejected grade changed the student")
}

fn check_bubble_sort() -> std::result::Result<(), String> {
    let mut book = book_with(&["Charlie", "Alice", "Bob", "Eve", "David"])?;
    book.sort_by_name(SortOrder::Ascending);
    let names: Vec<&str> = book.names().collect();
    ensure(
        names == ["Alice", "Bob", "Charlie", "David", "Eve"],
        format!("ascending order was {names:?}"),
    )?;
    book.sort_by_name(SortOrder::Descending);
    let names: Vec<&str> = book.names().collect();
    ensure(
        names == ["Eve", "David", "Charlie", "Bob", "Alice"],
        format!("descending order was {names:?}"),
    )
}

fn check_search_tiers() -> std::result::Result<(), String> {
    let book = book_with(&["Alice Johnson", "Bob Smith", "Carol Davis"])?;
    ensure(
        book.search_exact("alice johnson").len() == 1,
        "exact search is not case-insensitive",
    )?;
    let partial = book.search("Smith");
    ensure(
        partial.partial.len() == 1 && partial.exact.is_empty(),
        "partial search did not find Bob Smith",
    )?;
    ensure(
        book.search("Nonexistent").is_empty(),
        "unknown term returned matches",
    )
}

fn check_empty_gradebook() -> std::result::Result<(), String> {
    let book = book_with(&[])?;
    ensure(book.ranking().is_empty(), "empty ranking was not empty")?;
    ensure(book.class_average() == 0.0, "empty class average was not 0")?;
    ensure(
        matches!(book.require_students("sorting"), Err(Error::EmptyData { .. })),
        "empty gradebook did not report EmptyData",
    )
}

fn check_class_average() -> std::result::Result<(), String> {
    let mut book = book_with(&["Alice", "Bob", "Carol"])?;
    let grades = [
        ("Alice", "Mathematics", 90.0),
        ("Alice", "English", 80.0),
        ("Bob", "Mathematics", 70.0),
        ("Bob", "English", 60.0),
    ];
    for (name, subject, grade) in grades {
        book.add_grade(name, subject, grade)
            .map_err(|e| e.to_string())?;
    }
    let average = book.class_average();
    ensure(
        (average - 75.0).abs() < 1e-9,
        format!("class average was {average:.2}, expected 75.00"),
    )
}

/// Run every self-check.
#[must_use]
pub fn run() -> TestSummary {
    let mut summary = TestSummary::default();
    for (name, check) in CHECKS {
        summary.record(name, check());
    }
    debug!(passed = summary.passed, failed = summary.failed, "self-tests finished");
    summary
}

/// Run every self-check, printing progress and the summary.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn run_and_report(out: &mut impl Write) -> Result<TestSummary> {
    writeln!(out, "Running self-tests...")?;
    let summary = run();
    summary.render(out)?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_checks_pass() {
        let summary = run();
        assert!(summary.success(), "failures: {:?}", summary.errors);
        assert_eq!(summary.passed, CHECKS.len());
        assert!((summary.success_rate() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_record_failure() {
        let mut summary = TestSummary::default();
        summary.record("ok", Ok(()));
        summary.record("broken", Err("boom".to_string()));
        assert_eq!(summary.total(), 2);
        assert!(!summary.success());
        assert_eq!(summary.errors, vec!["broken: boom".to_string()]);
        assert!((summary.success_rate() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_summary_rate() {
        assert_eq!(TestSummary::default().success_rate(), 0.0);
    }

    #[test]
    fn test_render() {
        let mut summary = TestSummary::default();
        summary.record("broken", Err("boom".to_string()));
        let mut out = Vec::new();
        summary.render(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Failed: 1"));
        assert!(text.contains("  - broken: boom"));
    }

    #[test]
    fn test_run_and_report() {
        let mut out = Vec::new();
        let summary = run_and_report(&mut out).unwrap();
        assert!(summary.success());
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Running self-tests..."));
        assert!(text.contains("Success rate: 100.0%"));
    }
}
