//! Plain-text reports.
//!
//! Every renderer writes to any [`Write`] so the menu, the one-shot commands
//! and the tests share the same output.

use std::io::{self, Write};

use serde::Serialize;

use crate::gradebook::{GradeBand, GradeDistribution, Gradebook, SearchResults, SubjectStatistics};
use crate::student::{PerformanceCategory, Student};

const HEAVY_RULE: &str = "==================================================";
const LIGHT_RULE: &str = "----------------------------------------";

fn join_names(students: &[&Student]) -> String {
    students
        .iter()
        .map(|s| s.name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_grades(grades: &[f64]) -> String {
    grades
        .iter()
        .map(|g| format!("{g:.1}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Per-subject grades, averages and trends for one student.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn student_detail(out: &mut impl Write, student: &Student) -> io::Result<()> {
    writeln!(out, "Detailed Report: {}", student.name())?;
    writeln!(out, "{HEAVY_RULE}")?;

    for subject in student.subjects() {
        let grades = student.subject_grades(subject);
        if grades.is_empty() {
            writeln!(out, "{subject}: No grades available")?;
            continue;
        }
        writeln!(out, "{subject}:")?;
        writeln!(out, "  Grades:  [{}]", format_grades(grades))?;
        writeln!(out, "  Average: {:.2}", student.subject_average(subject))?;
        if let Some((trend, change)) = student.subject_trend(subject) {
            writeln!(out, "  Trend:   {trend} ({change:+.1} points)")?;
        }
    }

    if student.has_grades() {
        writeln!(out)?;
        writeln!(out, "Overall Performance:")?;
        writeln!(out, "  Average:      {:.2}", student.overall_average())?;
        writeln!(out, "  Category:     {}", student.performance_category())?;
        writeln!(out, "  Total Grades: {}", student.grade_count())?;
    } else {
        writeln!(out)?;
        writeln!(out, "No grades available for {}", student.name())?;
    }
    Ok(())
}

/// Numbered listing with average, category and grade count.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn student_list<'a>(
    out: &mut impl Write,
    students: impl IntoIterator<Item = &'a Student>,
) -> io::Result<()> {
    for (i, student) in students.into_iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, student.name())?;
        writeln!(
            out,
            "    Average: {:.2} | {} | Grades: {}",
            student.overall_average(),
            student.performance_category(),
            student.grade_count()
        )?;
    }
    Ok(())
}

/// Numbered names with their overall average.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn name_list<'a>(
    out: &mut impl Write,
    students: impl IntoIterator<Item = &'a Student>,
) -> io::Result<()> {
    for (i, student) in students.into_iter().enumerate() {
        writeln!(
            out,
            "{}. {} (Avg: {:.2})",
            i + 1,
            student.name(),
            student.overall_average()
        )?;
    }
    Ok(())
}

/// The three tiers of a name search.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn search_results(
    out: &mut impl Write,
    term: &str,
    results: &SearchResults<'_>,
) -> io::Result<()> {
    writeln!(out, "Search Results for '{term}':")?;
    writeln!(out, "{LIGHT_RULE}")?;
    if results.is_empty() {
        writeln!(out, "No students found matching your search.")?;
        return Ok(());
    }
    if !results.exact.is_empty() {
        writeln!(out, "Exact matches:   {}", join_names(&results.exact))?;
    }
    if !results.partial.is_empty() {
        writeln!(out, "Partial matches: {}", join_names(&results.partial))?;
    }
    if !results.similar.is_empty() {
        writeln!(out, "Similar matches: {}", join_names(&results.similar))?;
    }
    Ok(())
}

/// Highest, lowest and mean grade of a subject.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn subject_statistics(out: &mut impl Write, stats: &SubjectStatistics) -> io::Result<()> {
    writeln!(out, "Statistics for {}:", stats.subject)?;
    writeln!(out, "{LIGHT_RULE}")?;
    writeln!(out, "Highest grade:        {:.2}", stats.highest)?;
    writeln!(out, "Lowest grade:         {:.2}", stats.lowest)?;
    writeln!(out, "Class average:        {:.2}", stats.average)?;
    writeln!(out, "Total assessments:    {}", stats.total_assessments)?;
    writeln!(
        out,
        "Students with grades: {}/{}",
        stats.students_with_grades, stats.total_students
    )
}

/// Overall class average followed by each subject's average.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn class_averages(out: &mut impl Write, book: &Gradebook) -> io::Result<()> {
    writeln!(out, "Class Averages:")?;
    writeln!(out, "{LIGHT_RULE}")?;
    writeln!(out, "Overall Class Average: {:.2}", book.class_average())?;
    writeln!(out)?;
    writeln!(out, "Subject Averages:")?;
    for subject in book.subjects() {
        writeln!(out, "  {subject}: {:.2}", book.subject_average(subject))?;
    }
    Ok(())
}

/// Numbered `(name, average)` pairs, optionally with each student's category.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn ranking(
    out: &mut impl Write,
    book: &Gradebook,
    entries: &[(&str, f64)],
    with_category: bool,
) -> io::Result<()> {
    if entries.is_empty() {
        return writeln!(out, "No students with grades found!");
    }
    for (i, (name, average)) in entries.iter().enumerate() {
        if with_category {
            let category = book
                .get(name)
                .map_or("Unknown", |s| s.performance_category().as_str());
            writeln!(out, "{}. {name}: {average:.2} ({category})", i + 1)?;
        } else {
            writeln!(out, "{}. {name}: {average:.2}", i + 1)?;
        }
    }
    Ok(())
}

/// Number of bar blocks for a percentage, one per `step` percent.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn bar_len(percentage: f64, step: u32) -> usize {
    (percentage / f64::from(step.max(1))).floor().max(0.0) as usize
}

/// Per-band grade counts with percentages and a bar chart.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn distribution(
    out: &mut impl Write,
    distribution: &GradeDistribution,
    bar_step_percent: u32,
) -> io::Result<()> {
    let total = distribution.total();
    if total == 0 {
        return writeln!(out, "No grades in the system!");
    }
    writeln!(out, "Grade Distribution ({total} total grades):")?;
    writeln!(out, "{HEAVY_RULE}")?;
    for (band, count) in distribution.iter() {
        let percentage = distribution.percentage(band);
        let bar = "█".repeat(bar_len(percentage, bar_step_percent));
        writeln!(out, "{band}: {count} grades ({percentage:.1}%) {bar}")?;
    }
    Ok(())
}

/// A student's place in the class report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedStudent {
    /// Student name.
    pub name: String,
    /// Overall average.
    pub average: f64,
    /// Band of the average.
    pub category: PerformanceCategory,
}

/// Count and share of one grade band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandShare {
    /// The band.
    pub band: GradeBand,
    /// Grades in the band.
    pub count: usize,
    /// Percentage of all grades.
    pub percentage: f64,
}

/// Summary of the whole gradebook, serializable for `report --json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassReport {
    /// Number of students.
    pub students: usize,
    /// Number of grades across all students.
    pub total_grades: usize,
    /// Mean of graded students' overall averages.
    pub class_average: f64,
    /// Statistics for each subject with at least one grade.
    pub subjects: Vec<SubjectStatistics>,
    /// Best overall averages.
    pub top_performers: Vec<RankedStudent>,
    /// Distribution of individual grades.
    pub distribution: Vec<BandShare>,
}

impl ClassReport {
    /// Summarize a gradebook, listing up to `top_n` top performers.
    #[must_use]
    pub fn build(book: &Gradebook, top_n: usize) -> Self {
        let distribution = book.grade_distribution();
        Self {
            students: book.len(),
            total_grades: book.total_grade_count(),
            class_average: book.class_average(),
            subjects: book
                .subjects()
                .iter()
                .filter_map(|s| book.subject_statistics(s))
                .collect(),
            top_performers: book
                .top_performers(top_n)
                .into_iter()
                .map(|(name, average)| RankedStudent {
                    name: name.to_string(),
                    average,
                    category: PerformanceCategory::from_average(average),
                })
                .collect(),
            distribution: distribution
                .iter()
                .map(|(band, count)| BandShare {
                    band,
                    count,
                    percentage: distribution.percentage(band),
                })
                .collect(),
        }
    }

    /// Render the report as text.
    ///
    /// # Errors
    ///
    /// Returns any error from the writer.
    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "CLASS REPORT")?;
        writeln!(out, "{HEAVY_RULE}")?;
        writeln!(out, "Students:      {}", self.students)?;
        writeln!(out, "Total grades:  {}", self.total_grades)?;
        writeln!(out, "Class average: {:.2}", self.class_average)?;

        for stats in &self.subjects {
            writeln!(out)?;
            subject_statistics(out, stats)?;
        }

        writeln!(out)?;
        writeln!(out, "Top {} performers:", self.top_performers.len())?;
        for (i, student) in self.top_performers.iter().enumerate() {
            writeln!(
                out,
                "{}. {}: {:.2} ({})",
                i + 1,
                student.name,
                student.average,
                student.category
            )?;
        }

        writeln!(out)?;
        writeln!(out, "Distribution:")?;
        for share in &self.distribution {
            writeln!(
                out,
                "{}: {} grades ({:.1}%)",
                share.band, share.count, share.percentage
            )?;
        }
        Ok(())
    }
}
