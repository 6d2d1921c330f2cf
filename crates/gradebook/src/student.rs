//! Student records.
//!
//! A [`Student`] holds the grades recorded for each subject of the curriculum
//! it was created with. Every grade is validated on the way in, so the
//! averages derived from a student are always computed over values in
//! `0..=100`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{Error, Result};

/// Lowest accepted grade.
pub const MIN_GRADE: f64 = 0.0;

/// Highest accepted grade.
pub const MAX_GRADE: f64 = 100.0;

/// Check that a grade lies within [`MIN_GRADE`]..=[`MAX_GRADE`].
///
/// # Errors
///
/// Returns [`Error::InvalidGrade`] for values outside the range and for NaN.
pub fn validate_grade(grade: f64) -> Result<f64> {
    if grade.is_nan() {
        return Err(Error::invalid_grade(grade, "grade must be a number"));
    }
    if !(MIN_GRADE..=MAX_GRADE).contains(&grade) {
        return Err(Error::invalid_grade(
            grade,
            "grade must be between 0 and 100",
        ));
    }
    // Folds -0 into 0.
    Ok(grade + 0.0)
}

/// Parse a grade typed at the console.
///
/// # Errors
///
/// Returns [`Error::InvalidGrade`] if the text is not a number or the number
/// is out of range.
pub fn parse_grade(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    let grade: f64 = trimmed
        .parse()
        .map_err(|_| Error::invalid_grade(trimmed, "grade must be a number"))?;
    validate_grade(grade)
}

/// Arithmetic mean, or `0.0` for an empty input.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Qualitative band derived from a student's overall average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceCategory {
    /// Average of 90 or above.
    Excellent,
    /// Average of 80 or above.
    VeryGood,
    /// Average of 70 or above.
    Good,
    /// Average of 60 or above.
    NeedsImprovement,
    /// Average below 60.
    Poor,
}

impl PerformanceCategory {
    /// All categories, best first.
    pub const ALL: [Self; 5] = [
        Self::Excellent,
        Self::VeryGood,
        Self::Good,
        Self::NeedsImprovement,
        Self::Poor,
    ];

    /// Band an average into a category.
    #[must_use]
    pub fn from_average(average: f64) -> Self {
        if average >= 90.0 {
            Self::Excellent
        } else if average >= 80.0 {
            Self::VeryGood
        } else if average >= 70.0 {
            Self::Good
        } else if average >= 60.0 {
            Self::NeedsImprovement
        } else {
            Self::Poor
        }
    }

    /// Human-readable name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::VeryGood => "Very Good",
            Self::Good => "Good",
            Self::NeedsImprovement => "Needs Improvement",
            Self::Poor => "Poor",
        }
    }
}

impl fmt::Display for PerformanceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PerformanceCategory {
    type Err = Error;

    /// Accepts the display names in any case, with spaces, `_` or `-`
    /// between words.
    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| if c == '_' || c == '-' { ' ' } else { c })
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        Self::ALL
            .into_iter()
            .find(|category| category.as_str().to_lowercase() == normalized)
            .ok_or_else(|| Error::invalid_input(format!("unknown performance category '{s}'")))
    }
}

/// Direction of a student's grades in one subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    /// The latest grade is higher than the first.
    Improving,
    /// The latest grade is lower than the first.
    Declining,
    /// The latest grade equals the first.
    Stable,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Improving => write!(f, "Improving"),
            Self::Declining => write!(f, "Declining"),
            Self::Stable => write!(f, "Stable"),
        }
    }
}

/// Grades recorded for one subject.
#[derive(Debug, Clone, PartialEq)]
struct SubjectGrades {
    subject: String,
    grades: Vec<f64>,
}

/// A student and their grades, keyed by subject.
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    name: String,
    subjects: Vec<SubjectGrades>,
}

impl Student {
    /// Create a student with an empty grade list for every subject.
    ///
    /// The name is trimmed. Repeated subject names are collapsed so that each
    /// subject appears once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`] if the name is blank and
    /// [`Error::InvalidInput`] if no subject is given.
    pub fn new<S: AsRef<str>>(name: &str, subjects: &[S]) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidName);
        }

        let mut records: Vec<SubjectGrades> = Vec::with_capacity(subjects.len());
        for subject in subjects {
            let subject = subject.as_ref().trim();
            if subject.is_empty() || records.iter().any(|r| r.subject == subject) {
                continue;
            }
            records.push(SubjectGrades {
                subject: subject.to_string(),
                grades: Vec::new(),
            });
        }
        if records.is_empty() {
            return Err(Error::invalid_input("a student needs at least one subject"));
        }

        Ok(Self {
            name: name.to_string(),
            subjects: records,
        })
    }

    /// The student's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Subject names, in curriculum order.
    pub fn subjects(&self) -> impl Iterator<Item = &str> {
        self.subjects.iter().map(|r| r.subject.as_str())
    }

    /// Whether the subject is part of this student's curriculum.
    #[must_use]
    pub fn has_subject(&self, subject: &str) -> bool {
        self.record(subject).is_some()
    }

    fn record(&self, subject: &str) -> Option<&SubjectGrades> {
        self.subjects.iter().find(|r| r.subject == subject)
    }

    fn record_mut(&mut self, subject: &str) -> Result<&mut SubjectGrades> {
        self.subjects
            .iter_mut()
            .find(|r| r.subject == subject)
            .ok_or_else(|| Error::subject_not_found(subject))
    }

    /// Record a grade for a subject.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SubjectNotFound`] for a subject outside the
    /// curriculum and [`Error::InvalidGrade`] for a grade outside `0..=100`.
    pub fn add_grade(&mut self, subject: &str, grade: f64) -> Result<()> {
        let record = self.record_mut(subject)?;
        let grade = validate_grade(grade)?;
        record.grades.push(grade);
        trace!(student = %self.name, subject, grade, "grade recorded");
        Ok(())
    }

    /// Replace a previously recorded grade, returning the old value.
    ///
    /// # Errors
    ///
    /// Fails like [`Student::add_grade`], and with
    /// [`Error::GradeIndexOutOfRange`] if no grade exists at `index`.
    pub fn update_grade(&mut self, subject: &str, index: usize, grade: f64) -> Result<f64> {
        let record = self.record_mut(subject)?;
        let grade = validate_grade(grade)?;
        let slot = record
            .grades
            .get_mut(index)
            .ok_or_else(|| Error::GradeIndexOutOfRange {
                subject: subject.to_string(),
                index,
            })?;
        Ok(std::mem::replace(slot, grade))
    }

    /// Remove one recorded grade, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SubjectNotFound`] or [`Error::GradeIndexOutOfRange`].
    pub fn remove_grade(&mut self, subject: &str, index: usize) -> Result<f64> {
        let record = self.record_mut(subject)?;
        if index >= record.grades.len() {
            return Err(Error::GradeIndexOutOfRange {
                subject: subject.to_string(),
                index,
            });
        }
        Ok(record.grades.remove(index))
    }

    /// Drop every grade of a subject, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SubjectNotFound`] for a subject outside the curriculum.
    pub fn clear_subject(&mut self, subject: &str) -> Result<usize> {
        let record = self.record_mut(subject)?;
        let removed = record.grades.len();
        record.grades.clear();
        Ok(removed)
    }

    /// Grades for one subject; empty for unknown subjects.
    #[must_use]
    pub fn subject_grades(&self, subject: &str) -> &[f64] {
        self.record(subject).map_or(&[], |r| r.grades.as_slice())
    }

    /// Every grade across all subjects.
    pub fn all_grades(&self) -> impl Iterator<Item = f64> + '_ {
        self.subjects.iter().flat_map(|r| r.grades.iter().copied())
    }

    /// Total number of recorded grades.
    #[must_use]
    pub fn grade_count(&self) -> usize {
        self.subjects.iter().map(|r| r.grades.len()).sum()
    }

    /// Whether at least one grade has been recorded.
    #[must_use]
    pub fn has_grades(&self) -> bool {
        self.subjects.iter().any(|r| !r.grades.is_empty())
    }

    /// Mean of one subject's grades, `0.0` if there are none.
    #[must_use]
    pub fn subject_average(&self, subject: &str) -> f64 {
        mean(self.subject_grades(subject).iter().copied())
    }

    /// Mean of every recorded grade, `0.0` if there are none.
    #[must_use]
    pub fn overall_average(&self) -> f64 {
        mean(self.all_grades())
    }

    /// Band of the overall average.
    #[must_use]
    pub fn performance_category(&self) -> PerformanceCategory {
        PerformanceCategory::from_average(self.overall_average())
    }

    /// Compare the latest grade in a subject to the first one.
    ///
    /// Returns `None` when fewer than two grades are recorded.
    #[must_use]
    pub fn subject_trend(&self, subject: &str) -> Option<(Trend, f64)> {
        let grades = self.subject_grades(subject);
        let (first, last) = match grades {
            [first, .., last] => (*first, *last),
            _ => return None,
        };
        let change = last - first;
        let trend = if change > 0.0 {
            Trend::Improving
        } else if change < 0.0 {
            Trend::Declining
        } else {
            Trend::Stable
        };
        Some((trend, change))
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} grades)", self.name, self.grade_count())
    }
}
