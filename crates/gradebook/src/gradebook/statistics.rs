//! Aggregate statistics over the gradebook.

use std::fmt;

use serde::Serialize;

use super::Gradebook;
use crate::student::{mean, Student};

/// Summary of every grade recorded for one subject.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectStatistics {
    /// Subject name.
    pub subject: String,
    /// Highest single grade.
    pub highest: f64,
    /// Lowest single grade.
    pub lowest: f64,
    /// Mean of all grades.
    pub average: f64,
    /// Number of grades recorded.
    pub total_assessments: usize,
    /// Students with at least one grade in the subject.
    pub students_with_grades: usize,
    /// Students in the gradebook.
    pub total_students: usize,
}

/// Letter band used by the grade distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GradeBand {
    /// 90 to 100.
    A,
    /// 80 up to 90.
    B,
    /// 70 up to 80.
    C,
    /// 60 up to 70.
    D,
    /// Below 60.
    F,
}

impl GradeBand {
    /// All bands, best first.
    pub const ALL: [Self; 5] = [Self::A, Self::B, Self::C, Self::D, Self::F];

    /// Band a single grade.
    #[must_use]
    pub fn from_grade(grade: f64) -> Self {
        if grade >= 90.0 {
            Self::A
        } else if grade >= 80.0 {
            Self::B
        } else if grade >= 70.0 {
            Self::C
        } else if grade >= 60.0 {
            Self::D
        } else {
            Self::F
        }
    }

    /// Label including the grade span, e.g. `A (90-100)`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::A => "A (90-100)",
            Self::B => "B (80-89)",
            Self::C => "C (70-79)",
            Self::D => "D (60-69)",
            Self::F => "F (0-59)",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for GradeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Count of individual grades per band.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GradeDistribution {
    counts: [usize; 5],
}

impl GradeDistribution {
    /// Add one grade to its band.
    pub fn record(&mut self, grade: f64) {
        self.counts[GradeBand::from_grade(grade).index()] += 1;
    }

    /// Grades in a band.
    #[must_use]
    pub fn count(&self, band: GradeBand) -> usize {
        self.counts[band.index()]
    }

    /// Grades across all bands.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Share of all grades falling in a band, as a percentage.
    ///
    /// Returns `0.0` when there are no grades.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self, band: GradeBand) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.count(band) as f64 / total as f64 * 100.0
        }
    }

    /// `(band, count)` pairs, best band first.
    pub fn iter(&self) -> impl Iterator<Item = (GradeBand, usize)> + '_ {
        GradeBand::ALL.into_iter().map(|band| (band, self.count(band)))
    }
}

impl Gradebook {
    /// Statistics for a subject, or `None` if nobody has a grade in it.
    #[must_use]
    pub fn subject_statistics(&self, subject: &str) -> Option<SubjectStatistics> {
        let mut grades = Vec::new();
        let mut students_with_grades = 0;
        for student in &self.students {
            let subject_grades = student.subject_grades(subject);
            if !subject_grades.is_empty() {
                students_with_grades += 1;
                grades.extend_from_slice(subject_grades);
            }
        }
        if grades.is_empty() {
            return None;
        }

        let highest = grades.iter().copied().fold(f64::MIN, f64::max);
        let lowest = grades.iter().copied().fold(f64::MAX, f64::min);
        Some(SubjectStatistics {
            subject: subject.to_string(),
            highest,
            lowest,
            average: mean(grades.iter().copied()),
            total_assessments: grades.len(),
            students_with_grades,
            total_students: self.students.len(),
        })
    }

    /// Mean of every grade recorded for the subject; `0.0` if none.
    #[must_use]
    pub fn subject_average(&self, subject: &str) -> f64 {
        mean(
            self.students
                .iter()
                .flat_map(|s| s.subject_grades(subject).iter().copied()),
        )
    }

    /// Mean of the overall averages of students with at least one grade.
    ///
    /// Returns `0.0` when no student has been graded.
    #[must_use]
    pub fn class_average(&self) -> f64 {
        mean(
            self.students
                .iter()
                .filter(|s| s.has_grades())
                .map(Student::overall_average),
        )
    }

    /// The `n` best overall averages.
    #[must_use]
    pub fn top_performers(&self, n: usize) -> Vec<(&str, f64)> {
        let mut ranking = self.ranking();
        ranking.truncate(n);
        ranking
    }

    /// The `n` best averages in one subject.
    #[must_use]
    pub fn top_performers_in(&self, subject: &str, n: usize) -> Vec<(&str, f64)> {
        let mut ranking = self.subject_ranking(subject);
        ranking.truncate(n);
        ranking
    }

    /// Distribution of every recorded grade over the letter bands.
    #[must_use]
    pub fn grade_distribution(&self) -> GradeDistribution {
        let mut distribution = GradeDistribution::default();
        for grade in self.students.iter().flat_map(|s| s.all_grades()) {
            distribution.record(grade);
        }
        distribution
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::fixture;
    use super::*;

    #[test]
    fn test_class_average_example() {
        let book = fixture(&[("Ann", vec![90.0, 80.0]), ("Bo", vec![70.0, 60.0])]);
        assert!((book.get("Ann").unwrap().overall_average() - 85.0).abs() < 1e-9);
        assert!((book.get("Bo").unwrap().overall_average() - 65.0).abs() < 1e-9);
        assert!((book.class_average() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_class_average_is_mean_of_student_averages() {
        // Ann has three grades and Bo one; a grade-weighted mean would differ.
        let book = fixture(&[("Ann", vec![100.0, 100.0, 100.0]), ("Bo", vec![50.0])]);
        assert!((book.class_average() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_class_average_ignores_ungraded_students() {
        let book = fixture(&[("Ann", vec![80.0]), ("New", vec![])]);
        assert!((book.class_average() - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_class_average_empty() {
        assert_eq!(fixture(&[]).class_average(), 0.0);
        assert_eq!(fixture(&[("New", vec![])]).class_average(), 0.0);
    }

    #[test]
    fn test_subject_statistics() {
        let book = fixture(&[
            ("Ann", vec![90.0, 80.0]),
            ("Bo", vec![70.0]),
            ("Cy", vec![]),
        ]);
        let stats = book.subject_statistics("Mathematics").unwrap();
        assert_eq!(stats.highest, 90.0);
        assert_eq!(stats.lowest, 70.0);
        assert!((stats.average - 80.0).abs() < 1e-9);
        assert_eq!(stats.total_assessments, 2);
        assert_eq!(stats.students_with_grades, 2);
        assert_eq!(stats.total_students, 3);

        let english = book.subject_statistics("English").unwrap();
        assert_eq!(english.students_with_grades, 1);
    }

    #[test]
    fn test_subject_statistics_without_grades() {
        let book = fixture(&[("Ann", vec![90.0])]);
        assert!(book.subject_statistics("Science").is_none());
        assert!(book.subject_statistics("History").is_none());
    }

    #[test]
    fn test_subject_average() {
        let mut book = fixture(&[("Ann", vec![90.0]), ("Bo", vec![60.0])]);
        book.add_grade("Ann", "Mathematics", 60.0).unwrap();
        assert!((book.subject_average("Mathematics") - 70.0).abs() < 1e-9);
        assert_eq!(book.subject_average("Science"), 0.0);
    }

    #[test]
    fn test_top_performers() {
        let book = fixture(&[
            ("Ann", vec![70.0]),
            ("Bo", vec![95.0]),
            ("Cy", vec![85.0]),
            ("Di", vec![]),
        ]);
        assert_eq!(book.top_performers(2), vec![("Bo", 95.0), ("Cy", 85.0)]);
        assert_eq!(book.top_performers(10).len(), 3);
        assert!(book.top_performers(0).is_empty());
    }

    #[test]
    fn test_top_performers_in_subject() {
        let book = fixture(&[("Ann", vec![70.0, 99.0]), ("Bo", vec![95.0])]);
        assert_eq!(book.top_performers_in("English", 5), vec![("Ann", 99.0)]);
        assert_eq!(book.top_performers_in("Mathematics", 1), vec![("Bo", 95.0)]);
    }

    #[test]
    fn test_grade_band_boundaries() {
        assert_eq!(GradeBand::from_grade(100.0), GradeBand::A);
        assert_eq!(GradeBand::from_grade(90.0), GradeBand::A);
        assert_eq!(GradeBand::from_grade(89.9), GradeBand::B);
        assert_eq!(GradeBand::from_grade(80.0), GradeBand::B);
        assert_eq!(GradeBand::from_grade(79.5), GradeBand::C);
        assert_eq!(GradeBand::from_grade(60.0), GradeBand::D);
        assert_eq!(GradeBand::from_grade(59.99), GradeBand::F);
        assert_eq!(GradeBand::from_grade(0.0), GradeBand::F);
    }

    #[test]
    fn test_grade_distribution() {
        let book = fixture(&[("Ann", vec![95.0, 85.0, 75.0]), ("Bo", vec![65.0, 40.0, 92.0])]);
        let distribution = book.grade_distribution();
        assert_eq!(distribution.total(), 6);
        assert_eq!(distribution.count(GradeBand::A), 2);
        assert_eq!(distribution.count(GradeBand::B), 1);
        assert_eq!(distribution.count(GradeBand::C), 1);
        assert_eq!(distribution.count(GradeBand::D), 1);
        assert_eq!(distribution.count(GradeBand::F), 1);
        assert!((distribution.percentage(GradeBand::A) - 100.0 / 3.0).abs() < 1e-9);

        let bands: Vec<GradeBand> = distribution.iter().map(|(band, _)| band).collect();
        assert_eq!(bands, GradeBand::ALL.to_vec());
    }

    #[test]
    fn test_grade_distribution_empty() {
        let distribution = fixture(&[("Ann", vec![])]).grade_distribution();
        assert_eq!(distribution.total(), 0);
        assert_eq!(distribution.percentage(GradeBand::A), 0.0);
    }

    #[test]
    fn test_grade_band_label() {
        assert_eq!(GradeBand::A.to_string(), "A (90-100)");
        assert_eq!(GradeBand::F.label(), "F (0-59)");
    }
}
