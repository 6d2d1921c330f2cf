//! Ordering the gradebook.
//!
//! Sorting by name is a bubble sort over the collection itself. It compares
//! names case-insensitively, only swaps strictly out-of-order neighbours (so
//! it is stable), and stops after the first pass without a swap.

use std::cmp::Ordering;

use tracing::debug;

use super::Gradebook;
use crate::student::Student;

/// Direction of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl SortOrder {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

fn compare_names(a: &Student, b: &Student) -> Ordering {
    a.name().to_lowercase().cmp(&b.name().to_lowercase())
}

/// Bubble sort with early exit. Returns the number of passes made.
fn bubble_sort_by<T>(items: &mut [T], mut compare: impl FnMut(&T, &T) -> Ordering) -> usize {
    let n = items.len();
    let mut passes = 0;
    for i in 0..n {
        passes += 1;
        let mut swapped = false;
        for j in 0..n - i - 1 {
            if compare(&items[j], &items[j + 1]) == Ordering::Greater {
                items.swap(j, j + 1);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
    passes
}

impl Gradebook {
    /// Reorder students by name, ignoring case.
    pub fn sort_by_name(&mut self, order: SortOrder) {
        let passes = bubble_sort_by(&mut self.students, |a, b| {
            order.apply(compare_names(a, b))
        });
        debug!(students = self.students.len(), passes, ?order, "sorted by name");
    }

    /// Reorder students by overall average.
    ///
    /// [`SortOrder::Descending`] puts the best average first. Students with
    /// equal averages keep their relative order.
    pub fn sort_by_average(&mut self, order: SortOrder) {
        self.students.sort_by(|a, b| {
            order.apply(a.overall_average().total_cmp(&b.overall_average()))
        });
        debug!(students = self.students.len(), ?order, "sorted by average");
    }

    /// `(name, overall average)` pairs, best first, for graded students only.
    #[must_use]
    pub fn ranking(&self) -> Vec<(&str, f64)> {
        rank(
            self.students
                .iter()
                .filter(|s| s.has_grades())
                .map(|s| (s.name(), s.overall_average())),
            SortOrder::Descending,
        )
    }

    /// `(name, subject average)` pairs, best first, for students with a grade
    /// in the subject.
    #[must_use]
    pub fn subject_ranking(&self, subject: &str) -> Vec<(&str, f64)> {
        self.subject_ranking_by(subject, SortOrder::Descending)
    }

    /// Like [`Gradebook::subject_ranking`] in either direction. Ties keep
    /// collection order both ways.
    #[must_use]
    pub fn subject_ranking_by(&self, subject: &str, order: SortOrder) -> Vec<(&str, f64)> {
        rank(
            self.students
                .iter()
                .filter(|s| !s.subject_grades(subject).is_empty())
                .map(|s| (s.name(), s.subject_average(subject))),
            order,
        )
    }
}

fn rank<'a>(
    entries: impl Iterator<Item = (&'a str, f64)>,
    order: SortOrder,
) -> Vec<(&'a str, f64)> {
    let mut ranked: Vec<_> = entries.collect();
    ranked.sort_by(|a, b| order.apply(a.1.total_cmp(&b.1)));
    ranked
}
