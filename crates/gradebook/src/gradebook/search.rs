//! Searching the gradebook by name, performance category and grade range.
//!
//! Name matching is case-insensitive and tiered: exact matches, then names
//! containing the term, then names that merely look alike. All searches
//! return students in collection order and never fail on an empty result.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use tracing::trace;

use super::Gradebook;
use crate::error::{Error, Result};
use crate::student::{PerformanceCategory, Student, MAX_GRADE, MIN_GRADE};

/// Name search results, split by how closely each name matched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults<'a> {
    /// Names equal to the term, ignoring case.
    pub exact: Vec<&'a Student>,
    /// Names containing the term.
    pub partial: Vec<&'a Student>,
    /// Names close to the term (typos, shared prefixes).
    pub similar: Vec<&'a Student>,
}

impl<'a> SearchResults<'a> {
    /// Whether nothing matched at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.partial.is_empty() && self.similar.is_empty()
    }

    /// Total number of matches across tiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.exact.len() + self.partial.len() + self.similar.len()
    }

    /// Flatten into a single list, best tier first.
    #[must_use]
    pub fn ranked(self) -> Vec<&'a Student> {
        let mut all = self.exact;
        all.extend(self.partial);
        all.extend(self.similar);
        all
    }
}

/// An inclusive range of averages, such as `80-90`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeRange {
    min: f64,
    max: f64,
}

impl GradeRange {
    /// Create a range, checking `MIN_GRADE <= min <= max <= MAX_GRADE`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] otherwise.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        let in_bounds = |v: f64| (MIN_GRADE..=MAX_GRADE).contains(&v);
        if !in_bounds(min) || !in_bounds(max) || min > max {
            return Err(Error::InvalidRange {
                input: format!("{min}-{max}"),
            });
        }
        Ok(Self { min, max })
    }

    /// Lower bound.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Whether the value lies within the range, bounds included.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

fn range_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*(\d+(?:\.\d+)?)\s*-\s*(\d+(?:\.\d+)?)\s*$")
            .expect("grade range pattern is valid")
    })
}

impl FromStr for GradeRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidRange {
            input: s.trim().to_string(),
        };
        let caps = range_pattern().captures(s).ok_or_else(invalid)?;
        let min: f64 = caps[1].parse().map_err(|_| invalid())?;
        let max: f64 = caps[2].parse().map_err(|_| invalid())?;
        Self::new(min, max).map_err(|_| invalid())
    }
}

impl fmt::Display for GradeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Loose comparison of two lowercase names.
///
/// Names of very different length never match. Otherwise they match when
/// one contains the other or when they share their first three characters.
fn is_similar(name: &str, term: &str) -> bool {
    let name_len = name.chars().count();
    let term_len = term.chars().count();
    if name_len.abs_diff(term_len) > 2 {
        return false;
    }
    if name.contains(term) || term.contains(name) {
        return true;
    }
    name_len >= 3 && term_len >= 3 && name.chars().take(3).eq(term.chars().take(3))
}

impl Gradebook {
    /// Search names, returning exact, partial and similar matches separately.
    ///
    /// A blank term matches nothing.
    #[must_use]
    pub fn search(&self, term: &str) -> SearchResults<'_> {
        let term = term.trim().to_lowercase();
        let mut results = SearchResults::default();
        if term.is_empty() {
            return results;
        }

        for student in &self.students {
            let name = student.name().to_lowercase();
            if name == term {
                results.exact.push(student);
            } else if name.contains(&term) {
                results.partial.push(student);
            } else if is_similar(&name, &term) {
                results.similar.push(student);
            }
        }
        trace!(
            term = %term,
            exact = results.exact.len(),
            partial = results.partial.len(),
            similar = results.similar.len(),
            "name search"
        );
        results
    }

    /// Students whose name equals `name`, ignoring case.
    #[must_use]
    pub fn search_exact(&self, name: &str) -> Vec<&Student> {
        self.search(name).exact
    }

    /// Students whose name contains or resembles `name`, containing first.
    #[must_use]
    pub fn search_similar(&self, name: &str) -> Vec<&Student> {
        let SearchResults {
            partial, similar, ..
        } = self.search(name);
        let mut matches = partial;
        matches.extend(similar);
        matches
    }

    /// Students in the given performance category.
    #[must_use]
    pub fn search_by_category(&self, category: PerformanceCategory) -> Vec<&Student> {
        self.students
            .iter()
            .filter(|s| s.performance_category() == category)
            .collect()
    }

    /// Students whose overall average lies in `min..=max`.
    ///
    /// An inverted range matches nothing.
    #[must_use]
    pub fn search_by_range(&self, min: f64, max: f64) -> Vec<&Student> {
        self.students
            .iter()
            .filter(|s| {
                let average = s.overall_average();
                min <= average && average <= max
            })
            .collect()
    }
}
