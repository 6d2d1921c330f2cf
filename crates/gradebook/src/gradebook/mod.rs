//! The gradebook: an ordered, in-memory collection of students.
//!
//! Students are kept in insertion order and keyed by name. Only the explicit
//! sort operations reorder the collection. Searching, ranking and
//! statistics live in submodules and borrow from the collection rather than
//! copying records out of it.

mod search;
mod sort;
mod statistics;

pub use search::{GradeRange, SearchResults};
pub use sort::SortOrder;
pub use statistics::{GradeBand, GradeDistribution, SubjectStatistics};

use tracing::debug;

use crate::error::{Error, Result};
use crate::student::Student;

/// A collection of students sharing one curriculum.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradebook {
    subjects: Vec<String>,
    students: Vec<Student>,
}

impl Gradebook {
    /// Create an empty gradebook for the given curriculum.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the curriculum has no usable subject.
    pub fn new<S: AsRef<str>>(subjects: &[S]) -> Result<Self> {
        let mut curriculum: Vec<String> = Vec::with_capacity(subjects.len());
        for subject in subjects {
            let subject = subject.as_ref().trim();
            if !subject.is_empty() && !curriculum.iter().any(|s| s == subject) {
                curriculum.push(subject.to_string());
            }
        }
        if curriculum.is_empty() {
            return Err(Error::invalid_input("the curriculum needs at least one subject"));
        }
        Ok(Self {
            subjects: curriculum,
            students: Vec::new(),
        })
    }

    /// The curriculum, in order.
    #[must_use]
    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    /// Whether the subject is part of the curriculum.
    #[must_use]
    pub fn has_subject(&self, subject: &str) -> bool {
        self.subjects.iter().any(|s| s == subject)
    }

    /// Fail with [`Error::SubjectNotFound`] unless the subject is taught here.
    ///
    /// # Errors
    ///
    /// See above.
    pub fn require_subject(&self, subject: &str) -> Result<()> {
        if self.has_subject(subject) {
            Ok(())
        } else {
            Err(Error::subject_not_found(subject))
        }
    }

    /// Append a student.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateStudent`] if a student with the same name is
    /// already present.
    pub fn add(&mut self, student: Student) -> Result<()> {
        if self.contains(student.name()) {
            return Err(Error::DuplicateStudent {
                name: student.name().to_string(),
            });
        }
        debug!(student = student.name(), "adding student");
        self.students.push(student);
        Ok(())
    }

    /// Create a student for this curriculum and append it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`] for a blank name and
    /// [`Error::DuplicateStudent`] for a name already present.
    pub fn add_student(&mut self, name: &str) -> Result<&Student> {
        let student = Student::new(name, &self.subjects)?;
        self.add(student)?;
        let last = self.students.len() - 1;
        Ok(&self.students[last])
    }

    /// Remove a student by name, returning the removed record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StudentNotFound`] if no student has that name; the
    /// collection is left untouched.
    pub fn remove(&mut self, name: &str) -> Result<Student> {
        let index = self.position(name)?;
        debug!(student = name, "removing student");
        Ok(self.students.remove(index))
    }

    fn position(&self, name: &str) -> Result<usize> {
        self.students
            .iter()
            .position(|s| s.name() == name)
            .ok_or_else(|| Error::student_not_found(name))
    }

    /// Look up a student by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.name() == name)
    }

    /// Look up a student by exact name for modification.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Student> {
        self.students.iter_mut().find(|s| s.name() == name)
    }

    /// Look up a student, failing with [`Error::StudentNotFound`].
    ///
    /// # Errors
    ///
    /// See above.
    pub fn student(&self, name: &str) -> Result<&Student> {
        self.get(name).ok_or_else(|| Error::student_not_found(name))
    }

    /// Whether a student with this exact name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Record a grade for a student.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StudentNotFound`], [`Error::SubjectNotFound`] or
    /// [`Error::InvalidGrade`].
    pub fn add_grade(&mut self, name: &str, subject: &str, grade: f64) -> Result<()> {
        self.require_subject(subject)?;
        let student = self
            .get_mut(name)
            .ok_or_else(|| Error::student_not_found(name))?;
        student.add_grade(subject, grade)
    }

    /// Number of students.
    #[must_use]
    pub fn len(&self) -> usize {
        self.students.len()
    }

    /// Whether the gradebook has no students.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Fail with [`Error::EmptyData`] when there are no students.
    ///
    /// # Errors
    ///
    /// See above.
    pub fn require_students(&self, operation: &str) -> Result<()> {
        if self.is_empty() {
            Err(Error::empty_data(operation))
        } else {
            Ok(())
        }
    }

    /// Students in their current order.
    pub fn iter(&self) -> std::slice::Iter<'_, Student> {
        self.students.iter()
    }

    /// Student names in their current order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.students.iter().map(Student::name)
    }

    /// Number of grades recorded across all students.
    #[must_use]
    pub fn total_grade_count(&self) -> usize {
        self.students.iter().map(Student::grade_count).sum()
    }
}

impl<'a> IntoIterator for &'a Gradebook {
    type Item = &'a Student;
    type IntoIter = std::slice::Iter<'a, Student>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
