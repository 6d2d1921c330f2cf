//! The interactive console menu.
//!
//! [`Menu`] is generic over its input and output so the whole loop can be
//! driven from a script in tests. Gradebook errors raised by an option are
//! reported and the loop carries on, as is a line that is not valid UTF-8.
//! Only failing console I/O ends it, and end-of-input is treated as a request
//! to exit.

use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::gradebook::{GradeRange, Gradebook, SortOrder};
use crate::report;
use crate::selftest;
use crate::student::{parse_grade, PerformanceCategory, Student};

const RULE: &str = "======================================================================";

/// Whether the loop should keep going after an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

fn is_eof(err: &Error) -> bool {
    matches!(err, Error::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof)
}

/// Line-oriented menu over a gradebook.
#[derive(Debug)]
pub struct Menu<R, W> {
    book: Gradebook,
    config: Config,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    /// Create a menu reading choices from `input` and writing to `output`.
    pub fn new(book: Gradebook, config: Config, input: R, output: W) -> Self {
        Self {
            book,
            config,
            input,
            output,
        }
    }

    /// The gradebook being edited.
    pub fn gradebook(&self) -> &Gradebook {
        &self.book
    }

    /// Consume the menu, returning the gradebook.
    pub fn into_gradebook(self) -> Gradebook {
        self.book
    }

    /// Run until the user exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading from or writing to the console fails.
    pub fn run(&mut self) -> Result<()> {
        info!(students = self.book.len(), "interactive session started");
        loop {
            self.show_menu()?;
            let outcome = self
                .prompt("\nEnter your choice (1-16): ")
                .and_then(|choice| self.dispatch(&choice));
            match outcome {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(e) if is_eof(&e) => {
                    debug!("end of input");
                    break;
                }
                Err(e) if e.is_user_error() => {
                    debug!(error = %e, "operation rejected");
                    writeln!(self.output, "{}: {e}", e.label())?;
                    writeln!(self.output, "Please try again with valid inputs.")?;
                }
                Err(e) => return Err(e),
            }
            writeln!(self.output)?;
        }
        writeln!(
            self.output,
            "\nThank you for using the Student Grade Management System!"
        )?;
        info!("interactive session ended");
        Ok(())
    }

    fn show_menu(&mut self) -> Result<()> {
        let out = &mut self.output;
        writeln!(out, "{RULE}")?;
        writeln!(out, "STUDENT GRADE MANAGEMENT SYSTEM")?;
        writeln!(out, "{RULE}")?;
        for line in [
            "1.  Add new student",
            "2.  Remove student",
            "3.  Search for student (Basic)",
            "4.  Advanced student search",
            "5.  Add grade to student",
            "6.  View student details",
            "7.  View all students",
            "8.  View subject statistics",
            "9.  View class averages",
            "10. Sort students by performance",
            "11. Sort students by name (Bubble Sort)",
            "12. View top performers",
            "13. View grade distribution",
            "14. Run comprehensive tests",
            "15. Edit student grades",
            "16. Exit",
        ] {
            writeln!(out, "{line}")?;
        }
        writeln!(out, "{RULE}")?;
        Ok(())
    }

    /// Print a prompt and read one trimmed line.
    fn prompt(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{message}")?;
        self.output.flush()?;
        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
        }
        let line = String::from_utf8(raw)
            .map_err(|_| Error::invalid_input("input line is not valid UTF-8"))?;
        Ok(line.trim().to_string())
    }

    fn prompt_index(&mut self, message: &str) -> Result<usize> {
        let text = self.prompt(message)?;
        text.parse()
            .map_err(|_| Error::invalid_input(format!("'{text}' is not a grade index")))
    }

    fn prompt_subject(&mut self) -> Result<String> {
        writeln!(
            self.output,
            "Available subjects: {}",
            self.book.subjects().join(", ")
        )?;
        let subject = self.prompt("Enter subject: ")?;
        self.book.require_subject(&subject)?;
        Ok(subject)
    }

    fn dispatch(&mut self, choice: &str) -> Result<Flow> {
        debug!(choice, "menu choice");
        match choice {
            "1" => self.add_student()?,
            "2" => self.remove_student()?,
            "3" => self.search_student()?,
            "4" => self.advanced_search()?,
            "5" => self.add_grade()?,
            "6" => self.student_details()?,
            "7" => self.view_all()?,
            "8" => self.subject_statistics()?,
            "9" => self.class_averages()?,
            "10" => self.sort_by_performance()?,
            "11" => self.sort_by_name()?,
            "12" => self.top_performers()?,
            "13" => self.distribution()?,
            "14" => self.self_tests()?,
            "15" => self.edit_grades()?,
            "16" => return Ok(Flow::Exit),
            _ => writeln!(
                self.output,
                "Invalid choice! Please enter a number between 1-16."
            )?,
        }
        Ok(Flow::Continue)
    }

    fn add_student(&mut self) -> Result<()> {
        let name = self.prompt("Enter student name: ")?;
        let name = self.book.add_student(&name)?.name().to_string();
        writeln!(self.output, "Added student '{name}'")?;
        Ok(())
    }

    fn remove_student(&mut self) -> Result<()> {
        self.book.require_students("student removal")?;
        let name = self.prompt("Enter student name to remove: ")?;
        if name.is_empty() {
            return Err(Error::InvalidName);
        }
        self.book.remove(&name)?;
        writeln!(self.output, "Removed student '{name}'")?;
        Ok(())
    }

    fn search_student(&mut self) -> Result<()> {
        self.book.require_students("student search")?;
        let term = self.prompt("Enter student name to search: ")?;
        if term.is_empty() {
            return Err(Error::invalid_input("search term cannot be empty"));
        }
        let results = self.book.search(&term);
        writeln!(self.output)?;
        report::search_results(&mut self.output, &term, &results)?;
        if results.is_empty() {
            let names: Vec<&str> = self.book.names().collect();
            writeln!(self.output, "Available students: {}", names.join(", "))?;
        }
        Ok(())
    }

    fn advanced_search(&mut self) -> Result<()> {
        self.book.require_students("advanced search")?;
        writeln!(self.output, "\nAdvanced Search Options:")?;
        writeln!(self.output, "1. Search by name")?;
        writeln!(self.output, "2. Search by performance category")?;
        writeln!(self.output, "3. Search by grade range")?;

        let matches = match self.prompt("Enter search type (1-3): ")?.as_str() {
            "1" => {
                let term = self.prompt("Enter student name to search: ")?;
                self.book.search(&term).ranked()
            }
            "2" => {
                writeln!(
                    self.output,
                    "Performance categories: Excellent, Very Good, Good, Needs Improvement, Poor"
                )?;
                let category: PerformanceCategory =
                    self.prompt("Enter performance category: ")?.parse()?;
                self.book.search_by_category(category)
            }
            "3" => {
                writeln!(
                    self.output,
                    "Enter grade range (e.g., '80-90' for averages between 80 and 90):"
                )?;
                let range: GradeRange = self.prompt("Grade range: ")?.parse()?;
                self.book.search_by_range(range.min(), range.max())
            }
            _ => {
                writeln!(self.output, "Invalid search type!")?;
                return Ok(());
            }
        };

        writeln!(self.output, "\nAdvanced Search Results:")?;
        if matches.is_empty() {
            writeln!(self.output, "No students found matching your criteria.")?;
        } else {
            report::name_list(&mut self.output, matches)?;
        }
        Ok(())
    }

    fn add_grade(&mut self) -> Result<()> {
        self.book.require_students("grade addition")?;
        let name = self.prompt("Enter student name: ")?;
        self.book.student(&name)?;
        let subject = self.prompt_subject()?;
        let grade = parse_grade(&self.prompt("Enter grade (0-100): ")?)?;
        self.book.add_grade(&name, &subject, grade)?;
        writeln!(self.output, "Added grade {grade} to {name}'s {subject}")?;
        Ok(())
    }

    fn student_details(&mut self) -> Result<()> {
        self.book.require_students("viewing student details")?;
        let name = self.prompt("Enter student name: ")?;
        let student = self.book.student(&name)?;
        writeln!(self.output)?;
        report::student_detail(&mut self.output, student)?;
        Ok(())
    }

    fn view_all(&mut self) -> Result<()> {
        self.book.require_students("viewing all students")?;
        writeln!(self.output, "\nView All Students:")?;
        writeln!(self.output, "1. Default order")?;
        writeln!(self.output, "2. Sorted by name (A-Z)")?;
        writeln!(self.output, "3. Sorted by name (Z-A)")?;
        match self.prompt("Choose display option (1-3): ")?.as_str() {
            "1" => {}
            "2" => self.book.sort_by_name(SortOrder::Ascending),
            "3" => self.book.sort_by_name(SortOrder::Descending),
            _ => writeln!(self.output, "Invalid choice! Using default order.")?,
        }
        writeln!(self.output, "\nAll Students ({}):", self.book.len())?;
        report::student_list(&mut self.output, &self.book)?;
        Ok(())
    }

    fn subject_statistics(&mut self) -> Result<()> {
        self.book.require_students("viewing subject statistics")?;
        let subject = self.prompt_subject()?;
        match self.book.subject_statistics(&subject) {
            Some(stats) => {
                writeln!(self.output)?;
                report::subject_statistics(&mut self.output, &stats)?;
            }
            None => writeln!(self.output, "No grade data available for {subject}")?,
        }
        Ok(())
    }

    fn class_averages(&mut self) -> Result<()> {
        self.book.require_students("viewing class averages")?;
        writeln!(self.output)?;
        report::class_averages(&mut self.output, &self.book)?;
        Ok(())
    }

    fn sort_by_performance(&mut self) -> Result<()> {
        self.book.require_students("sorting students")?;
        writeln!(self.output, "Sort Students by Performance:")?;
        writeln!(self.output, "1. Overall average (High to Low)")?;
        writeln!(self.output, "2. Overall average (Low to High)")?;
        writeln!(self.output, "3. Subject average (High to Low)")?;
        writeln!(self.output, "4. Subject average (Low to High)")?;

        let choice = self.prompt("Enter choice (1-4): ")?;
        let order = if choice == "1" || choice == "3" {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        };
        let (entries, title): (Vec<(&str, f64)>, String) = match choice.as_str() {
            "1" | "2" => {
                // Reorders the collection itself; ungraded students stay out of the listing.
                self.book.sort_by_average(order);
                let entries = self
                    .book
                    .iter()
                    .filter(|s| s.has_grades())
                    .map(|s| (s.name(), s.overall_average()))
                    .collect();
                (entries, "overall average".to_string())
            }
            "3" | "4" => {
                let subject = self.prompt_subject()?;
                let entries = self.book.subject_ranking_by(&subject, order);
                (entries, format!("{subject} average"))
            }
            _ => {
                writeln!(self.output, "Invalid choice!")?;
                return Ok(());
            }
        };
        let direction = match order {
            SortOrder::Descending => "high to low",
            SortOrder::Ascending => "low to high",
        };
        writeln!(self.output, "\nStudents sorted by {title} ({direction}):")?;
        report::ranking(&mut self.output, &self.book, &entries, false)?;
        Ok(())
    }

    fn sort_by_name(&mut self) -> Result<()> {
        self.book.require_students("sorting students")?;
        writeln!(self.output, "Sort Students by Name (Bubble Sort Algorithm):")?;
        writeln!(self.output, "1. A-Z (Ascending)")?;
        writeln!(self.output, "2. Z-A (Descending)")?;
        let (order, label) = match self.prompt("Enter choice (1-2): ")?.as_str() {
            "1" => (SortOrder::Ascending, "A-Z"),
            "2" => (SortOrder::Descending, "Z-A"),
            _ => {
                writeln!(self.output, "Invalid choice!")?;
                return Ok(());
            }
        };
        self.book.sort_by_name(order);
        writeln!(self.output, "\nStudents sorted by name ({label}):")?;
        report::name_list(&mut self.output, &self.book)?;
        writeln!(
            self.output,
            "\nUsed bubble sort algorithm to sort {} students.",
            self.book.len()
        )?;
        Ok(())
    }

    fn top_performers(&mut self) -> Result<()> {
        self.book.require_students("viewing top performers")?;
        writeln!(self.output, "View Top Performers:")?;
        writeln!(self.output, "1. Overall performance")?;
        writeln!(self.output, "2. Subject performance")?;
        let choice = self.prompt("Enter choice (1-2): ")?;
        if choice != "1" && choice != "2" {
            writeln!(self.output, "Invalid choice!")?;
            return Ok(());
        }

        let n = match self
            .prompt("Number of top performers to show: ")?
            .parse::<usize>()
        {
            Ok(n) if n > 0 => n,
            _ => {
                let n = self.config.display.top_performers;
                writeln!(self.output, "Using default: {n} performers")?;
                n
            }
        };

        let entries = if choice == "1" {
            writeln!(self.output, "\nTop {n} performers (overall):")?;
            self.book.top_performers(n)
        } else {
            let subject = self.prompt_subject()?;
            writeln!(self.output, "\nTop {n} performers in {subject}:")?;
            self.book.top_performers_in(&subject, n)
        };
        report::ranking(&mut self.output, &self.book, &entries, true)?;
        Ok(())
    }

    fn distribution(&mut self) -> Result<()> {
        self.book.require_students("viewing grade distribution")?;
        writeln!(self.output)?;
        report::distribution(
            &mut self.output,
            &self.book.grade_distribution(),
            self.config.display.bar_step_percent,
        )?;
        Ok(())
    }

    fn self_tests(&mut self) -> Result<()> {
        let summary = selftest::run_and_report(&mut self.output)?;
        if summary.success() {
            writeln!(
                self.output,
                "\nAll tests passed! System is functioning correctly."
            )?;
        } else {
            writeln!(
                self.output,
                "\n{} test(s) failed. Please review the implementation.",
                summary.failed
            )?;
        }
        Ok(())
    }

    fn student_mut(&mut self, name: &str) -> Result<&mut Student> {
        self.book
            .get_mut(name)
            .ok_or_else(|| Error::student_not_found(name))
    }

    /// Update, remove or clear recorded grades for one subject of a student.
    fn edit_grades(&mut self) -> Result<()> {
        self.book.require_students("grade editing")?;
        let name = self.prompt("Enter student name: ")?;
        self.book.student(&name)?;
        let subject = self.prompt_subject()?;
        let current = self.book.student(&name)?.subject_grades(&subject).to_vec();
        writeln!(self.output, "Current {subject} grades: {current:?}")?;
        if current.is_empty() {
            writeln!(self.output, "No grades to edit!")?;
            return Ok(());
        }

        let action = self
            .prompt("Choose action - (u)pdate grade, (r)emove grade, (c)lear all: ")?
            .to_lowercase();
        match action.as_str() {
            "u" => {
                let index =
                    self.prompt_index("Enter index of grade to update (0 for first grade): ")?;
                let grade = parse_grade(&self.prompt("Enter new grade (0-100): ")?)?;
                let old = self.student_mut(&name)?.update_grade(&subject, index, grade)?;
                debug!(student = %name, %subject, index, old, grade, "grade updated");
                writeln!(
                    self.output,
                    "Updated {name}'s {subject} grade #{index}: {old} -> {grade}"
                )?;
            }
            "r" => {
                let index =
                    self.prompt_index("Enter index of grade to remove (0 for first grade): ")?;
                let removed = self.student_mut(&name)?.remove_grade(&subject, index)?;
                debug!(student = %name, %subject, index, removed, "grade removed");
                writeln!(self.output, "Removed grade {removed} from {name}'s {subject}")?;
            }
            "c" => {
                let confirm = self
                    .prompt("Are you sure you want to clear all grades for this subject? (y/n): ")?
                    .to_lowercase();
                if confirm != "y" {
                    writeln!(self.output, "Clear cancelled.")?;
                    return Ok(());
                }
                let cleared = self.student_mut(&name)?.clear_subject(&subject)?;
                debug!(student = %name, %subject, cleared, "subject cleared");
                writeln!(self.output, "Cleared {cleared} {subject} grade(s) for {name}")?;
            }
            _ => {
                writeln!(self.output, "Invalid action! Please choose u, r or c.")?;
                return Ok(());
            }
        }
        let grades = self.book.student(&name)?.subject_grades(&subject).to_vec();
        writeln!(self.output, "Current {subject} grades: {grades:?}")?;
        Ok(())
    }
}
