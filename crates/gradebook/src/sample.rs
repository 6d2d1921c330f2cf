//! Canned students used by the interactive start-up, `demo` and `report`.

use tracing::{debug, warn};

use crate::error::Result;
use crate::gradebook::Gradebook;

/// A student name with `(subject, grades)` rows.
type Row = (&'static str, &'static [(&'static str, &'static [f64])]);

/// Five students with three assessments in each default subject.
const CLASS: &[Row] = &[
    (
        "Botho Mmutle",
        &[
            ("Mathematics", &[85.0, 90.0, 88.0]),
            ("English", &[92.0, 88.0, 95.0]),
            ("Science", &[78.0, 85.0, 82.0]),
        ],
    ),
    (
        "Katlo Bonno",
        &[
            ("Mathematics", &[72.0, 68.0, 75.0]),
            ("English", &[65.0, 70.0, 68.0]),
            ("Science", &[80.0, 78.0, 82.0]),
        ],
    ),
    (
        "Dabe Dabe",
        &[
            ("Mathematics", &[95.0, 92.0, 98.0]),
            ("English", &[88.0, 85.0, 90.0]),
            ("Science", &[92.0, 95.0, 90.0]),
        ],
    ),
    (
        "Aone Baithei",
        &[
            ("Mathematics", &[60.0, 65.0, 62.0]),
            ("English", &[55.0, 58.0, 60.0]),
            ("Science", &[65.0, 62.0, 68.0]),
        ],
    ),
    (
        "Grace Nabi",
        &[
            ("Mathematics", &[45.0, 50.0, 48.0]),
            ("English", &[52.0, 48.0, 50.0]),
            ("Science", &[55.0, 52.0, 58.0]),
        ],
    ),
];

/// Four students with a handful of grades, used by the demo.
const DEMO: &[Row] = &[
    ("John Doe", &[("Mathematics", &[85.0, 90.0]), ("English", &[78.0])]),
    ("Jane Smith", &[("Mathematics", &[92.0]), ("Science", &[88.0])]),
    ("Michael Johnson", &[("English", &[85.0])]),
    ("Sarah Wilson", &[("Science", &[95.0])]),
];

/// Add rows to a gradebook.
///
/// Rows naming a subject outside the curriculum, or a student already present,
/// are skipped with a warning so a customised curriculum still starts up.
fn load(book: &mut Gradebook, rows: &[Row]) -> usize {
    let mut loaded = 0;
    for (name, subjects) in rows {
        if let Err(e) = book.add_student(name) {
            warn!("skipping sample student {name}: {e}");
            continue;
        }
        loaded += 1;
        for (subject, grades) in *subjects {
            for grade in *grades {
                if let Err(e) = book.add_grade(name, subject, *grade) {
                    warn!("skipping sample grade for {name}: {e}");
                }
            }
        }
    }
    debug!(loaded, "sample students loaded");
    loaded
}

/// Add the sample class to an existing gradebook, returning how many
/// students were added.
pub fn load_class(book: &mut Gradebook) -> usize {
    load(book, CLASS)
}

/// A gradebook holding the sample class.
///
/// # Errors
///
/// Returns an error if the curriculum is empty.
pub fn class<S: AsRef<str>>(subjects: &[S]) -> Result<Gradebook> {
    let mut book = Gradebook::new(subjects)?;
    load_class(&mut book);
    Ok(book)
}

/// A gradebook holding the demo students.
///
/// # Errors
///
/// Returns an error if the curriculum is empty.
pub fn demo<S: AsRef<str>>(subjects: &[S]) -> Result<Gradebook> {
    let mut book = Gradebook::new(subjects)?;
    load(&mut book, DEMO);
    Ok(book)
}
