//! `gradebook` - An in-memory student grade manager
//!
//! This library provides the student and gradebook model, searching, sorting
//! and class statistics, plus the console menu and reports built on top of
//! them.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod gradebook;
pub mod logging;
pub mod menu;
pub mod report;
pub mod sample;
pub mod selftest;
pub mod student;

pub use config::Config;
pub use error::{Error, Result};
pub use gradebook::{GradeRange, Gradebook, SearchResults, SortOrder};
pub use logging::init_logging;
pub use menu::Menu;
pub use student::{PerformanceCategory, Student, Trend};
