//! Vocabulary tables sampled during generation.
//!
//! Tables are validated when they are built, so drawing from them never
//! fails: every table is non-empty and holds distinct values, and every
//! sample range fits inside the table it samples from.

use std::ops::RangeInclusive;

use fake::{
    Fake,
    faker::name::en::{FirstName, LastName},
};
use rand::Rng;
use rand::seq::index;
use thiserror::Error;

/// Staff first names.
pub const STAFF_FIRST_NAMES: &[&str] = &[
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda", "William",
    "Elizabeth", "David", "Barbara", "Richard", "Susan", "Joseph",
];

/// Staff last names.
pub const STAFF_LAST_NAMES: &[&str] = &[
    "Smith",
    "Johnson",
    "Williams",
    "Brown",
    "Jones",
    "Garcia",
    "Miller",
    "Davis",
    "Rodriguez",
    "Martinez",
    "Hernandez",
    "Lopez",
    "Gonzalez",
    "Wilson",
    "Anderson",
];

/// Teacher first names.
pub const TEACHER_FIRST_NAMES: &[&str] = &[
    "John", "Emma", "Michael", "Sarah", "David", "Lisa", "James", "Emily", "Robert", "Anna",
];

/// Teacher last names.
pub const TEACHER_LAST_NAMES: &[&str] = &[
    "Smith",
    "Johnson",
    "Williams",
    "Brown",
    "Jones",
    "Garcia",
    "Miller",
    "Davis",
    "Rodriguez",
    "Martinez",
];

/// Non-teaching departments and the designations available in each.
pub const STAFF_DEPARTMENTS: &[(&str, &[&str])] = &[
    (
        "Administration",
        &["Administrative Assistant", "Office Manager", "Receptionist"],
    ),
    (
        "Maintenance",
        &["Maintenance Supervisor", "Janitor", "Groundskeeper"],
    ),
    (
        "Library",
        &["Librarian", "Library Assistant", "Media Specialist"],
    ),
    (
        "IT Support",
        &["IT Manager", "System Administrator", "Technical Support"],
    ),
    (
        "Accounts",
        &["Accountant", "Finance Manager", "Accounts Clerk"],
    ),
    (
        "Security",
        &["Security Supervisor", "Security Guard", "Gate Officer"],
    ),
    ("Others", &["Nurse", "Counselor", "Career Advisor"]),
];

/// Subjects a teacher can be assigned.
pub const SUBJECTS: &[&str] = &[
    "Mathematics",
    "Science",
    "English",
    "Social Studies",
    "Physical Education",
    "Art",
    "Music",
    "Computer Science",
    "Environmental Science",
    "Language Arts",
];

/// Classes a teacher can be assigned.
pub const CLASSES: &[&str] = &["Class 1", "Class 2", "Class 3", "Class 4", "Class 5"];

/// Teaching departments.
pub const TEACHING_DEPARTMENTS: &[&str] = &[
    "Science Department",
    "Mathematics Department",
    "Languages Department",
    "Arts Department",
    "Physical Education Department",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VocabularyError {
    #[error("Vocabulary table '{0}' is empty")]
    Empty(String),
    #[error("Vocabulary table '{table}' lists '{value}' more than once")]
    Duplicate { table: String, value: String },
    #[error("Cannot sample {min}..={max} distinct values from '{table}' ({len} entries)")]
    SampleRange {
        table: String,
        min: usize,
        max: usize,
        len: usize,
    },
    #[error("Department '{0}' has no designations")]
    NoDesignations(String),
}

/// A non-empty list of distinct candidate values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabTable {
    label: String,
    values: Vec<String>,
}

impl VocabTable {
    /// Builds a table, rejecting empty tables and repeated values.
    pub fn new<I, S>(label: impl Into<String>, values: I) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let label = label.into();
        let values: Vec<String> = values.into_iter().map(Into::into).collect();

        if values.is_empty() {
            return Err(VocabularyError::Empty(label));
        }
        for (i, value) in values.iter().enumerate() {
            if values[..i].contains(value) {
                return Err(VocabularyError::Duplicate {
                    table: label,
                    value: value.clone(),
                });
            }
        }

        Ok(Self { label, values })
    }

    /// Builds a table from one of the built-in constant lists.
    pub(crate) fn builtin(label: &str, values: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; tables are never empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    /// Picks one value uniformly.
    pub fn pick(&self, rng: &mut impl Rng) -> &str {
        &self.values[rng.gen_range(0..self.values.len())]
    }

    /// Checks that `range` can be sampled without replacement from this table.
    pub fn check_sample_range(&self, range: &RangeInclusive<usize>) -> Result<(), VocabularyError> {
        if range.is_empty() || *range.end() > self.values.len() {
            return Err(VocabularyError::SampleRange {
                table: self.label.clone(),
                min: *range.start(),
                max: *range.end(),
                len: self.values.len(),
            });
        }
        Ok(())
    }

    /// Draws a size uniformly from `range`, then that many distinct values.
    ///
    /// The range must have passed [`VocabTable::check_sample_range`]; a
    /// size larger than the table is clamped to the table length.
    pub fn sample(&self, range: &RangeInclusive<usize>, rng: &mut impl Rng) -> Vec<String> {
        let count = rng.gen_range(range.clone()).min(self.values.len());
        index::sample(rng, self.values.len(), count)
            .into_iter()
            .map(|i| self.values[i].clone())
            .collect()
    }
}

/// Departments with the designations available in each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignationTable {
    departments: Vec<(String, VocabTable)>,
}

impl DesignationTable {
    pub fn new<I, D, S>(entries: I) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = (D, Vec<S>)>,
        D: Into<String>,
        S: Into<String>,
    {
        let mut departments: Vec<(String, VocabTable)> = Vec::new();
        for (department, designations) in entries {
            let department = department.into();
            if departments.iter().any(|(d, _)| *d == department) {
                return Err(VocabularyError::Duplicate {
                    table: "departments".to_string(),
                    value: department,
                });
            }
            let table = VocabTable::new(department.clone(), designations).map_err(|e| match e {
                VocabularyError::Empty(d) => VocabularyError::NoDesignations(d),
                other => other,
            })?;
            departments.push((department, table));
        }

        if departments.is_empty() {
            return Err(VocabularyError::Empty("departments".to_string()));
        }

        Ok(Self { departments })
    }

    pub(crate) fn builtin(entries: &[(&str, &[&str])]) -> Self {
        Self {
            departments: entries
                .iter()
                .map(|(d, designations)| (d.to_string(), VocabTable::builtin(d, designations)))
                .collect(),
        }
    }

    pub fn departments(&self) -> impl Iterator<Item = &str> {
        self.departments.iter().map(|(d, _)| d.as_str())
    }

    pub fn designations_for(&self, department: &str) -> Option<&VocabTable> {
        self.departments
            .iter()
            .find(|(d, _)| d == department)
            .map(|(_, t)| t)
    }

    /// Picks a department uniformly, then a designation from that department.
    pub fn pick(&self, rng: &mut impl Rng) -> (&str, &str) {
        let (department, designations) = &self.departments[rng.gen_range(0..self.departments.len())];
        (department.as_str(), designations.pick(rng))
    }
}

impl Default for DesignationTable {
    fn default() -> Self {
        Self::builtin(STAFF_DEPARTMENTS)
    }
}

/// First and last name tables drawn from independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePool {
    pub first: VocabTable,
    pub last: VocabTable,
}

impl NamePool {
    /// The fixed non-teaching staff names.
    pub fn staff() -> Self {
        Self {
            first: VocabTable::builtin("staff first names", STAFF_FIRST_NAMES),
            last: VocabTable::builtin("staff last names", STAFF_LAST_NAMES),
        }
    }

    /// The fixed teacher names.
    pub fn teachers() -> Self {
        Self {
            first: VocabTable::builtin("teacher first names", TEACHER_FIRST_NAMES),
            last: VocabTable::builtin("teacher last names", TEACHER_LAST_NAMES),
        }
    }

    /// Builds a pool of up to `count` distinct first and last names each.
    ///
    /// Wider pools make email collisions rarer. Fewer than `count` names
    /// come back when the faker runs out of distinct values.
    pub fn fake(count: usize, rng: &mut impl Rng) -> Result<Self, VocabularyError> {
        let first = distinct_names(count, rng, |rng| FirstName().fake_with_rng(rng));
        let last = distinct_names(count, rng, |rng| LastName().fake_with_rng(rng));

        Ok(Self {
            first: VocabTable::new("fake first names", first)?,
            last: VocabTable::new("fake last names", last)?,
        })
    }

    /// Picks a `(first, last)` pair.
    pub fn pick(&self, rng: &mut impl Rng) -> (String, String) {
        let first = self.first.pick(rng).to_string();
        let last = self.last.pick(rng).to_string();
        (first, last)
    }
}

fn distinct_names<R: Rng>(
    count: usize,
    rng: &mut R,
    mut draw: impl FnMut(&mut R) -> String,
) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(count);
    // Give the faker a few tries per slot before settling for a smaller pool
    for _ in 0..count * 10 {
        if names.len() == count {
            break;
        }
        let name = draw(rng);
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}
