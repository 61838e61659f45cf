//! Entity generators for the school directory.
//!
//! - [`StaffGenerator`]: non-teaching staff with department/designation
//! - [`TeacherGenerator`]: teachers with subject and class assignments
//! - [`StudentGenerator`]: students numbered within a class
//! - [`EntityGenerator`]: one entry point dispatching on [`EntityKind`]
//!
//! Generation is pure: the output depends only on the configuration, the
//! reference date, the identifier issuer and the rng passed in.

pub mod fields;
pub mod staff;
pub mod student;
pub mod teacher;

pub use staff::{StaffGenConfig, StaffGenerator};
pub use student::{StudentGenConfig, StudentGenerator};
pub use teacher::{TeacherGenConfig, TeacherGenerator};

use rand::Rng;
use roster::models::{Record, Role};
use time::Date;

use crate::ids::{AutoIdIssuer, IdentifierIssuer};

/// Which kind of record to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Staff,
    Teacher,
    Student { class_num: u32 },
}

impl EntityKind {
    pub fn role(&self) -> Role {
        match self {
            EntityKind::Staff => Role::Staff,
            EntityKind::Teacher => Role::Teacher,
            EntityKind::Student { .. } => Role::Student,
        }
    }
}

/// Generates records of every kind with a shared issuer.
#[derive(Debug, Clone)]
pub struct EntityGenerator<I = AutoIdIssuer> {
    staff: StaffGenerator,
    teachers: TeacherGenerator,
    students: StudentGenerator,
    issuer: I,
}

impl EntityGenerator {
    /// Creates a generator with default vocabularies and auto-ids, dated today.
    pub fn new() -> Self {
        Self {
            staff: StaffGenerator::new(),
            teachers: TeacherGenerator::new(),
            students: StudentGenerator::new(),
            issuer: AutoIdIssuer,
        }
    }
}

impl Default for EntityGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: IdentifierIssuer> EntityGenerator<I> {
    /// Replaces the identifier issuer.
    pub fn with_issuer<J: IdentifierIssuer>(self, issuer: J) -> EntityGenerator<J> {
        EntityGenerator {
            staff: self.staff,
            teachers: self.teachers,
            students: self.students,
            issuer,
        }
    }

    /// Sets the reference date on every per-kind generator.
    pub fn with_today(mut self, today: Date) -> Self {
        self.staff = self.staff.on(today);
        self.teachers = self.teachers.on(today);
        self.students = self.students.on(today);
        self
    }

    pub fn with_staff(mut self, staff: StaffGenerator) -> Self {
        self.staff = staff;
        self
    }

    pub fn with_teachers(mut self, teachers: TeacherGenerator) -> Self {
        self.teachers = teachers;
        self
    }

    pub fn with_students(mut self, students: StudentGenerator) -> Self {
        self.students = students;
        self
    }

    pub fn issuer(&self) -> &I {
        &self.issuer
    }

    /// Generates one record.
    ///
    /// For students `index` is the student number within the class; for
    /// staff and teachers it only distinguishes records within a batch.
    pub fn generate(&self, kind: EntityKind, index: u32, rng: &mut impl Rng) -> Record {
        match kind {
            EntityKind::Staff => self.staff.generate(&self.issuer, rng).into(),
            EntityKind::Teacher => self.teachers.generate(&self.issuer, rng).into(),
            EntityKind::Student { class_num } => self
                .students
                .generate(class_num, index, &self.issuer, rng)
                .into(),
        }
    }

    /// Generates records with indices `1..=count`.
    pub fn generate_batch(&self, kind: EntityKind, count: u32, rng: &mut impl Rng) -> Vec<Record> {
        (1..=count)
            .map(|index| self.generate(kind, index, rng))
            .collect()
    }
}
