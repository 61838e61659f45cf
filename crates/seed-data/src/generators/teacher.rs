//! Teacher generation with subject and class assignments.

use std::ops::RangeInclusive;

use rand::Rng;
use roster::models::{Role, TeacherRecord};
use time::Date;

use super::fields;
use crate::config::{ConfigError, check_age_band};
use crate::ids::IdentifierIssuer;
use crate::vocab::{CLASSES, NamePool, SUBJECTS, TEACHING_DEPARTMENTS, VocabTable};

/// Configuration for teacher generation.
#[derive(Debug, Clone)]
pub struct TeacherGenConfig {
    pub names: NamePool,
    pub subjects: VocabTable,
    pub classes: VocabTable,
    pub departments: VocabTable,
    /// How many distinct subjects each teacher gets.
    pub subjects_per_teacher: RangeInclusive<usize>,
    /// How many distinct classes each teacher gets.
    pub classes_per_teacher: RangeInclusive<usize>,
    pub designation: String,
    /// Age range in whole years.
    pub age_band: RangeInclusive<i32>,
    pub email_domain: String,
    /// Placeholder password stored on every record.
    pub default_password: String,
}

impl Default for TeacherGenConfig {
    fn default() -> Self {
        Self {
            names: NamePool::teachers(),
            subjects: VocabTable::builtin("subjects", SUBJECTS),
            classes: VocabTable::builtin("classes", CLASSES),
            departments: VocabTable::builtin("teaching departments", TEACHING_DEPARTMENTS),
            subjects_per_teacher: 2..=3,
            classes_per_teacher: 1..=2,
            designation: "Teacher".to_string(),
            age_band: 25..=60,
            email_domain: "school.com".to_string(),
            default_password: "password123".to_string(),
        }
    }
}

/// Generates teacher records.
#[derive(Debug, Clone)]
pub struct TeacherGenerator {
    config: TeacherGenConfig,
    today: Date,
}

impl TeacherGenerator {
    /// Creates a generator with default configuration, dated today.
    pub fn new() -> Self {
        Self {
            config: TeacherGenConfig::default(),
            today: fields::today_utc(),
        }
    }

    /// Creates a generator with custom configuration.
    ///
    /// Fails if a sample range cannot be satisfied by its table.
    pub fn with_config(config: TeacherGenConfig) -> Result<Self, ConfigError> {
        config
            .subjects
            .check_sample_range(&config.subjects_per_teacher)?;
        config
            .classes
            .check_sample_range(&config.classes_per_teacher)?;
        check_age_band(&config.age_band)?;

        Ok(Self {
            config,
            today: fields::today_utc(),
        })
    }

    /// Sets the reference date ages and birth dates are measured from.
    pub fn on(mut self, today: Date) -> Self {
        self.today = today;
        self
    }

    pub fn config(&self) -> &TeacherGenConfig {
        &self.config
    }

    /// Generates a single teacher.
    pub fn generate(&self, issuer: &impl IdentifierIssuer, rng: &mut impl Rng) -> TeacherRecord {
        let id = issuer.issue(Role::Teacher, rng);
        let gender = fields::gender(rng);
        let (first_name, last_name) = self.config.names.pick(rng);
        let date_of_birth = fields::birth_date_in_band(
            self.today,
            *self.config.age_band.start(),
            *self.config.age_band.end(),
            rng,
        );
        let subjects = self
            .config
            .subjects
            .sample(&self.config.subjects_per_teacher, rng);
        let classes = self
            .config
            .classes
            .sample(&self.config.classes_per_teacher, rng);

        TeacherRecord {
            id,
            email: fields::name_email(&first_name, &last_name, &self.config.email_domain),
            first_name,
            last_name,
            phone: fields::us_phone(rng),
            mobile_no: fields::us_phone(rng),
            kind: Role::Teacher,
            subjects,
            classes,
            gender,
            date_of_birth,
            address: fields::school_street_address(rng),
            age: fields::age_on(self.today, date_of_birth),
            department: self.config.departments.pick(rng).to_string(),
            designation: self.config.designation.clone(),
            password: self.config.default_password.clone(),
        }
    }

    /// Generates multiple teachers.
    pub fn generate_batch(
        &self,
        count: usize,
        issuer: &impl IdentifierIssuer,
        rng: &mut impl Rng,
    ) -> Vec<TeacherRecord> {
        (0..count).map(|_| self.generate(issuer, rng)).collect()
    }
}

impl Default for TeacherGenerator {
    fn default() -> Self {
        Self::new()
    }
}
