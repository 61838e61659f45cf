//! Non-teaching staff generation.

use std::ops::RangeInclusive;

use rand::Rng;
use roster::models::{Role, StaffRecord};
use time::Date;

use super::fields;
use crate::config::{ConfigError, check_age_band};
use crate::ids::IdentifierIssuer;
use crate::vocab::{DesignationTable, NamePool};

/// Configuration for staff generation.
#[derive(Debug, Clone)]
pub struct StaffGenConfig {
    pub names: NamePool,
    /// Departments with the designations available in each.
    pub departments: DesignationTable,
    /// Age range in whole years.
    pub age_band: RangeInclusive<i32>,
    pub email_domain: String,
    /// Placeholder password stored on every record.
    pub default_password: String,
}

impl Default for StaffGenConfig {
    fn default() -> Self {
        Self {
            names: NamePool::staff(),
            departments: DesignationTable::default(),
            age_band: 25..=60,
            email_domain: "school.com".to_string(),
            default_password: "password123".to_string(),
        }
    }
}

/// Generates non-teaching staff records.
#[derive(Debug, Clone)]
pub struct StaffGenerator {
    config: StaffGenConfig,
    today: Date,
}

impl StaffGenerator {
    /// Creates a generator with default configuration, dated today.
    pub fn new() -> Self {
        Self {
            config: StaffGenConfig::default(),
            today: fields::today_utc(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: StaffGenConfig) -> Result<Self, ConfigError> {
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

    pub fn config(&self) -> &StaffGenConfig {
        &self.config
    }

    /// Generates a single staff member.
    pub fn generate(&self, issuer: &impl IdentifierIssuer, rng: &mut impl Rng) -> StaffRecord {
        let id = issuer.issue(Role::Staff, rng);
        let gender = fields::gender(rng);
        let (first_name, last_name) = self.config.names.pick(rng);
        // Designation depends on the department drawn first
        let (department, designation) = self.config.departments.pick(rng);
        let date_of_birth = fields::birth_date_in_band(
            self.today,
            *self.config.age_band.start(),
            *self.config.age_band.end(),
            rng,
        );

        StaffRecord {
            id,
            email: fields::name_email(&first_name, &last_name, &self.config.email_domain),
            first_name,
            last_name,
            phone: fields::us_phone(rng),
            mobile_no: fields::us_phone(rng),
            kind: Role::Staff,
            gender,
            date_of_birth,
            address: fields::school_street_address(rng),
            age: fields::age_on(self.today, date_of_birth),
            department: department.to_string(),
            designation: designation.to_string(),
            password: self.config.default_password.clone(),
        }
    }

    /// Generates multiple staff members.
    pub fn generate_batch(
        &self,
        count: usize,
        issuer: &impl IdentifierIssuer,
        rng: &mut impl Rng,
    ) -> Vec<StaffRecord> {
        (0..count).map(|_| self.generate(issuer, rng)).collect()
    }
}

impl Default for StaffGenerator {
    fn default() -> Self {
        Self::new()
    }
}
