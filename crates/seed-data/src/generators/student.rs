//! Student generation.
//!
//! Student fields are mostly derived from the class number and the
//! student's number within the class; only contact numbers, gender, birth
//! date and admission date are random.

use rand::Rng;
use roster::models::{Role, StudentRecord};
use time::{Date, Duration};

use super::fields;
use crate::config::ConfigError;
use crate::ids::IdentifierIssuer;

/// Configuration for student generation.
#[derive(Debug, Clone)]
pub struct StudentGenConfig {
    /// Year suffix on admission numbers.
    pub admission_batch: i32,
    /// Admission dates fall within this many days before the reference date.
    pub admission_window_days: i64,
    /// A class N student is between `N + youngest_offset` and
    /// `N + oldest_offset` years old.
    pub youngest_offset: i32,
    pub oldest_offset: i32,
    pub email_domain: String,
}

impl Default for StudentGenConfig {
    fn default() -> Self {
        Self {
            admission_batch: 2023,
            admission_window_days: 730,
            youngest_offset: 5,
            oldest_offset: 7,
            email_domain: "example.com".to_string(),
        }
    }
}

/// Widest admission window: the span of dates `time` can represent.
pub fn max_admission_window_days() -> i64 {
    (Date::MAX - Date::MIN).whole_days()
}

/// Generates student records.
#[derive(Debug, Clone)]
pub struct StudentGenerator {
    config: StudentGenConfig,
    today: Date,
}

impl StudentGenerator {
    /// Creates a generator with default configuration, dated today.
    pub fn new() -> Self {
        Self {
            config: StudentGenConfig::default(),
            today: fields::today_utc(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: StudentGenConfig) -> Result<Self, ConfigError> {
        if !(0..=max_admission_window_days()).contains(&config.admission_window_days) {
            return Err(ConfigError::AdmissionWindow(config.admission_window_days));
        }
        crate::config::check_age_band(&(config.youngest_offset..=config.oldest_offset))?;

        Ok(Self {
            config,
            today: fields::today_utc(),
        })
    }

    /// Sets the reference date ages and admission dates are measured from.
    pub fn on(mut self, today: Date) -> Self {
        self.today = today;
        self
    }

    pub fn config(&self) -> &StudentGenConfig {
        &self.config
    }

    /// Generates student number `student_num` of class `class_num`.
    pub fn generate(
        &self,
        class_num: u32,
        student_num: u32,
        issuer: &impl IdentifierIssuer,
        rng: &mut impl Rng,
    ) -> StudentRecord {
        let id = issuer.issue(Role::Student, rng);
        let admission_date = self
            .today
            .checked_sub(Duration::days(
                rng.gen_range(0..=self.config.admission_window_days),
            ))
            .unwrap_or(Date::MIN);

        // Class numbers past i32::MAX land on the oldest representable band
        let class_offset = i32::try_from(class_num).unwrap_or(i32::MAX);
        let date_of_birth = fields::birth_date_in_band(
            self.today,
            class_offset.saturating_add(self.config.youngest_offset),
            class_offset.saturating_add(self.config.oldest_offset),
            rng,
        );

        let first_name = format!("Clss{class_num}_Std{student_num:02}");

        StudentRecord {
            user_id: id.clone(),
            id,
            email: format!(
                "class{class_num}.student{student_num:02}@{}",
                self.config.email_domain
            ),
            last_name: "Student".to_string(),
            class_name: format!("Class {class_num}"),
            roll_number: format!("{class_num}{student_num:02}"),
            phone_number: fields::indian_mobile(rng),
            address: format!("Address {student_num}, Street {class_num}, City"),
            parent_name: format!("Parent of {first_name}"),
            parent_phone: fields::indian_mobile(rng),
            first_name,
            date_of_birth,
            gender: fields::gender(rng),
            admission_number: format!(
                "ADM{class_num}{student_num:02}{}",
                self.config.admission_batch
            ),
            admission_date,
            is_active: true,
        }
    }

    /// Generates students numbered `1..=count` in one class.
    pub fn generate_batch(
        &self,
        class_num: u32,
        count: u32,
        issuer: &impl IdentifierIssuer,
        rng: &mut impl Rng,
    ) -> Vec<StudentRecord> {
        (1..=count)
            .map(|student_num| self.generate(class_num, student_num, issuer, rng))
            .collect()
    }
}

impl Default for StudentGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{AutoIdIssuer, SequentialIssuer};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;
    use time::macros::date;

    const TODAY: Date = date!(2026 - 10 - 17);

    fn generator() -> StudentGenerator {
        StudentGenerator::new().on(TODAY)
    }

    #[test]
    fn test_class_one_numbering() {
        let mut rng = StdRng::seed_from_u64(42);
        let students = generator().generate_batch(1, 15, &AutoIdIssuer, &mut rng);

        assert_eq!(students.len(), 15);

        let rolls: Vec<&str> = students.iter().map(|s| s.roll_number.as_str()).collect();
        let expected: Vec<String> = (101..=115).map(|n| n.to_string()).collect();
        assert_eq!(rolls, expected);

        let admissions: HashSet<&str> = students
            .iter()
            .map(|s| s.admission_number.as_str())
            .collect();
        assert_eq!(admissions.len(), 15);
        assert_eq!(students[0].admission_number, "ADM1012023");
        assert_eq!(students[14].admission_number, "ADM1152023");
    }

    #[test]
    fn test_student_fields() {
        let mut rng = StdRng::seed_from_u64(3);
        let student = generator().generate(2, 7, &SequentialIssuer::new(), &mut rng);

        assert_eq!(student.id, "student-0001");
        assert_eq!(student.user_id, student.id);
        assert_eq!(student.first_name, "Clss2_Std07");
        assert_eq!(student.last_name, "Student");
        assert_eq!(student.email, "class2.student07@example.com");
        assert_eq!(student.class_name, "Class 2");
        assert_eq!(student.roll_number, "207");
        assert_eq!(student.address, "Address 7, Street 2, City");
        assert_eq!(student.parent_name, "Parent of Clss2_Std07");
        assert!(student.phone_number.starts_with("+91"));
        assert!(student.parent_phone.starts_with("+91"));
        assert!(student.is_active);
    }

    #[test]
    fn test_birth_year_banded_by_class() {
        let student_gen = generator();
        let mut rng = StdRng::seed_from_u64(5);

        for class_num in 1..=5u32 {
            for student in student_gen.generate_batch(class_num, 50, &AutoIdIssuer, &mut rng) {
                let year = student.date_of_birth.year();
                let n = class_num as i32;
                assert!(
                    (2026 - 7 - n..=2026 - 5 - n).contains(&year),
                    "class {class_num} born {year}"
                );
            }
        }
    }

    #[test]
    fn test_admission_within_window() {
        let mut rng = StdRng::seed_from_u64(9);

        for student in generator().generate_batch(1, 100, &AutoIdIssuer, &mut rng) {
            assert!(student.admission_date <= TODAY);
            assert!(student.admission_date >= TODAY - Duration::days(730));
        }
    }

    #[test]
    fn test_huge_class_number_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(1);

        for class_num in [i32::MAX as u32, u32::MAX] {
            let student = generator().generate(class_num, 1, &AutoIdIssuer, &mut rng);
            assert_eq!(student.date_of_birth.year(), Date::MIN.year());
            assert_eq!(student.roll_number, format!("{class_num}01"));
        }
    }

    #[test]
    fn test_widest_admission_window() {
        let config = StudentGenConfig {
            admission_window_days: max_admission_window_days(),
            ..Default::default()
        };
        let student_gen = StudentGenerator::with_config(config).unwrap().on(TODAY);
        let mut rng = StdRng::seed_from_u64(4);

        for student in student_gen.generate_batch(1, 50, &AutoIdIssuer, &mut rng) {
            assert!(student.admission_date <= TODAY);
        }
    }

    #[test]
    fn test_rejects_oversized_window() {
        let config = StudentGenConfig {
            admission_window_days: i64::MAX,
            ..Default::default()
        };
        assert_eq!(
            StudentGenerator::with_config(config).unwrap_err(),
            ConfigError::AdmissionWindow(i64::MAX)
        );
    }

    #[test]
    fn test_rejects_negative_window() {
        let config = StudentGenConfig {
            admission_window_days: -1,
            ..Default::default()
        };
        assert_eq!(
            StudentGenerator::with_config(config).unwrap_err(),
            ConfigError::AdmissionWindow(-1)
        );
    }
}
