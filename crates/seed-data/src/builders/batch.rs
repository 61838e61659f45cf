//! Fluent builder for generating and seeding a batch of records.

use std::collections::BTreeMap;
use std::time::Instant;

use rand::Rng;
use roster::DocumentStore;
use roster::models::{Record, StaffRecord, StudentRecord, TeacherRecord};
use time::Date;
use tracing::warn;

use crate::config::{ConfigError, SeedConfig};
use crate::db::{SeedError, SeedSummary, Seeder};
use crate::generators::{
    EntityGenerator, EntityKind, StaffGenConfig, StaffGenerator, StudentGenConfig,
    StudentGenerator, TeacherGenConfig, TeacherGenerator, fields,
};
use crate::ids::{AutoIdIssuer, IdentifierIssuer};
use crate::vocab::NamePool;

/// Result of building (and possibly seeding) a batch.
#[derive(Debug)]
pub struct BatchResult {
    /// Records in generation order: staff, then teachers, then students by class.
    pub records: Vec<Record>,
    /// Counts of documents written, if the batch was seeded.
    pub summary: Option<SeedSummary>,
    /// Metrics from batch generation (populated if metrics tracking enabled).
    pub metrics: Option<BatchMetrics>,
}

impl BatchResult {
    pub fn staff(&self) -> impl Iterator<Item = &StaffRecord> {
        self.records.iter().filter_map(|r| match r {
            Record::Staff(s) => Some(s),
            _ => None,
        })
    }

    pub fn teachers(&self) -> impl Iterator<Item = &TeacherRecord> {
        self.records.iter().filter_map(|r| match r {
            Record::Teacher(t) => Some(t),
            _ => None,
        })
    }

    pub fn students(&self) -> impl Iterator<Item = &StudentRecord> {
        self.records.iter().filter_map(|r| match r {
            Record::Student(s) => Some(s),
            _ => None,
        })
    }

    /// Emails that appear on more than one record, sorted.
    pub fn duplicate_emails(&self) -> Vec<String> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.email()).or_insert(0) += 1;
        }
        counts
            .into_iter()
            .filter(|&(_, n)| n > 1)
            .map(|(email, _)| email.to_string())
            .collect()
    }
}

/// Timing and count metrics from batch generation.
#[derive(Debug, Clone)]
pub struct BatchMetrics {
    /// Time spent generating records (milliseconds).
    pub generation_time_ms: u64,
    /// Time spent writing to the store (milliseconds, 0 if build_data used).
    pub seeding_time_ms: u64,
    pub staff_count: usize,
    pub teacher_count: usize,
    pub student_count: usize,
}

/// Builder for generating a batch of directory records.
///
/// # Example
///
/// ```rust,ignore
/// let result = BatchBuilder::new()
///     .with_staff(10)
///     .with_teachers(10)
///     .with_students(vec![1, 2], 15)
///     .build(&store, &mut rng)
///     .await?;
/// ```
pub struct BatchBuilder<I = AutoIdIssuer> {
    staff_count: u32,
    teacher_count: u32,
    student_classes: Vec<u32>,
    students_per_class: u32,

    staff_config: StaffGenConfig,
    teacher_config: TeacherGenConfig,
    student_config: StudentGenConfig,
    names: Option<NamePool>,
    fake_names: Option<usize>,

    today: Option<Date>,
    issuer: I,
    track_metrics: bool,
}

impl Default for BatchBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchBuilder {
    /// Creates a builder with the reference batch shape.
    pub fn new() -> Self {
        Self::from_config(&SeedConfig::default())
    }

    /// Creates a builder with the batch shape from `config`.
    pub fn from_config(config: &SeedConfig) -> Self {
        Self {
            staff_count: config.staff_count,
            teacher_count: config.teacher_count,
            student_classes: config.student_classes.clone(),
            students_per_class: config.students_per_class,
            staff_config: StaffGenConfig::default(),
            teacher_config: TeacherGenConfig::default(),
            student_config: StudentGenConfig::default(),
            names: None,
            fake_names: None,
            today: None,
            issuer: AutoIdIssuer,
            track_metrics: false,
        }
    }

    /// The reference batch: 10 staff, 10 teachers, and 15 students in each
    /// of classes 1 and 2.
    pub fn reference() -> Self {
        Self::new()
    }
}

impl<I: IdentifierIssuer> BatchBuilder<I> {
    /// Sets the number of staff members to generate.
    pub fn with_staff(mut self, count: u32) -> Self {
        self.staff_count = count;
        self
    }

    /// Sets the number of teachers to generate.
    pub fn with_teachers(mut self, count: u32) -> Self {
        self.teacher_count = count;
        self
    }

    /// Sets the classes to generate students for and the class size.
    pub fn with_students(mut self, classes: Vec<u32>, per_class: u32) -> Self {
        self.student_classes = classes;
        self.students_per_class = per_class;
        self
    }

    pub fn with_staff_config(mut self, config: StaffGenConfig) -> Self {
        self.staff_config = config;
        self
    }

    pub fn with_teacher_config(mut self, config: TeacherGenConfig) -> Self {
        self.teacher_config = config;
        self
    }

    pub fn with_student_config(mut self, config: StudentGenConfig) -> Self {
        self.student_config = config;
        self
    }

    /// Uses one name pool for both staff and teachers.
    pub fn with_names(mut self, names: NamePool) -> Self {
        self.names = Some(names);
        self
    }

    /// Draws a faker name pool of `count` names from the batch rng before
    /// generating, for both staff and teachers.
    pub fn with_fake_names(mut self, count: usize) -> Self {
        self.fake_names = Some(count);
        self
    }

    /// Sets the reference date. Defaults to today's UTC date.
    pub fn with_today(mut self, today: Date) -> Self {
        self.today = Some(today);
        self
    }

    /// Replaces the identifier issuer.
    pub fn with_issuer<J: IdentifierIssuer>(self, issuer: J) -> BatchBuilder<J> {
        BatchBuilder {
            staff_count: self.staff_count,
            teacher_count: self.teacher_count,
            student_classes: self.student_classes,
            students_per_class: self.students_per_class,
            staff_config: self.staff_config,
            teacher_config: self.teacher_config,
            student_config: self.student_config,
            names: self.names,
            fake_names: self.fake_names,
            today: self.today,
            issuer,
            track_metrics: self.track_metrics,
        }
    }

    /// Enables metrics tracking.
    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.track_metrics = enabled;
        self
    }

    /// Builds the batch (generates records but doesn't seed a store).
    pub fn build_data(&self, rng: &mut impl Rng) -> Result<BatchResult, ConfigError> {
        let start_time = self.track_metrics.then(Instant::now);

        let generator = self.entity_generator(rng)?;

        let mut records = Vec::new();
        records.extend(generator.generate_batch(EntityKind::Staff, self.staff_count, rng));
        records.extend(generator.generate_batch(EntityKind::Teacher, self.teacher_count, rng));
        for &class_num in &self.student_classes {
            records.extend(generator.generate_batch(
                EntityKind::Student { class_num },
                self.students_per_class,
                rng,
            ));
        }

        let mut result = BatchResult {
            records,
            summary: None,
            metrics: None,
        };

        let duplicates = result.duplicate_emails();
        if !duplicates.is_empty() {
            warn!(
                count = duplicates.len(),
                emails = %duplicates.join(", "),
                "Batch contains duplicate emails"
            );
        }

        result.metrics = start_time.map(|start| BatchMetrics {
            generation_time_ms: start.elapsed().as_millis() as u64,
            seeding_time_ms: 0, // Set by build() if seeding occurs
            staff_count: result.staff().count(),
            teacher_count: result.teachers().count(),
            student_count: result.students().count(),
        });

        Ok(result)
    }

    /// Builds the batch and seeds it into `store`.
    pub async fn build<S: DocumentStore + ?Sized>(
        self,
        store: &S,
        rng: &mut impl Rng,
    ) -> Result<BatchResult, SeedError> {
        let mut result = self.build_data(rng)?;

        let seed_start = self.track_metrics.then(Instant::now);

        let summary = Seeder::new(store).seed_records(&result.records).await?;
        result.summary = Some(summary);

        if let (Some(start), Some(metrics)) = (seed_start, result.metrics.as_mut()) {
            metrics.seeding_time_ms = start.elapsed().as_millis() as u64;
        }

        Ok(result)
    }

    /// Assembles the per-kind generators from the builder's settings.
    fn entity_generator(&self, rng: &mut impl Rng) -> Result<EntityGenerator<&I>, ConfigError> {
        let names = match (self.fake_names, &self.names) {
            (Some(count), _) => Some(NamePool::fake(count, rng)?),
            (None, Some(names)) => Some(names.clone()),
            (None, None) => None,
        };

        let mut staff_config = self.staff_config.clone();
        let mut teacher_config = self.teacher_config.clone();
        if let Some(names) = names {
            staff_config.names = names.clone();
            teacher_config.names = names;
        }

        let today = self.today.unwrap_or_else(fields::today_utc);

        Ok(EntityGenerator::new()
            .with_staff(StaffGenerator::with_config(staff_config)?)
            .with_teachers(TeacherGenerator::with_config(teacher_config)?)
            .with_students(StudentGenerator::with_config(self.student_config.clone())?)
            .with_today(today)
            .with_issuer(&self.issuer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIssuer;
    use crate::vocab::VocabTable;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use time::macros::date;

    #[test]
    fn test_reference_batch_shape() {
        let mut rng = StdRng::seed_from_u64(12345);
        let result = BatchBuilder::reference()
            .with_today(date!(2026 - 10 - 17))
            .build_data(&mut rng)
            .unwrap();

        assert_eq!(result.records.len(), 50);
        assert_eq!(result.staff().count(), 10);
        assert_eq!(result.teachers().count(), 10);
        assert_eq!(result.students().count(), 30);

        let class_two: Vec<_> = result
            .students()
            .filter(|s| s.class_name == "Class 2")
            .collect();
        assert_eq!(class_two.len(), 15);
        assert_eq!(class_two[0].roll_number, "201");
    }

    #[test]
    fn test_same_seed_same_batch() {
        let builder = BatchBuilder::new().with_today(date!(2026 - 10 - 17));

        let a = builder.build_data(&mut StdRng::seed_from_u64(7)).unwrap();
        let b = builder.build_data(&mut StdRng::seed_from_u64(7)).unwrap();

        assert_eq!(a.records, b.records);
    }

    #[test]
    fn test_ids_unique_within_batch() {
        let mut rng = StdRng::seed_from_u64(99);
        let result = BatchBuilder::reference().build_data(&mut rng).unwrap();

        let ids: std::collections::HashSet<_> = result.records.iter().map(Record::id).collect();
        assert_eq!(ids.len(), result.records.len());
    }

    #[test]
    fn test_duplicate_emails_reported() {
        let names = NamePool {
            first: VocabTable::new("first", ["Ada"]).unwrap(),
            last: VocabTable::new("last", ["Lovelace"]).unwrap(),
        };
        let mut rng = StdRng::seed_from_u64(1);

        let result = BatchBuilder::new()
            .with_staff(2)
            .with_teachers(1)
            .with_students(vec![], 0)
            .with_names(names)
            .build_data(&mut rng)
            .unwrap();

        assert_eq!(
            result.duplicate_emails(),
            vec!["ada.lovelace@school.com".to_string()]
        );
    }

    #[test]
    fn test_students_never_collide() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = BatchBuilder::new()
            .with_staff(0)
            .with_teachers(0)
            .with_students(vec![1, 2, 3], 15)
            .build_data(&mut rng)
            .unwrap();

        assert!(result.duplicate_emails().is_empty());
    }

    #[test]
    fn test_fake_names_used_for_staff_and_teachers() {
        let mut rng = StdRng::seed_from_u64(5);
        let result = BatchBuilder::new()
            .with_fake_names(60)
            .with_students(vec![], 0)
            .build_data(&mut rng)
            .unwrap();

        assert_eq!(result.records.len(), 20);
        assert!(result.staff().all(|s| !s.first_name.is_empty()));
    }

    #[test]
    fn test_invalid_teacher_config_rejected() {
        let mut rng = StdRng::seed_from_u64(5);
        let err = BatchBuilder::new()
            .with_teacher_config(TeacherGenConfig {
                subjects_per_teacher: 2..=11,
                ..Default::default()
            })
            .build_data(&mut rng)
            .unwrap_err();

        assert!(matches!(err, ConfigError::Vocabulary(_)));
    }

    #[test]
    fn test_sequential_issuer() {
        let mut rng = StdRng::seed_from_u64(5);
        let result = BatchBuilder::new()
            .with_staff(2)
            .with_teachers(1)
            .with_students(vec![1], 1)
            .with_issuer(SequentialIssuer::new())
            .build_data(&mut rng)
            .unwrap();

        let ids: Vec<&str> = result.records.iter().map(Record::id).collect();
        assert_eq!(
            ids,
            vec!["staff-0001", "staff-0002", "teacher-0003", "student-0004"]
        );
    }

    #[test]
    fn test_metrics_tracking() {
        let mut rng = StdRng::seed_from_u64(5);

        let without = BatchBuilder::new().build_data(&mut rng).unwrap();
        assert!(without.metrics.is_none());

        let with = BatchBuilder::new()
            .with_metrics(true)
            .build_data(&mut rng)
            .unwrap();
        let metrics = with.metrics.unwrap();
        assert_eq!(metrics.staff_count, 10);
        assert_eq!(metrics.teacher_count, 10);
        assert_eq!(metrics.student_count, 30);
        assert_eq!(metrics.seeding_time_ms, 0);
    }
}
