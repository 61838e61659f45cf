//! Writing generated records to a document store.

use roster::models::{CREATED_AT_FIELD, Record, Role, USERS_COLLECTION};
use roster::{DocumentStore, StoreError};
use thiserror::Error;
use tracing::info;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Counts of documents written by a seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub staff: usize,
    pub teachers: usize,
    pub students: usize,
    pub directory_entries: usize,
}

impl SeedSummary {
    pub fn records(&self) -> usize {
        self.staff + self.teachers + self.students
    }
}

/// Seeder for writing generated records and their directory entries.
///
/// Writes are sequential and the first failure stops the run; records
/// already written stay written.
pub struct Seeder<'a, S: DocumentStore + ?Sized> {
    store: &'a S,
    batch_size: usize,
}

impl<'a, S: DocumentStore + ?Sized> Seeder<'a, S> {
    /// Creates a new seeder writing to `store`.
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            batch_size: 10,
        }
    }

    /// Sets how many records are written between progress lines.
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// Seeds records into their collections.
    pub async fn seed_records(&self, records: &[Record]) -> Result<SeedSummary, SeedError> {
        info!("Seeding {} records...", records.len());

        let mut summary = SeedSummary::default();
        for (i, record) in records.iter().enumerate() {
            self.insert_record(record, &mut summary).await?;

            if (i + 1) % self.batch_size == 0 {
                info!("  Seeded {}/{} records", i + 1, records.len());
            }
        }

        info!(
            staff = summary.staff,
            teachers = summary.teachers,
            students = summary.students,
            directory_entries = summary.directory_entries,
            "Seeded {} records",
            summary.records()
        );
        Ok(summary)
    }

    /// Writes one record, then its directory entry if it has one.
    async fn insert_record(
        &self,
        record: &Record,
        summary: &mut SeedSummary,
    ) -> Result<(), SeedError> {
        let body = serde_json::to_value(record)?;
        self.store
            .set(record.collection(), record.id(), body)
            .await?;

        if let Some(entry) = record.directory_entry() {
            let body = serde_json::to_value(&entry)?;
            self.store
                .set_with_server_timestamp(USERS_COLLECTION, record.id(), body, CREATED_AT_FIELD)
                .await?;
            summary.directory_entries += 1;
        }

        match record.role() {
            Role::Staff => summary.staff += 1,
            Role::Teacher => summary.teachers += 1,
            Role::Student => summary.students += 1,
        }

        log_record(record);
        Ok(())
    }

    /// Returns the store for advanced usage.
    pub fn store(&self) -> &S {
        self.store
    }
}

fn log_record(record: &Record) {
    match record {
        Record::Staff(staff) => info!(
            email = %staff.email,
            department = %staff.department,
            designation = %staff.designation,
            "Created staff member: {}",
            record.display_name()
        ),
        Record::Teacher(teacher) => info!(
            email = %teacher.email,
            department = %teacher.department,
            subjects = %teacher.subjects.join(", "),
            classes = %teacher.classes.join(", "),
            "Created teacher: {}",
            record.display_name()
        ),
        Record::Student(student) => info!("Created student: {}", student.first_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster::MemoryStore;
    use roster::models::{STUDENTS_COLLECTION, StaffRecord};
    use serde_json::json;

    use crate::generators::{EntityGenerator, EntityKind};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use time::macros::date;

    fn records() -> Vec<Record> {
        let entity_gen = EntityGenerator::new().with_today(date!(2026 - 10 - 17));
        let mut rng = StdRng::seed_from_u64(12);
        let mut records = entity_gen.generate_batch(EntityKind::Staff, 2, &mut rng);
        records.extend(entity_gen.generate_batch(
            EntityKind::Student { class_num: 4 },
            3,
            &mut rng,
        ));
        records
    }

    #[tokio::test]
    async fn test_seed_counts_by_role() {
        let store = MemoryStore::new();
        let seeder = Seeder::new(&store).with_batch_size(0);

        let summary = seeder.seed_records(&records()).await.unwrap();

        assert_eq!(summary.staff, 2);
        assert_eq!(summary.students, 3);
        assert_eq!(summary.directory_entries, 2);
        assert_eq!(summary.records(), 5);
        assert_eq!(seeder.store().count(STUDENTS_COLLECTION).await.unwrap(), 3);
        assert_eq!(seeder.store().count(USERS_COLLECTION).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_directory_entry_written_after_record() {
        let store = MemoryStore::new();
        let records = records();
        Seeder::new(&store)
            .with_batch_size(1)
            .seed_records(&records[..1])
            .await
            .unwrap();

        let staff: StaffRecord = serde_json::from_value(
            store
                .get(records[0].collection(), records[0].id())
                .await
                .unwrap()
                .unwrap(),
        )
        .unwrap();
        assert_eq!(staff.id, records[0].id());

        let entry = store
            .get(USERS_COLLECTION, records[0].id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(entry["role"], json!("staff"));
        assert!(entry[CREATED_AT_FIELD].is_string());
    }
}
