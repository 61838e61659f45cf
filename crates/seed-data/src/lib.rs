//! Seed data generation for the school roster.
//!
//! This crate generates realistic non-teaching staff, teachers and students,
//! and writes them to a [`roster::DocumentStore`] together with the `users`
//! directory entries the login flow reads.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use seed_data::prelude::*;
//!
//! let store = MemoryStore::new();
//! let mut rng = StdRng::seed_from_u64(12345);
//!
//! let result = BatchBuilder::reference()
//!     .with_metrics(true)
//!     .build(&store, &mut rng)
//!     .await?;
//! ```

pub mod builders;
pub mod config;
pub mod db;
pub mod generators;
pub mod ids;
pub mod vocab;

// Re-export core types from roster crate
pub use roster::models::{
    DirectoryEntry, Gender, Record, Role, StaffRecord, StudentRecord, TeacherRecord,
};

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::builders::{BatchBuilder, BatchMetrics, BatchResult};
    pub use crate::config::{ConfigError, SeedConfig};
    pub use crate::db::{SeedError, SeedSummary, Seeder};
    pub use crate::generators::{
        EntityGenerator, EntityKind, StaffGenConfig, StaffGenerator, StudentGenConfig,
        StudentGenerator, TeacherGenConfig, TeacherGenerator,
    };
    pub use crate::ids::{AutoIdIssuer, IdentifierIssuer, SequentialIssuer, UuidIssuer};
    pub use crate::vocab::{DesignationTable, NamePool, VocabTable, VocabularyError};
    pub use crate::{Gender, Record, Role};
    pub use rand::SeedableRng;
    pub use rand::rngs::StdRng;
    pub use roster::{DocumentStore, MemoryStore, PgDocumentStore};
}
