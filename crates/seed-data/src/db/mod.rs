//! Document store integration for seeding generated records.
//!
//! The [`Seeder`] writes each record to its collection and, for staff and
//! teachers, a directory entry to `users` with a store-assigned `createdAt`.

mod seeder;

pub use seeder::{SeedError, SeedSummary, Seeder};
