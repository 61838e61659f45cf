//! Document identifier issuing.
//!
//! An issuer is asked for a fresh id once per record, before the record's
//! content is assembled.

use std::sync::atomic::{AtomicU64, Ordering};

use rand::Rng;
use rand::distributions::Alphanumeric;
use roster::models::Role;

/// Length of ids produced by [`AutoIdIssuer`].
pub const AUTO_ID_LEN: usize = 20;

pub trait IdentifierIssuer {
    /// Returns a fresh id for a record of the given role.
    fn issue<R: Rng + ?Sized>(&self, role: Role, rng: &mut R) -> String;
}

impl<T: IdentifierIssuer + ?Sized> IdentifierIssuer for &T {
    fn issue<R: Rng + ?Sized>(&self, role: Role, rng: &mut R) -> String {
        (**self).issue(role, rng)
    }
}

/// 20-character alphanumeric ids, the shape of a document store auto-id.
///
/// Ids are drawn from the caller's rng, so a seeded rng reproduces them.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoIdIssuer;

impl IdentifierIssuer for AutoIdIssuer {
    fn issue<R: Rng + ?Sized>(&self, _role: Role, rng: &mut R) -> String {
        (0..AUTO_ID_LEN)
            .map(|_| char::from(rng.sample(Alphanumeric)))
            .collect()
    }
}

/// Random (version 4) UUIDs built from the caller's rng.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIssuer;

impl IdentifierIssuer for UuidIssuer {
    fn issue<R: Rng + ?Sized>(&self, _role: Role, rng: &mut R) -> String {
        let bytes: [u8; 16] = rng.r#gen();
        uuid::Builder::from_random_bytes(bytes)
            .into_uuid()
            .hyphenated()
            .to_string()
    }
}

/// Counter-based ids such as `teacher-0003`, for offline runs.
///
/// The counter is shared across roles and starts at 1. It consumes no
/// randomness, so swapping it in leaves every other field unchanged.
#[derive(Debug, Default)]
pub struct SequentialIssuer {
    next: AtomicU64,
}

impl SequentialIssuer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continues numbering after `last`.
    pub fn starting_after(last: u64) -> Self {
        Self {
            next: AtomicU64::new(last),
        }
    }
}

impl IdentifierIssuer for SequentialIssuer {
    fn issue<R: Rng + ?Sized>(&self, role: Role, _rng: &mut R) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{role}-{n:04}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_auto_ids_are_alphanumeric() {
        let mut rng = StdRng::seed_from_u64(1);
        let id = AutoIdIssuer.issue(Role::Staff, &mut rng);

        assert_eq!(id.len(), AUTO_ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_auto_ids_reproducible_and_distinct() {
        let mut a = StdRng::seed_from_u64(5);
        let mut b = StdRng::seed_from_u64(5);

        let first: Vec<String> = (0..50)
            .map(|_| AutoIdIssuer.issue(Role::Teacher, &mut a))
            .collect();
        let second: Vec<String> = (0..50)
            .map(|_| AutoIdIssuer.issue(Role::Teacher, &mut b))
            .collect();
        assert_eq!(first, second);

        let unique: std::collections::HashSet<_> = first.iter().collect();
        assert_eq!(unique.len(), 50);
    }

    #[test]
    fn test_uuid_ids_parse_as_v4() {
        let mut rng = StdRng::seed_from_u64(2);
        let id = UuidIssuer.issue(Role::Student, &mut rng);

        let uuid = uuid::Uuid::parse_str(&id).unwrap();
        assert_eq!(uuid.get_version_num(), 4);
    }

    #[test]
    fn test_sequential_ids() {
        let issuer = SequentialIssuer::new();
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(issuer.issue(Role::Staff, &mut rng), "staff-0001");
        assert_eq!(issuer.issue(Role::Teacher, &mut rng), "teacher-0002");

        let resumed = SequentialIssuer::starting_after(41);
        assert_eq!(resumed.issue(Role::Student, &mut rng), "student-0042");
    }
}
