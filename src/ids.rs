use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

const MEETING_ID_LEN: usize = 16;
const PASSWORD_LEN: usize = 12;

/// Source of generated meeting ids and passwords
#[cfg_attr(test, mockall::automock)]
pub trait IdGenerator: Send + Sync {
    fn meeting_id(&self) -> String;
    fn password(&self) -> String;
}

/// Alphanumeric ids from a `StdRng`
pub struct RandomIdGenerator {
    rng: Mutex<StdRng>,
}

impl RandomIdGenerator {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible sequence for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn alphanumeric(&self, len: usize) -> String {
        // A poisoned lock still holds a usable RNG
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        (&mut *rng)
            .sample_iter(&Alphanumeric)
            .take(len)
            .map(char::from)
            .collect()
    }
}

impl Default for RandomIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for RandomIdGenerator {
    fn meeting_id(&self) -> String {
        self.alphanumeric(MEETING_ID_LEN)
    }

    fn password(&self) -> String {
        self.alphanumeric(PASSWORD_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_shapes() {
        let ids = RandomIdGenerator::new();
        let meeting_id = ids.meeting_id();
        let password = ids.password();

        assert_eq!(meeting_id.len(), MEETING_ID_LEN);
        assert_eq!(password.len(), PASSWORD_LEN);
        assert!(meeting_id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_unique_per_call() {
        let ids = RandomIdGenerator::new();
        let generated: HashSet<String> = (0..100).map(|_| ids.meeting_id()).collect();
        assert_eq!(generated.len(), 100);
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let a = RandomIdGenerator::seeded(42);
        let b = RandomIdGenerator::seeded(42);
        assert_eq!(a.meeting_id(), b.meeting_id());
        assert_eq!(a.password(), b.password());

        let c = RandomIdGenerator::seeded(7);
        assert_ne!(RandomIdGenerator::seeded(42).meeting_id(), c.meeting_id());
    }
}
