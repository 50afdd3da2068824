use rand::Rng;
use std::collections::HashSet;

/// Default number of digits in a generated id.
pub const DEFAULT_ID_LENGTH: usize = 4;

/// Redraws before giving up on finding an unused id.
const MAX_REDRAWS: usize = 64;

/// Generates a string of `length` independently drawn decimal digits.
///
/// Used to link accordion toggles to their panels within one page. Not
/// cryptographically meaningful.
pub fn generate_random_num_id(length: usize) -> String {
    generate_with(&mut rand::thread_rng(), length)
}

fn generate_with<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// Issues numeric ids that are unique within one page build.
///
/// Random draws collide rarely but can; colliding draws are discarded and
/// redrawn. If the id space is exhausted the length grows by one digit.
pub struct IdGenerator<R = rand::rngs::ThreadRng> {
    rng: R,
    length: usize,
    issued: HashSet<String>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::with_rng(rand::thread_rng(), DEFAULT_ID_LENGTH)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> IdGenerator<R> {
    pub fn with_rng(rng: R, length: usize) -> Self {
        Self {
            rng,
            length: length.max(1),
            issued: HashSet::new(),
        }
    }

    /// Returns a fresh id not previously issued by this generator.
    pub fn next_id(&mut self) -> String {
        loop {
            for _ in 0..MAX_REDRAWS {
                let id = generate_with(&mut self.rng, self.length);
                if self.issued.insert(id.clone()) {
                    return id;
                }
                tracing::debug!(id = %id, "Generated id collided, redrawing");
            }
            self.length += 1;
            tracing::debug!(length = self.length, "Id space crowded, widening ids");
        }
    }

    pub fn issued(&self) -> usize {
        self.issued.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_length_is_four_digits() {
        let id = generate_random_num_id(DEFAULT_ID_LENGTH);
        assert_eq!(id.len(), 4);
        assert!(id.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_zero_length() {
        assert_eq!(generate_random_num_id(0), "");
    }

    #[test]
    fn test_leading_zeros_are_kept() {
        // With enough draws at least one id starts with '0'
        let mut rng = StdRng::seed_from_u64(7);
        let found = (0..500).any(|_| generate_with(&mut rng, 4).starts_with('0'));
        assert!(found);
    }

    #[test]
    fn test_generator_never_repeats() {
        // A one-digit space forces collisions after ten ids
        let mut ids = IdGenerator::with_rng(StdRng::seed_from_u64(1), 1);
        let mut seen = HashSet::new();
        for _ in 0..30 {
            assert!(seen.insert(ids.next_id()));
        }
        assert_eq!(ids.issued(), 30);
    }

    #[test]
    fn test_generator_widens_when_exhausted() {
        let mut ids = IdGenerator::with_rng(StdRng::seed_from_u64(3), 1);
        let all: Vec<String> = (0..11).map(|_| ids.next_id()).collect();
        // Eleven distinct ids cannot all fit in one digit
        assert!(all.iter().any(|id| id.len() == 2));
        assert_eq!(all.iter().collect::<HashSet<_>>().len(), 11);
    }

    proptest! {
        #[test]
        fn prop_id_is_exactly_length_digits(len in 0usize..32) {
            let id = generate_random_num_id(len);
            prop_assert_eq!(id.len(), len);
            prop_assert!(id.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
