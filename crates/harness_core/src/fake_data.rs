//! Fake-data generation for test input values.
//!
//! A thin facade over the `fake` crate. The generator owns its RNG so a
//! fixture can hand out reproducible data when seeded, which keeps flaky
//! value-dependent tests debuggable.

use std::sync::{Mutex, MutexGuard, PoisonError};

use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::{Sentence, Words};
use fake::faker::name::en::Name;
use fake::{Dummy, Fake, Faker};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

#[cfg(test)]
#[path = "fake_data_tests.rs"]
mod tests;

/// Randomized (or, when seeded, deterministic) test input values.
pub struct FakeData {
    rng: Mutex<StdRng>,
}

impl FakeData {
    /// A generator seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// A deterministic generator; the same seed yields the same sequence.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// A plausible person name.
    pub fn full_name(&self) -> String {
        Name().fake_with_rng(&mut *self.rng())
    }

    /// An email address in a reserved example domain.
    pub fn email(&self) -> String {
        SafeEmail().fake_with_rng(&mut *self.rng())
    }

    /// A lorem sentence of 4 to 10 words.
    pub fn sentence(&self) -> String {
        Sentence(4..10).fake_with_rng(&mut *self.rng())
    }

    /// Between 3 and 6 lorem words.
    pub fn words(&self) -> Vec<String> {
        Words(3..7).fake_with_rng(&mut *self.rng())
    }

    /// A version-4 UUID drawn from this generator's RNG.
    pub fn uuid(&self) -> Uuid {
        uuid::Builder::from_random_bytes(self.rng().gen()).into_uuid()
    }

    /// A number within `range`.
    pub fn number_in(&self, range: std::ops::Range<u32>) -> u32 {
        range.fake_with_rng(&mut *self.rng())
    }

    /// An auto-populated value of any type deriving [`Dummy`].
    pub fn entity<T>(&self) -> T
    where
        T: Dummy<Faker>,
    {
        Faker.fake_with_rng(&mut *self.rng())
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for FakeData {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FakeData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakeData").finish_non_exhaustive()
    }
}
