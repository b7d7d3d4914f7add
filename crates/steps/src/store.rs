//! Key-value persistence seam for the step baseline.

use std::collections::HashMap;
use std::convert::Infallible;

/// Small key-value store holding float preferences.
///
/// Implementations are expected to be local and fast; callers treat
/// failures as fatal rather than retrying.
pub trait BaselineStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the stored value, or `None` if the key was never written.
    fn get_float(&self, key: &str) -> Result<Option<f32>, Self::Error>;

    fn put_float(&mut self, key: &str, value: f32) -> Result<(), Self::Error>;

    fn remove(&mut self, key: &str) -> Result<(), Self::Error>;
}

/// In-memory store, used in tests and when no persistence is wanted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, f32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with a single value.
    pub fn with_value(key: &str, value: f32) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value);
        store
    }

    pub fn get(&self, key: &str) -> Option<f32> {
        self.values.get(key).copied()
    }
}

impl BaselineStore for MemoryStore {
    type Error = Infallible;

    fn get_float(&self, key: &str) -> Result<Option<f32>, Self::Error> {
        Ok(self.get(key))
    }

    fn put_float(&mut self, key: &str, value: f32) -> Result<(), Self::Error> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), Self::Error> {
        self.values.remove(key);
        Ok(())
    }
}

impl<S: BaselineStore + ?Sized> BaselineStore for &mut S {
    type Error = S::Error;

    fn get_float(&self, key: &str) -> Result<Option<f32>, Self::Error> {
        (**self).get_float(key)
    }

    fn put_float(&mut self, key: &str, value: f32) -> Result<(), Self::Error> {
        (**self).put_float(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), Self::Error> {
        (**self).remove(key)
    }
}
