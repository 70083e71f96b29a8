//! Favorites set
//!
//! Keyed by dog id; kept in toggle order so the favorites section lists
//! dogs in the order they were picked.

use super::dog::Dog;

#[derive(Debug, Clone, Default)]
pub struct Favorites {
    dogs: Vec<Dog>,
}

impl Favorites {
    pub fn new() -> Self {
        Self { dogs: Vec::new() }
    }

    /// Remove the dog if it is a favorite, add it otherwise.
    /// Returns whether the dog is a favorite afterwards.
    pub fn toggle(&mut self, dog: &Dog) -> bool {
        if let Some(pos) = self.position(&dog.id) {
            self.dogs.remove(pos);
            false
        } else {
            self.dogs.push(dog.clone());
            true
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&Dog> {
        self.dogs.iter().find(|d| d.id == id)
    }

    /// Ids in toggle order, as submitted to the match call
    pub fn ids(&self) -> Vec<String> {
        self.dogs.iter().map(|d| d.id.clone()).collect()
    }

    pub fn dogs(&self) -> &[Dog] {
        &self.dogs
    }

    pub fn len(&self) -> usize {
        self.dogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dogs.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.dogs.iter().position(|d| d.id == id)
    }
}
