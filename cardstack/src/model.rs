use alloc::vec::Vec;

use crate::error::{Result, StackError};

/// The ordered cards of a stack. Position 0 is the first card; positions are dense.
///
/// Every by-position mutation checks its index up front, so a failed call leaves the stack
/// unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardStack<M> {
    cards: Vec<M>,
}

impl<M> Default for CardStack<M> {
    fn default() -> Self {
        Self { cards: Vec::new() }
    }
}

impl<M> CardStack<M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(cards: Vec<M>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&M> {
        self.cards.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut M> {
        self.cards.get_mut(index)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, M> {
        self.cards.iter()
    }

    pub fn as_slice(&self) -> &[M] {
        &self.cards
    }

    /// Appends a card and returns its position.
    pub fn append(&mut self, card: M) -> usize {
        self.cards.push(card);
        self.cards.len() - 1
    }

    /// Inserts a card at `index`, shifting later cards up. `index == len` appends.
    pub fn insert_at(&mut self, index: usize, card: M) -> Result<()> {
        if index > self.cards.len() {
            return Err(self.out_of_bounds(index));
        }
        self.cards.insert(index, card);
        Ok(())
    }

    /// Removes and returns the card at `index`, shifting later cards down.
    pub fn remove_at(&mut self, index: usize) -> Result<M> {
        if index >= self.cards.len() {
            return Err(self.out_of_bounds(index));
        }
        Ok(self.cards.remove(index))
    }

    /// Replaces the card at `index` in place and returns the old one.
    pub fn replace_at(&mut self, index: usize, card: M) -> Result<M> {
        let len = self.cards.len();
        let slot = self
            .cards
            .get_mut(index)
            .ok_or(StackError::IndexOutOfBounds { index, len })?;
        Ok(core::mem::replace(slot, card))
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    fn out_of_bounds(&self, index: usize) -> StackError {
        StackError::IndexOutOfBounds {
            index,
            len: self.cards.len(),
        }
    }
}

impl<'a, M> IntoIterator for &'a CardStack<M> {
    type Item = &'a M;
    type IntoIter = core::slice::Iter<'a, M>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

impl<M> FromIterator<M> for CardStack<M> {
    fn from_iter<I: IntoIterator<Item = M>>(iter: I) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}
