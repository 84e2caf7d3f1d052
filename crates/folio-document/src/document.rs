//! The document tree and the sink the parser builds it through.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::block::Block;
use crate::error::TreeError;

/// Receives blocks as the parser produces them, in document order.
///
/// This is the only capability the parser needs from its host. A host
/// editor with its own node store can implement it to build nodes directly.
pub trait BlockSink {
    /// Append one block at the end.
    fn push_block(&mut self, block: Block);
}

impl BlockSink for Vec<Block> {
    fn push_block(&mut self, block: Block) {
        self.push(block);
    }
}

/// An ordered sequence of blocks.
///
/// Every root child is a [`Block`]; bare text never appears at this level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    /// An empty document.
    #[must_use]
    pub const fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    /// Number of blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// True if there are no blocks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// All blocks in order.
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// The block at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    /// The block at `index`, for in-place edits.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Block> {
        self.blocks.get_mut(index)
    }

    /// Iterate over the blocks in order.
    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    /// Append a block at the end.
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Insert a block so it ends up at `index`. `index == len()` appends.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::IndexOutOfRange`] if `index > len()`.
    pub fn insert(&mut self, index: usize, block: Block) -> Result<(), TreeError> {
        if index > self.blocks.len() {
            return Err(self.out_of_range(index));
        }
        self.blocks.insert(index, block);
        Ok(())
    }

    /// Remove and return the block at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::IndexOutOfRange`] if there is no such block.
    pub fn remove(&mut self, index: usize) -> Result<Block, TreeError> {
        if index >= self.blocks.len() {
            return Err(self.out_of_range(index));
        }
        Ok(self.blocks.remove(index))
    }

    /// Put `block` at `index` and return the block it replaced.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::IndexOutOfRange`] if there is no such block.
    pub fn replace(&mut self, index: usize, block: Block) -> Result<Block, TreeError> {
        let len = self.blocks.len();
        self.blocks
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, block))
            .ok_or(TreeError::IndexOutOfRange { index, len })
    }

    const fn out_of_range(&self, index: usize) -> TreeError {
        TreeError::IndexOutOfRange {
            index,
            len: self.blocks.len(),
        }
    }

    /// The document as JSON, one object per block tagged by `"type"`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, TreeError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Read a document written by [`Document::to_json`].
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Json`] for malformed JSON, unknown block types,
    /// or heading levels outside `1..=6`.
    pub fn from_json(json: &str) -> Result<Self, TreeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Take the blocks out.
    #[must_use]
    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }
}

impl BlockSink for Document {
    fn push_block(&mut self, block: Block) {
        self.blocks.push(block);
    }
}

impl From<Vec<Block>> for Document {
    fn from(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }
}

impl FromIterator<Block> for Document {
    fn from_iter<I: IntoIterator<Item = Block>>(iter: I) -> Self {
        Self {
            blocks: iter.into_iter().collect(),
        }
    }
}

impl Index<usize> for Document {
    type Output = Block;

    fn index(&self, index: usize) -> &Block {
        &self.blocks[index]
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

impl IntoIterator for Document {
    type Item = Block;
    type IntoIter = std::vec::IntoIter<Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.into_iter()
    }
}
