//! Leaf model: the ordered front/back pairs a zine is made of.

pub mod source;

use alloc::{string::String, vec::Vec};

/// One flippable leaf with a front and a back face image.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Leaf {
    ordinal: usize,
    front_image: String,
    back_image: String,
}

impl Leaf {
    /// Zero-based position of this leaf in its sequence.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// URL or path of the face shown while the leaf is unturned.
    pub fn front_image(&self) -> &str {
        &self.front_image
    }

    /// URL or path of the face shown once the leaf is turned.
    pub fn back_image(&self) -> &str {
        &self.back_image
    }
}

/// Immutable, ordered leaf sequence with contiguous ordinals `0..len`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LeafSequence {
    leaves: Vec<Leaf>,
}

impl LeafSequence {
    pub const fn new() -> Self {
        Self { leaves: Vec::new() }
    }

    /// Builds a sequence from `(front, back)` pairs in input order.
    pub fn from_pairs<I, F, B>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (F, B)>,
        F: Into<String>,
        B: Into<String>,
    {
        let leaves = pairs
            .into_iter()
            .enumerate()
            .map(|(ordinal, (front, back))| Leaf {
                ordinal,
                front_image: front.into(),
                back_image: back.into(),
            })
            .collect();
        Self { leaves }
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    pub fn get(&self, ordinal: usize) -> Option<&Leaf> {
        self.leaves.get(ordinal)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Leaf> {
        self.leaves.iter()
    }
}

impl<'a> IntoIterator for &'a LeafSequence {
    type Item = &'a Leaf;
    type IntoIter = core::slice::Iter<'a, Leaf>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
