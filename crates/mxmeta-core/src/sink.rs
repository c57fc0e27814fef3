//! Destinations for assembled metadata.

use crate::assemble::MetadataTree;

/// Receives assembled trees.
pub trait MetadataSink {
    fn publish(&mut self, tree: &MetadataTree) -> anyhow::Result<()>;
}

/// Keeps every published tree in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    trees: Vec<MetadataTree>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trees(&self) -> &[MetadataTree] {
        &self.trees
    }

    pub fn into_trees(self) -> Vec<MetadataTree> {
        self.trees
    }
}

impl MetadataSink for CollectingSink {
    fn publish(&mut self, tree: &MetadataTree) -> anyhow::Result<()> {
        self.trees.push(tree.clone());
        Ok(())
    }
}

impl<S: MetadataSink + ?Sized> MetadataSink for &mut S {
    fn publish(&mut self, tree: &MetadataTree) -> anyhow::Result<()> {
        (**self).publish(tree)
    }
}
