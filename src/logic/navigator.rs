//! Read-only traversal over a [`TagRepository`]

use crate::logic::display::display_name;
use crate::model::{Id, Tag, TagNode, TaxonomyError, TaxonomyResult};
use crate::store::TagRepository;

/// Deepest relative level a nested [`TagNode`] view will render
pub const MAX_NESTED_DEPTH: usize = 48;

/// Query view over a repository. Never mutates.
#[derive(Debug, Clone, Copy)]
pub struct Navigator<'a> {
    repo: &'a TagRepository,
}

impl<'a> Navigator<'a> {
    pub fn new(repo: &'a TagRepository) -> Self {
        Self { repo }
    }

    pub fn get(&self, id: &str) -> TaxonomyResult<&'a Tag> {
        self.repo.get(id)
    }

    /// Ids from the root down to the tag's parent; empty for a root tag
    pub fn ancestors(&self, id: &str) -> TaxonomyResult<Vec<Id>> {
        let mut chain = Vec::new();
        let mut current = self.repo.get(id)?;
        while let Some(parent_id) = &current.parent {
            current = self.repo.get(parent_id)?;
            chain.push(current.id.clone());
        }
        chain.reverse();
        Ok(chain)
    }

    /// The unparented ancestor of `id` (the tag itself when it is a root)
    pub fn root_of(&self, id: &str) -> TaxonomyResult<&'a Tag> {
        self.repo.get(self.repo.root_id_of(id)?)
    }

    pub fn root_color_of(&self, id: &str) -> TaxonomyResult<String> {
        Ok(self.root_of(id)?.color.clone())
    }

    /// Display names from the root down to `id`, inclusive
    pub fn tag_hierarchy(&self, id: &str) -> TaxonomyResult<Vec<String>> {
        let mut names = Vec::new();
        let mut current = self.repo.get(id)?;
        names.push(display_name(&current.name, current.depth));
        while let Some(parent_id) = &current.parent {
            current = self.repo.get(parent_id)?;
            names.push(display_name(&current.name, current.depth));
        }
        names.reverse();
        Ok(names)
    }

    /// `id` and every tag below it, in pre-order. Each id appears once.
    pub fn descendants(&self, id: &str) -> TaxonomyResult<Vec<Id>> {
        Ok(self
            .flatten_subtree(id)?
            .into_iter()
            .map(|(tag, _)| tag.id.clone())
            .collect())
    }

    /// Pre-order walk of the subtree at `id`, paired with depth relative to `id`
    pub fn flatten_subtree(&self, id: &str) -> TaxonomyResult<Vec<(&'a Tag, usize)>> {
        let mut flat = Vec::new();
        let mut stack = vec![(self.repo.get(id)?, 0usize)];

        while let Some((tag, relative_depth)) = stack.pop() {
            flat.push((tag, relative_depth));
            // Reverse so the first child is visited first
            for child_id in tag.children.iter().rev() {
                stack.push((self.repo.get(child_id)?, relative_depth + 1));
            }
        }

        Ok(flat)
    }

    pub fn children_of(&self, id: &str) -> TaxonomyResult<Vec<&'a Tag>> {
        self.repo
            .get(id)?
            .children
            .iter()
            .map(|child_id| self.repo.get(child_id))
            .collect()
    }

    /// Root tags in insertion order
    pub fn tag_tree(&self) -> Vec<&'a Tag> {
        self.repo
            .root_ids()
            .iter()
            .filter_map(|id| self.repo.get(id).ok())
            .collect()
    }

    /// Whole forest as nested nodes
    pub fn tag_tree_nodes(&self) -> TaxonomyResult<Vec<TagNode>> {
        self.repo
            .root_ids()
            .iter()
            .map(|id| self.subtree_node(id))
            .collect()
    }

    /// Nested view of the subtree at `id`
    ///
    /// Built bottom-up from the pre-order walk. Fails with `TooDeep` when the
    /// subtree goes more than [`MAX_NESTED_DEPTH`] levels below `id`; the flat
    /// walk has no such limit.
    pub fn subtree_node(&self, id: &str) -> TaxonomyResult<TagNode> {
        let flat = self.flatten_subtree(id)?;
        let deepest = flat.iter().map(|(_, depth)| *depth).max().unwrap_or(0);
        if deepest > MAX_NESTED_DEPTH {
            return Err(TaxonomyError::TooDeep {
                id: id.to_string(),
                depth: deepest,
                limit: MAX_NESTED_DEPTH,
            });
        }

        // In reverse pre-order a tag's children are the last nodes finished,
        // last child deepest in the stack
        let mut finished: Vec<TagNode> = Vec::new();
        for (tag, _) in flat.into_iter().rev() {
            let start = finished.len().saturating_sub(tag.children.len());
            let mut children = finished.split_off(start);
            children.reverse();

            finished.push(TagNode {
                id: tag.id.clone(),
                name: tag.name.clone(),
                display_name: display_name(&tag.name, tag.depth),
                color: tag.color.clone(),
                phase: tag.phase.clone(),
                depth: tag.depth,
                children,
            });
        }

        finished.pop().ok_or_else(|| TaxonomyError::not_found(id))
    }

    /// Tags whose phase equals `phase`, in no particular order
    pub fn tags_by_phase(&self, phase: &str) -> Vec<&'a Tag> {
        self.repo
            .iter()
            .filter(|tag| tag.phase.as_deref() == Some(phase))
            .collect()
    }

    /// Every tag, roots in insertion order each followed by its subtree
    pub fn all_tags(&self) -> TaxonomyResult<Vec<&'a Tag>> {
        let mut all = Vec::with_capacity(self.repo.len());
        for root_id in self.repo.root_ids() {
            all.extend(self.flatten_subtree(root_id)?.into_iter().map(|(tag, _)| tag));
        }
        Ok(all)
    }
}
