use itertools::Itertools;
use std::collections::HashMap;

use crate::logic::color::{normalize_hex, soften};
use crate::logic::display::strip_decoration;
use crate::logic::navigator::Navigator;
use crate::model::{
    generate_id, now_rfc3339, Id, NewTag, Tag, TagUpdate, TaxonomyError, TaxonomyResult,
};

/// Arena of tags keyed by id
///
/// Parent and child links are ids into the arena. Every mutation either
/// completes with all structural invariants intact or fails without touching
/// anything.
#[derive(Debug, Clone, Default)]
pub struct TagRepository {
    tags: HashMap<Id, Tag>,
    /// Parentless tags in insertion order
    roots: Vec<Id>,
    /// Root ancestor of every tag, roots mapping to themselves
    root_by_tag: HashMap<Id, Id>,
}

impl TagRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repository from externally supplied records
    ///
    /// `parent` is authoritative: children lists, depths and non-root colors
    /// are recomputed from it. A supplied `children` order is kept where it
    /// agrees with the parent links.
    pub fn from_records(records: Vec<Tag>) -> TaxonomyResult<Self> {
        let mut tags: HashMap<Id, Tag> = HashMap::with_capacity(records.len());
        let mut order: Vec<Id> = Vec::with_capacity(records.len());

        for mut tag in records {
            if tags.contains_key(&tag.id) {
                return Err(TaxonomyError::invalid_snapshot(format!(
                    "duplicate tag id '{}'",
                    tag.id
                )));
            }
            tag.name = strip_decoration(&tag.name).to_string();
            order.push(tag.id.clone());
            tags.insert(tag.id.clone(), tag);
        }

        // Children per parent, in record order
        let mut children: HashMap<Id, Vec<Id>> = HashMap::new();
        for id in &order {
            if let Some(parent_id) = &tags[id].parent {
                if !tags.contains_key(parent_id) {
                    return Err(TaxonomyError::invalid_snapshot(format!(
                        "tag '{}' references missing parent '{}'",
                        id, parent_id
                    )));
                }
                children.entry(parent_id.clone()).or_default().push(id.clone());
            }
        }

        for (parent_id, kids) in children.iter_mut() {
            let mut ordered: Vec<Id> = tags[parent_id]
                .children
                .iter()
                .filter(|child_id| kids.contains(child_id))
                .unique()
                .cloned()
                .collect();
            for kid in kids.iter() {
                if !ordered.contains(kid) {
                    ordered.push(kid.clone());
                }
            }
            *kids = ordered;
        }

        for (id, tag) in tags.iter_mut() {
            tag.children = children.remove(id).unwrap_or_default();
        }

        let roots: Vec<Id> = order
            .iter()
            .filter(|id| tags[*id].parent.is_none())
            .cloned()
            .collect();

        // Depth and derived colors, top down. Anything not reached sits on a cycle.
        let mut root_by_tag: HashMap<Id, Id> = HashMap::with_capacity(tags.len());
        for root_id in &roots {
            let root_color = {
                let root = tags
                    .get_mut(root_id)
                    .ok_or_else(|| TaxonomyError::not_found(root_id))?;
                root.color = normalize_hex(&root.color)?;
                root.depth = 0;
                root.color.clone()
            };

            let mut stack = vec![(root_id.clone(), 0usize)];
            while let Some((id, depth)) = stack.pop() {
                let tag = tags.get_mut(&id).ok_or_else(|| TaxonomyError::not_found(&id))?;
                tag.depth = depth;
                if depth > 0 {
                    tag.color = soften(&root_color, depth)?;
                }
                for child_id in tag.children.iter().rev() {
                    stack.push((child_id.clone(), depth + 1));
                }
                root_by_tag.insert(id, root_id.clone());
            }
        }

        if root_by_tag.len() != tags.len() {
            let on_cycle = order
                .iter()
                .find(|id| !Self::reaches_root(&tags, id))
                .cloned()
                .unwrap_or_default();
            return Err(TaxonomyError::invalid_snapshot(format!(
                "parent links form a cycle through '{}'",
                on_cycle
            )));
        }

        log::debug!("Loaded {} tags ({} roots)", tags.len(), roots.len());
        Ok(Self {
            tags,
            roots,
            root_by_tag,
        })
    }

    fn reaches_root(tags: &HashMap<Id, Tag>, id: &str) -> bool {
        let mut current = id;
        for _ in 0..=tags.len() {
            match tags.get(current).and_then(|tag| tag.parent.as_deref()) {
                Some(parent_id) => current = parent_id,
                None => return true,
            }
        }
        false
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.tags.contains_key(id)
    }

    pub fn get(&self, id: &str) -> TaxonomyResult<&Tag> {
        self.tags.get(id).ok_or_else(|| TaxonomyError::not_found(id))
    }

    pub fn root_ids(&self) -> &[Id] {
        &self.roots
    }

    /// Id of the root ancestor of `id` (itself for a root)
    pub fn root_id_of(&self, id: &str) -> TaxonomyResult<&str> {
        self.root_by_tag
            .get(id)
            .map(String::as_str)
            .ok_or_else(|| TaxonomyError::not_found(id))
    }

    /// All tags, unordered
    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.values()
    }

    pub fn navigator(&self) -> Navigator<'_> {
        Navigator::new(self)
    }

    /// Create a tag and return its id
    ///
    /// With a parent, `color` is ignored: the stored color is derived from the
    /// root ancestor's color and the new tag's depth.
    pub fn add_tag(
        &mut self,
        name: &str,
        color: &str,
        parent_id: Option<&str>,
        phase: Option<&str>,
    ) -> TaxonomyResult<Id> {
        let id = generate_id();
        let (depth, color, root_id) = match parent_id {
            Some(parent_id) => {
                let depth = self.get(parent_id)?.depth + 1;
                let root = self.navigator().root_of(parent_id)?;
                (depth, soften(&root.color, depth)?, root.id.clone())
            }
            None => (0, normalize_hex(color)?, id.clone()),
        };

        let now = now_rfc3339();
        let tag = Tag {
            id: id.clone(),
            name: strip_decoration(name).to_string(),
            color,
            parent: parent_id.map(str::to_string),
            children: Vec::new(),
            phase: phase.map(str::to_string),
            depth,
            created_at: now.clone(),
            updated_at: now,
        };

        match parent_id {
            Some(parent_id) => {
                if let Some(parent) = self.tags.get_mut(parent_id) {
                    parent.children.push(id.clone());
                }
            }
            None => self.roots.push(id.clone()),
        }

        log::debug!("Added tag '{}' ({}) at depth {}", tag.name, id, depth);
        self.root_by_tag.insert(id.clone(), root_id);
        self.tags.insert(id.clone(), tag);
        Ok(id)
    }

    pub fn insert(&mut self, new_tag: NewTag) -> TaxonomyResult<Id> {
        self.add_tag(
            &new_tag.name,
            &new_tag.color,
            new_tag.parent_id.as_deref(),
            new_tag.phase.as_deref(),
        )
    }

    /// Apply a partial update to a tag
    ///
    /// A color change is only accepted on root tags and is propagated to every
    /// descendant's derived color.
    pub fn update_tag(&mut self, id: &str, update: TagUpdate) -> TaxonomyResult<()> {
        let tag = self.get(id)?;

        let new_color = match &update.color {
            Some(_) if !tag.is_root() => {
                return Err(TaxonomyError::DerivedColor { id: id.to_string() })
            }
            Some(color) => Some(normalize_hex(color)?),
            None => None,
        };

        // Precompute derived colors so nothing below can fail half way
        let mut recolored: Vec<(Id, String)> = Vec::new();
        if let Some(root_color) = &new_color {
            for (descendant, _) in self.navigator().flatten_subtree(id)?.into_iter().skip(1) {
                recolored.push((descendant.id.clone(), soften(root_color, descendant.depth)?));
            }
        }

        let now = now_rfc3339();
        if let Some(tag) = self.tags.get_mut(id) {
            if let Some(name) = &update.name {
                tag.name = strip_decoration(name).to_string();
            }
            if let Some(color) = new_color {
                tag.color = color;
            }
            if update.clear_phase {
                tag.phase = None;
            } else if let Some(phase) = update.phase {
                tag.phase = Some(phase);
            }
            tag.updated_at = now.clone();
        }

        for (descendant_id, color) in recolored {
            if let Some(descendant) = self.tags.get_mut(&descendant_id) {
                descendant.color = color;
                descendant.updated_at = now.clone();
            }
        }

        log::debug!("Updated tag {}", id);
        Ok(())
    }

    /// Remove a tag together with its whole subtree
    ///
    /// Returns the removed ids in pre-order. Removing an id that is not present
    /// (including one already removed) fails with `NotFound`.
    pub fn remove_tag(&mut self, id: &str) -> TaxonomyResult<Vec<Id>> {
        let parent_id = self.get(id)?.parent.clone();
        let removed = self.navigator().descendants(id)?;

        for removed_id in &removed {
            self.tags.remove(removed_id);
            self.root_by_tag.remove(removed_id);
        }

        match parent_id {
            Some(parent_id) => {
                if let Some(parent) = self.tags.get_mut(&parent_id) {
                    parent.children.retain(|child_id| child_id != id);
                    parent.updated_at = now_rfc3339();
                }
            }
            None => self.roots.retain(|root_id| root_id != id),
        }

        log::debug!("Removed tag {} with {} descendants", id, removed.len() - 1);
        Ok(removed)
    }
}
