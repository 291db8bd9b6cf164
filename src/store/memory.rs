use parking_lot::RwLock;

use crate::logic::display::display_name;
use crate::model::{
    FlatTag, Id, NewTag, Tag, TagNode, TagQuery, TagUpdate, TaxonomyResult, TaxonomySnapshot,
};
use crate::store::traits::{DomainStore, SnapshotStore, TagStore};
use crate::store::Taxonomy;

/// In-process store serializing access to one [`Taxonomy`]
///
/// Every method takes the lock exactly once, so each operation is atomic with
/// respect to every other caller. Readers share the lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Taxonomy>,
}

impl MemoryStore {
    pub fn new(taxonomy: Taxonomy) -> Self {
        Self {
            inner: RwLock::new(taxonomy),
        }
    }

    /// Run a read-only closure against the current state
    pub fn read<R>(&self, f: impl FnOnce(&Taxonomy) -> R) -> R {
        f(&self.inner.read())
    }
}

#[async_trait::async_trait]
impl TagStore for MemoryStore {
    async fn get_tag(&self, id: &str) -> TaxonomyResult<Tag> {
        self.inner.read().tags.get(id).cloned()
    }

    async fn list_tags(&self, query: TagQuery) -> TaxonomyResult<Vec<Tag>> {
        let taxonomy = self.inner.read();
        let navigator = taxonomy.tags.navigator();
        let tags = match &query.phase {
            Some(phase) => navigator.tags_by_phase(phase),
            None => navigator.all_tags()?,
        };
        Ok(tags.into_iter().cloned().collect())
    }

    async fn list_root_tags(&self) -> TaxonomyResult<Vec<Tag>> {
        let taxonomy = self.inner.read();
        Ok(taxonomy.tags.navigator().tag_tree().into_iter().cloned().collect())
    }

    async fn get_tag_tree(&self) -> TaxonomyResult<Vec<TagNode>> {
        self.inner.read().tags.navigator().tag_tree_nodes()
    }

    async fn get_subtree(&self, id: &str) -> TaxonomyResult<Vec<FlatTag>> {
        let taxonomy = self.inner.read();
        let flat = taxonomy.tags.navigator().flatten_subtree(id)?;
        Ok(flat
            .into_iter()
            .map(|(tag, relative_depth)| FlatTag {
                display_name: display_name(&tag.name, tag.depth),
                tag: tag.clone(),
                relative_depth,
            })
            .collect())
    }

    async fn get_tag_hierarchy(&self, id: &str) -> TaxonomyResult<Vec<String>> {
        self.inner.read().tags.navigator().tag_hierarchy(id)
    }

    async fn get_descendants(&self, id: &str) -> TaxonomyResult<Vec<Id>> {
        self.inner.read().tags.navigator().descendants(id)
    }

    async fn get_root_color(&self, id: &str) -> TaxonomyResult<String> {
        self.inner.read().tags.navigator().root_color_of(id)
    }

    async fn create_tag(&self, new_tag: NewTag) -> TaxonomyResult<Tag> {
        let mut taxonomy = self.inner.write();
        let id = taxonomy.tags.insert(new_tag)?;
        taxonomy.tags.get(&id).cloned()
    }

    async fn update_tag(&self, id: &str, update: TagUpdate) -> TaxonomyResult<Tag> {
        let mut taxonomy = self.inner.write();
        taxonomy.tags.update_tag(id, update)?;
        taxonomy.tags.get(id).cloned()
    }

    async fn delete_tag(&self, id: &str) -> TaxonomyResult<Vec<Id>> {
        self.inner.write().tags.remove_tag(id)
    }
}

#[async_trait::async_trait]
impl DomainStore for MemoryStore {
    async fn list_domains(&self) -> TaxonomyResult<Vec<String>> {
        Ok(self.inner.read().domains.list().to_vec())
    }

    async fn add_domain(&self, label: &str) -> TaxonomyResult<()> {
        self.inner.write().domains.add_domain(label)
    }

    async fn remove_domain(&self, label: &str) -> TaxonomyResult<bool> {
        Ok(self.inner.write().domains.remove_domain(label))
    }
}

#[async_trait::async_trait]
impl SnapshotStore for MemoryStore {
    async fn export_snapshot(&self) -> TaxonomyResult<TaxonomySnapshot> {
        self.inner.read().snapshot()
    }

    async fn replace_snapshot(&self, snapshot: TaxonomySnapshot) -> TaxonomyResult<()> {
        // Validate before taking the write lock
        let replacement = Taxonomy::from_snapshot(snapshot)?;
        *self.inner.write() = replacement;
        log::info!("Taxonomy replaced from snapshot");
        Ok(())
    }
}
