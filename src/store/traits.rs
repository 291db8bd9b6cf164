use crate::model::{
    FlatTag, Id, NewTag, Tag, TagNode, TagQuery, TagUpdate, TaxonomyResult, TaxonomySnapshot,
};

/// Tag queries and mutations as seen by the HTTP layer
#[async_trait::async_trait]
pub trait TagStore: Send + Sync {
    async fn get_tag(&self, id: &str) -> TaxonomyResult<Tag>;
    /// All tags in pre-order, or only those in `query.phase` when set
    async fn list_tags(&self, query: TagQuery) -> TaxonomyResult<Vec<Tag>>;
    /// Root tags only
    async fn list_root_tags(&self) -> TaxonomyResult<Vec<Tag>>;
    async fn get_tag_tree(&self) -> TaxonomyResult<Vec<TagNode>>;
    async fn get_subtree(&self, id: &str) -> TaxonomyResult<Vec<FlatTag>>;
    async fn get_tag_hierarchy(&self, id: &str) -> TaxonomyResult<Vec<String>>;
    async fn get_descendants(&self, id: &str) -> TaxonomyResult<Vec<Id>>;
    async fn get_root_color(&self, id: &str) -> TaxonomyResult<String>;
    async fn create_tag(&self, new_tag: NewTag) -> TaxonomyResult<Tag>;
    async fn update_tag(&self, id: &str, update: TagUpdate) -> TaxonomyResult<Tag>;
    /// Cascading delete; returns removed ids
    async fn delete_tag(&self, id: &str) -> TaxonomyResult<Vec<Id>>;
}

#[async_trait::async_trait]
pub trait DomainStore: Send + Sync {
    async fn list_domains(&self) -> TaxonomyResult<Vec<String>>;
    async fn add_domain(&self, label: &str) -> TaxonomyResult<()>;
    /// Returns whether a domain was removed
    async fn remove_domain(&self, label: &str) -> TaxonomyResult<bool>;
}

#[async_trait::async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn export_snapshot(&self) -> TaxonomyResult<TaxonomySnapshot>;
    /// Replace everything; a rejected snapshot leaves the current state in place
    async fn replace_snapshot(&self, snapshot: TaxonomySnapshot) -> TaxonomyResult<()>;
}

pub trait TaxonomyStore: TagStore + DomainStore + SnapshotStore + Send + Sync {}
impl<T: TagStore + DomainStore + SnapshotStore> TaxonomyStore for T {}
