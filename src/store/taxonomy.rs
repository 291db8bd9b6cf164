use crate::logic::validate::check_invariants;
use crate::model::{Tag, TaxonomySnapshot, TaxonomyError, TaxonomyResult};
use crate::store::{DomainRegistry, TagRepository};

/// The tag forest and the domain registry, owned together
///
/// Callers construct one explicitly (empty, seeded, or from a snapshot) and
/// pass it to whatever needs it.
#[derive(Debug, Clone, Default)]
pub struct Taxonomy {
    pub tags: TagRepository,
    pub domains: DomainRegistry,
}

impl Taxonomy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: TaxonomySnapshot) -> TaxonomyResult<Self> {
        let tags = TagRepository::from_records(snapshot.tags)?;

        if let Some(violation) = check_invariants(&tags).into_iter().next() {
            return Err(TaxonomyError::invalid_snapshot(violation.to_string()));
        }

        let domains = DomainRegistry::from_labels(&snapshot.domains)?;
        Ok(Self { tags, domains })
    }

    /// Records in pre-order plus the domain list
    pub fn snapshot(&self) -> TaxonomyResult<TaxonomySnapshot> {
        let tags: Vec<Tag> = self
            .tags
            .navigator()
            .all_tags()?
            .into_iter()
            .cloned()
            .collect();

        Ok(TaxonomySnapshot {
            tags,
            domains: self.domains.list().to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_roundtrip_preserves_structure() {
        let mut taxonomy = Taxonomy::new();
        let a = taxonomy.tags.add_tag("a", "#3B82F6", None, Some("planning")).unwrap();
        let b = taxonomy.tags.add_tag("b", "", Some(&a), None).unwrap();
        taxonomy.tags.add_tag("c", "", Some(&b), None).unwrap();
        taxonomy.domains.add_domain("API").unwrap();

        let snapshot = taxonomy.snapshot().unwrap();
        assert_eq!(snapshot.tags[0].id, a);
        assert_eq!(snapshot.tags[1].id, b);

        let json = serde_json::to_string(&snapshot).unwrap();
        let restored = Taxonomy::from_snapshot(serde_json::from_str(&json).unwrap()).unwrap();
        assert_eq!(restored.snapshot().unwrap(), snapshot);
    }

    #[test]
    fn test_snapshot_with_duplicate_domains_is_rejected() {
        let snapshot = TaxonomySnapshot {
            tags: Vec::new(),
            domains: vec!["API".to_string(), "api".to_string()],
        };
        assert!(matches!(
            Taxonomy::from_snapshot(snapshot),
            Err(TaxonomyError::DuplicateName { .. })
        ));
    }
}
