use crate::model::{Id, TaxonomyResult};
use crate::store::{DomainRegistry, TagRepository, Taxonomy};

/// Domains registered on a fresh install
pub const DEFAULT_DOMAINS: &[&str] = &[
    "Frontend",
    "Backend",
    "API",
    "Database",
    "DevOps",
    "Security",
    "UI/UX",
    "Documentation",
];

/// (name, phase, children) of a non-root seed tag
type SeedBranch = (&'static str, Option<&'static str>, &'static [&'static str]);

/// (name, color, phase, branches) of each seed tree
const DEFAULT_TREES: &[(&str, &str, Option<&str>, &[SeedBranch])] = &[
    (
        "authentication",
        "#3B82F6",
        Some("planning"),
        &[
            ("login", Some("development"), &["remember-me", "two-factor"]),
            ("signup", Some("development"), &["email-verification"]),
            ("oauth", Some("development"), &["google-oauth", "github-oauth"]),
            ("password", Some("testing"), &["password-reset", "password-policy"]),
        ],
    ),
    (
        "frontend",
        "#10B981",
        Some("development"),
        &[
            ("components", None, &["forms", "navigation"]),
            ("styling", None, &["themes"]),
        ],
    ),
    (
        "backend",
        "#F59E0B",
        Some("development"),
        &[
            ("api", Some("development"), &["rest", "webhooks"]),
            ("database", None, &["migrations"]),
        ],
    ),
    (
        "infrastructure",
        "#8B5CF6",
        Some("planning"),
        &[
            ("ci-cd", None, &[]),
            ("monitoring", Some("release"), &["alerts"]),
        ],
    ),
];

fn add_tree(
    repo: &mut TagRepository,
    name: &str,
    color: &str,
    phase: Option<&str>,
    branches: &[SeedBranch],
) -> TaxonomyResult<Id> {
    let root = repo.add_tag(name, color, None, phase)?;
    for (branch, branch_phase, leaves) in branches {
        let branch_id = repo.add_tag(branch, "", Some(&root), *branch_phase)?;
        for leaf in leaves.iter() {
            repo.add_tag(leaf, "", Some(&branch_id), *branch_phase)?;
        }
    }
    Ok(root)
}

/// The built-in dataset: four tag trees and the default domain list
pub fn default_taxonomy() -> TaxonomyResult<Taxonomy> {
    let mut tags = TagRepository::new();
    for (name, color, phase, branches) in DEFAULT_TREES {
        add_tree(&mut tags, name, color, *phase, branches)?;
    }

    let domains = DomainRegistry::from_labels(DEFAULT_DOMAINS)?;
    log::debug!(
        "Built default taxonomy: {} tags, {} domains",
        tags.len(),
        domains.len()
    );
    Ok(Taxonomy { tags, domains })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::validate::check_invariants;

    #[test]
    fn test_default_taxonomy_is_consistent() {
        let taxonomy = default_taxonomy().unwrap();
        assert!(check_invariants(&taxonomy.tags).is_empty());
        assert_eq!(taxonomy.tags.root_ids().len(), DEFAULT_TREES.len());
        assert_eq!(taxonomy.domains.len(), DEFAULT_DOMAINS.len());
    }

    #[test]
    fn test_default_taxonomy_contains_authentication_tree() {
        let taxonomy = default_taxonomy().unwrap();
        let navigator = taxonomy.tags.navigator();
        let auth = navigator
            .tag_tree()
            .into_iter()
            .find(|tag| tag.name == "authentication")
            .unwrap();
        let children: Vec<&str> = navigator
            .children_of(&auth.id)
            .unwrap()
            .into_iter()
            .map(|tag| tag.name.as_str())
            .collect();
        assert_eq!(children, vec!["login", "signup", "oauth", "password"]);
    }
}
