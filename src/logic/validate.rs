use itertools::Itertools;
use std::collections::HashSet;
use thiserror::Error;

use crate::logic::color::{normalize_hex, soften};
use crate::model::Id;
use crate::store::TagRepository;

/// A broken structural invariant found by [`check_invariants`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvariantViolation {
    #[error("tag '{id}' has depth {actual}, expected {expected}")]
    Depth {
        id: Id,
        expected: usize,
        actual: usize,
    },

    #[error("tag '{id}' references missing parent '{parent}'")]
    DanglingParent { id: Id, parent: Id },

    #[error("tag '{id}' is its own ancestor")]
    Cycle { id: Id },

    #[error("tag '{parent}' lists '{child}' as a child but the child's parent differs")]
    StaleChild { parent: Id, child: Id },

    #[error("tag '{child}' is missing from the children of its parent '{parent}'")]
    MissingChild { parent: Id, child: Id },

    #[error("tag '{parent}' lists child '{child}' more than once")]
    DuplicateChild { parent: Id, child: Id },

    #[error("tag '{id}' has color {actual}, expected {expected}")]
    Color {
        id: Id,
        expected: String,
        actual: String,
    },

    #[error("root index and parentless tags disagree on '{id}'")]
    RootIndex { id: Id },
}

/// Walk parent links from `id`. `None` on a dangling link or a cycle.
fn root_chain<'a>(repo: &'a TagRepository, id: &'a str) -> Option<(usize, &'a str)> {
    let mut hops = 0usize;
    let mut current = repo.get(id).ok()?;
    while let Some(parent_id) = &current.parent {
        hops += 1;
        if hops > repo.len() {
            return None;
        }
        current = repo.get(parent_id).ok()?;
    }
    Some((hops, current.id.as_str()))
}

/// Check every structural invariant of the tag forest
///
/// Returns all violations found; an empty list means the repository is consistent.
pub fn check_invariants(repo: &TagRepository) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    for tag in repo.iter() {
        if let Some(parent_id) = &tag.parent {
            match repo.get(parent_id) {
                Ok(parent) if !parent.children.contains(&tag.id) => {
                    violations.push(InvariantViolation::MissingChild {
                        parent: parent_id.clone(),
                        child: tag.id.clone(),
                    })
                }
                Ok(_) => {}
                Err(_) => {
                    violations.push(InvariantViolation::DanglingParent {
                        id: tag.id.clone(),
                        parent: parent_id.clone(),
                    });
                    continue;
                }
            }
        }

        for child_id in &tag.children {
            let consistent = repo
                .get(child_id)
                .map(|child| child.parent.as_deref() == Some(tag.id.as_str()))
                .unwrap_or(false);
            if !consistent {
                violations.push(InvariantViolation::StaleChild {
                    parent: tag.id.clone(),
                    child: child_id.clone(),
                });
            }
        }

        for child_id in tag.children.iter().duplicates() {
            violations.push(InvariantViolation::DuplicateChild {
                parent: tag.id.clone(),
                child: child_id.clone(),
            });
        }

        let Some((hops, root_id)) = root_chain(repo, &tag.id) else {
            // Dangling links were reported above; what remains is a cycle
            if tag.parent.as_ref().is_some_and(|p| repo.contains(p)) {
                violations.push(InvariantViolation::Cycle { id: tag.id.clone() });
            }
            continue;
        };

        if tag.depth != hops {
            violations.push(InvariantViolation::Depth {
                id: tag.id.clone(),
                expected: hops,
                actual: tag.depth,
            });
        }

        let Ok(root) = repo.get(root_id) else {
            continue;
        };
        let expected = if tag.is_root() {
            normalize_hex(&tag.color).ok()
        } else {
            soften(&root.color, hops).ok()
        };
        if expected.as_deref() != Some(tag.color.as_str()) {
            violations.push(InvariantViolation::Color {
                id: tag.id.clone(),
                expected: expected.unwrap_or_default(),
                actual: tag.color.clone(),
            });
        }
    }

    let indexed: HashSet<&str> = repo.root_ids().iter().map(String::as_str).collect();
    for root_id in repo.root_ids() {
        let is_root = repo.get(root_id).map(|tag| tag.is_root()).unwrap_or(false);
        if !is_root {
            violations.push(InvariantViolation::RootIndex { id: root_id.clone() });
        }
    }
    for tag in repo.iter().filter(|tag| tag.is_root()) {
        if !indexed.contains(tag.id.as_str()) {
            violations.push(InvariantViolation::RootIndex { id: tag.id.clone() });
        }
    }

    violations
}
