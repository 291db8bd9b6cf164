use crate::model::{TaxonomyError, TaxonomyResult};

/// Flat set of domain labels, unique ignoring case
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DomainRegistry {
    domains: Vec<String>,
}

impl DomainRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register each label in turn; the first collision aborts the load
    pub fn from_labels<I, S>(labels: I) -> TaxonomyResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Self::new();
        for label in labels {
            registry.add_domain(label.as_ref())?;
        }
        Ok(registry)
    }

    pub fn contains(&self, label: &str) -> bool {
        let wanted = label.to_lowercase();
        self.domains.iter().any(|d| d.to_lowercase() == wanted)
    }

    pub fn add_domain(&mut self, label: &str) -> TaxonomyResult<()> {
        if self.contains(label) {
            return Err(TaxonomyError::DuplicateName {
                label: label.to_string(),
            });
        }
        self.domains.push(label.to_string());
        log::debug!("Added domain '{}'", label);
        Ok(())
    }

    /// Remove the first exact match. Absent labels are a no-op.
    ///
    /// Returns whether anything was removed.
    pub fn remove_domain(&mut self, label: &str) -> bool {
        match self.domains.iter().position(|d| d == label) {
            Some(index) => {
                self.domains.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn list(&self) -> &[String] {
        &self.domains
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}
