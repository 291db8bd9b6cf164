pub mod data;

pub use data::*;

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::SeedConfig;
use crate::model::TaxonomySnapshot;
use crate::store::Taxonomy;

/// Read a JSON snapshot (`{"tags": [...], "domains": [...]}`) from disk
pub fn load_snapshot_file(path: impl AsRef<Path>) -> Result<TaxonomySnapshot> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;
    let snapshot = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse seed file {}", path.display()))?;
    Ok(snapshot)
}

/// Build the starting taxonomy: seed file if configured, else defaults, else empty
pub fn initial_taxonomy(seed: &SeedConfig) -> Result<Taxonomy> {
    if let Some(file) = &seed.file {
        let snapshot = load_snapshot_file(file)?;
        let taxonomy = Taxonomy::from_snapshot(snapshot)
            .with_context(|| format!("Seed file {} rejected", file))?;
        log::info!(
            "Loaded {} tags and {} domains from {}",
            taxonomy.tags.len(),
            taxonomy.domains.len(),
            file
        );
        return Ok(taxonomy);
    }

    if seed.load_defaults {
        let taxonomy = default_taxonomy()?;
        log::info!("Loaded default taxonomy ({} tags)", taxonomy.tags.len());
        return Ok(taxonomy);
    }

    log::info!("Starting with an empty taxonomy");
    Ok(Taxonomy::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("{}-{}.json", name, crate::model::generate_id()))
    }

    #[test]
    fn test_initial_taxonomy_from_file() {
        let path = temp_path("taxonomy-seed");
        std::fs::write(
            &path,
            r##"{"tags":[{"id":"a","name":"auth","color":"#3B82F6"},{"id":"b","name":"login","color":"","parentId":"a"}],"domains":["API"]}"##,
        )
        .unwrap();

        let seed = SeedConfig {
            load_defaults: true,
            file: Some(path.to_string_lossy().to_string()),
        };
        let taxonomy = initial_taxonomy(&seed).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(taxonomy.tags.len(), 2);
        assert_eq!(taxonomy.tags.get("b").unwrap().depth, 1);
        assert_eq!(taxonomy.domains.list(), &["API".to_string()]);
    }

    #[test]
    fn test_initial_taxonomy_defaults_and_empty() {
        let defaults = initial_taxonomy(&SeedConfig::default()).unwrap();
        assert!(!defaults.tags.is_empty());

        let empty = initial_taxonomy(&SeedConfig {
            load_defaults: false,
            file: None,
        })
        .unwrap();
        assert!(empty.tags.is_empty());
        assert!(empty.domains.is_empty());
    }

    #[test]
    fn test_missing_seed_file_is_an_error() {
        let seed = SeedConfig {
            load_defaults: true,
            file: Some(temp_path("does-not-exist").to_string_lossy().to_string()),
        };
        assert!(initial_taxonomy(&seed).is_err());
    }
}
