//! Knowledge catalog
//!
//! The catalog of already-licensed assets the redundancy matcher searches.
//! Fixed and read-only at runtime; the compiled default stands in for a
//! real indexed contract store. An operator may load a different catalog
//! from a JSON seed file.

use licops_common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// One catalog entry describing an already-licensed asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeAsset {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Lower-case tags used by the keyword-overlap scorer
    pub tags: Vec<String>,
}

/// Compiled default catalog
pub fn default_catalog() -> Vec<KnowledgeAsset> {
    vec![
        KnowledgeAsset {
            id: "CTR-2023-001".to_string(),
            title: "Global News Corp - Archive".to_string(),
            description: "20TB of text data covering global journalism, news articles, and \
                          editorials from 2010-2023. Includes metadata and author info."
                .to_string(),
            tags: vec!["text", "news", "journalism", "english"]
                .into_iter()
                .map(String::from)
                .collect(),
        },
        KnowledgeAsset {
            id: "CTR-2024-045".to_string(),
            title: "CodeNet Pro".to_string(),
            description: "Python, Java, and C++ repositories with permissive licenses. 5TB of \
                          source code for LLM training."
                .to_string(),
            tags: vec!["code", "programming", "github"]
                .into_iter()
                .map(String::from)
                .collect(),
        },
        KnowledgeAsset {
            id: "CTR-2023-089".to_string(),
            title: "French Literature Corpus".to_string(),
            description: "Digitized books and manuscripts from the 19th century. 500GB of \
                          French text."
                .to_string(),
            tags: vec!["text", "books", "french", "literature"]
                .into_iter()
                .map(String::from)
                .collect(),
        },
    ]
}

/// Load a catalog from a JSON seed file (array of assets)
pub fn load_from_json(path: &Path) -> Result<Vec<KnowledgeAsset>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    let assets: Vec<KnowledgeAsset> = serde_json::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;

    info!(assets = assets.len(), path = %path.display(), "Loaded knowledge catalog");
    Ok(assets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_catalog_has_three_assets() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog[0].id, "CTR-2023-001");
        assert_eq!(catalog[1].id, "CTR-2024-045");
        assert_eq!(catalog[2].id, "CTR-2023-089");
    }

    #[test]
    fn seed_file_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&default_catalog()).unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file.flush().unwrap();

        let loaded = load_from_json(file.path()).unwrap();
        assert_eq!(loaded, default_catalog());
    }

    #[test]
    fn missing_seed_file_is_an_error() {
        assert!(load_from_json(Path::new("/nonexistent/catalog.json")).is_err());
    }
}
