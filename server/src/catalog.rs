use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CatalogObject {
    pub id: i64,
    pub repr: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CatalogModel {
    pub label: String,
    pub verbose_name: String,
    pub objects: Vec<CatalogObject>,
}

/// The models and objects that can be put on a watchlist.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct Catalog {
    models: Vec<CatalogModel>,
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

fn object(id: i64, repr: &str) -> CatalogObject {
    CatalogObject {
        id,
        repr: repr.to_string(),
    }
}

impl Catalog {
    pub fn new(models: Vec<CatalogModel>) -> Self {
        Self { models }
    }

    pub fn demo() -> Self {
        Self::new(vec![
            CatalogModel {
                label: "library.book".to_string(),
                verbose_name: "Book".to_string(),
                objects: vec![
                    object(1, "Dune"),
                    object(2, "Emma"),
                    object(3, "Ulysses"),
                    object(4, "Middlemarch"),
                ],
            },
            CatalogModel {
                label: "library.author".to_string(),
                verbose_name: "Author".to_string(),
                objects: vec![
                    object(1, "Frank Herbert"),
                    object(2, "Jane Austen"),
                    object(3, "James Joyce"),
                ],
            },
            CatalogModel {
                label: "library.publisher".to_string(),
                verbose_name: "Publisher".to_string(),
                objects: vec![object(1, "Chilton Books"), object(2, "Shakespeare and Company")],
            },
        ])
    }

    pub async fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = tokio::fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn models(&self) -> &[CatalogModel] {
        &self.models
    }

    pub fn model(&self, label: &str) -> Option<&CatalogModel> {
        self.models.iter().find(|model| model.label == label)
    }

    pub fn object(&self, label: &str, id: i64) -> Option<&CatalogObject> {
        self.model(label)?
            .objects
            .iter()
            .find(|object| object.id == id)
    }

    pub fn object_repr(&self, label: &str, id: i64) -> Option<&str> {
        self.object(label, id).map(|object| object.repr.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_objects_by_label_and_id() {
        let catalog = Catalog::demo();
        assert_eq!(catalog.object_repr("library.book", 1), Some("Dune"));
        assert_eq!(catalog.object_repr("library.author", 1), Some("Frank Herbert"));
        assert_eq!(catalog.object_repr("library.book", 99), None);
        assert_eq!(catalog.object_repr("shop.item", 1), None);
    }

    #[tokio::test]
    async fn loads_a_json_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let json = r#"[{"label": "zoo.animal", "verbose_name": "Animal",
                        "objects": [{"id": 7, "repr": "Okapi"}]}]"#;
        tokio::fs::write(&path, json).await.unwrap();

        let catalog = Catalog::load(&path).await.unwrap();
        assert_eq!(catalog.models().len(), 1);
        assert_eq!(catalog.object_repr("zoo.animal", 7), Some("Okapi"));
    }

    #[tokio::test]
    async fn rejects_a_malformed_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        tokio::fs::write(&path, "{not json").await.unwrap();
        assert!(matches!(Catalog::load(&path).await, Err(CatalogError::Parse(_))));
        assert!(matches!(
            Catalog::load(&dir.path().join("missing.json")).await,
            Err(CatalogError::Io(_))
        ));
    }
}
