use std::collections::HashMap;

use super::contents::ContentsTree;
use super::text::{ModelId, ModelRole, TextModel};

/// An image registered with the book (raw encoded bytes, never decoded here).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct Image {
    #[cfg_attr(feature = "cli", serde(skip))]
    pub data: Vec<u8>,
    pub media_type: String,
}

impl Image {
    pub fn new(data: Vec<u8>, media_type: impl Into<String>) -> Self {
        Self {
            data,
            media_type: media_type.into(),
        }
    }
}

/// Named anchor pointing at a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct Label {
    pub model: ModelId,
    pub paragraph: usize,
}

/// Book-level aggregate: text models, labels, images and the contents tree.
///
/// Text models live in one arena addressed by [`ModelId`]. The first main
/// model is created with the book; further main models and footnote models
/// are added on demand.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct BookModel {
    models: Vec<TextModel>,
    main_models: Vec<ModelId>,
    footnotes: HashMap<String, ModelId>,
    labels: HashMap<String, Label>,
    images: HashMap<String, Image>,
    #[cfg_attr(feature = "cli", serde(rename = "contents", serialize_with = "serialize_outline"))]
    contents: ContentsTree,
}

impl BookModel {
    pub fn new() -> Self {
        let mut book = Self {
            models: Vec::new(),
            main_models: Vec::new(),
            footnotes: HashMap::new(),
            labels: HashMap::new(),
            images: HashMap::new(),
            contents: ContentsTree::new(),
        };
        book.add_main_model();
        book
    }

    fn alloc(&mut self, role: ModelRole) -> ModelId {
        let id = ModelId(self.models.len() as u32);
        self.models.push(TextModel::new(role));
        id
    }

    /// The first main model.
    pub fn main_model(&self) -> ModelId {
        self.main_models[0]
    }

    /// All main models in creation order.
    pub fn main_models(&self) -> &[ModelId] {
        &self.main_models
    }

    /// Create another main model and return it.
    pub fn add_main_model(&mut self) -> ModelId {
        let id = self.alloc(ModelRole::Main(self.main_models.len()));
        self.main_models.push(id);
        id
    }

    /// Footnote model for `id`, created on first use.
    pub fn footnote_model(&mut self, id: &str) -> ModelId {
        if let Some(&model) = self.footnotes.get(id) {
            return model;
        }
        let model = self.alloc(ModelRole::Footnote(id.to_string()));
        self.footnotes.insert(id.to_string(), model);
        model
    }

    /// Footnote model for `id`, if one was created.
    pub fn find_footnote_model(&self, id: &str) -> Option<ModelId> {
        self.footnotes.get(id).copied()
    }

    pub fn model(&self, id: ModelId) -> Option<&TextModel> {
        self.models.get(id.0 as usize)
    }

    pub fn model_mut(&mut self, id: ModelId) -> Option<&mut TextModel> {
        self.models.get_mut(id.0 as usize)
    }

    /// All text models with their IDs, in creation order.
    pub fn models(&self) -> impl Iterator<Item = (ModelId, &TextModel)> {
        self.models
            .iter()
            .enumerate()
            .map(|(i, m)| (ModelId(i as u32), m))
    }

    /// Register a named anchor; a later label with the same name wins.
    pub fn add_label(&mut self, name: impl Into<String>, model: ModelId, paragraph: usize) {
        self.labels.insert(name.into(), Label { model, paragraph });
    }

    pub fn label(&self, name: &str) -> Option<Label> {
        self.labels.get(name).copied()
    }

    pub fn labels(&self) -> &HashMap<String, Label> {
        &self.labels
    }

    pub fn add_image(&mut self, id: impl Into<String>, image: Image) {
        self.images.insert(id.into(), image);
    }

    pub fn image(&self, id: &str) -> Option<&Image> {
        self.images.get(id)
    }

    pub fn images(&self) -> &HashMap<String, Image> {
        &self.images
    }

    pub fn contents(&self) -> &ContentsTree {
        &self.contents
    }

    pub fn contents_mut(&mut self) -> &mut ContentsTree {
        &mut self.contents
    }
}

impl Default for BookModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "cli")]
fn serialize_outline<S: serde::Serializer>(
    tree: &ContentsTree,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serde::Serialize::serialize(&tree.outline(), serializer)
}
