//! Block-level types as returned by the analysis service.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of node in the analysis output.
///
/// Types the crate does not interpret are kept verbatim in [`BlockType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockType {
    /// A page of the document
    Page,
    /// A line of text
    Line,
    /// A single word
    Word,
    /// A detected table
    Table,
    /// A table cell
    Cell,
    /// A merged table cell spanning several cells
    MergedCell,
    /// A form field component (key or value)
    KeyValueSet,
    /// A check box or radio button
    SelectionElement,
    /// Any other block type
    Other(String),
}

impl BlockType {
    /// Wire name of the block type.
    pub fn as_str(&self) -> &str {
        match self {
            BlockType::Page => "PAGE",
            BlockType::Line => "LINE",
            BlockType::Word => "WORD",
            BlockType::Table => "TABLE",
            BlockType::Cell => "CELL",
            BlockType::MergedCell => "MERGED_CELL",
            BlockType::KeyValueSet => "KEY_VALUE_SET",
            BlockType::SelectionElement => "SELECTION_ELEMENT",
            BlockType::Other(name) => name,
        }
    }
}

impl From<String> for BlockType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "PAGE" => BlockType::Page,
            "LINE" => BlockType::Line,
            "WORD" => BlockType::Word,
            "TABLE" => BlockType::Table,
            "CELL" => BlockType::Cell,
            "MERGED_CELL" => BlockType::MergedCell,
            "KEY_VALUE_SET" => BlockType::KeyValueSet,
            "SELECTION_ELEMENT" => BlockType::SelectionElement,
            _ => BlockType::Other(name),
        }
    }
}

impl From<BlockType> for String {
    fn from(kind: BlockType) -> Self {
        match kind {
            BlockType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of edge between two blocks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RelationshipType {
    /// Structural containment
    Child,
    /// Link from a form key to its value
    Value,
    /// Any other relationship
    Other(String),
}

impl From<String> for RelationshipType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "CHILD" => RelationshipType::Child,
            "VALUE" => RelationshipType::Value,
            _ => RelationshipType::Other(name),
        }
    }
}

impl From<RelationshipType> for String {
    fn from(kind: RelationshipType) -> Self {
        match kind {
            RelationshipType::Child => "CHILD".to_string(),
            RelationshipType::Value => "VALUE".to_string(),
            RelationshipType::Other(name) => name,
        }
    }
}

/// Role of a KEY_VALUE_SET block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityType {
    /// The label half of a form field
    Key,
    /// The value half of a form field
    Value,
    /// Any other entity tag (e.g. COLUMN_HEADER on cells)
    Other(String),
}

impl From<String> for EntityType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "KEY" => EntityType::Key,
            "VALUE" => EntityType::Value,
            _ => EntityType::Other(name),
        }
    }
}

impl From<EntityType> for String {
    fn from(kind: EntityType) -> Self {
        match kind {
            EntityType::Key => "KEY".to_string(),
            EntityType::Value => "VALUE".to_string(),
            EntityType::Other(name) => name,
        }
    }
}

/// An ordered group of references from one block to others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Relationship {
    /// Edge kind
    #[serde(rename = "Type")]
    pub kind: RelationshipType,

    /// Referenced block ids, in service order
    #[serde(default)]
    pub ids: Vec<String>,
}

impl Relationship {
    /// Create a relationship of the given kind.
    pub fn new<S: Into<String>>(kind: RelationshipType, ids: impl IntoIterator<Item = S>) -> Self {
        Self {
            kind,
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }
}

/// One typed node of the analysis output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Block {
    /// Identifier, unique within one response
    pub id: String,

    /// Node kind
    pub block_type: BlockType,

    /// Recognized text (LINE, WORD, sometimes CELL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// 1-based row index (CELL only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_index: Option<u32>,

    /// 1-based column index (CELL only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_index: Option<u32>,

    /// Rows spanned (CELL only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_span: Option<u32>,

    /// Columns spanned (CELL only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_span: Option<u32>,

    /// KEY / VALUE tags on KEY_VALUE_SET blocks
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entity_types: Vec<EntityType>,

    /// SELECTED / NOT_SELECTED on SELECTION_ELEMENT blocks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_status: Option<String>,

    /// Recognition confidence in percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,

    /// Page number the block was found on (multi-page analysis only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Outgoing edges
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<Relationship>,
}

impl Block {
    /// Create a bare block.
    pub fn new(id: impl Into<String>, block_type: BlockType) -> Self {
        Self {
            id: id.into(),
            block_type,
            text: None,
            row_index: None,
            column_index: None,
            row_span: None,
            column_span: None,
            entity_types: Vec::new(),
            selection_status: None,
            confidence: None,
            page: None,
            relationships: Vec::new(),
        }
    }

    /// Set text and return self.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set cell position and return self.
    pub fn at(mut self, row: u32, column: u32) -> Self {
        self.row_index = Some(row);
        self.column_index = Some(column);
        self
    }

    /// Append a CHILD relationship and return self.
    pub fn with_children<S: Into<String>>(mut self, ids: impl IntoIterator<Item = S>) -> Self {
        self.relationships
            .push(Relationship::new(RelationshipType::Child, ids));
        self
    }

    /// Append a VALUE relationship and return self.
    pub fn with_values<S: Into<String>>(mut self, ids: impl IntoIterator<Item = S>) -> Self {
        self.relationships
            .push(Relationship::new(RelationshipType::Value, ids));
        self
    }

    /// Tag with an entity type and return self.
    pub fn with_entity(mut self, entity: EntityType) -> Self {
        self.entity_types.push(entity);
        self
    }

    /// Set selection status and return self.
    pub fn with_selection(mut self, status: impl Into<String>) -> Self {
        self.selection_status = Some(status.into());
        self
    }

    /// Ids referenced through relationships of the given kind, in order.
    pub fn related_ids(&self, kind: RelationshipType) -> impl Iterator<Item = &str> + '_ {
        self.relationships
            .iter()
            .filter(move |r| r.kind == kind)
            .flat_map(|r| r.ids.iter().map(String::as_str))
    }

    /// Ids of CHILD blocks, in order.
    pub fn child_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.related_ids(RelationshipType::Child)
    }

    /// Ids of VALUE blocks, in order.
    pub fn value_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.related_ids(RelationshipType::Value)
    }

    /// Check if this block has no CHILD relationship.
    pub fn is_leaf(&self) -> bool {
        self.child_ids().next().is_none()
    }

    /// Check if this block is a form key.
    pub fn is_key(&self) -> bool {
        self.block_type == BlockType::KeyValueSet && self.entity_types.contains(&EntityType::Key)
    }

    /// Check if this block is a form value.
    pub fn is_value(&self) -> bool {
        self.block_type == BlockType::KeyValueSet
            && self.entity_types.contains(&EntityType::Value)
    }

    /// Text of the block, treating empty strings as absent.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }
}
