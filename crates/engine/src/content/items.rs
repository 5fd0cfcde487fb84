use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use roxmltree::{Document, Node};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u32);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDefinition {
    pub id: ItemId,
    pub name: String,
    pub icon: String,
}

#[derive(Debug, Default, Clone)]
pub struct ItemCatalog {
    items: BTreeMap<ItemId, ItemDefinition>,
}

impl ItemCatalog {
    pub fn from_items(items: impl IntoIterator<Item = ItemDefinition>) -> Self {
        Self {
            items: items.into_iter().map(|item| (item.id, item)).collect(),
        }
    }

    pub fn item(&self, id: ItemId) -> Option<&ItemDefinition> {
        self.items.get(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> impl Iterator<Item = &ItemDefinition> {
        self.items.values()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogErrorCode {
    ReadFile,
    XmlMalformed,
    InvalidRoot,
    UnknownElement,
    UnknownField,
    DuplicateField,
    MissingField,
    InvalidValue,
    DuplicateId,
}

#[derive(Debug, Clone)]
pub struct CatalogError {
    pub code: CatalogErrorCode,
    pub message: String,
    pub file_path: PathBuf,
    pub location: Option<SourceLocation>,
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location {
            Some(loc) => write!(
                f,
                "{:?}: {} (file={}, line={}, column={})",
                self.code,
                self.message,
                self.file_path.display(),
                loc.line,
                loc.column
            ),
            None => write!(
                f,
                "{:?}: {} (file={})",
                self.code,
                self.message,
                self.file_path.display()
            ),
        }
    }
}

impl std::error::Error for CatalogError {}

pub fn load_item_catalog(path: &Path) -> Result<ItemCatalog, CatalogError> {
    let raw = fs::read_to_string(path).map_err(|source| CatalogError {
        code: CatalogErrorCode::ReadFile,
        message: format!("failed to read item catalog: {source}"),
        file_path: path.to_path_buf(),
        location: None,
    })?;
    let catalog = parse_item_catalog(path, &raw)?;
    info!(
        path = %path.display(),
        item_count = catalog.len(),
        "item_catalog_loaded"
    );
    Ok(catalog)
}

pub fn parse_item_catalog(file_path: &Path, raw: &str) -> Result<ItemCatalog, CatalogError> {
    let doc = Document::parse(raw).map_err(|error| CatalogError {
        code: CatalogErrorCode::XmlMalformed,
        message: format!("malformed XML: {error}"),
        file_path: file_path.to_path_buf(),
        location: Some(SourceLocation {
            line: error.pos().row as usize,
            column: error.pos().col as usize,
        }),
    })?;

    let root = doc.root_element();
    if root.tag_name().name() != "Items" {
        return Err(error_at_node(
            CatalogErrorCode::InvalidRoot,
            "root element must be <Items>".to_string(),
            file_path,
            &doc,
            root,
        ));
    }

    let mut items = Vec::<ItemDefinition>::new();
    let mut seen_ids = HashSet::<ItemId>::new();
    for child in root.children().filter(|node| node.is_element()) {
        if child.tag_name().name() != "ItemDef" {
            return Err(error_at_node(
                CatalogErrorCode::UnknownElement,
                format!(
                    "unsupported element <{}>; expected <ItemDef>",
                    child.tag_name().name()
                ),
                file_path,
                &doc,
                child,
            ));
        }
        let item = parse_item_def(file_path, &doc, child)?;
        if !seen_ids.insert(item.id) {
            return Err(error_at_node(
                CatalogErrorCode::DuplicateId,
                format!("duplicate item id {}", item.id.0),
                file_path,
                &doc,
                child,
            ));
        }
        items.push(item);
    }

    Ok(ItemCatalog::from_items(items))
}

fn parse_item_def(
    file_path: &Path,
    doc: &Document<'_>,
    node: Node<'_, '_>,
) -> Result<ItemDefinition, CatalogError> {
    let mut seen_fields = HashSet::<String>::new();
    let mut id: Option<ItemId> = None;
    let mut name: Option<String> = None;
    let mut icon: Option<String> = None;

    for field in node.children().filter(|child| child.is_element()) {
        let field_name = field.tag_name().name().to_string();
        if !seen_fields.insert(field_name.clone()) {
            return Err(error_at_node(
                CatalogErrorCode::DuplicateField,
                format!("duplicate field <{}> in <ItemDef>", field_name),
                file_path,
                doc,
                field,
            ));
        }

        match field_name.as_str() {
            "id" => {
                let value = required_text(file_path, doc, field, "id")?;
                let parsed = value.parse::<u32>().map_err(|_| {
                    error_at_node(
                        CatalogErrorCode::InvalidValue,
                        format!("id '{}' is not a non-negative integer", value),
                        file_path,
                        doc,
                        field,
                    )
                })?;
                id = Some(ItemId(parsed));
            }
            "name" => name = Some(required_text(file_path, doc, field, "name")?),
            "icon" => icon = Some(required_text(file_path, doc, field, "icon")?),
            _ => {
                return Err(error_at_node(
                    CatalogErrorCode::UnknownField,
                    format!("unknown field <{}> in <ItemDef>", field_name),
                    file_path,
                    doc,
                    field,
                ))
            }
        }
    }

    let missing = |field: &str| {
        error_at_node(
            CatalogErrorCode::MissingField,
            format!("missing required field <{field}> in <ItemDef>"),
            file_path,
            doc,
            node,
        )
    };
    let id = id.ok_or_else(|| missing("id"))?;
    let name = name.ok_or_else(|| missing("name"))?;
    let icon = icon.ok_or_else(|| missing("icon"))?;

    Ok(ItemDefinition { id, name, icon })
}

fn required_text(
    file_path: &Path,
    doc: &Document<'_>,
    node: Node<'_, '_>,
    field_name: &str,
) -> Result<String, CatalogError> {
    let value = node.text().map(str::trim).unwrap_or_default().to_string();
    if value.is_empty() {
        return Err(error_at_node(
            CatalogErrorCode::MissingField,
            format!("field <{}> must not be empty", field_name),
            file_path,
            doc,
            node,
        ));
    }
    Ok(value)
}

fn error_at_node(
    code: CatalogErrorCode,
    message: String,
    file_path: &Path,
    doc: &Document<'_>,
    node: Node<'_, '_>,
) -> CatalogError {
    let pos = doc.text_pos_at(node.range().start);
    CatalogError {
        code,
        message,
        file_path: file_path.to_path_buf(),
        location: Some(SourceLocation {
            line: pos.row as usize,
            column: pos.col as usize,
        }),
    }
}
