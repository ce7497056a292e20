//! Tabular projection over the asset collection
//!
//! Read-only row/column view used by table renderers (CLI today, anything
//! that can show a grid tomorrow). Rows are assets in insertion order;
//! columns are fixed. Writes route back through the package aggregate so
//! dirty tracking and events are never bypassed.

use crate::domain::package::ImfPackage;
use crate::domain::value_objects::UserText;

/// Fixed columns of the asset table, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Icon,
    Kind,
    FilePath,
    FileSize,
    Finalized,
    Annotation,
    ProxyImage,
    Metadata,
}

impl Column {
    pub const COUNT: usize = 8;

    pub fn from_index(index: usize) -> Option<Column> {
        match index {
            0 => Some(Column::Icon),
            1 => Some(Column::Kind),
            2 => Some(Column::FilePath),
            3 => Some(Column::FileSize),
            4 => Some(Column::Finalized),
            5 => Some(Column::Annotation),
            6 => Some(Column::ProxyImage),
            7 => Some(Column::Metadata),
            _ => None,
        }
    }

    pub fn header(&self) -> &'static str {
        match self {
            Column::Icon => "",
            Column::Kind => "Kind",
            Column::FilePath => "File",
            Column::FileSize => "Size",
            Column::Finalized => "Finalized",
            Column::Annotation => "Annotation",
            Column::ProxyImage => "Proxy",
            Column::Metadata => "Metadata",
        }
    }

    /// Only the annotation accepts user edits
    pub fn is_editable(&self) -> bool {
        matches!(self, Column::Annotation)
    }
}

/// One rendered table cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    /// Byte count; renderers choose the unit formatting
    Size(u64),
    Flag(bool),
    Empty,
}

/// Borrowing view over a package's assets
pub struct AssetTable<'a> {
    package: &'a ImfPackage,
}

impl<'a> AssetTable<'a> {
    pub fn new(package: &'a ImfPackage) -> Self {
        Self { package }
    }

    pub fn row_count(&self) -> usize {
        self.package.asset_count()
    }

    pub fn column_count(&self) -> usize {
        Column::COUNT
    }

    pub fn cell(&self, row: usize, column: Column) -> Cell {
        let Some(asset) = self.package.asset_at(row) else {
            return Cell::Empty;
        };
        match column {
            Column::Icon => Cell::Text(icon_for(asset.kind()).to_string()),
            Column::Kind => Cell::Text(asset.kind().label().to_string()),
            Column::FilePath => {
                let path = asset
                    .file_path()
                    .strip_prefix(self.package.root_dir())
                    .unwrap_or(asset.file_path());
                Cell::Text(path.display().to_string())
            }
            Column::FileSize => Cell::Size(asset.size()),
            Column::Finalized => Cell::Flag(asset.is_finalized()),
            Column::Annotation => match asset.annotation() {
                Some(text) => Cell::Text(text.as_str().to_string()),
                None => Cell::Empty,
            },
            Column::ProxyImage => match asset.proxy_image() {
                Some(image) => Cell::Text(format!("{}x{}", image.width, image.height)),
                None => Cell::Empty,
            },
            Column::Metadata => match asset.metadata() {
                Some(metadata) => Cell::Text(metadata.describe()),
                None => Cell::Empty,
            },
        }
    }
}

/// Apply an edit to one cell. Returns false when the cell is not editable
/// or the row is out of range.
pub fn set_cell(package: &mut ImfPackage, row: usize, column: Column, value: &str) -> bool {
    if !column.is_editable() {
        return false;
    }
    let Some(id) = package.asset_at(row).map(|a| a.id()) else {
        return false;
    };
    let annotation = if value.is_empty() {
        None
    } else {
        Some(UserText::from(value))
    };
    package.set_asset_annotation(&id, annotation)
}

fn icon_for(kind: crate::domain::entities::AssetKind) -> &'static str {
    use crate::domain::entities::AssetKind;
    match kind {
        AssetKind::Track => "T",
        AssetKind::CompositionPlaylist => "C",
        AssetKind::OutputPlaylist => "O",
        AssetKind::PackingList => "P",
        AssetKind::Unknown => "?",
    }
}
