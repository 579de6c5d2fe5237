//! Column placement for rendering a [`RelationSet`].
//!
//! Each relation code is pinned to one of five generation columns:
//!
//! | Column | Codes |
//! |---|---|
//! | grandparents (+2) | `uu` |
//! | parents (+1) | `u`, `duu`, `uud`, `udu` |
//! | focus (0) | the focus, `du`, `ud` |
//! | children (−1) | `d`, `ddu`, `dud`, `udd` |
//! | grandchildren (−2) | `dd` |
//!
//! Within a column, cells follow canonical code order and then list order.
//! A renderer draws one line per [`Link`] between the cells it connects.

use serde::Serialize;

use super::classify::{Link, RelationSet};
use super::code::RelationCode;

/// A layout column, ordered from the oldest generation to the youngest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Grandparents,
    Parents,
    Focus,
    Children,
    Grandchildren,
}

impl Column {
    pub const ALL: [Self; 5] = [
        Self::Grandparents,
        Self::Parents,
        Self::Focus,
        Self::Children,
        Self::Grandchildren,
    ];

    /// The fixed column for a relation code.
    #[must_use]
    pub fn for_code(code: RelationCode) -> Self {
        match code {
            RelationCode::Uu => Self::Grandparents,
            RelationCode::U | RelationCode::Duu | RelationCode::Uud | RelationCode::Udu => {
                Self::Parents
            }
            RelationCode::Du | RelationCode::Ud => Self::Focus,
            RelationCode::D | RelationCode::Ddu | RelationCode::Dud | RelationCode::Udd => {
                Self::Children
            }
            RelationCode::Dd => Self::Grandchildren,
        }
    }

    /// The column holding a generation offset, if it is within two of the
    /// focus.
    #[must_use]
    pub const fn from_generation(generation: i8) -> Option<Self> {
        match generation {
            2 => Some(Self::Grandparents),
            1 => Some(Self::Parents),
            0 => Some(Self::Focus),
            -1 => Some(Self::Children),
            -2 => Some(Self::Grandchildren),
            _ => None,
        }
    }

    #[must_use]
    pub const fn generation(self) -> i8 {
        match self {
            Self::Grandparents => 2,
            Self::Parents => 1,
            Self::Focus => 0,
            Self::Children => -1,
            Self::Grandchildren => -2,
        }
    }

    #[must_use]
    pub const fn heading(self) -> &'static str {
        match self {
            Self::Grandparents => "grandparents",
            Self::Parents => "parents",
            Self::Focus => "focus",
            Self::Children => "children",
            Self::Grandchildren => "grandchildren",
        }
    }
}

/// One rendered title. `code` is `None` for the focus itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub title: String,
    pub code: Option<RelationCode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSlot {
    pub column: Column,
    pub cells: Vec<Cell>,
}

/// A [`RelationSet`] arranged into the five generation columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layout {
    pub focus: String,
    pub columns: Vec<ColumnSlot>,
    pub links: Vec<Link>,
}

impl Layout {
    #[must_use]
    pub fn from_relations(set: &RelationSet) -> Self {
        let mut columns: Vec<ColumnSlot> = Column::ALL
            .into_iter()
            .map(|column| ColumnSlot {
                column,
                cells: Vec::new(),
            })
            .collect();

        if let Some(slot) = columns.iter_mut().find(|s| s.column == Column::Focus) {
            slot.cells.push(Cell {
                title: set.focus.clone(),
                code: None,
            });
        }

        for (code, titles) in set.iter() {
            let column = Column::for_code(code);
            let Some(slot) = columns.iter_mut().find(|s| s.column == column) else {
                continue;
            };
            slot.cells.extend(titles.iter().map(|title| Cell {
                title: title.clone(),
                code: Some(code),
            }));
        }

        Self {
            focus: set.focus.clone(),
            columns,
            links: set.links.clone(),
        }
    }

    #[must_use]
    pub fn column(&self, column: Column) -> Option<&ColumnSlot> {
        self.columns.iter().find(|slot| slot.column == column)
    }

    /// First cell position of `title` as `(column, row)`.
    ///
    /// `None` when the title has no slot in this layout; renderers skip
    /// such links instead of failing.
    #[must_use]
    pub fn position_of(&self, title: &str) -> Option<(Column, usize)> {
        self.columns.iter().find_map(|slot| {
            slot.cells
                .iter()
                .position(|cell| cell.title == title)
                .map(|row| (slot.column, row))
        })
    }

    /// Tallest column height.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.columns
            .iter()
            .map(|slot| slot.cells.len())
            .max()
            .unwrap_or(0)
    }
}
