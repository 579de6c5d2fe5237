//! The twelve relation codes.
//!
//! A code spells a walk from the focus entry: `d` is one hop down to a child,
//! `u` one hop up to a parent. `dud` is a child's parent's child, i.e. a
//! stepchild.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ErrorCode;

/// A named relation pattern relative to a focus entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationCode {
    D,
    U,
    Dd,
    Uu,
    Du,
    Ud,
    Ddu,
    Dud,
    Udd,
    Duu,
    Uud,
    Udu,
}

impl RelationCode {
    /// Every code in canonical order.
    pub const ALL: [Self; 12] = [
        Self::D,
        Self::U,
        Self::Dd,
        Self::Uu,
        Self::Du,
        Self::Ud,
        Self::Ddu,
        Self::Dud,
        Self::Udd,
        Self::Duu,
        Self::Uud,
        Self::Udu,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::D => "d",
            Self::U => "u",
            Self::Dd => "dd",
            Self::Uu => "uu",
            Self::Du => "du",
            Self::Ud => "ud",
            Self::Ddu => "ddu",
            Self::Dud => "dud",
            Self::Udd => "udd",
            Self::Duu => "duu",
            Self::Uud => "uud",
            Self::Udu => "udu",
        }
    }

    /// Family-tree name of the relation, plural.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::D => "children",
            Self::U => "parents",
            Self::Dd => "grandchildren",
            Self::Uu => "grandparents",
            Self::Du => "spouses",
            Self::Ud => "siblings",
            Self::Ddu => "children-in-law",
            Self::Dud => "stepchildren",
            Self::Udd => "niblings",
            Self::Duu => "parents-in-law",
            Self::Uud => "auncles",
            Self::Udu => "stepparents",
        }
    }

    /// Generation offset from the focus: up hops minus down hops.
    ///
    /// Parents are `+1`, grandchildren `-2`, spouses and siblings `0`.
    #[must_use]
    pub fn generation(self) -> i8 {
        self.as_str().chars().fold(0, |acc, hop| match hop {
            'u' => acc + 1,
            _ => acc - 1,
        })
    }
}

impl fmt::Display for RelationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A string that is not one of the twelve relation codes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown relation code '{0}'")]
pub struct UnknownRelationCode(pub String);

impl UnknownRelationCode {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        ErrorCode::UnknownRelationCode
    }
}

impl FromStr for RelationCode {
    type Err = UnknownRelationCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|code| code.as_str() == needle)
            .ok_or_else(|| UnknownRelationCode(s.to_string()))
    }
}
