use std::{fmt, str::FromStr};

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Folder a classified email is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FolderId {
    Clients,
    PurchaseOrders,
    InternalComs,
    VeryImportant,
}

/// Folder used whenever the model's answer cannot be mapped to a known id.
pub const DEFAULT_FOLDER: FolderId = FolderId::InternalComs;

#[derive(Debug, Clone, Copy)]
pub struct FolderDefinition {
    pub id: FolderId,
    pub display_name: &'static str,
    pub icon: &'static str,
    pub color: Color,
}

/// Display order of the folder panels.
pub static FOLDERS: [FolderDefinition; 4] = [
    FolderDefinition {
        id: FolderId::Clients,
        display_name: "Clients",
        icon: "👥",
        color: Color::Rgb(0x63, 0x66, 0xf1),
    },
    FolderDefinition {
        id: FolderId::PurchaseOrders,
        display_name: "Purchase Orders",
        icon: "📦",
        color: Color::Rgb(0x10, 0xb9, 0x81),
    },
    FolderDefinition {
        id: FolderId::InternalComs,
        display_name: "Internal Coms",
        icon: "💼",
        color: Color::Rgb(0xf5, 0x9e, 0x0b),
    },
    FolderDefinition {
        id: FolderId::VeryImportant,
        display_name: "Very Important",
        icon: "⭐",
        color: Color::Rgb(0xef, 0x44, 0x44),
    },
];

impl FolderId {
    pub const ALL: [FolderId; 4] = [
        FolderId::Clients,
        FolderId::PurchaseOrders,
        FolderId::InternalComs,
        FolderId::VeryImportant,
    ];

    /// Wire identifier shared by the prompt and the response parser.
    pub fn as_str(self) -> &'static str {
        match self {
            FolderId::Clients => "clients",
            FolderId::PurchaseOrders => "purchase_orders",
            FolderId::InternalComs => "internal_coms",
            FolderId::VeryImportant => "very_important",
        }
    }

    pub fn index(self) -> usize {
        match self {
            FolderId::Clients => 0,
            FolderId::PurchaseOrders => 1,
            FolderId::InternalComs => 2,
            FolderId::VeryImportant => 3,
        }
    }

    pub fn definition(self) -> &'static FolderDefinition {
        &FOLDERS[self.index()]
    }

    pub fn display_name(self) -> &'static str {
        self.definition().display_name
    }
}

impl fmt::Display for FolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown folder identifier: {0}")]
pub struct UnknownFolder(pub String);

impl FromStr for FolderId {
    type Err = UnknownFolder;

    /// Exact match against the wire identifiers; callers lower-case first.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        FolderId::ALL
            .into_iter()
            .find(|id| id.as_str() == value)
            .ok_or_else(|| UnknownFolder(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_table_matches_index_order() {
        for id in FolderId::ALL {
            assert_eq!(FOLDERS[id.index()].id, id);
        }
    }

    #[test]
    fn parses_known_identifiers_only() {
        assert_eq!("clients".parse(), Ok(FolderId::Clients));
        assert_eq!("purchase_orders".parse(), Ok(FolderId::PurchaseOrders));
        assert_eq!("very_important".parse(), Ok(FolderId::VeryImportant));
        assert!("unknown_bucket".parse::<FolderId>().is_err());
        assert!("Clients".parse::<FolderId>().is_err());
    }

    #[test]
    fn serde_uses_wire_identifiers() {
        let json = serde_json::to_string(&FolderId::PurchaseOrders).unwrap();
        assert_eq!(json, "\"purchase_orders\"");
    }
}
