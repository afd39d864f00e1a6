use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque order identifier. Generated as a UUID v4 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Ordered,
    Preparing,
    Served,
}

impl Column {
    /// Columns in board order, left to right.
    pub const ALL: [Column; 3] = [Column::Ordered, Column::Preparing, Column::Served];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ordered => "ordered",
            Self::Preparing => "preparing",
            Self::Served => "served",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Ordered => "Ordered",
            Self::Preparing => "Preparing",
            Self::Served => "Served",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Column {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ordered" => Ok(Self::Ordered),
            "preparing" => Ok(Self::Preparing),
            "served" => Ok(Self::Served),
            _ => Err(format!("Invalid column: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub title: String,
    pub table: String,
    pub column: Column,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// New orders always start in the `ordered` column.
    pub fn new(id: OrderId, title: impl Into<String>, table: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: title.into(),
            table: table.into(),
            column: Column::Ordered,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

// Snapshot view types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub columns: Vec<ColumnView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnView {
    pub name: Column,
    pub orders: Vec<Order>,
}

impl BoardSnapshot {
    pub fn column(&self, column: Column) -> Option<&ColumnView> {
        self.columns.iter().find(|c| c.name == column)
    }

    pub fn total(&self) -> usize {
        self.columns.iter().map(|c| c.orders.len()).sum()
    }
}
