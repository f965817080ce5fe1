//! The reconciled view model: badges, items, and namespace groups.
//!
//! These types are purpose-built for template rendering: severities and
//! colors expose the CSS class they map to so templates stay simple.

use serde::{Deserialize, Serialize};

/// Badge label for a workload with at least one available replica.
pub const AVAILABLE: &str = "Available";

/// Badge label for a workload with no available replicas.
pub const NOT_AVAILABLE: &str = "Not available";

/// Visual weight of a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Neutral,
    Success,
    Danger,
}

impl Severity {
    /// Badge class suffix used by the templates.
    pub fn css_class(&self) -> &'static str {
        match self {
            Severity::Neutral => "secondary",
            Severity::Success => "success",
            Severity::Danger => "danger",
        }
    }
}

/// Row color of an item within a namespace card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemColor {
    Blank,
    Success,
    Danger,
}

impl ItemColor {
    pub fn css_class(&self) -> &'static str {
        match self {
            ItemColor::Blank => "",
            ItemColor::Success => "list-group-item-success",
            ItemColor::Danger => "list-group-item-danger",
        }
    }
}

/// A small labeled status indicator attached to an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub label: String,
    pub severity: Severity,
}

impl Badge {
    pub fn new(label: impl Into<String>, severity: Severity) -> Self {
        Self {
            label: label.into(),
            severity,
        }
    }

    /// The availability badge pair derived from a workload's replica count.
    pub fn availability(available: bool) -> Self {
        if available {
            Badge::new(AVAILABLE, Severity::Success)
        } else {
            Badge::new(NOT_AVAILABLE, Severity::Danger)
        }
    }

    /// Whether this badge is one of the two availability labels. The ceph
    /// cross-reference uses this to pick the badge to carry over.
    pub fn is_availability(&self) -> bool {
        self.label == AVAILABLE || self.label == NOT_AVAILABLE
    }
}

/// One workload or volume claim within a namespace grouping.
///
/// Items are never mutated after construction: correlation merges build a
/// new item with an extended badge list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub color: ItemColor,
    pub badges: Vec<Badge>,
}

impl Item {
    pub fn new(name: impl Into<String>, color: ItemColor, badges: Vec<Badge>) -> Self {
        Self {
            name: name.into(),
            color,
            badges,
        }
    }
}

/// All items reconciled under one namespace. Unique by name within a
/// result set; item order is first-seen order from the raw records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamespaceGroup {
    pub name: String,
    pub items: Vec<Item>,
}
