//! Category filtering for the article and event listings
//!
//! Library-only helper; no route serves it.
//!
//! A selection shows every item, items whose tag equals a category, or items
//! whose tag belongs to a subject group. The empty-state message is shown
//! exactly when nothing is visible.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

/// Selection value meaning "show everything"
pub const SHOW_ALL: &str = "all";

/// Anything carrying a category tag
pub trait Tagged {
    fn tag(&self) -> &str;
}

impl Tagged for String {
    fn tag(&self) -> &str {
        self
    }
}

impl Tagged for &str {
    fn tag(&self) -> &str {
        self
    }
}

/// Named groups of subjects, used by the article listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectGroups(BTreeMap<String, Vec<String>>);

impl SubjectGroups {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn with_group(mut self, name: &str, subjects: &[&str]) -> Self {
        self.0.insert(
            name.to_string(),
            subjects.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    pub fn contains(&self, group: &str, subject: &str) -> bool {
        self.0
            .get(group)
            .is_some_and(|subjects| subjects.iter().any(|s| s == subject))
    }
}

impl Default for SubjectGroups {
    fn default() -> Self {
        Self::new()
            .with_group("Sciences", &["Mathematics", "Physics & Chemistry", "SVT", "Sport"])
            .with_group("Languages", &["Arabe", "Francais", "Anglais"])
            .with_group("other", &["Primaire", "Education_islamique", "H&G"])
    }
}

/// How a selection value is matched against item tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterRule {
    All,
    /// Tag equals the category exactly
    Category(String),
    /// Tag is listed under the group
    Group(String),
}

impl FilterRule {
    /// Selection for the event listing, which filters on exact categories
    pub fn category(selection: &str) -> Self {
        if selection == SHOW_ALL {
            FilterRule::All
        } else {
            FilterRule::Category(selection.to_string())
        }
    }

    /// Selection for the article listing, which filters on subject groups
    pub fn group(selection: &str) -> Self {
        if selection == SHOW_ALL {
            FilterRule::All
        } else {
            FilterRule::Group(selection.to_string())
        }
    }

    pub fn matches(&self, tag: &str, groups: &SubjectGroups) -> bool {
        match self {
            FilterRule::All => true,
            FilterRule::Category(category) => tag == category,
            FilterRule::Group(group) => groups.contains(group, tag),
        }
    }
}

/// Visible items after a filter pass
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome<'a, T> {
    pub visible: Vec<&'a T>,
    pub hidden: usize,
}

impl<T> FilterOutcome<'_, T> {
    pub fn show_empty_message(&self) -> bool {
        self.visible.is_empty()
    }
}

pub fn apply<'a, T: Tagged>(
    items: &'a [T],
    rule: &FilterRule,
    groups: &SubjectGroups,
) -> FilterOutcome<'a, T> {
    let (visible, hidden): (Vec<&T>, Vec<&T>) =
        items.iter().partition(|item| rule.matches(item.tag(), groups));

    FilterOutcome {
        visible,
        hidden: hidden.len(),
    }
}
