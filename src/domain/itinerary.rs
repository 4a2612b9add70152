//! Day-by-day itinerary tree owned by a draft.
//!
//! The tree is only mutated through [`ItineraryAction`]. Every action checks
//! its indices before touching anything, so a rejected action leaves the tree
//! exactly as it was.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::types::ItemType;

/// Errors raised when an action addresses a slot that does not exist.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ItineraryError {
    #[error("day index {0} is out of range")]
    DayOutOfRange(usize),

    #[error("item {item} does not exist on day index {day}")]
    ItemOutOfRange { day: usize, item: usize },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItineraryItem {
    #[serde(rename = "type")]
    pub item_type: ItemType,
    #[serde(default)]
    pub details: String,
}

impl ItineraryItem {
    pub fn new(item_type: ItemType) -> Self {
        Self {
            item_type,
            details: String::new(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayPlan {
    /// 1-indexed day number.
    pub day: u32,
    #[serde(default)]
    pub items: Vec<ItineraryItem>,
}

impl DayPlan {
    pub fn empty(day: u32) -> Self {
        Self {
            day,
            items: Vec::new(),
        }
    }
}

/// Address of an item inside the tree (both indices 0-based).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemPosition {
    pub day: usize,
    pub index: usize,
}

/// Field update applied to a single item.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum ItemChange {
    Type(ItemType),
    Details(String),
}

/// Reducer-style mutations of the itinerary tree.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ItineraryAction {
    #[serde(rename_all = "camelCase")]
    AddItem { day: usize, item_type: ItemType },
    RemoveItem { day: usize, item: usize },
    EditItem {
        day: usize,
        item: usize,
        change: ItemChange,
    },
    /// `to: None` is a cancelled drag and changes nothing.
    MoveItem {
        from: ItemPosition,
        to: Option<ItemPosition>,
    },
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Itinerary(Vec<DayPlan>);

impl Itinerary {
    /// Fresh empty days numbered `1..=count`.
    pub fn with_days(count: usize) -> Self {
        Self((1..=count).map(|day| DayPlan::empty(day as u32)).collect())
    }

    pub fn from_days(days: Vec<DayPlan>) -> Self {
        Self(days)
    }

    pub fn days(&self) -> &[DayPlan] {
        &self.0
    }

    pub fn into_days(self) -> Vec<DayPlan> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keeps the first `count` days with their items, appending empty days as needed.
    pub fn resize(&mut self, count: usize) {
        self.0.truncate(count);
        let start = self.0.len();
        self.0.extend((start + 1..=count).map(|day| DayPlan::empty(day as u32)));
    }

    /// Day numbers that have no items yet.
    pub fn empty_days(&self) -> Vec<u32> {
        self.0
            .iter()
            .filter(|day| day.items.is_empty())
            .map(|day| day.day)
            .collect()
    }

    pub fn every_day_has_items(&self) -> bool {
        self.0.iter().all(|day| !day.items.is_empty())
    }

    pub fn apply(&mut self, action: ItineraryAction) -> Result<(), ItineraryError> {
        match action {
            ItineraryAction::AddItem { day, item_type } => {
                self.day_mut(day)?.items.push(ItineraryItem::new(item_type));
            }
            ItineraryAction::RemoveItem { day, item } => {
                self.check_item(day, item)?;
                self.0[day].items.remove(item);
            }
            ItineraryAction::EditItem { day, item, change } => {
                self.check_item(day, item)?;
                let target = &mut self.0[day].items[item];
                match change {
                    ItemChange::Type(item_type) => target.item_type = item_type,
                    ItemChange::Details(details) => target.details = details,
                }
            }
            ItineraryAction::MoveItem { from, to } => {
                let Some(to) = to else {
                    return Ok(());
                };
                self.check_item(from.day, from.index)?;
                if to.day >= self.0.len() {
                    return Err(ItineraryError::DayOutOfRange(to.day));
                }
                let moved = self.0[from.day].items.remove(from.index);
                let target = &mut self.0[to.day].items;
                let index = to.index.min(target.len());
                target.insert(index, moved);
            }
        }
        Ok(())
    }

    fn day_mut(&mut self, day: usize) -> Result<&mut DayPlan, ItineraryError> {
        self.0
            .get_mut(day)
            .ok_or(ItineraryError::DayOutOfRange(day))
    }

    fn check_item(&self, day: usize, item: usize) -> Result<(), ItineraryError> {
        let plan = self.0.get(day).ok_or(ItineraryError::DayOutOfRange(day))?;
        if item < plan.items.len() {
            Ok(())
        } else {
            Err(ItineraryError::ItemOutOfRange { day, item })
        }
    }
}
