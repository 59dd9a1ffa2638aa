//! Coffee order state, filled in slot by slot as the customer talks.

use crate::slots;
use crate::store::{self, StoreError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strum::{Display, EnumIter, IntoEnumIterator};

/// Default location of the finalized order.
pub const DEFAULT_ORDER_PATH: &str = "order.json";

/// The named slots of an order, spelled as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum OrderSlot {
    #[strum(serialize = "drinkType")]
    DrinkType,
    #[strum(serialize = "size")]
    Size,
    #[strum(serialize = "milk")]
    Milk,
    #[strum(serialize = "extras")]
    Extras,
    #[strum(serialize = "name")]
    Name,
}

impl OrderSlot {
    /// Only `extras` holds a list; everything else is a single value.
    pub fn is_list(&self) -> bool {
        matches!(self, OrderSlot::Extras)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderState {
    #[serde(rename = "drinkType")]
    pub drink_type: Option<String>,
    pub size: Option<String>,
    pub milk: Option<String>,
    pub extras: Vec<String>,
    pub name: Option<String>,
}

impl OrderState {
    fn scalar(&self, slot: OrderSlot) -> Option<&str> {
        match slot {
            OrderSlot::DrinkType => self.drink_type.as_deref(),
            OrderSlot::Size => self.size.as_deref(),
            OrderSlot::Milk => self.milk.as_deref(),
            OrderSlot::Name => self.name.as_deref(),
            OrderSlot::Extras => None,
        }
    }

    /// Scalar slots that have not been filled yet, in slot order.
    pub fn missing_slots(&self) -> Vec<OrderSlot> {
        OrderSlot::iter()
            .filter(|slot| !slot.is_list() && self.scalar(*slot).is_none())
            .collect()
    }

    /// An order can be recited back once every scalar slot is known.
    pub fn is_complete(&self) -> bool {
        self.missing_slots().is_empty()
    }
}

/// Partial order update as extracted by the LLM. Absent and empty fields are
/// left alone; `extras` is a comma separated list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrderUpdate {
    #[serde(rename = "drinkType")]
    pub drink_type: Option<String>,
    pub size: Option<String>,
    pub milk: Option<String>,
    pub extras: Option<String>,
    pub name: Option<String>,
}

/// Holds one session's order. Mutated only through [`update`] and persisted
/// through [`finalize`].
///
/// [`update`]: OrderStateAccumulator::update
/// [`finalize`]: OrderStateAccumulator::finalize
#[derive(Debug)]
pub struct OrderStateAccumulator {
    state: OrderState,
    path: PathBuf,
}

impl OrderStateAccumulator {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            state: OrderState::default(),
            path: path.into(),
        }
    }

    pub fn state(&self) -> &OrderState {
        &self.state
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply a partial update and return the full state as the LLM sees it.
    pub fn update(&mut self, update: OrderUpdate) -> String {
        let state = &mut self.state;
        slots::set_scalar(&mut state.drink_type, update.drink_type.as_deref());
        slots::set_scalar(&mut state.size, update.size.as_deref());
        slots::set_scalar(&mut state.milk, update.milk.as_deref());
        slots::set_scalar(&mut state.name, update.name.as_deref());

        if let Some(extras) = update.extras.as_deref() {
            let added = slots::append_unique(&mut state.extras, extras);
            log::debug!("Added {} extra(s) to order", added);
        }

        format!("Order updated. Current state: {}", self.snapshot())
    }

    /// Compact JSON of the whole order, unset slots included.
    pub fn snapshot(&self) -> String {
        serde_json::to_string(&self.state).unwrap_or_else(|_| "invalid json".to_string())
    }

    /// Overwrite the order file with the current state. Non-ASCII text in
    /// the file is `\uXXXX`-escaped.
    pub fn finalize(&self) -> Result<String, StoreError> {
        store::write_pretty_ascii(&self.path, &self.state)?;
        log::info!("Order saved to {}", self.path.display());

        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string());
        Ok(format!("Order finalized and saved to {}.", file_name))
    }
}
