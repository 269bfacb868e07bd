//! Stylist roster entry.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A staff member bookable at a store.
///
/// Stylists are managed as a per-store list replaced wholesale by the
/// admin UI, so there are no per-row timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stylist {
    pub id: Uuid,
    pub store_id: String,
    pub name: String,
    pub active: bool,
    pub display_order: u32,
}
