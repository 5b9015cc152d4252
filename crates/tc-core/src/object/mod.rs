//! Object system
//!
//! Item kinds, the static catalogue, item stacks, valuation and generation.

pub mod catalogue;
mod forge;
mod item;
mod kind;
mod value;

pub use catalogue::{ArtifactId, EgoId, KindDef, KindId};
pub use forge::{Forge, ItemSource};
pub use item::Item;
pub use kind::{ItemKind, Wares};
