//! Concrete inventory records: structured metadata files and CSV install tables.

mod installs;
mod location;
mod maker;
mod model;
mod network;
mod provider;

pub use installs::{Asset, DataloggerInstall, EquipmentInstall, RadioInstall, SensorInstall};
pub use location::{Equipment, Linknet, Location};
pub use maker::{Maker, MakerModel};
pub use model::{Model, Version};
pub use network::{Device, Network};
pub use provider::{Provider, Range, Service};
