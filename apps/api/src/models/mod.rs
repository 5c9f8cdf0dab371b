pub mod label;

pub use label::{ServiceType, ShipmentLabel};
