pub mod cloud;
pub mod decimation;
pub mod property;

pub use cloud::{Element, PointCloud, VERTEX_ELEMENT};
pub use property::{ColumnBuffer, Property, PropertyType};
