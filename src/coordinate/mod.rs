//! Coordinate handling for geospatial data
//!
//! Geographic points, bounding boxes, areas of interest and the mapping
//! between geographic extents and pixel windows.

mod bbox;
mod point;
mod region;
mod area;
pub mod geodesy;
mod tests;

// Re-export key types
pub use self::bbox::BoundingBox;
pub use self::point::Point;
pub use self::region::PixelRegion;
pub use self::area::AreaOfInterest;
