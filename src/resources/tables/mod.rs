mod table2d;
mod table3d;

pub use table2d::Table2D;
pub use table3d::Table3D;
