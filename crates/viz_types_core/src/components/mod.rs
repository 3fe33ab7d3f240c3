mod color;
mod position3d;
mod radius;
mod scalar;
mod text;

pub use self::{color::Color, position3d::Position3D, radius::Radius, scalar::Scalar, text::Text};
