mod points3d;
mod text_log;

pub use self::{points3d::Points3D, text_log::TextLog};
