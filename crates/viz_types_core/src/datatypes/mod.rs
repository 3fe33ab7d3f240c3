mod vec3d;

pub use self::vec3d::Vec3D;
