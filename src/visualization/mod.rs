pub mod viewer3d;
