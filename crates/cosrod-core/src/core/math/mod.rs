pub mod frame;
pub mod vector;
