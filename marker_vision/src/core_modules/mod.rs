pub mod binarizer;
pub mod color_cluster;
pub mod color_key;
pub mod frame;
pub mod marker;
pub mod marker_detector;
pub mod pixel;
