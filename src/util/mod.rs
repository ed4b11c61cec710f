pub mod processer;
pub mod weights;
