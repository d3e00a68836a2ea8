//! Panel controller drivers

pub mod ili9486;

pub use ili9486::Ili9486;
