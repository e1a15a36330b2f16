//! Output line driver.

pub mod line;
