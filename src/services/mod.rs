//! Calculation engines. All of them are pure functions over typed requests.

pub mod concentration;
pub mod conversion;
pub mod neubauer;
pub mod ph;
