//! Application services - event handling and spot-price refresh.

mod engine;
mod spot;

pub use engine::StatsEngine;
pub use spot::SpotPriceSnapshotter;
