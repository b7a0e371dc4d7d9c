mod calculator;
mod haversine;

pub use calculator::{calculate, DerivedSample, SpeedReport, MAX_PLAUSIBLE_SPEED_KMH};
