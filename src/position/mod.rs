mod client;
mod error;
mod parsing;
mod sample;

pub use client::{OpenNotifyClient, PositionSource};
pub use error::FetchError;
pub use sample::Sample;
