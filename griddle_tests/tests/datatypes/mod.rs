pub mod bulk;
pub mod helpers;
pub mod round_trip;
