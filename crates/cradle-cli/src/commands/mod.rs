pub mod dispatch;
pub mod score;
pub mod seed;
pub mod stats;
