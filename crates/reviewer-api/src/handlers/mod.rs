mod health;
mod review;

pub use health::health_check;
pub use review::get_review;
