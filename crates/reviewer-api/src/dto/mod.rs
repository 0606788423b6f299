mod request;
mod response;

pub use request::ReviewRequest;
pub use response::HealthResponse;
