pub mod assistant;
pub mod health;
pub mod metrics;
pub mod quote;

pub use assistant::suggest_ideas;
pub use health::health_check;
pub use self::metrics::metrics_endpoint;
pub use quote::submit_quote;
