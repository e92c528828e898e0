pub mod invoice;
pub mod merger;
pub mod orchestrator;
pub mod pipeline;
pub mod ranking;
pub mod session;
pub mod tariff;
