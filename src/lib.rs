pub mod concierge;
pub mod contract;
