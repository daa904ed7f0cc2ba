// Business domains
pub mod tenants;
pub mod usage;
