pub mod configuration;
pub mod domain;
pub mod fallback;
pub mod notify_client;
pub mod social;
pub mod startup;
pub mod status;
pub mod submission;
pub mod telemetry;
