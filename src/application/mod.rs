pub mod orchestrator;
pub mod writers;
