pub mod annotator;
pub mod codec;
pub mod dto;
pub mod formatter;
pub mod orchestrator;
pub mod ports;
pub mod services;

#[cfg(test)]
pub mod testing;
