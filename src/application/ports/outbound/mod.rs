//! Outbound ports - Interfaces that the application requires from external systems

mod enrichment_port;
mod repository_port;

pub use enrichment_port::EnrichmentPort;
pub use repository_port::{CharacterRepositoryPort, RepositoryError};

#[cfg(test)]
pub use enrichment_port::MockEnrichmentPort;
#[cfg(test)]
pub use repository_port::MockCharacterRepositoryPort;
