//! Graph-store capability for the ingestion service.
//!
//! The service treats the graph store as an external collaborator reached
//! through the [`GraphClient`] trait. [`InMemoryGraph`] is the in-process
//! implementation shipped with the binary.

mod client;
mod error;
mod memory;
mod types;

pub use client::GraphClient;
pub use error::{GraphError, Result};
pub use memory::InMemoryGraph;
pub use types::{AddEpisode, EntityEdge, EntityNode, EpisodeType, EpisodicNode, NewEntityNode};
