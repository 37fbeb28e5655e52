pub mod dto;
pub mod entity_edges;
pub mod entity_nodes;
pub mod episodes;
pub mod graph;
pub mod groups;
pub mod health;
pub mod messages;
pub mod queue;

pub mod utils;
