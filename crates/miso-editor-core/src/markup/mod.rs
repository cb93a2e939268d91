//! Markup parsing and serialization for the editable region.

mod entities;
mod parser;
mod writer;

pub use entities::decode_entities;
pub use parser::{MAX_DEPTH, parse_fragment};
pub use writer::{write_fragment, write_node};
