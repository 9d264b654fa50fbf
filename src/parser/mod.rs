//! Parsers for junction and gene-model files.

pub mod gpe;
pub mod junction;
pub mod util;

pub use gpe::{parse_gpe_line, GpeReader};
pub use junction::{parse_junctions, parse_junctions_reader};
