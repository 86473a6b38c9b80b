pub mod svg;

pub use svg::{scene_to_svg, xml_escape};
