// Descriptor and edit-script DSL parsers

pub mod descriptor;
pub mod edits;
pub mod lexer;

pub use descriptor::{descriptor_from_str, parse_descriptor};
pub use edits::{edit_script_from_str, parse_edit, parse_edit_script};
