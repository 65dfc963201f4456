//! Section parsing for generated clinical notes.
//!
//! A note is scanned line by line. Lines that consist of a known heading
//! (주호소, 현병력, ...) switch the current section; every other line is
//! content of the current section. The result is a [`ParsedNote`] holding
//! all six primary sections plus any caller-registered extra sections.
//!
//! [`ParsedNote`]: emr_model::ParsedNote

pub mod parser;
pub mod table;

pub use parser::parse_sections;
pub use table::{LabelPattern, LabelTable};
