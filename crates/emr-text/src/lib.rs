//! Text cleanup for generated clinical notes.
//!
//! Every function here is total: any input string produces an output, and
//! empty input produces an empty output.
//!
//! # Modules
//!
//! - [`normalize`](mod@normalize): line endings, escaped newlines, invisible characters
//! - [`bullets`]: bullet glyph unification and run-on splitting
//! - [`ros`]: review-of-systems `Name: sign` pairs
//! - [`render`]: escaped HTML list output
//! - [`dialogue`]: speaker-turn formatting for transcripts

pub mod bullets;
pub mod dialogue;
pub mod format;
pub mod normalize;
pub mod render;
pub mod ros;

pub use bullets::{
    BULLET_GLYPHS, TERMINAL_PUNCTUATION, apply_bullet_newline, ensure_terminal_punctuation,
    normalize_dash_bullets, reformat_bullets,
};
pub use dialogue::format_dialogue;
pub use format::format_section;
pub use normalize::normalize;
pub use render::{escape_html, render_list};
pub use ros::format_review_of_systems;
