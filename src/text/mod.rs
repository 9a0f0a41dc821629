// src/text/mod.rs
// =============================================================================
// This module turns fetched pages into text the crawler can work with.
//
// Submodules:
// - html: reduces HTML markup to Markdown-flavoured plain text
// - links: finds "(http...)" links in that text for the next crawl level
// =============================================================================

mod html;
mod links;

pub use html::html_to_text;
pub use links::find_links;
