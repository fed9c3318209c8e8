mod build;
mod interaction;
mod view;

pub use build::rebuild_edges;
pub(in crate::app) use view::fuzzy_match_score;
