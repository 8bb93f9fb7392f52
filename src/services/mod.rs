pub mod recommendations;

pub use recommendations::{resolve_keyword, select_recommendation, select_recommendation_with};
