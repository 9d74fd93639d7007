pub mod answer_summary;
pub mod response_builder;

pub use answer_summary::{answer_data, summarize_answers};
pub use response_builder::ResponseBuilder;
