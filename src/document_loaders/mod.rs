pub mod web;
pub mod youtube;

pub use web::WebLoader;
pub use youtube::{extract_video_id, YoutubeTranscriptLoader};
