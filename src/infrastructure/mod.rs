pub mod id;
pub mod recording;
