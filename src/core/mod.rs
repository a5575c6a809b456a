pub mod archive;
pub mod cleanup;
pub mod concat;
pub mod crawler;
pub mod engine;
pub mod links;
pub mod listing;
pub mod pipeline;
