//! Rendering client for the comment board.
//!
//! [`Board`] is the page controller: it talks to the board API through
//! [`ApiClient`] and turns records into a [`dom::Node`] tree. How record
//! text enters that tree is decided by one [`EncodingPolicy`]: `Raw`
//! splices it into markup (the XSS under demonstration), `Escaped` keeps
//! it as inert text.

pub mod api;
pub mod board;
pub mod dom;
pub mod error;
pub mod render;
pub mod validate;

pub use api::ApiClient;
pub use board::Board;
pub use error::ClientError;
pub use render::EncodingPolicy;
