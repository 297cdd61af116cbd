//! Service layer for the decryptor
//!
//! The service layer turns raw table state into what users see: the cell
//! codec and the paginated display projection built on it.

pub mod codec;
pub mod projection;

pub use codec::CellCodec;
pub use projection::{DisplayProjection, ProjectedPage};
