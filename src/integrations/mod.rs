//! External service integrations.

pub mod voice_client {
    pub use crate::voice_client::*;
}
