// Thin namespace wrapper for API-layer components
pub mod handlers {
    pub use crate::handlers::*;
}

pub mod lead_handler {
    pub use crate::lead_handler::*;
}
