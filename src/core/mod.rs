// Domain-layer modules and shared errors/models
pub mod lead_models {
    pub use crate::lead_models::*;
}

pub mod phone {
    pub use crate::phone::*;
}

pub mod errors {
    pub use crate::errors::*;
}
