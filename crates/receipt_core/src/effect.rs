use crate::{ImageUpload, RequestToken};

/// Network work requested by [`crate::update`]; executed outside the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SubmitUpload {
        token: RequestToken,
        image: ImageUpload,
    },
    FetchHistory {
        token: RequestToken,
    },
}
