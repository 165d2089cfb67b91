//! Profile view flow.
//!
//! - `load_profile` / `save_profile`: the two requests, gated on the session
//! - `ProfileView`: read-only/editing state, draft and inline error
//! - `UpdateMode`: whole-payload replace or editable-fields-only update

pub mod error;
pub mod update;
pub mod view;

pub use error::{FetchError, SaveError};
pub use update::{build_update_body, ProfileDraft, ProfileField, UpdateMode};
pub use view::{load_profile, save_profile, ProfileView, ViewMode};
