//! Domain types for the backstat reconciliation view.
//!
//! Two families of types live here:
//! - the reconciled view model (`Badge`, `Item`, `NamespaceGroup`) handed
//!   to the dashboard for rendering, and
//! - the raw record views (`RawWorkload`, `RawVolumeClaim`) decoded from
//!   cluster list responses.
//!
//! Everything is transient: the view is rebuilt from scratch on every
//! request and nothing here is ever persisted.

mod error;
mod raw;
mod types;

pub use error::DecodeError;
pub use raw::{RawVolumeClaim, RawWorkload, STORAGE_CLASS_ANNOTATION};
pub use types::{AVAILABLE, Badge, Item, ItemColor, NOT_AVAILABLE, NamespaceGroup, Severity};
