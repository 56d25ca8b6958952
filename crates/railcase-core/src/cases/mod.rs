//! Case records built from discovered tests.

mod builder;
mod record;

pub use builder::CaseBuilder;
pub use record::{CaseDefaults, CaseRecord, DescriptionStyle};
