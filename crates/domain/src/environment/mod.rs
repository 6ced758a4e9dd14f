//! Run-scoped variable environment

mod overrides;
mod variables;

pub use overrides::parse_override;
pub use variables::{Environment, render_value};
