//! Transport-agnostic request types.

pub mod error;

mod fragment;
mod identity;
mod prompt;

pub use fragment::{Fragment, FragmentStream};
pub use identity::{Identity, UserId};
pub use prompt::{BearerToken, Prompt};
