//! Model types for translating ODA statistical codes between the legacy and
//! explorer coding schemes.

pub mod code;
pub mod error;
pub mod mapping;
pub mod options;

pub use code::Code;
pub use error::{ModelError, Result};
pub use mapping::{CodeMapping, KeyCoercion, MappingSpec, merge};
pub use options::{TranslationOptions, UnmappedPolicy};
