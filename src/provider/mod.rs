//! Identity provider records: model, parsing and shared classification.
//!
//! # Key Types
//!
//! - [`IdentityProvider`] - A named provider configuration with opaque attributes
//! - [`ProviderRecordParser`] - Loads records from configuration documents
//! - [`SharedRecordClassifier`] - Name-prefix test for cross-tenant providers
//!
//! # Examples
//!
//! ```rust
//! use idp_registry::provider::{ProviderRecordParser, SharedRecordClassifier};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let idp = ProviderRecordParser::parse_str(r#"{"identityProviderName": "shared_corp"}"#)?
//!     .expect("document is not empty");
//! assert!(SharedRecordClassifier::default().is_shared(Some(&idp)));
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod parser;
pub mod record;

pub use classifier::{DEFAULT_SHARED_PREFIX, SharedRecordClassifier};
pub use parser::ProviderRecordParser;
pub use record::IdentityProvider;
