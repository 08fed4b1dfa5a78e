//! Two-tier structured field extraction from free-form text.
//!
//! The [`ExtractionResolver`](extraction::ExtractionResolver) pulls four fields
//! (`zip`, `brand`, `category`, `time_pref`) out of a piece of text. It asks a
//! remote language model first, retrying with linear backoff, and degrades to
//! the deterministic [`fallback_extract`](fallback::fallback_extract) when the
//! model is not configured or keeps misbehaving. Resolution never fails outward.
//!
//! ## Example
//!
//! ```
//! use classify_core::prelude::*;
//!
//! # async fn example() {
//! let resolver = ExtractionResolver::fallback_only();
//! let result = resolver.resolve("brand:Acme category:Shoes 90210").await;
//!
//! assert_eq!(result.zip, "90210");
//! assert_eq!(result.brand, "Acme");
//! # }
//! ```

pub mod extraction;
pub mod fallback;
pub mod remote;
pub mod types;

/// Common imports for embedding the resolver.
pub mod prelude {
    pub use crate::extraction::{
        ExtractionResolver, FallbackReason, Resolution, ResolutionObserver, ResolutionSource,
        ResolverConfig, TracingObserver,
    };
    pub use crate::fallback::fallback_extract;
    pub use crate::remote::{RigExtractor, TextExtractor};
    pub use crate::types::{ClassificationRequest, ClassificationResult};
}
