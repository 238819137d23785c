pub mod annotation;
pub mod source;

pub use annotation::{AnnotationError, AnnotationSource, StaticAnnotationSource};
pub use source::{InMemoryPatternSource, PatternSource, SharedSourceData, SourceError, strip_query};
