//! Pattern sources for the Pattern Lab viewer.
//!
//! This crate provides platform-specific implementations of the
//! `PatternSource` trait from patternlab-traits.
//!
//! - [`FilesystemPatternSource`]: serves generated files from a public dir
//! - [`InMemoryPatternSource`]: re-exported from patternlab-traits

mod filesystem;

pub use filesystem::FilesystemPatternSource;

pub use patternlab_traits::InMemoryPatternSource;
