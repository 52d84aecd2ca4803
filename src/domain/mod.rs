//! Domain logic - pure rules independent of git and the filesystem

pub mod commit;
pub mod tag;
pub mod version;

pub use commit::{ClassifiedCommit, CommitCategory};
pub use tag::ReleaseTag;
pub use version::ResolvedVersion;
