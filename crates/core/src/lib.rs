//! s3shell-core: Core library for the s3shell interactive shell
//!
//! This crate provides the filesystem emulation over a flat object store:
//! - Path resolution (`~`, `..`, relative and absolute forms)
//! - Bucket name validation
//! - Namespace inspection (bucket / folder / leaf / absent)
//! - Session management and credential profiles
//! - The ObjectStore trait the shell consumes
//!
//! This crate is independent of any specific S3 SDK so the store can be
//! substituted in tests.

pub mod bucket;
pub mod error;
pub mod inspect;
pub mod path;
pub mod profile;
pub mod session;
pub mod traits;

pub use error::{Error, Result};
pub use inspect::{NamespaceInspector, PathKind, ResolvedPath};
pub use path::{ObjectPath, WorkingPath, resolve};
pub use profile::{Profile, ProfileStore};
pub use session::{Connector, SessionManager};
pub use traits::{BucketInfo, ObjectInfo, ObjectStore, Probe};
