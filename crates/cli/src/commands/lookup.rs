//! Path checks shared by the object commands

use s3shell_core::path::{Location, SEPARATOR};
use s3shell_core::{Error, NamespaceInspector, ObjectPath, Result, WorkingPath};

pub(crate) fn no_such_file(arg: &str) -> Error {
    Error::NotFound(format!("{arg}: No such file or directory."))
}

pub(crate) fn is_a_directory(arg: &str) -> Error {
    Error::WrongKind(format!("{arg}: Is a directory."))
}

pub(crate) fn not_a_directory(arg: &str) -> Error {
    Error::WrongKind(format!("{arg}: Not a directory."))
}

/// Require `path` to name an existing leaf object
///
/// `arg` is the argument as typed, used in messages. Paths at the root or
/// bucket level are usage errors reported with `misplaced`.
pub(crate) async fn require_leaf(
    inspector: &NamespaceInspector<'_>,
    path: &WorkingPath,
    arg: &str,
    misplaced: &str,
) -> Result<ObjectPath> {
    let Some(object) = path.object_path() else {
        return Err(Error::Usage(misplaced.to_string()));
    };
    inspector.require_bucket(&object.bucket).await?;

    if inspector.leaf_exists(&object).await? {
        Ok(object)
    } else if inspector.folder_exists(&object).await? {
        Err(is_a_directory(arg))
    } else {
        Err(no_such_file(arg))
    }
}

/// Where an object named `file_name` lands when sent to `dest`
///
/// A bucket or an existing folder receives the object under `file_name`;
/// anything else is taken as the full destination key.
pub(crate) async fn placement(
    inspector: &NamespaceInspector<'_>,
    dest: &WorkingPath,
    file_name: &str,
) -> Result<ObjectPath> {
    match dest.location() {
        Location::Root => Err(Error::Usage(
            "Invalid location - objects can only be placed inside a bucket.".into(),
        )),
        Location::Bucket(bucket) => {
            inspector.require_bucket(bucket).await?;
            Ok(ObjectPath::new(bucket, file_name))
        }
        Location::Object { bucket, key } => {
            inspector.require_bucket(bucket).await?;
            let key = key.join("/");
            let target = ObjectPath::new(bucket, key.as_str());
            if inspector.folder_exists(&target).await? {
                Ok(ObjectPath::new(bucket, format!("{key}{SEPARATOR}{file_name}")))
            } else {
                Ok(target)
            }
        }
    }
}
