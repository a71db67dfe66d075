//! Local checks run on an image before it is uploaded.
//!
//! Both checks touch only the local filesystem, so a failure here means no
//! request was made.

use std::fs;
use std::path::Path;

use crate::config::{MAX_IMAGE_SIZE, VALID_IMAGE_EXTENSIONS};
use crate::error::{DatakickError, Result};

/// Fail unless the path ends in one of the accepted extensions.
///
/// The comparison is case-sensitive and only looks at the text after the last
/// `.` of the file name; `image.JPG` and `image` are both rejected.
pub fn check_image_extension<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let ext = path
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.rfind('.').filter(|i| *i > 0).map(|i| &n[i..]));

    match ext {
        Some(ext) if VALID_IMAGE_EXTENSIONS.contains(&ext) => Ok(()),
        _ => Err(DatakickError::InvalidImageFormat {
            path: path.display().to_string(),
            allowed: VALID_IMAGE_EXTENSIONS,
        }),
    }
}

/// Fail if the file on disk is larger than [`MAX_IMAGE_SIZE`].
pub fn check_image_size<P: AsRef<Path>>(path: P) -> Result<()> {
    let size = fs::metadata(path.as_ref())?.len();
    check_size(size)
}

pub fn check_size(size: u64) -> Result<()> {
    if size > MAX_IMAGE_SIZE {
        return Err(DatakickError::ImageTooLarge {
            size,
            limit: MAX_IMAGE_SIZE,
        });
    }
    Ok(())
}

/// Extension first, then size.
pub fn validate_image<P: AsRef<Path>>(path: P) -> Result<()> {
    check_image_extension(path.as_ref())?;
    check_image_size(path.as_ref())
}
