//! Pixpack Processing Library
//!
//! This crate converts uploaded raster images to WebP or AVIF and bundles the
//! results into a ZIP archive. It is synchronous and CPU-bound; callers in an
//! async context should run [`pipeline::convert_to_archive`] on a blocking thread.

pub mod archive;
pub mod batch;
pub mod codec;
pub mod convert;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod workspace;

pub use archive::{build_zip_archive, ArchiveBuffer};
pub use batch::BatchProcessor;
pub use codec::{CodecAdapter, EncodeMode, EncodePlan, FormatCodecExt};
pub use convert::convert_image;
pub use error::{ArchiveError, EncodeError, ProcessingError};
pub use models::{StagedOutput, UploadedFile};
pub use pipeline::convert_to_archive;
pub use workspace::StagingWorkspace;
