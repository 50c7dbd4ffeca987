pub mod io;
pub mod tiff;
pub mod utils;
pub mod xmp;
pub mod coordinate;
pub mod extract;
pub mod commands;
pub mod errors;
pub mod formats;
pub mod record;
pub mod dispatcher;
pub mod api;

pub use crate::api::AeroTag;

pub use dispatcher::FormatDispatcher;
pub use errors::{MetadataError, MetadataResult};
pub use record::{FileCategory, ParsedRecord};
pub use coordinate::{CoordinateResolver, GeoPoint};
pub use tiff::{BigTiffIfdWalker, ClassicTiffIfdWalker, TiffReader};
pub use xmp::{parse_xmp, XmpDocument};
