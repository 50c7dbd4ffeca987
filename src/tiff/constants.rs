//! TIFF format constants
//!
//! This module defines constants used throughout the TIFF processing code,
//! replacing magic numbers with descriptive names.

/// TIFF header constants
pub mod header {
    /// Standard TIFF version number (42)
    pub const TIFF_VERSION: u16 = 42;

    /// BigTIFF version number (43)
    pub const BIG_TIFF_VERSION: u16 = 43;

    /// BigTIFF offset size (8 bytes)
    pub const BIGTIFF_OFFSET_SIZE: u16 = 8;

    /// Offset of the first-IFD pointer in a BigTIFF header
    pub const BIGTIFF_FIRST_IFD_POSITION: u64 = 8;

    /// Offset of the first-IFD pointer in a classic TIFF header
    pub const TIFF_FIRST_IFD_POSITION: u64 = 4;
}

/// Field types as defined in the TIFF spec
pub mod field_types {
    pub const BYTE: u16 = 1;       // 8-bit unsigned integer
    pub const ASCII: u16 = 2;      // 8-bit byte containing ASCII character
    pub const SHORT: u16 = 3;      // 16-bit unsigned integer
    pub const LONG: u16 = 4;       // 32-bit unsigned integer
    pub const RATIONAL: u16 = 5;   // Two LONGs: numerator and denominator
    pub const UNDEFINED: u16 = 7;  // 8-bit byte with unspecified format
    pub const SSHORT: u16 = 8;     // 16-bit signed integer
    pub const SLONG: u16 = 9;      // 32-bit signed integer
    pub const SRATIONAL: u16 = 10; // Two SLONGs: numerator and denominator
    pub const FLOAT: u16 = 11;     // Single precision IEEE floating point
    pub const DOUBLE: u16 = 12;    // Double precision IEEE floating point
    pub const IFD: u16 = 13;       // 32-bit offset to a child IFD
    pub const LONG8: u16 = 16;     // BigTIFF 64-bit unsigned integer
}

/// Tags the extractors look at
pub mod tags {
    pub const MAKE: u16 = 271;                   // Scanner/camera manufacturer
    pub const SUB_IFDS: u16 = 330;               // Offsets to child IFDs
    pub const GEO_ASCII_PARAMS_TAG: u16 = 34737; // GeoTIFF ASCII parameters
    pub const GPS_IFD: u16 = 34853;              // Offset to the GPS IFD
}

/// Tags inside the GPS IFD
pub mod gps_tags {
    pub const LATITUDE_REF: u16 = 1;
    pub const LATITUDE: u16 = 2;
    pub const LONGITUDE_REF: u16 = 3;
    pub const LONGITUDE: u16 = 4;
}

/// Bounds applied while walking IFD chains and trees
pub mod limits {
    /// Maximum number of IFDs collected from one file
    pub const MAX_IFDS: usize = 1024;

    /// Maximum nesting depth of SubIFD recursion
    pub const MAX_SUB_IFD_DEPTH: usize = 8;
}

/// Make value written by FLIR thermal cameras
pub const FLIR_MAKE: &str = "FLIR";
