//! Tests for the classic TIFF walker

extern crate std;

use crate::errors::MetadataError;
use crate::io::byte_order::ByteOrder;
use crate::tiff::classic::ClassicTiffIfdWalker;
use crate::tiff::types::TagValue;
use crate::tiff::walker::IfdWalker;

use super::test_utils::{
    create_big_endian_tiff_buffer, create_single_entry_tiff, create_sub_ifd_cycle_buffer,
    create_test_tiff_buffer,
};

#[test]
fn test_inline_and_out_of_line_values() {
    let data = create_test_tiff_buffer();
    let ifds = ClassicTiffIfdWalker::new(&data, ByteOrder::LittleEndian).walk().unwrap();

    std::assert_eq!(ifds.len(), 1);
    let ifd = &ifds[0];
    std::assert_eq!(ifd.offset, 8);
    std::assert_eq!(ifd.entry_count(), 3);
    std::assert_eq!(ifd.first_value(256), Some(&TagValue::Long(800)));
    std::assert_eq!(ifd.first_value(282), Some(&TagValue::Rational(300.0)));
}

#[test]
fn test_ascii_trailing_nul_is_trimmed() {
    let data = create_test_tiff_buffer();
    let ifds = ClassicTiffIfdWalker::new(&data, ByteOrder::LittleEndian).walk().unwrap();

    std::assert_eq!(ifds[0].get_values(271), Some(&[TagValue::Ascii("FLIR".into())][..]));
    std::assert_eq!(ifds[0].first_str(271), Some("FLIR"));
}

#[test]
fn test_short_ascii_is_read_from_slot() {
    // "N\0" fits the four slot bytes
    let slot = u32::from_le_bytes([b'N', 0, 0, 0]);
    let data = create_single_entry_tiff(1, 2, 2, slot);
    let ifds = ClassicTiffIfdWalker::new(&data, ByteOrder::LittleEndian).walk().unwrap();

    std::assert_eq!(ifds[0].first_str(1), Some("N"));
}

#[test]
fn test_big_endian_fields() {
    let data = create_big_endian_tiff_buffer();
    let ifds = ClassicTiffIfdWalker::new(&data, ByteOrder::BigEndian).walk().unwrap();
    let ifd = &ifds[0];

    std::assert_eq!(ifd.first_value(274), Some(&TagValue::Short(6)));
    std::assert_eq!(ifd.first_value(282), Some(&TagValue::Rational(72.0)));
    std::assert_eq!(
        ifd.get_values(50000),
        Some(&[TagValue::SShort(-5), TagValue::SShort(7)][..])
    );
}

#[test]
fn test_sub_ifd_and_chain_cycles_terminate() {
    let data = create_sub_ifd_cycle_buffer();
    let ifds = ClassicTiffIfdWalker::new(&data, ByteOrder::LittleEndian).walk().unwrap();

    // IFD 0 plus its SubIFD, each decoded once
    std::assert_eq!(ifds.len(), 2);
    std::assert_eq!(ifds[0].offset, 8);
    std::assert_eq!(ifds[1].offset, 26);
    std::assert_eq!(ifds[1].number, 1);
}

#[test]
fn test_ifd_typed_sub_ifd_pointer_is_followed() {
    let mut data = create_sub_ifd_cycle_buffer();
    // Retype both SubIFD entries from LONG to IFD
    data[12] = 13;
    data[30] = 13;
    let ifds = ClassicTiffIfdWalker::new(&data, ByteOrder::LittleEndian).walk().unwrap();

    std::assert_eq!(ifds.len(), 2);
    std::assert_eq!(ifds[0].get_values(330), Some(&[TagValue::Long(26)][..]));
    std::assert_eq!(ifds[1].offset, 26);
}

#[test]
fn test_unknown_field_type_yields_empty_values() {
    let data = create_single_entry_tiff(50001, 6, 1, 0xFF);
    let ifds = ClassicTiffIfdWalker::new(&data, ByteOrder::LittleEndian).walk().unwrap();

    std::assert!(ifds[0].has_tag(50001));
    std::assert!(ifds[0].get_values(50001).unwrap().is_empty());
}

#[test]
fn test_out_of_bounds_offset_is_an_error() {
    let data = create_single_entry_tiff(271, 2, 32, 4096);
    let result = ClassicTiffIfdWalker::new(&data, ByteOrder::LittleEndian).walk();

    std::assert!(matches!(result, Err(MetadataError::OffsetOutOfBounds { offset: 4096, length: 32, .. })));
}

#[test]
fn test_entry_count_beyond_buffer_is_an_error() {
    let mut data = create_single_entry_tiff(256, 4, 1, 800);
    data[8] = 0xFF;
    data[9] = 0xFF;
    let result = ClassicTiffIfdWalker::new(&data, ByteOrder::LittleEndian).walk();

    std::assert!(matches!(result, Err(MetadataError::InvalidEntryCount { offset: 8, count: 0xFFFF })));
}

#[test]
fn test_first_ifd_beyond_buffer_is_an_error() {
    let mut data = create_single_entry_tiff(256, 4, 1, 800);
    data[4..8].copy_from_slice(&5000u32.to_le_bytes());
    std::assert!(ClassicTiffIfdWalker::new(&data, ByteOrder::LittleEndian).walk().is_err());
}

#[test]
fn test_walk_single_does_not_follow_chain() {
    let data = create_sub_ifd_cycle_buffer();
    let walker = ClassicTiffIfdWalker::new(&data, ByteOrder::LittleEndian);

    let ifds = walker.walk_single(26).unwrap();
    // The SubIFD at 26 points back to 8, which is decoded as its child
    std::assert_eq!(ifds.len(), 2);
    std::assert_eq!(ifds[0].offset, 26);
    std::assert_eq!(ifds[1].offset, 8);
}
