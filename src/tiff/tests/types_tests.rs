//! Tests for the TIFF types module

extern crate std;

use crate::io::byte_order::ByteOrder;
use crate::tiff::types::{TagValue, TIFF};
use crate::tiff::ifd::{IFD, IFDEntry};

#[test]
fn test_tiff_creation() {
    let tiff = TIFF::new(false, ByteOrder::LittleEndian);
    std::assert!(!tiff.is_big_tiff);
    std::assert_eq!(tiff.ifd_count(), 0);
    std::assert!(tiff.main_ifd().is_none());
}

#[test]
fn test_tiff_with_ifds() {
    let mut tiff = TIFF::new(true, ByteOrder::BigEndian);

    let mut main_ifd = IFD::new(0, 16);
    main_ifd.add_entry(IFDEntry::new(256, 4, 1, 1024, 36), vec![TagValue::Long(1024)]);
    main_ifd.add_entry(IFDEntry::new(271, 2, 5, 200, 56), vec![TagValue::Ascii("FLIR".into())]);
    tiff.ifds.push(main_ifd);
    tiff.ifds.push(IFD::new(1, 100));

    std::assert!(tiff.is_big_tiff);
    std::assert_eq!(tiff.ifd_count(), 2);

    let main = tiff.main_ifd().unwrap();
    std::assert_eq!(main.entry_count(), 2);
    std::assert!(main.has_tag(271));
    std::assert!(!main.has_tag(34737));
    std::assert_eq!(main.first_str(271), Some("FLIR"));
    std::assert_eq!(main.first_offset(256), Some(1024));
    std::assert_eq!(main.get_entry(271).map(|e| e.count), Some(5));
    std::assert!(tiff.ifds[1].is_empty());

    let summary = tiff.to_string();
    std::assert!(summary.contains("BigTIFF"));
    std::assert!(summary.contains("Make"));
}

#[test]
fn test_inline_rule_follows_slot_size() {
    // Two LONGs: 8 bytes
    let entry = IFDEntry::new(273, 4, 2, 500, 36);
    std::assert!(!entry.is_value_inline(4));
    std::assert!(entry.is_value_inline(8));
    std::assert_eq!(entry.data_position(4), 500);
    std::assert_eq!(entry.data_position(8), 36);

    // One RATIONAL is 8 bytes too, so BigTIFF keeps it inline
    let rational = IFDEntry::new(282, 5, 1, 0, 36);
    std::assert!(rational.is_value_inline(8));
    std::assert!(!rational.is_value_inline(4));

    // Unknown types have no size and never count as inline
    let unknown = IFDEntry::new(1, 99, 1, 0, 36);
    std::assert_eq!(unknown.byte_len(), None);
    std::assert!(!unknown.is_value_inline(8));
}

#[test]
fn test_tag_value_conversions() {
    std::assert_eq!(TagValue::Short(7).as_u64(), Some(7));
    std::assert_eq!(TagValue::Long8(1 << 40).as_u64(), Some(1 << 40));
    std::assert_eq!(TagValue::SLong(-1).as_u64(), None);
    std::assert_eq!(TagValue::Rational(2.5).as_u64(), None);

    std::assert_eq!(TagValue::SRational(-0.5).as_f64(), Some(-0.5));
    std::assert_eq!(TagValue::Float(1.5).as_f64(), Some(1.5));
    std::assert_eq!(TagValue::Ascii("N".into()).as_f64(), None);
    std::assert_eq!(TagValue::Ascii("N".into()).as_str(), Some("N"));
    std::assert_eq!(TagValue::Byte(1).as_str(), None);
}
