//! Synthetic TIFF, BigTIFF and JPEG buffers for integration tests

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Endian {
    Little,
    Big,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Flavour {
    Classic,
    BigTiff,
}

impl Flavour {
    fn header_size(self) -> u64 {
        match self {
            Flavour::Classic => 8,
            Flavour::BigTiff => 16,
        }
    }

    fn count_size(self) -> u64 {
        match self {
            Flavour::Classic => 2,
            Flavour::BigTiff => 8,
        }
    }

    fn entry_size(self) -> u64 {
        match self {
            Flavour::Classic => 12,
            Flavour::BigTiff => 20,
        }
    }

    /// Inline slot, next-IFD pointer and offset width
    fn word_size(self) -> u64 {
        match self {
            Flavour::Classic => 4,
            Flavour::BigTiff => 8,
        }
    }
}

/// One field of a test IFD
pub enum Field {
    Ascii(&'static str),
    Shorts(Vec<u16>),
    Longs(Vec<u32>),
    Rationals(Vec<(u32, u32)>),
    /// Offset of another IFD of the same file, by index
    IfdPointer(usize),
    /// Same as `IfdPointer`, but written with the IFD field type (13)
    IfdTypedPointer(usize),
    /// Out-of-line field whose offset points wherever the test wants
    Dangling { field_type: u16, count: u64, offset: u64 },
}

/// Little helper writing words in the file's byte order
struct Out {
    buf: Vec<u8>,
    endian: Endian,
}

impl Out {
    fn u16(&mut self, v: u16) {
        match self.endian {
            Endian::Little => self.buf.write_u16::<LittleEndian>(v).unwrap(),
            Endian::Big => self.buf.write_u16::<BigEndian>(v).unwrap(),
        }
    }

    fn u32(&mut self, v: u32) {
        match self.endian {
            Endian::Little => self.buf.write_u32::<LittleEndian>(v).unwrap(),
            Endian::Big => self.buf.write_u32::<BigEndian>(v).unwrap(),
        }
    }

    fn u64(&mut self, v: u64) {
        match self.endian {
            Endian::Little => self.buf.write_u64::<LittleEndian>(v).unwrap(),
            Endian::Big => self.buf.write_u64::<BigEndian>(v).unwrap(),
        }
    }

    fn word(&mut self, flavour: Flavour, v: u64) {
        match flavour {
            Flavour::Classic => self.u32(v as u32),
            Flavour::BigTiff => self.u64(v),
        }
    }
}

/// Builds a TIFF or BigTIFF file from a list of IFDs
///
/// IFDs are laid out in order after the header, each followed by its
/// out-of-line data. IFD 0 is the first IFD of the header.
pub struct TiffBuilder {
    endian: Endian,
    flavour: Flavour,
    ifds: Vec<Vec<(u16, Field)>>,
    next: Vec<Option<usize>>,
}

impl TiffBuilder {
    pub fn new(endian: Endian, flavour: Flavour) -> Self {
        TiffBuilder {
            endian,
            flavour,
            ifds: Vec::new(),
            next: Vec::new(),
        }
    }

    /// Adds an IFD, returning its index
    pub fn ifd(&mut self, entries: Vec<(u16, Field)>) -> usize {
        self.ifds.push(entries);
        self.next.push(None);
        self.ifds.len() - 1
    }

    /// Makes `to` the next IFD of `from`
    pub fn link(&mut self, from: usize, to: usize) -> &mut Self {
        self.next[from] = Some(to);
        self
    }

    /// Field type, count and encoded size of a field
    fn layout(&self, field: &Field) -> (u16, u64, u64) {
        match field {
            Field::Ascii(s) => (2, s.len() as u64 + 1, s.len() as u64 + 1),
            Field::Shorts(v) => (3, v.len() as u64, v.len() as u64 * 2),
            Field::Longs(v) => (4, v.len() as u64, v.len() as u64 * 4),
            Field::Rationals(v) => (5, v.len() as u64, v.len() as u64 * 8),
            Field::IfdPointer(_) => match self.flavour {
                Flavour::Classic => (4, 1, 4),
                Flavour::BigTiff => (16, 1, 8),
            },
            Field::IfdTypedPointer(_) => (13, 1, self.flavour.word_size()),
            Field::Dangling { field_type, count, .. } => (*field_type, *count, 0),
        }
    }

    fn is_out_of_line(&self, field: &Field) -> bool {
        let (_, _, len) = self.layout(field);
        len > self.flavour.word_size()
    }

    fn ifd_size(&self, entries: &[(u16, Field)]) -> u64 {
        let table = self.flavour.count_size()
            + entries.len() as u64 * self.flavour.entry_size()
            + self.flavour.word_size();
        let data: u64 = entries
            .iter()
            .filter(|(_, field)| self.is_out_of_line(field))
            .map(|(_, field)| padded(self.layout(field).2))
            .sum();
        table + data
    }

    fn encode(&self, field: &Field, offsets: &[u64]) -> Vec<u8> {
        let mut out = Out { buf: Vec::new(), endian: self.endian };
        match field {
            Field::Ascii(s) => {
                out.buf.extend_from_slice(s.as_bytes());
                out.buf.push(0);
            }
            Field::Shorts(values) => values.iter().for_each(|v| out.u16(*v)),
            Field::Longs(values) => values.iter().for_each(|v| out.u32(*v)),
            Field::Rationals(values) => values.iter().for_each(|(num, den)| {
                out.u32(*num);
                out.u32(*den);
            }),
            Field::IfdPointer(index) | Field::IfdTypedPointer(index) => {
                out.word(self.flavour, offsets[*index])
            }
            Field::Dangling { .. } => {}
        }
        out.buf
    }

    pub fn build(&self) -> Vec<u8> {
        let flavour = self.flavour;

        let mut offsets = Vec::with_capacity(self.ifds.len());
        let mut cursor = flavour.header_size();
        for entries in &self.ifds {
            offsets.push(cursor);
            cursor += self.ifd_size(entries);
        }

        let mut out = Out { buf: Vec::new(), endian: self.endian };
        match self.endian {
            Endian::Little => out.buf.extend_from_slice(b"II"),
            Endian::Big => out.buf.extend_from_slice(b"MM"),
        }
        match flavour {
            Flavour::Classic => {
                out.u16(42);
                out.u32(offsets.first().copied().unwrap_or(0) as u32);
            }
            Flavour::BigTiff => {
                out.u16(43);
                out.u16(8);
                out.u16(0);
                out.u64(offsets.first().copied().unwrap_or(0));
            }
        }

        for (index, entries) in self.ifds.iter().enumerate() {
            assert_eq!(out.buf.len() as u64, offsets[index]);

            let mut data_cursor = offsets[index]
                + flavour.count_size()
                + entries.len() as u64 * flavour.entry_size()
                + flavour.word_size();
            let mut data = Vec::new();

            match flavour {
                Flavour::Classic => out.u16(entries.len() as u16),
                Flavour::BigTiff => out.u64(entries.len() as u64),
            }

            for (tag, field) in entries {
                let (field_type, count, _) = self.layout(field);
                out.u16(*tag);
                out.u16(field_type);
                out.word(flavour, count);

                if let Field::Dangling { offset, .. } = field {
                    out.word(flavour, *offset);
                    continue;
                }

                let mut bytes = self.encode(field, &offsets);
                if self.is_out_of_line(field) {
                    out.word(flavour, data_cursor);
                    let len = padded(bytes.len() as u64);
                    bytes.resize(len as usize, 0);
                    data_cursor += len;
                    data.extend_from_slice(&bytes);
                } else {
                    bytes.resize(flavour.word_size() as usize, 0);
                    out.buf.extend_from_slice(&bytes);
                }
            }

            let next = self.next[index].map(|i| offsets[i]).unwrap_or(0);
            out.word(flavour, next);
            out.buf.extend_from_slice(&data);
        }

        out.buf
    }
}

fn padded(len: u64) -> u64 {
    len + len % 2
}

/// GPS IFD entries for a DMS position
pub fn gps_fields(
    lat_ref: &'static str,
    lat: (u32, u32, u32),
    lon_ref: &'static str,
    lon: (u32, u32, u32),
) -> Vec<(u16, Field)> {
    vec![
        (1, Field::Ascii(lat_ref)),
        (2, Field::Rationals(vec![(lat.0, 1), (lat.1, 1), (lat.2, 1)])),
        (3, Field::Ascii(lon_ref)),
        (4, Field::Rationals(vec![(lon.0, 1), (lon.1, 1), (lon.2, 1)])),
    ]
}

/// Wraps an EXIF TIFF block and an XMP packet into a minimal JPEG
pub fn build_jpeg(exif_tiff: Option<&[u8]>, xmp: Option<&str>) -> Vec<u8> {
    let mut jpeg = vec![0xFF, 0xD8];

    if let Some(tiff) = exif_tiff {
        jpeg.extend_from_slice(&[0xFF, 0xE1]);
        jpeg.write_u16::<BigEndian>((2 + 6 + tiff.len()) as u16).unwrap();
        jpeg.extend_from_slice(b"Exif\0\0");
        jpeg.extend_from_slice(tiff);
    }

    if let Some(xmp) = xmp {
        let namespace = b"http://ns.adobe.com/xap/1.0/\0";
        jpeg.extend_from_slice(&[0xFF, 0xE1]);
        jpeg.write_u16::<BigEndian>((2 + namespace.len() + xmp.len()) as u16).unwrap();
        jpeg.extend_from_slice(namespace);
        jpeg.extend_from_slice(xmp.as_bytes());
    }

    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}

/// DJI-style XMP packet carrying a gimbal pitch attribute
pub fn dji_xmp(pitch: &str) -> String {
    format!(
        r#"<?xpacket begin="" id="W5M0MpCehiHzreSzNTczkc9d"?>
<x:xmpmeta xmlns:x="adobe:ns:meta/">
 <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
  <rdf:Description rdf:about="DJI Meta Data"
    xmlns:drone-dji="http://www.dji.com/drone-dji/1.0/"
    drone-dji:GimbalPitchDegree="{}"
    drone-dji:GimbalYawDegree="+0.00">
  </rdf:Description>
 </rdf:RDF>
</x:xmpmeta>
<?xpacket end="w"?>"#,
        pitch
    )
}

/// Writes `contents` to a fresh file in a per-test temporary directory
pub fn write_temp_file(test: &str, name: &str, contents: &[u8]) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("aerotag-{}-{}", test, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-9, "{} != {}", actual, expected);
}
