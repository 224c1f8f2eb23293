//! Minimal ZIP (KMZ) archive writing.
//!
//! KMZ is a plain ZIP container with `doc.kml` as its first entry. Entries
//! are deflate-compressed and carry correct CRCs; timestamps are pinned to
//! the DOS epoch so identical inputs produce identical archives.

use std::io::Write;
use std::path::Path;

const LOCAL_HEADER_SIG: u32 = 0x0403_4b50;
const CENTRAL_DIR_SIG: u32 = 0x0201_4b50;
const END_OF_CENTRAL_DIR_SIG: u32 = 0x0605_4b50;

/// Deflate (method 8) with a ZIP 2.0 feature level.
const METHOD_DEFLATE: u16 = 8;
const VERSION: u16 = 20;

/// Fixed DOS timestamp: 1980-01-01 00:00:00.
const DOS_TIME: u16 = 0;
const DOS_DATE: u16 = 0x0021;

struct EntryRecord {
    name: String,
    crc: u32,
    compressed_size: u32,
    uncompressed_size: u32,
    offset: u32,
}

/// Write a ZIP archive with the given entries, in order.
pub fn write_archive<P: AsRef<Path>>(path: P, entries: &[(&str, &[u8])]) -> std::io::Result<()> {
    let mut archive: Vec<u8> = Vec::new();
    let mut records = Vec::with_capacity(entries.len());

    for (name, data) in entries {
        let offset = archive.len() as u32;
        let crc = crc32fast::hash(data);

        let mut encoder =
            flate2::write::DeflateEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(data)?;
        let compressed = encoder.finish()?;

        put_u32(&mut archive, LOCAL_HEADER_SIG);
        put_u16(&mut archive, VERSION);
        put_u16(&mut archive, 0); // general purpose flags
        put_u16(&mut archive, METHOD_DEFLATE);
        put_u16(&mut archive, DOS_TIME);
        put_u16(&mut archive, DOS_DATE);
        put_u32(&mut archive, crc);
        put_u32(&mut archive, compressed.len() as u32);
        put_u32(&mut archive, data.len() as u32);
        put_u16(&mut archive, name.len() as u16);
        put_u16(&mut archive, 0); // extra field length
        archive.extend_from_slice(name.as_bytes());
        archive.extend_from_slice(&compressed);

        records.push(EntryRecord {
            name: name.to_string(),
            crc,
            compressed_size: compressed.len() as u32,
            uncompressed_size: data.len() as u32,
            offset,
        });
    }

    let central_dir_offset = archive.len() as u32;
    for record in &records {
        put_u32(&mut archive, CENTRAL_DIR_SIG);
        put_u16(&mut archive, VERSION); // version made by
        put_u16(&mut archive, VERSION); // version needed
        put_u16(&mut archive, 0); // general purpose flags
        put_u16(&mut archive, METHOD_DEFLATE);
        put_u16(&mut archive, DOS_TIME);
        put_u16(&mut archive, DOS_DATE);
        put_u32(&mut archive, record.crc);
        put_u32(&mut archive, record.compressed_size);
        put_u32(&mut archive, record.uncompressed_size);
        put_u16(&mut archive, record.name.len() as u16);
        put_u16(&mut archive, 0); // extra field length
        put_u16(&mut archive, 0); // comment length
        put_u16(&mut archive, 0); // disk number
        put_u16(&mut archive, 0); // internal attributes
        put_u32(&mut archive, 0); // external attributes
        put_u32(&mut archive, record.offset);
        archive.extend_from_slice(record.name.as_bytes());
    }
    let central_dir_size = archive.len() as u32 - central_dir_offset;

    put_u32(&mut archive, END_OF_CENTRAL_DIR_SIG);
    put_u16(&mut archive, 0); // this disk
    put_u16(&mut archive, 0); // central dir disk
    put_u16(&mut archive, records.len() as u16);
    put_u16(&mut archive, records.len() as u16);
    put_u32(&mut archive, central_dir_size);
    put_u32(&mut archive, central_dir_offset);
    put_u16(&mut archive, 0); // comment length

    std::fs::write(path, archive)
}

fn put_u16(buf: &mut Vec<u8>, v: u16) {
    buf.extend_from_slice(&v.to_le_bytes());
}

fn put_u32(buf: &mut Vec<u8>, v: u32) {
    buf.extend_from_slice(&v.to_le_bytes());
}
