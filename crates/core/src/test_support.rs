use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone};
use filetime::FileTime;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::fs;
use std::io::Cursor;
use std::path::Path;

pub(crate) fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .and_then(|date| date.and_hms_opt(h, mi, s))
        .expect("valid date")
}

pub(crate) fn set_modified(path: &Path, at: NaiveDateTime) {
    let at = Local
        .from_local_datetime(&at)
        .single()
        .expect("unambiguous local time");
    filetime::set_file_mtime(path, FileTime::from_unix_time(at.timestamp(), 0))
        .expect("set mtime");
}

fn encode(format: ImageFormat) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, Rgb([200, 120, 40])));
    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), format)
        .expect("encode image");
    out
}

pub(crate) fn write_jpeg(path: &Path) {
    fs::write(path, encode(ImageFormat::Jpeg)).expect("write jpeg");
}

pub(crate) fn write_png(path: &Path) {
    fs::write(path, encode(ImageFormat::Png)).expect("write png");
}

/// JPEG whose APP1 segment carries a single `DateTimeOriginal` entry.
pub(crate) fn write_jpeg_with_date_taken(path: &Path, date: &str) {
    let jpeg = encode(ImageFormat::Jpeg);
    let app1 = exif_app1(date);

    let mut out = Vec::with_capacity(jpeg.len() + app1.len());
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&app1);
    out.extend_from_slice(&jpeg[2..]);
    fs::write(path, out).expect("write jpeg");
}

fn exif_app1(date: &str) -> Vec<u8> {
    let mut value = date.as_bytes().to_vec();
    value.push(0);
    assert!(value.len() > 4, "value must not fit inline in the IFD entry");

    // Little-endian TIFF: header, IFD0 at 8, Exif IFD at 26, value at 44.
    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II");
    tiff.extend_from_slice(&42u16.to_le_bytes());
    tiff.extend_from_slice(&8u32.to_le_bytes());

    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend_from_slice(&0x8769u16.to_le_bytes());
    tiff.extend_from_slice(&4u16.to_le_bytes());
    tiff.extend_from_slice(&1u32.to_le_bytes());
    tiff.extend_from_slice(&26u32.to_le_bytes());
    tiff.extend_from_slice(&0u32.to_le_bytes());

    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend_from_slice(&0x9003u16.to_le_bytes());
    tiff.extend_from_slice(&2u16.to_le_bytes());
    tiff.extend_from_slice(&(value.len() as u32).to_le_bytes());
    tiff.extend_from_slice(&44u32.to_le_bytes());
    tiff.extend_from_slice(&0u32.to_le_bytes());

    assert_eq!(tiff.len(), 44);
    tiff.extend_from_slice(&value);

    let mut segment = vec![0xFF, 0xE1];
    let len = (2 + 6 + tiff.len()) as u16;
    segment.extend_from_slice(&len.to_be_bytes());
    segment.extend_from_slice(b"Exif\0\0");
    segment.extend_from_slice(&tiff);
    segment
}
