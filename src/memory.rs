// memory.rs -- Byte-addressed memory images
// Copyright (C) 2015 Alex Iadicicco

//! Anything that can hand out bytes by address can be disassembled. RX code is
//! byte addressed, so memory here is a plain byte map with a base address.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ImageError {
    #[error("invalid hex digit {0:?} at offset {1}")]
    BadDigit(char, usize),
    #[error("odd number of hex digits")]
    OddLength,
    #[error("image is empty")]
    Empty,
}

/// A trait representing a memory layout
pub trait Memory {
    fn read8(&self, addr: u32) -> Option<u8>;

    fn contains(&self, addr: u32) -> bool {
        self.read8(addr).is_some()
    }
}

impl<'a> Memory for &'a [u8] {
    fn read8(&self, addr: u32) -> Option<u8> {
        self.get(addr as usize).copied()
    }
}

impl Memory for Vec<u8> {
    fn read8(&self, addr: u32) -> Option<u8> {
        self.get(addr as usize).copied()
    }
}

/// A run of bytes loaded at some address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    pub base: u32,
    pub bytes: Vec<u8>,
}

impl Image {
    pub fn new(base: u32, bytes: Vec<u8>) -> Image {
        Image { base: base, bytes: bytes }
    }

    /// Parses hex text. Whitespace, commas and `0x` prefixes between bytes
    /// are ignored, so both `"fb 12 00"` and `"fb1200"` work.
    pub fn from_hex(base: u32, text: &str) -> Result<Image, ImageError> {
        let mut digits = Vec::new();

        for word in text.split(|c: char| c.is_whitespace() || c == ',') {
            let word = word.strip_prefix("0x").unwrap_or(word);
            for ch in word.chars() {
                match ch.to_digit(16) {
                    Some(d) => digits.push(d as u8),
                    None => return Err(ImageError::BadDigit(ch, digits.len() / 2)),
                }
            }
            if word.len() % 2 != 0 {
                return Err(ImageError::OddLength);
            }
        }

        if digits.is_empty() {
            return Err(ImageError::Empty);
        }

        let bytes = digits.chunks(2).map(|p| (p[0] << 4) | p[1]).collect();
        Ok(Image::new(base, bytes))
    }

    pub fn end(&self) -> u32 {
        self.base.wrapping_add(self.bytes.len() as u32)
    }
}

impl Memory for Image {
    fn read8(&self, addr: u32) -> Option<u8> {
        let off = addr.wrapping_sub(self.base) as usize;
        if addr < self.base { None } else { self.bytes.get(off).copied() }
    }
}

#[test]
fn test_slice_memory() {
    let rom: &[u8] = &[0x02, 0x03];
    assert_eq!(rom.read8(1), Some(0x03));
    assert_eq!(rom.read8(2), None);
}

#[test]
fn test_image_bounds() {
    let img = Image::new(0xfff0_0000, vec![1, 2, 3]);
    assert_eq!(img.read8(0xfff0_0000), Some(1));
    assert_eq!(img.read8(0xfff0_0002), Some(3));
    assert_eq!(img.read8(0xfff0_0003), None);
    assert_eq!(img.read8(0xffef_ffff), None);
    assert!(img.contains(0xfff0_0001));
    assert_eq!(img.end(), 0xfff0_0003);
}

#[test]
fn test_from_hex() {
    let img = Image::from_hex(0, "fb 12 00 0x01").unwrap();
    assert_eq!(img.bytes, vec![0xfb, 0x12, 0x00, 0x01]);

    let img = Image::from_hex(0x100, "0412\n3456").unwrap();
    assert_eq!(img.base, 0x100);
    assert_eq!(img.bytes, vec![0x04, 0x12, 0x34, 0x56]);

    assert_eq!(Image::from_hex(0, "0g"), Err(ImageError::BadDigit('g', 0)));
    assert_eq!(Image::from_hex(0, "123"), Err(ImageError::OddLength));
    assert_eq!(Image::from_hex(0, "  "), Err(ImageError::Empty));
}
