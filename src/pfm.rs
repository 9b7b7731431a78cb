//! Portable Float Map (PFM) decoding and encoding.
//!
//! Layout
//! - Three newline-terminated ASCII header lines: the magic token (`PF` for
//!   3-channel color, `Pf` for grayscale), `width height`, and a signed scale.
//! - The sign of the scale selects the byte order of the payload: negative
//!   means little-endian, anything else big-endian. Only the magnitude is kept.
//! - `width * height * channels` 32-bit floats follow, row-major, with the
//!   bottom scanline first.
//!
//! The decoder flips the payload so row 0 is the top scanline, matching the
//! row order of the companion color image. Callers never flip again. The
//! encoder writes the inverse layout so a decode/encode pair is lossless.
//!
//! Decoding is strict: a short payload and trailing bytes are both errors.
use crate::depth::DepthMap;
use crate::error::{DecodeError, Error, Result};
use crate::image::f32::flip_rows;
use crate::image::ImageF32;
use log::debug;
use serde::Serialize;
use std::fs;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

/// Header lines longer than this are treated as malformed.
const MAX_HEADER_LINE: u64 = 256;
/// Upper bound on the payload buffer reserved before any byte is read.
const INITIAL_PAYLOAD_CAPACITY: usize = 1 << 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Endianness {
    Little,
    Big,
}

impl Endianness {
    /// Byte order implied by a signed PFM scale token.
    pub fn from_scale(scale: f32) -> Self {
        if scale < 0.0 {
            Endianness::Little
        } else {
            Endianness::Big
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PfmChannels {
    Gray,
    Color,
}

impl PfmChannels {
    pub fn count(self) -> usize {
        match self {
            PfmChannels::Gray => 1,
            PfmChannels::Color => 3,
        }
    }

    fn magic(self) -> &'static str {
        match self {
            PfmChannels::Gray => "Pf",
            PfmChannels::Color => "PF",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PfmHeader {
    pub channels: PfmChannels,
    pub width: usize,
    pub height: usize,
    /// Magnitude of the stored scale token.
    pub scale: f32,
    pub endianness: Endianness,
}

impl PfmHeader {
    /// Number of payload bytes the header announces.
    pub fn payload_len(&self) -> Option<usize> {
        self.width
            .checked_mul(self.height)?
            .checked_mul(self.channels.count())?
            .checked_mul(4)
    }

    fn signed_scale(&self) -> f32 {
        match self.endianness {
            Endianness::Little => -self.scale,
            Endianness::Big => self.scale,
        }
    }
}

/// Decoded PFM contents with rows stored top-down and channels interleaved.
#[derive(Clone, Debug, PartialEq)]
pub struct PfmImage {
    pub header: PfmHeader,
    pub data: Vec<f32>,
}

impl PfmImage {
    /// Value of `channel` at (x, y), `None` when out of bounds.
    pub fn get(&self, x: usize, y: usize, channel: usize) -> Option<f32> {
        let c = self.header.channels.count();
        if x >= self.header.width || y >= self.header.height || channel >= c {
            return None;
        }
        self.data.get((y * self.header.width + x) * c + channel).copied()
    }

    /// Reduce to a scalar depth map. Color maps keep their first channel.
    pub fn into_depth_map(self) -> DepthMap {
        let PfmHeader {
            channels,
            width,
            height,
            scale,
            endianness,
        } = self.header;
        let data = match channels {
            PfmChannels::Gray => self.data,
            PfmChannels::Color => {
                debug!("reducing {width}x{height} color PFM to its first channel");
                self.data.chunks_exact(3).map(|px| px[0]).collect()
            }
        };
        let grid = ImageF32 {
            w: width,
            h: height,
            data,
        };
        DepthMap::new(grid, scale, endianness)
    }

    /// Serialize back to PFM bytes (bottom scanline first).
    pub fn to_bytes(&self) -> Vec<u8> {
        let h = &self.header;
        let mut out = format!(
            "{}\n{} {}\n{}\n",
            h.channels.magic(),
            h.width,
            h.height,
            h.signed_scale()
        )
        .into_bytes();
        let row_len = h.width * h.channels.count();
        let mut rows = self.data.clone();
        flip_rows(&mut rows, row_len);
        out.reserve(rows.len() * 4);
        for v in rows {
            let bytes = match h.endianness {
                Endianness::Little => v.to_le_bytes(),
                Endianness::Big => v.to_be_bytes(),
            };
            out.extend_from_slice(&bytes);
        }
        out
    }
}

/// Encode a scalar grid (top row first) as a grayscale PFM.
///
/// `scale` must be positive and finite; its sign in the file is derived from
/// `endianness`.
pub fn encode_pfm(grid: &ImageF32, scale: f32, endianness: Endianness) -> Result<Vec<u8>> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(Error::InvalidParameter(format!(
            "PFM scale must be positive and finite, got {scale}"
        )));
    }
    if grid.w == 0 || grid.h == 0 {
        return Err(Error::InvalidParameter(format!(
            "cannot encode an empty {}x{} grid",
            grid.w, grid.h
        )));
    }
    let image = PfmImage {
        header: PfmHeader {
            channels: PfmChannels::Gray,
            width: grid.w,
            height: grid.h,
            scale,
            endianness,
        },
        data: grid.data.clone(),
    };
    Ok(image.to_bytes())
}

/// Encode and write a grayscale PFM to `path`.
pub fn write_pfm(path: &Path, grid: &ImageF32, scale: f32, endianness: Endianness) -> Result<()> {
    let bytes = encode_pfm(grid, scale, endianness)?;
    crate::image::io::ensure_parent_dir(path)?;
    fs::write(path, bytes).map_err(|e| Error::io(path, e))
}

/// Parse the three header lines, leaving `reader` at the first payload byte.
pub fn read_header<R: BufRead>(reader: &mut R) -> std::result::Result<PfmHeader, DecodeError> {
    let magic = match read_header_line(reader, 1)? {
        Some(line) => line,
        None => return Err(DecodeError::MissingMagic),
    };
    let channels = match magic.trim_end() {
        "" => return Err(DecodeError::MissingMagic),
        "PF" => PfmChannels::Color,
        "Pf" => PfmChannels::Gray,
        other => return Err(DecodeError::InvalidMagic(other.to_string())),
    };

    let dims = read_header_line(reader, 2)?.ok_or(DecodeError::MalformedHeader { line: 2 })?;
    let (width, height) = parse_dimensions(dims.trim())?;

    let scale_line =
        read_header_line(reader, 3)?.ok_or(DecodeError::MalformedHeader { line: 3 })?;
    let token = scale_line.trim();
    let scale: f32 = token
        .parse()
        .ok()
        .filter(|s: &f32| s.is_finite())
        .ok_or_else(|| DecodeError::InvalidScale(token.to_string()))?;

    let header = PfmHeader {
        channels,
        width,
        height,
        scale: scale.abs(),
        endianness: Endianness::from_scale(scale),
    };
    if header.payload_len().is_none() {
        return Err(DecodeError::InvalidDimensions(dims.trim().to_string()));
    }
    Ok(header)
}

/// Decode a complete PFM stream.
pub fn decode_pfm<R: BufRead>(mut reader: R) -> std::result::Result<PfmImage, DecodeError> {
    let header = read_header(&mut reader)?;
    let expected = header
        .payload_len()
        .ok_or_else(|| DecodeError::InvalidDimensions(format!("{} {}", header.width, header.height)))?;

    // Header sizes are untrusted; the buffer grows only as bytes arrive.
    let mut payload = Vec::with_capacity(expected.min(INITIAL_PAYLOAD_CAPACITY));
    reader.by_ref().take(expected as u64).read_to_end(&mut payload)?;
    if payload.len() < expected {
        return Err(DecodeError::TruncatedPayload {
            expected,
            actual: payload.len(),
        });
    }
    let extra = io::copy(&mut reader, &mut io::sink())?;
    if extra > 0 {
        return Err(DecodeError::TrailingData {
            extra: extra as usize,
        });
    }

    let mut data: Vec<f32> = payload
        .chunks_exact(4)
        .map(|b| {
            let bytes = [b[0], b[1], b[2], b[3]];
            match header.endianness {
                Endianness::Little => f32::from_le_bytes(bytes),
                Endianness::Big => f32::from_be_bytes(bytes),
            }
        })
        .collect();
    flip_rows(&mut data, header.width * header.channels.count());

    debug!(
        "decoded PFM {}x{} channels={} scale={} endianness={:?}",
        header.width,
        header.height,
        header.channels.count(),
        header.scale,
        header.endianness
    );
    Ok(PfmImage { header, data })
}

pub fn decode_pfm_bytes(bytes: &[u8]) -> std::result::Result<PfmImage, DecodeError> {
    decode_pfm(bytes)
}

/// Read and decode a PFM file.
pub fn read_pfm(path: &Path) -> Result<PfmImage> {
    let file = fs::File::open(path).map_err(|e| Error::io(path, e))?;
    Ok(decode_pfm(BufReader::new(file))?)
}

/// Read a PFM file straight into a scalar depth map.
pub fn load_depth_map(path: &Path) -> Result<DepthMap> {
    Ok(read_pfm(path)?.into_depth_map())
}

/// Read one header line as Latin-1 text. `Ok(None)` means clean EOF before
/// any byte; a line without a terminating newline is malformed.
fn read_header_line<R: BufRead>(
    reader: &mut R,
    line: usize,
) -> std::result::Result<Option<String>, DecodeError> {
    let mut buf = Vec::new();
    reader.by_ref().take(MAX_HEADER_LINE).read_until(b'\n', &mut buf)?;
    if buf.is_empty() {
        return Ok(None);
    }
    if buf.pop() != Some(b'\n') {
        return Err(DecodeError::MalformedHeader { line });
    }
    Ok(Some(buf.iter().map(|&b| b as char).collect()))
}

fn parse_dimensions(text: &str) -> std::result::Result<(usize, usize), DecodeError> {
    let invalid = || DecodeError::InvalidDimensions(text.to_string());
    let mut parts = text.split_whitespace();
    let (Some(w), Some(h), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };
    let width: usize = w.parse().map_err(|_| invalid())?;
    let height: usize = h.parse().map_err(|_| invalid())?;
    if width == 0 || height == 0 {
        return Err(invalid());
    }
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_pfm(header: &str, values: &[f32], endianness: Endianness) -> Vec<u8> {
        let mut out = header.as_bytes().to_vec();
        for v in values {
            match endianness {
                Endianness::Little => out.extend_from_slice(&v.to_le_bytes()),
                Endianness::Big => out.extend_from_slice(&v.to_be_bytes()),
            }
        }
        out
    }

    #[test]
    fn little_endian_grayscale_is_flipped_to_top_down() {
        // File order: bottom row [3, 4] first, then top row [1, 2].
        let bytes = raw_pfm("Pf\n2 2\n-1.0\n", &[3.0, 4.0, 1.0, 2.0], Endianness::Little);
        let img = decode_pfm_bytes(&bytes).unwrap();
        assert_eq!(img.header.channels, PfmChannels::Gray);
        assert_eq!(img.header.endianness, Endianness::Little);
        assert_eq!(img.header.scale, 1.0);
        assert_eq!(img.data, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn positive_scale_selects_big_endian() {
        let bytes = raw_pfm("Pf\n3 1\n2.5\n", &[0.25, 0.5, 0.75], Endianness::Big);
        let img = decode_pfm_bytes(&bytes).unwrap();
        assert_eq!(img.header.endianness, Endianness::Big);
        assert_eq!(img.header.scale, 2.5);
        assert_eq!(img.data, vec![0.25, 0.5, 0.75]);
    }

    #[test]
    fn color_map_keeps_three_channels_and_reduces_to_first() {
        let values = [
            0.5, 0.0, 0.0, 0.6, 0.0, 0.0, // bottom row
            0.1, 9.0, 9.0, 0.2, 9.0, 9.0, // top row
        ];
        let bytes = raw_pfm("PF\n2 2\n-1\n", &values, Endianness::Little);
        let img = decode_pfm_bytes(&bytes).unwrap();
        assert_eq!(img.header.channels, PfmChannels::Color);
        assert_eq!(img.get(1, 0, 1), Some(9.0));
        assert_eq!(img.get(2, 0, 0), None);
        assert_eq!(img.get(0, 2, 0), None);
        assert_eq!(img.get(0, 0, 3), None);
        let depth = img.into_depth_map();
        assert_eq!(depth.grid().data, vec![0.1, 0.2, 0.5, 0.6]);
    }

    #[test]
    fn windows_line_endings_are_accepted() {
        let bytes = raw_pfm("Pf\r\n1 1\r\n-1.0\r\n", &[0.5], Endianness::Little);
        assert_eq!(decode_pfm_bytes(&bytes).unwrap().data, vec![0.5]);
    }

    #[test]
    fn empty_input_is_missing_magic() {
        assert!(matches!(
            decode_pfm_bytes(b""),
            Err(DecodeError::MissingMagic)
        ));
        assert!(matches!(
            decode_pfm_bytes(b"\n2 2\n-1\n"),
            Err(DecodeError::MissingMagic)
        ));
    }

    #[test]
    fn header_without_magic_fails_before_payload() {
        let bytes = raw_pfm("2 2\n-1.0\n", &[0.0; 4], Endianness::Little);
        match decode_pfm_bytes(&bytes) {
            Err(DecodeError::InvalidMagic(token)) => assert_eq!(token, "2 2"),
            other => panic!("expected InvalidMagic, got {other:?}"),
        }
    }

    #[test]
    fn unknown_magic_is_rejected() {
        assert!(matches!(
            decode_pfm_bytes(b"P6\n1 1\n-1\n\0\0\0\0"),
            Err(DecodeError::InvalidMagic(_))
        ));
    }

    #[test]
    fn bad_dimensions_are_rejected() {
        for dims in ["0 2", "2 -1", "two 2", "2", "2 2 2"] {
            let header = format!("Pf\n{dims}\n-1\n");
            assert!(
                matches!(
                    decode_pfm_bytes(header.as_bytes()),
                    Err(DecodeError::InvalidDimensions(_))
                ),
                "dims {dims:?} should be rejected"
            );
        }
    }

    #[test]
    fn bad_scale_is_rejected() {
        for scale in ["abc", "", "inf", "NaN"] {
            let header = format!("Pf\n1 1\n{scale}\n");
            assert!(
                matches!(
                    decode_pfm_bytes(header.as_bytes()),
                    Err(DecodeError::InvalidScale(_))
                ),
                "scale {scale:?} should be rejected"
            );
        }
    }

    #[test]
    fn unterminated_header_is_malformed() {
        assert!(matches!(
            decode_pfm_bytes(b"Pf\n2 2"),
            Err(DecodeError::MalformedHeader { line: 2 })
        ));
        assert!(matches!(
            decode_pfm_bytes(b"Pf\n2 2\n"),
            Err(DecodeError::MalformedHeader { line: 3 })
        ));
    }

    #[test]
    fn short_payload_is_truncated() {
        let bytes = raw_pfm("Pf\n2 2\n-1\n", &[0.0; 3], Endianness::Little);
        match decode_pfm_bytes(&bytes) {
            Err(DecodeError::TruncatedPayload { expected, actual }) => {
                assert_eq!((expected, actual), (16, 12));
            }
            other => panic!("expected TruncatedPayload, got {other:?}"),
        }
    }

    #[test]
    fn oversized_header_without_payload_is_truncated() {
        match decode_pfm_bytes(b"Pf\n1000000000 1000000000\n-1\n") {
            Err(DecodeError::TruncatedPayload { expected, actual }) => {
                assert_eq!(actual, 0);
                assert_eq!(expected as u64, 4_000_000_000_000_000_000);
            }
            other => panic!("expected TruncatedPayload, got {other:?}"),
        }
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let mut bytes = raw_pfm("Pf\n1 1\n-1\n", &[0.0], Endianness::Little);
        bytes.extend_from_slice(&[1, 2]);
        assert!(matches!(
            decode_pfm_bytes(&bytes),
            Err(DecodeError::TrailingData { extra: 2 })
        ));
    }

    #[test]
    fn encoder_writes_signed_scale_and_bottom_row_first() {
        let grid = ImageF32::from_rows(&[[1.0f32], [2.0]]).unwrap();
        let bytes = encode_pfm(&grid, 1.0, Endianness::Little).unwrap();
        let header_len = "Pf\n1 2\n-1\n".len();
        assert_eq!(&bytes[..header_len], b"Pf\n1 2\n-1\n");
        assert_eq!(&bytes[header_len..header_len + 4], &2.0f32.to_le_bytes());
    }

    #[test]
    fn encoder_rejects_non_positive_scale() {
        let grid = ImageF32::new(1, 1);
        assert!(encode_pfm(&grid, 0.0, Endianness::Big).is_err());
        assert!(encode_pfm(&grid, -1.0, Endianness::Big).is_err());
    }
}
