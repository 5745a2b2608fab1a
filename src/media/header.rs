//! Media header inspection.
//!
//! Opens a referenced media file, measures it, and for images validates
//! the format signature and reads the pixel dimensions. Only headers are
//! read; pixel and sample data are never decoded.

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::{Result, RsrcError};

/// PNG signature followed by the first chunk's length and `IHDR` tag.
const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const PNG_IHDR: [u8; 4] = *b"IHDR";
const PNG_MIN_SIZE: u64 = 24;

const GIF_SIGNATURE: [u8; 3] = *b"GIF";
const GIF_MIN_SIZE: u64 = 10;

const JPG_SOI_APP0: [u8; 4] = [0xFF, 0xD8, 0xFF, 0xE0];
const JPG_JFIF: [u8; 4] = *b"JFIF";
const JPG_MIN_SIZE: u64 = 24;
/// Bytes read per marker segment while scanning for the frame header.
const JPG_CHUNK_SIZE: usize = 12;
/// Start-of-frame markers that carry the image dimensions.
const JPG_SOF_MARKERS: [u8; 7] = [0xC0, 0xC1, 0xC2, 0xC3, 0xC9, 0xCA, 0xCB];

/// Media format, decided by the last three characters of the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Png,
    Jpg,
    Gif,
    Otf,
    Ttf,
    Wav,
    Ogg,
    Unknown,
}

impl MediaKind {
    pub fn from_path(path: &Path) -> Self {
        let path = path.to_string_lossy();
        let extension = path
            .char_indices()
            .rev()
            .nth(2)
            .map(|(idx, _)| &path[idx..])
            .unwrap_or("");

        match extension {
            "png" => Self::Png,
            "jpg" => Self::Jpg,
            "gif" => Self::Gif,
            "otf" => Self::Otf,
            "ttf" => Self::Ttf,
            "wav" => Self::Wav,
            "ogg" => Self::Ogg,
            _ => Self::Unknown,
        }
    }

    /// Formats with a validated header and pixel dimensions.
    pub fn is_image(self) -> bool {
        matches!(self, Self::Png | Self::Jpg | Self::Gif)
    }

    pub fn is_font(self) -> bool {
        matches!(self, Self::Otf | Self::Ttf)
    }

    pub fn is_sound(self) -> bool {
        matches!(self, Self::Wav | Self::Ogg)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Gif => "gif",
            Self::Otf => "otf",
            Self::Ttf => "ttf",
            Self::Wav => "wav",
            Self::Ogg => "ogg",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of inspecting one media file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaInfo {
    pub path: PathBuf,
    pub kind: MediaKind,
    pub size_bytes: u64,
    /// Pixel `(width, height)` for images.
    pub dimensions: Option<(u32, u32)>,
}

impl MediaInfo {
    /// Size in kilobytes, truncated.
    pub fn size_kb(&self) -> u64 {
        self.size_bytes / 1024
    }
}

/// Open and inspect a media file.
#[tracing::instrument(level = "debug")]
pub fn inspect(path: &Path) -> Result<MediaInfo> {
    let kind = MediaKind::from_path(path);
    if kind == MediaKind::Unknown {
        return Err(RsrcError::format(format!(
            "unknown file extension on {}",
            path.display()
        ))
        .with_help("Supported extensions: png, jpg, gif, otf, ttf, wav, ogg"));
    }

    let file = File::open(path).map_err(|e| RsrcError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to open media file: {}", e),
    })?;

    let (size_bytes, dimensions) =
        inspect_reader(BufReader::new(file), kind).map_err(|e| match e {
            RsrcError::Format { message, help } => RsrcError::Format {
                message: format!("{}: {}", path.display(), message),
                help,
            },
            RsrcError::IoError(e) => RsrcError::Io {
                path: path.to_path_buf(),
                message: format!("Failed to read media header: {}", e),
            },
            other => other,
        })?;

    debug!(%kind, size_bytes, ?dimensions, "inspected media");

    Ok(MediaInfo {
        path: path.to_path_buf(),
        kind,
        size_bytes,
        dimensions,
    })
}

/// Measure a media stream and read its dimensions when it is an image.
pub fn inspect_reader<R: Read + Seek>(
    mut reader: R,
    kind: MediaKind,
) -> Result<(u64, Option<(u32, u32)>)> {
    let size = reader.seek(SeekFrom::End(0))?;
    reader.seek(SeekFrom::Start(0))?;

    let dimensions = match kind {
        MediaKind::Png => Some(png_dimensions(&mut reader, size)?),
        MediaKind::Gif => Some(gif_dimensions(&mut reader, size)?),
        MediaKind::Jpg => Some(jpg_dimensions(&mut reader, size)?),
        MediaKind::Otf | MediaKind::Ttf | MediaKind::Wav | MediaKind::Ogg => None,
        MediaKind::Unknown => {
            return Err(RsrcError::format("unknown file extension"));
        }
    };

    Ok((size, dimensions))
}

fn png_dimensions<R: Read + Seek>(reader: &mut R, size: u64) -> Result<(u32, u32)> {
    ensure_size(size, PNG_MIN_SIZE, "png")?;

    let header: [u8; 16] = read_array(reader)?;
    if header[..8] != PNG_SIGNATURE {
        return Err(RsrcError::format("invalid png signature"));
    }
    // bytes 8..12 hold the IHDR chunk length
    if header[12..16] != PNG_IHDR {
        return Err(RsrcError::format("png is missing its IHDR chunk"));
    }

    let dims: [u8; 8] = read_array(reader)?;
    let width = u32::from_be_bytes([dims[0], dims[1], dims[2], dims[3]]);
    let height = u32::from_be_bytes([dims[4], dims[5], dims[6], dims[7]]);

    Ok((width, height))
}

fn gif_dimensions<R: Read + Seek>(reader: &mut R, size: u64) -> Result<(u32, u32)> {
    ensure_size(size, GIF_MIN_SIZE, "gif")?;

    let header: [u8; 10] = read_array(reader)?;
    if header[..3] != GIF_SIGNATURE {
        return Err(RsrcError::format("invalid gif signature"));
    }

    // "GIF" + 3 version bytes, then the logical screen size
    let width = u16::from_le_bytes([header[6], header[7]]);
    let height = u16::from_le_bytes([header[8], header[9]]);

    Ok((u32::from(width), u32::from(height)))
}

fn jpg_dimensions<R: Read + Seek>(reader: &mut R, size: u64) -> Result<(u32, u32)> {
    ensure_size(size, JPG_MIN_SIZE, "jpg")?;

    let header: [u8; 10] = read_array(reader)?;
    if header[..4] != JPG_SOI_APP0 {
        return Err(RsrcError::format("invalid jpg signature"));
    }
    // bytes 4..6 hold the APP0 segment length
    if header[6..10] != JPG_JFIF {
        return Err(RsrcError::format("jpg is not in JFIF format"));
    }

    // Each window starts two bytes before a marker:
    // [prev tail, prev tail, 0xFF, marker, len_hi, len_lo, ...]
    let mut pos: u64 = 0;
    loop {
        reader.seek(SeekFrom::Start(pos))?;
        let chunk: [u8; JPG_CHUNK_SIZE] = read_array(reader)?;

        if chunk[2] != 0xFF {
            return Err(RsrcError::format(format!(
                "corrupt jpg marker at offset {}",
                pos + 2
            )));
        }

        if JPG_SOF_MARKERS.contains(&chunk[3]) {
            trace!(offset = pos + 2, marker = chunk[3], "found jpg start of frame");
            let height = u16::from_be_bytes([chunk[7], chunk[8]]);
            let width = u16::from_be_bytes([chunk[9], chunk[10]]);
            return Ok((u32::from(width), u32::from(height)));
        }

        let segment_len = u16::from_be_bytes([chunk[4], chunk[5]]);
        pos += 2 + u64::from(segment_len);

        if pos + JPG_CHUNK_SIZE as u64 > size {
            return Err(RsrcError::format("jpg has no start of frame marker")
                .with_help("Only baseline, progressive and arithmetic coded JPEGs are supported"));
        }
    }
}

fn ensure_size(size: u64, min: u64, format: &str) -> Result<()> {
    if size < min {
        return Err(RsrcError::format(format!(
            "file is too small ({size} bytes) and has an incomplete {format} header"
        )));
    }
    Ok(())
}

fn read_array<R: Read, const N: usize>(reader: &mut R) -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    reader.read_exact(&mut buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => RsrcError::format("truncated header"),
        _ => RsrcError::IoError(e),
    })?;
    Ok(buf)
}
