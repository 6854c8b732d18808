//! Binary portable bitmap (PBM `P4`) output.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::title;
use crate::compute::Grid;

/// Magic bytes identifying a binary PBM file.
pub const PBM_MAGIC: &[u8; 2] = b"P4";

/// Smallest scale at which gridlines leave room for cell interiors.
const MIN_GRIDLINE_SCALE: usize = 3;

/// Options for bitmap output.
#[derive(Debug, Clone)]
pub struct PbmOptions {
    /// Pixels per cell edge.
    pub scale: usize,
    /// Draw 1-pixel black lines around every cell.
    pub gridlines: bool,
}

impl Default for PbmOptions {
    fn default() -> Self {
        Self {
            scale: 8,
            gridlines: false,
        }
    }
}

impl PbmOptions {
    fn effective_gridlines(&self) -> bool {
        self.gridlines && self.scale >= MIN_GRIDLINE_SCALE
    }

    /// Image size in pixels for a grid.
    ///
    /// Fails with `InvalidInput` when the scaled size does not fit in `usize`.
    pub fn image_size(&self, grid: &Grid) -> io::Result<(usize, usize)> {
        let border = self.effective_gridlines() as usize;
        let side = |cells: usize| {
            cells
                .checked_mul(self.scale)
                .and_then(|px| px.checked_add(border))
                .ok_or_else(|| {
                    io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("PBM scale {} is too large for {} cells", self.scale, cells),
                    )
                })
        };
        Ok((side(grid.width)?, side(grid.iterations())?))
    }

    /// Check that these options can render `grid`.
    pub fn validate(&self, grid: &Grid) -> io::Result<()> {
        if self.scale == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "PBM scale must be at least 1",
            ));
        }
        self.image_size(grid).map(|_| ())
    }
}

/// PBM header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PbmHeader {
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Optional comment line.
    pub comment: Option<String>,
}

impl PbmHeader {
    /// Bytes per packed pixel row.
    pub fn row_bytes(&self) -> usize {
        self.width.div_ceil(8)
    }

    /// Write header to output.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(PBM_MAGIC)?;
        w.write_all(b"\n")?;
        if let Some(comment) = &self.comment {
            writeln!(w, "# {}", comment)?;
        }
        writeln!(w, "{} {}", self.width, self.height)?;
        Ok(())
    }

    /// Read header from input, leaving the reader at the first pixel byte.
    #[cfg(test)]
    pub fn read_from<R: io::BufRead>(r: &mut R) -> io::Result<Self> {
        let mut magic = [0u8; 2];
        r.read_exact(&mut magic)?;
        if &magic != PBM_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Invalid PBM magic bytes",
            ));
        }

        let mut comment = None;
        let mut dims = Vec::with_capacity(2);
        let mut line = String::new();
        while dims.len() < 2 {
            line.clear();
            if r.read_line(&mut line)? == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "PBM header ended before image size",
                ));
            }
            let content = line.trim();
            if let Some(text) = content.strip_prefix('#') {
                comment.get_or_insert_with(|| text.trim().to_string());
                continue;
            }
            for token in content.split_whitespace() {
                let value = token.parse::<usize>().map_err(|e| {
                    io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("Bad PBM dimension {:?}: {}", token, e),
                    )
                })?;
                dims.push(value);
            }
        }

        Ok(Self {
            width: dims[0],
            height: dims[1],
            comment,
        })
    }
}

/// Encode a grid as a complete PBM image.
pub fn encode_pbm(grid: &Grid, options: &PbmOptions) -> io::Result<Vec<u8>> {
    let mut out = Vec::new();
    write_pbm(&mut out, grid, options)?;
    Ok(out)
}

/// Write a grid as a PBM image.
pub fn write_pbm<W: Write>(w: &mut W, grid: &Grid, options: &PbmOptions) -> io::Result<()> {
    options.validate(grid)?;
    if options.gridlines && !options.effective_gridlines() {
        log::warn!(
            "gridlines need a scale of at least {}, drawing without them",
            MIN_GRIDLINE_SCALE
        );
    }

    let (width, height) = options.image_size(grid)?;
    let header = PbmHeader {
        width,
        height,
        comment: Some(title(grid)),
    };
    header.write_to(w)?;

    let gridlines = options.effective_gridlines();
    let scale = options.scale;
    let mut packed = vec![0u8; header.row_bytes()];
    for y in 0..height {
        packed.fill(0);
        for x in 0..width {
            let black = if gridlines && (x % scale == 0 || y % scale == 0) {
                true
            } else {
                let (cx, cy) = (x / scale, y / scale);
                cx < grid.width && cy < grid.iterations() && grid.get(cy, cx) != 0
            };
            if black {
                packed[x / 8] |= 0x80 >> (x % 8);
            }
        }
        w.write_all(&packed)?;
    }

    log::debug!("wrote {}x{} PBM for {}", width, height, title(grid));
    Ok(())
}

/// Write a grid as a PBM file.
///
/// The options are checked before the file is created.
pub fn save_pbm<P: AsRef<Path>>(path: P, grid: &Grid, options: &PbmOptions) -> io::Result<()> {
    options.validate(grid)?;
    let mut writer = BufWriter::new(File::create(path)?);
    write_pbm(&mut writer, grid, options)?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::{Evolver, RuleTable};
    use crate::schema::Boundary;
    use std::fs;
    use std::io::{BufReader, Cursor, Read};
    use tempfile::tempdir;

    fn rule_90() -> Grid {
        Evolver::new(RuleTable::new(90), Boundary::Strict)
            .evolve(&[0, 0, 0, 1, 0, 0, 0], 4)
            .unwrap()
    }

    #[test]
    fn test_header_roundtrip() {
        let header = PbmHeader {
            width: 17,
            height: 4,
            comment: Some("1D Cellular Automata - Rule 30".to_string()),
        };
        let mut buf = Vec::new();
        header.write_to(&mut buf).unwrap();
        assert_eq!(buf, b"P4\n# 1D Cellular Automata - Rule 30\n17 4\n");
        assert_eq!(header.row_bytes(), 3);

        let decoded = PbmHeader::read_from(&mut Cursor::new(&buf)).unwrap();
        assert_eq!(decoded, header);
    }

    #[test]
    fn test_header_rejects_other_formats() {
        let err = PbmHeader::read_from(&mut Cursor::new(b"P1\n3 3\n")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        let err = PbmHeader::read_from(&mut Cursor::new(b"P4\n3")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_unscaled_pixels() {
        let options = PbmOptions {
            scale: 1,
            gridlines: false,
        };
        let bytes = encode_pbm(&rule_90(), &options).unwrap();
        let mut cursor = Cursor::new(&bytes);
        let header = PbmHeader::read_from(&mut cursor).unwrap();
        assert_eq!((header.width, header.height), (7, 4));

        let mut pixels = Vec::new();
        cursor.read_to_end(&mut pixels).unwrap();
        assert_eq!(
            pixels,
            vec![0b0001_0000, 0b0010_1000, 0b0100_0100, 0b1010_1010]
        );
    }

    #[test]
    fn test_scaled_size() {
        let grid = rule_90();
        let options = PbmOptions {
            scale: 4,
            gridlines: false,
        };
        assert_eq!(options.image_size(&grid).unwrap(), (28, 16));
        let with_lines = PbmOptions {
            scale: 4,
            gridlines: true,
        };
        assert_eq!(with_lines.image_size(&grid).unwrap(), (29, 17));

        let bytes = encode_pbm(&grid, &with_lines).unwrap();
        let mut cursor = Cursor::new(&bytes);
        let header = PbmHeader::read_from(&mut cursor).unwrap();
        let mut pixels = Vec::new();
        cursor.read_to_end(&mut pixels).unwrap();
        assert_eq!(pixels.len(), header.row_bytes() * header.height);
        // Top border is a solid line across the full width.
        assert_eq!(&pixels[..4], &[0xff, 0xff, 0xff, 0xf8]);
    }

    #[test]
    fn test_gridlines_ignored_at_small_scale() {
        let options = PbmOptions {
            scale: 2,
            gridlines: true,
        };
        assert_eq!(options.image_size(&rule_90()).unwrap(), (14, 8));
    }

    #[test]
    fn test_zero_scale_rejected() {
        let options = PbmOptions {
            scale: 0,
            gridlines: false,
        };
        let err = encode_pbm(&rule_90(), &options).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_oversized_scale_rejected() {
        let grid = rule_90();
        let options = PbmOptions {
            scale: usize::MAX / 2,
            gridlines: true,
        };
        let err = options.image_size(&grid).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert_eq!(
            options.validate(&grid).unwrap_err().kind(),
            io::ErrorKind::InvalidInput
        );
        let mut out = Vec::new();
        assert!(write_pbm(&mut out, &grid, &options).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn test_save_pbm_bad_options_leave_no_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.pbm");
        for scale in [0, usize::MAX] {
            let options = PbmOptions {
                scale,
                gridlines: false,
            };
            assert!(save_pbm(&path, &rule_90(), &options).is_err());
            assert!(!path.exists());
        }
    }

    #[test]
    fn test_save_pbm() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rule90.pbm");

        save_pbm(&path, &rule_90(), &PbmOptions::default()).unwrap();

        let metadata = fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
        let mut reader = BufReader::new(fs::File::open(&path).unwrap());
        let header = PbmHeader::read_from(&mut reader).unwrap();
        assert_eq!((header.width, header.height), (56, 32));
        assert_eq!(
            header.comment.as_deref(),
            Some("1D Cellular Automata - Rule 90")
        );
    }
}
