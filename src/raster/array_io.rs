//! Array reading and writing for float grids
//!
//! Layers can be written as CSV, JSON or NumPy NPY files. CSV grids can
//! also be read back, which lets a scene archive store bands as plain text.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use byteorder::{LittleEndian, WriteBytesExt};
use log::{debug, info};

use super::errors::{RiskError, RiskResult};
use super::grid::{is_no_data, Grid, NO_DATA};

/// Header cell marking the row-indexed CSV layout
const CSV_CORNER: &str = "row/col";

/// Output format for exported layers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayFormat {
    Csv,
    Json,
    Npy,
}

impl ArrayFormat {
    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ArrayFormat::Csv => "csv",
            ArrayFormat::Json => "json",
            ArrayFormat::Npy => "npy",
        }
    }
}

impl fmt::Display for ArrayFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for ArrayFormat {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ArrayFormat::Csv),
            "json" => Ok(ArrayFormat::Json),
            "npy" => Ok(ArrayFormat::Npy),
            _ => Err(RiskError::InvalidArgument(format!("Unsupported array format: {}", s))),
        }
    }
}

/// Save a grid to a file in the specified format
///
/// # Arguments
/// * `grid` - Grid to write
/// * `path` - Destination file
/// * `format` - Output format
pub fn save_grid<P: AsRef<Path>>(grid: &Grid<f32>, path: P, format: ArrayFormat) -> RiskResult<()> {
    let path = path.as_ref();
    info!("Writing {}x{} grid to {} as {}", grid.width(), grid.height(), path.display(), format);

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    match format {
        ArrayFormat::Csv => write_csv(grid, &mut writer)?,
        ArrayFormat::Json => write_json(grid, &mut writer)?,
        ArrayFormat::Npy => write_npy(grid, &mut writer)?,
    }

    writer.flush()?;
    Ok(())
}

/// Write a grid as CSV with a column header and a leading row index
///
/// No-data pixels are written as empty cells.
pub fn write_csv<W: Write>(grid: &Grid<f32>, writer: &mut W) -> RiskResult<()> {
    write!(writer, "{}", CSV_CORNER)?;
    for x in 0..grid.width() {
        write!(writer, ",{}", x)?;
    }
    writeln!(writer)?;

    for y in 0..grid.height() {
        write!(writer, "{}", y)?;
        for x in 0..grid.width() {
            match grid.get(x, y) {
                Some(value) if !is_no_data(value) => write!(writer, ",{}", value)?,
                _ => write!(writer, ",")?,
            }
        }
        writeln!(writer)?;
    }

    Ok(())
}

/// Write a grid as JSON with nested row arrays
///
/// No-data pixels are written as `null`.
pub fn write_json<W: Write>(grid: &Grid<f32>, writer: &mut W) -> RiskResult<()> {
    writeln!(writer, "{{")?;
    writeln!(writer, "  \"width\": {},", grid.width())?;
    writeln!(writer, "  \"height\": {},", grid.height())?;
    writeln!(writer, "  \"data\": [")?;

    for y in 0..grid.height() {
        write!(writer, "    [")?;

        for x in 0..grid.width() {
            match grid.get(x, y) {
                Some(value) if !is_no_data(value) => write!(writer, "{}", value)?,
                _ => write!(writer, "null")?,
            }

            if x + 1 < grid.width() {
                write!(writer, ", ")?;
            }
        }

        if y + 1 < grid.height() {
            writeln!(writer, "],")?;
        } else {
            writeln!(writer, "]")?;
        }
    }

    writeln!(writer, "  ]")?;
    writeln!(writer, "}}")?;

    Ok(())
}

/// Write a grid as a NumPy NPY 1.0 file of little-endian `f32`
///
/// No-data pixels are stored as NaN.
pub fn write_npy<W: Write>(grid: &Grid<f32>, writer: &mut W) -> RiskResult<()> {
    writer.write_all(b"\x93NUMPY")?;
    writer.write_all(&[0x01, 0x00])?;

    let header_str = format!(
        "{{'descr': '<f4', 'fortran_order': False, 'shape': ({}, {}), }}",
        grid.height(), grid.width()
    );

    // Magic, version, length field and header must total a multiple of 64
    let header_len = header_str.len() + 1;
    let padding_len = (64 - ((header_len + 10) % 64)) % 64;
    let padded_header = format!("{}{}\n", header_str, " ".repeat(padding_len));

    writer.write_u16::<LittleEndian>(padded_header.len() as u16)?;
    writer.write_all(padded_header.as_bytes())?;

    for &value in grid.values() {
        writer.write_f32::<LittleEndian>(value)?;
    }

    Ok(())
}

/// Load a float grid from a CSV file
///
/// Accepts both the row-indexed layout written by [`write_csv`] and a plain
/// comma-separated matrix. Empty cells and `nan` become no-data.
pub fn load_csv<P: AsRef<Path>>(path: P) -> RiskResult<Grid<f32>> {
    let path = path.as_ref();
    debug!("Reading CSV grid from {}", path.display());

    let file = File::open(path)?;
    read_csv(BufReader::new(file))
}

/// Parse a float grid from CSV text
///
/// Trailing blank lines are ignored.
pub fn read_csv<R: BufRead>(reader: R) -> RiskResult<Grid<f32>> {
    let mut rows: Vec<Vec<f32>> = Vec::new();
    let mut indexed = false;

    let mut lines = reader.lines().collect::<Result<Vec<String>, _>>()?;
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }

    // An empty line inside the grid is a row of empty cells
    for (line_no, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        let mut cells = trimmed.split(',');

        if line_no == 0 && trimmed.starts_with(CSV_CORNER) {
            indexed = true;
            continue;
        }

        if indexed {
            // Skip the row index column
            cells.next();
        }

        let row = cells
            .map(|cell| parse_cell(cell, line_no + 1))
            .collect::<RiskResult<Vec<f32>>>()?;
        rows.push(row);
    }

    let height = rows.len();
    let width = rows.first().map(|r| r.len()).unwrap_or(0);

    if let Some((idx, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
        return Err(RiskError::GenericError(format!(
            "CSV row {} has {} values, expected {}", idx, row.len(), width
        )));
    }

    let data: Vec<f32> = rows.into_iter().flatten().collect();
    Grid::from_vec(width as u32, height as u32, data)
}

fn parse_cell(cell: &str, line: usize) -> RiskResult<f32> {
    let cell = cell.trim();
    if cell.is_empty() || cell.eq_ignore_ascii_case("nan") {
        return Ok(NO_DATA);
    }

    cell.parse::<f32>()
        .map_err(|_| RiskError::GenericError(format!("Invalid value '{}' on CSV line {}", cell, line)))
}
