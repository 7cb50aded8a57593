//! Plain-text grid format.
//!
//! ```text
//! 3 4
//! 0100
//! 0010
//! 1110
//! ```
//!
//! The header holds `height width`; each following line is one row of `0`/`1`.

use crate::GridData;
use life_core::{CellState, Error, Result};

pub fn encode(data: &GridData) -> Result<String> {
    data.validate()?;

    let mut out = String::with_capacity(data.cells.len() + data.height + 24);
    out.push_str(&format!("{} {}\n", data.height, data.width));
    for row in 0..data.height {
        let start = row * data.width;
        out.extend(data.cells[start..start + data.width].iter().map(|c| c.to_char()));
        out.push('\n');
    }
    Ok(out)
}

pub fn decode(contents: &str) -> Result<GridData> {
    let mut lines = contents.lines();

    let header = lines
        .next()
        .ok_or_else(|| Error::Format("missing size header".to_string()))?;
    let (height, width) = parse_header(header)?;

    let size = height
        .checked_mul(width)
        .ok_or_else(|| Error::Format(format!("grid size {}x{} is too large", height, width)))?;
    // Every cell takes at least one byte, so a header larger than the
    // contents is caught below as missing rows.
    let mut cells = Vec::new();
    cells
        .try_reserve_exact(size.min(contents.len()))
        .map_err(|e| Error::AllocationFailure(format!("{}x{} grid: {}", height, width, e)))?;

    for row in 0..height {
        // Line numbers are 1-based and the header is line 1
        let line_no = row + 2;
        let line = lines.next().ok_or_else(|| {
            Error::Format(format!("expected {} rows, found {}", height, row))
        })?;

        let mut count = 0;
        for c in line.chars() {
            let cell = CellState::from_char(c).map_err(|_| {
                Error::Format(format!("line {}: invalid cell marker {:?}", line_no, c))
            })?;
            cells.push(cell);
            count += 1;
            if count > width {
                break;
            }
        }
        if count != width {
            return Err(Error::Format(format!(
                "line {}: expected {} cells, found {}",
                line_no,
                width,
                line.chars().count()
            )));
        }
    }

    if let Some((offset, _)) = lines.enumerate().find(|(_, l)| !l.trim().is_empty()) {
        return Err(Error::Format(format!(
            "line {}: unexpected data after the last row",
            height + 2 + offset
        )));
    }

    Ok(GridData {
        width,
        height,
        cells,
    })
}

fn parse_header(line: &str) -> Result<(usize, usize)> {
    let mut fields = line.split_whitespace();
    let mut next = |name: &str| -> Result<usize> {
        let field = fields
            .next()
            .ok_or_else(|| Error::Format(format!("size header is missing the {}", name)))?;
        field
            .parse()
            .map_err(|_| Error::Format(format!("invalid {} {:?} in size header", name, field)))
    };

    let height = next("height")?;
    let width = next("width")?;
    if fields.next().is_some() {
        return Err(Error::Format(format!("unexpected fields in size header {:?}", line)));
    }
    Ok((height, width))
}
