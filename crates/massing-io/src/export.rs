//! Plain-text cell export: one `x,y,z,state` record per line, no header.

use std::io::{BufRead, Write};

use massing_grid::{CellState, Grid, IVec3};

use crate::IoError;

/// Write every active cell whose state is in `states`, in enumeration order.
/// Returns the number of records written.
pub fn write_cells<W: Write>(
    grid: &Grid,
    states: &[CellState],
    mut sink: W,
) -> Result<usize, IoError> {
    let mut written = 0;
    for cell in grid.active_cells().filter(|c| states.contains(&c.state())) {
        let c = cell.coord();
        writeln!(sink, "{},{},{},{}", c.x, c.y, c.z, cell.state())?;
        written += 1;
    }
    sink.flush()?;
    log::debug!("exported {} cells", written);
    Ok(written)
}

/// Parse records produced by [`write_cells`]. Blank lines are skipped.
pub fn read_cells<R: BufRead>(source: R) -> Result<Vec<(IVec3, CellState)>, IoError> {
    let mut out = Vec::new();
    for (i, line) in source.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        out.push(parse_record(line).map_err(|msg| IoError::Parse { line: i + 1, msg })?);
    }
    Ok(out)
}

fn parse_record(line: &str) -> Result<(IVec3, CellState), String> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let [x, y, z, state] = fields[..] else {
        return Err(format!("expected 4 fields, found {}", fields.len()));
    };
    let axis = |s: &str| {
        s.parse::<i32>()
            .map_err(|e| format!("bad coordinate {s:?}: {e}"))
    };
    let state = state.parse::<CellState>().map_err(|e| e.to_string())?;
    Ok((IVec3::new(axis(x)?, axis(y)?, axis(z)?), state))
}
