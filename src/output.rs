//! Result files.
//!
//! `cp.txt` holds one tab-separated `loc xc yc cp` line per panel in
//! traversal order, without a header.

use crate::error::{PanelError, PanelResult};
use crate::panel::{Panel, SurfaceLoc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CP_FILE_NAME: &str = "cp.txt";

pub fn format_cp(panels: &[Panel]) -> String {
    panels
        .iter()
        .map(|panel| {
            format!(
                "{}\t{}\t{}\t{}\n",
                panel.loc, panel.control_point.x, panel.control_point.y, panel.cp
            )
        })
        .collect()
}

/// Writes `cp.txt` into `dir`, creating the directory tree if needed.
pub fn write_cp(dir: &Path, panels: &[Panel]) -> PanelResult<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| PanelError::io(dir, e))?;
    let path = dir.join(CP_FILE_NAME);
    fs::write(&path, format_cp(panels)).map_err(|e| PanelError::io(&path, e))?;
    Ok(path)
}

/// One row of a `cp.txt` file.
#[derive(Debug, Clone, PartialEq)]
pub struct CpRecord {
    pub loc: SurfaceLoc,
    pub x: f64,
    pub y: f64,
    pub cp: f64,
}

/// Reads a `cp.txt` file back.
pub fn read_cp(path: &Path) -> PanelResult<Vec<CpRecord>> {
    let text = fs::read_to_string(path).map_err(|e| PanelError::io(path, e))?;
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(line_no, line)| {
            let bad = || {
                PanelError::Serialization(format!(
                    "{}, line {}: malformed record '{line}'",
                    path.display(),
                    line_no + 1
                ))
            };
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() != 4 {
                return Err(bad());
            }
            let loc = match fields[0] {
                "upper" => SurfaceLoc::Upper,
                "lower" => SurfaceLoc::Lower,
                _ => return Err(bad()),
            };
            let number = |s: &str| s.parse::<f64>().map_err(|_| bad());
            Ok(CpRecord {
                loc,
                x: number(fields[1])?,
                y: number(fields[2])?,
                cp: number(fields[3])?,
            })
        })
        .collect()
}

/// Serialises `value` as pretty JSON into `path`.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> PanelResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| PanelError::io(parent, e))?;
    }
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| PanelError::Serialization(e.to_string()))?;
    fs::write(path, json).map_err(|e| PanelError::io(path, e))
}
