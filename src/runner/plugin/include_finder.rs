//! Records which included files the analysis could resolve.
//!
//! The walker reports every inclusion it meets as resolved, unresolved (the path was
//! not a constant) or missing (the path was constant but no file exists).

use std::fmt::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInclude {
    pub name: String,
    pub path: PathBuf,
    pub filename: PathBuf,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedInclude {
    pub filename: PathBuf,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingInclude {
    pub name: String,
    pub filename: PathBuf,
    pub line: u32,
}

/// Inclusion results of one analysis run.
#[derive(Debug, Default)]
pub struct IncludeFinder {
    resolved: Vec<ResolvedInclude>,
    unresolved: Vec<UnresolvedInclude>,
    missing: Vec<MissingInclude>,
}

impl IncludeFinder {
    pub fn new() -> Self {
        IncludeFinder::default()
    }

    pub fn resolved(
        &mut self,
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        filename: impl Into<PathBuf>,
        line: u32,
    ) {
        let include = ResolvedInclude {
            name: name.into(),
            path: path.into(),
            filename: filename.into(),
            line,
        };
        tracing::trace!(name = %include.name, path = %include.path.display(), "include resolved");
        self.resolved.push(include);
    }

    pub fn unresolved(&mut self, filename: impl Into<PathBuf>, line: u32) {
        let filename = filename.into();
        tracing::trace!(filename = %filename.display(), line, "include not resolved");
        self.unresolved.push(UnresolvedInclude { filename, line });
    }

    pub fn missing(&mut self, name: impl Into<String>, filename: impl Into<PathBuf>, line: u32) {
        let include = MissingInclude {
            name: name.into(),
            filename: filename.into(),
            line,
        };
        tracing::trace!(name = %include.name, "include missing");
        self.missing.push(include);
    }

    /// Forget everything recorded so far.
    pub fn reset(&mut self) {
        self.resolved.clear();
        self.unresolved.clear();
        self.missing.clear();
    }

    pub fn resolved_includes(&self) -> &[ResolvedInclude] {
        &self.resolved
    }

    pub fn unresolved_includes(&self) -> &[UnresolvedInclude] {
        &self.unresolved
    }

    pub fn missing_includes(&self) -> &[MissingInclude] {
        &self.missing
    }

    /// One-line summary, e.g. `1 file resolved, 2 files not resolved, and 1 file missing`.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if !self.resolved.is_empty() {
            parts.push(format!("{} resolved", files(self.resolved.len())));
        }
        if !self.unresolved.is_empty() {
            parts.push(format!("{} not resolved", files(self.unresolved.len())));
        }
        if !self.missing.is_empty() {
            parts.push(format!("{} missing", files(self.missing.len())));
        }
        if parts.is_empty() {
            return "No files included".to_string();
        }
        if parts.len() > 1 {
            if let Some(last) = parts.last_mut() {
                *last = format!("and {}", last);
            }
        }
        parts.join(", ")
    }

    /// Counts followed by one table per non-empty category. Paths under `base_dir` are
    /// shown relative to it.
    pub fn render_log_output(&self, base_dir: &Path) -> String {
        let mut out = format!(
            "{} resolved\n{} unresolved\n{} missing",
            files(self.resolved.len()),
            files(self.unresolved.len()),
            files(self.missing.len())
        );
        if !self.resolved.is_empty() {
            let rows = self
                .resolved
                .iter()
                .map(|r| {
                    vec![
                        relative(&r.filename, base_dir),
                        r.line.to_string(),
                        r.name.clone(),
                        relative(&r.path, base_dir),
                    ]
                })
                .collect::<Vec<_>>();
            out.push_str("\n\nResolved Files\n");
            out.push_str(&table(&["File", "Line", "Name", "Resolved Path"], &rows));
        }
        if !self.unresolved.is_empty() {
            let rows = self
                .unresolved
                .iter()
                .map(|r| vec![relative(&r.filename, base_dir), r.line.to_string()])
                .collect::<Vec<_>>();
            out.push_str("\n\nUnresolved Files\n");
            out.push_str(&table(&["File", "Line"], &rows));
        }
        if !self.missing.is_empty() {
            let rows = self
                .missing
                .iter()
                .map(|r| {
                    vec![
                        relative(&r.filename, base_dir),
                        r.line.to_string(),
                        r.name.clone(),
                    ]
                })
                .collect::<Vec<_>>();
            out.push_str("\n\nMissing Files\n");
            out.push_str(&table(&["File", "Line", "Name"], &rows));
        }
        out
    }
}

fn files(n: usize) -> String {
    if n == 1 {
        "1 file".to_string()
    } else {
        format!("{} files", n)
    }
}

fn relative(p: &Path, base_dir: &Path) -> String {
    p.strip_prefix(base_dir).unwrap_or(p).display().to_string()
}

/// Left-aligned columns separated by two spaces, with a dashed rule under the header.
fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.len());
        }
    }
    let mut out = String::new();
    let header: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    write_row(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_row(&mut out, &rule, &widths);
    for row in rows {
        write_row(&mut out, row, &widths);
    }
    // No newline after the last row.
    out.pop();
    out
}

fn write_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let mut line = String::new();
    for (i, (cell, w)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        let _ = write!(line, "{:<width$}", cell, width = w);
    }
    out.push_str(line.trim_end());
    out.push('\n');
}
