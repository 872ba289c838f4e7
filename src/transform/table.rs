//! Table detection and grid reconstruction.
//!
//! Candidates are runs of consecutive multi-span lines whose span start
//! positions repeat across rows. Column positions come from clustering
//! those start positions; each span is then snapped to its nearest column.
//! A candidate that cannot produce a near-rectangular grid is rejected and
//! its lines fall back to paragraphs.

use log::debug;

use crate::model::{BBox, Line, TableBlock};

use super::lists::starts_with_marker;

/// Span start positions are bucketed at this granularity (points).
const X_BUCKET_PT: f32 = 5.0;

/// Buckets closer than this merge into one column (points).
const MIN_COLUMN_GAP_PT: f32 = 15.0;

/// Maximum distance from a span start to its column (points).
const CLUSTER_SLACK_PT: f32 = 10.0;

/// Minimum share of a row's spans that must align with a column.
const ROW_ALIGN_RATIO: f32 = 0.5;

/// Minimum rows in a candidate run.
const MIN_ROWS: usize = 2;

/// A reconstructed grid plus spans that did not fit any column.
#[derive(Debug, Clone)]
pub struct TableOutcome {
    /// The rectangular grid
    pub table: TableBlock,
    /// Lines rebuilt from spans too far from every column
    pub leftovers: Vec<Line>,
}

/// Find candidate table runs as `(start, len)` within a page's lines.
///
/// A run is a maximal stretch of consecutive lines that each carry at least
/// two spans. Runs shorter than [`MIN_ROWS`] and runs where at least half
/// the lines open with a list marker are skipped.
pub fn detect_table_runs(lines: &[Line]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start = None;

    for (i, line) in lines.iter().enumerate() {
        let multi = line.spans.len() >= 2 && !line.is_blank();
        match (multi, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                push_run(lines, s, i - s, &mut runs);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        push_run(lines, s, lines.len() - s, &mut runs);
    }
    runs
}

fn push_run(lines: &[Line], start: usize, len: usize, runs: &mut Vec<(usize, usize)>) {
    if len < MIN_ROWS {
        return;
    }
    let run = &lines[start..start + len];
    let marker_lines = run
        .iter()
        .filter(|l| {
            starts_with_marker(&l.text())
                || l.spans
                    .first()
                    .is_some_and(|s| starts_with_marker(s.text.trim()))
        })
        .count();
    if marker_lines * 2 >= len {
        debug!("table candidate at line {start} rejected: list pattern");
        return;
    }
    runs.push((start, len));
}

/// Reconstruct a grid from a candidate run, or reject the candidate.
pub fn build_table(lines: &[Line]) -> Option<TableOutcome> {
    if lines.len() < MIN_ROWS {
        return None;
    }

    let columns = cluster_columns(lines)?;

    // Every row must align a majority of its spans with the columns.
    for line in lines {
        let aligned = line
            .spans
            .iter()
            .filter(|s| nearest_column(&columns, s.bbox.x0).is_some())
            .count();
        if (aligned as f32) < line.spans.len() as f32 * ROW_ALIGN_RATIO {
            debug!("table candidate rejected: row alignment below threshold");
            return None;
        }
    }

    let mut rows: Vec<Vec<String>> = Vec::with_capacity(lines.len());
    let mut leftovers: Vec<Line> = Vec::new();

    for line in lines {
        let mut cells: Vec<Vec<&str>> = vec![Vec::new(); columns.len()];
        let mut stray = Vec::new();
        for span in &line.spans {
            match nearest_column(&columns, span.bbox.x0) {
                Some(col) => cells[col].push(span.text.trim()),
                None => stray.push(span.clone()),
            }
        }
        if !stray.is_empty() {
            leftovers.push(Line::new(stray));
        }
        rows.push(cells.into_iter().map(|parts| parts.join(" ")).collect());
    }

    // Near-rectangular check: populated cell counts may deviate from the
    // modal count by at most one row-wise.
    let populated: Vec<usize> = rows
        .iter()
        .map(|r| r.iter().filter(|c| !c.is_empty()).count())
        .collect();
    let modal = modal_count(&populated);
    if populated.iter().any(|&p| p.abs_diff(modal) > 1) {
        debug!("table candidate rejected: irregular cell population");
        return None;
    }

    let header_row = detect_header_row(lines);
    let bbox = BBox::union_all(lines.iter().map(|l| l.bbox()));

    Some(TableOutcome {
        table: TableBlock {
            rows,
            header_row,
            lines: lines.to_vec(),
            bbox,
        },
        leftovers,
    })
}

/// Cluster span start positions into column x-offsets, ascending.
fn cluster_columns(lines: &[Line]) -> Option<Vec<f32>> {
    use std::collections::HashMap;

    let mut bucket_rows: HashMap<i32, usize> = HashMap::new();
    for line in lines {
        let mut seen: Vec<i32> = line
            .spans
            .iter()
            .map(|s| (s.bbox.x0 / X_BUCKET_PT).round() as i32)
            .collect();
        seen.sort_unstable();
        seen.dedup();
        for key in seen {
            *bucket_rows.entry(key).or_insert(0) += 1;
        }
    }

    let min_rows = (lines.len() / 2).max(MIN_ROWS);
    let mut keys: Vec<i32> = bucket_rows
        .into_iter()
        .filter(|(_, rows)| *rows >= min_rows)
        .map(|(key, _)| key)
        .collect();
    keys.sort_unstable();

    let mut columns: Vec<f32> = Vec::new();
    for key in keys {
        let x = key as f32 * X_BUCKET_PT;
        match columns.last() {
            Some(&prev) if x - prev < MIN_COLUMN_GAP_PT => {}
            _ => columns.push(x),
        }
    }

    if columns.len() >= 2 {
        Some(columns)
    } else {
        debug!("table candidate rejected: fewer than two columns");
        None
    }
}

fn nearest_column(columns: &[f32], x: f32) -> Option<usize> {
    columns
        .iter()
        .enumerate()
        .map(|(i, &c)| (i, (c - x).abs()))
        .min_by(|(_, da), (_, db)| da.partial_cmp(db).unwrap_or(std::cmp::Ordering::Equal))
        .filter(|(_, d)| *d <= CLUSTER_SLACK_PT)
        .map(|(i, _)| i)
}

fn modal_count(counts: &[usize]) -> usize {
    use std::collections::HashMap;
    let mut freq: HashMap<usize, usize> = HashMap::new();
    for &c in counts {
        *freq.entry(c).or_insert(0) += 1;
    }
    freq.into_iter()
        .max_by(|(va, ca), (vb, cb)| ca.cmp(cb).then(va.cmp(vb)))
        .map(|(value, _)| value)
        .unwrap_or(0)
}

/// Header heuristic: the first row is a header when it is mostly bold or
/// set in a different font than the body rows.
fn detect_header_row(lines: &[Line]) -> bool {
    let Some((first, rest)) = lines.split_first() else {
        return false;
    };
    if first.is_bold() {
        return true;
    }
    let first_font = first.modal_font().map(str::to_string);
    let body_font = modal_font_of(rest);
    match (first_font, body_font) {
        (Some(a), Some(b)) => !a.is_empty() && a != b,
        _ => false,
    }
}

fn modal_font_of(lines: &[Line]) -> Option<String> {
    use std::collections::HashMap;
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for line in lines {
        for span in &line.spans {
            *counts.entry(span.font_name.as_str()).or_insert(0) += span.text.chars().count();
        }
    }
    counts
        .into_iter()
        .max_by_key(|(_, count)| *count)
        .map(|(name, _)| name.to_string())
}
