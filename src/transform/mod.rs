//! The structural reconstruction pipeline.
//!
//! Raw per-page lines become classified blocks in a fixed stage order:
//! repeating edge removal, drop-cap stripping, table regions, list markers,
//! heading marks, orphan defragmentation, paragraph grouping, math
//! conversion, image references. Document-wide typography statistics are
//! computed once up front and threaded through as read-only context.

pub mod defrag;
pub mod dropcaps;
pub mod edges;
pub mod headings;
pub mod lists;
pub mod math;
pub mod stats;
pub mod table;

use log::debug;

use crate::error::{Error, Result};
use crate::model::{BBox, Block, ImageAsset, Line, Page, PageText, Paragraph, StructuredDocument};
use crate::options::Options;

use defrag::Fragment;

pub use edges::{detect_repeating_edges, normalize_edge_text, RepeatingEdges};
pub use stats::FontStats;

/// Pages processed when `preview_only` is set.
pub const PREVIEW_PAGES: usize = 3;

/// Optional per-run callbacks.
///
/// `progress` fires once per completed page with `(done, total)`; `log`
/// receives human-readable pipeline notes. Both default to no-ops.
#[derive(Default)]
pub struct Hooks<'a> {
    /// Called after each page with `(pages_done, pages_total)`
    pub progress: Option<&'a mut dyn FnMut(usize, usize)>,
    /// Called with diagnostic notes as stages run
    pub log: Option<&'a mut dyn FnMut(&str)>,
}

impl Hooks<'_> {
    fn note(&mut self, message: &str) {
        if let Some(log) = self.log.as_mut() {
            log(message);
        }
    }
}

/// Transform extracted pages into a structured document.
pub fn transform(pages: Vec<PageText>, options: &Options) -> Result<StructuredDocument> {
    transform_with_hooks(pages, options, Hooks::default())
}

/// [`transform`] with progress and log callbacks.
pub fn transform_with_hooks(
    mut pages: Vec<PageText>,
    options: &Options,
    mut hooks: Hooks<'_>,
) -> Result<StructuredDocument> {
    options.validate()?;
    validate_input(&pages)?;

    if options.preview_only {
        pages.truncate(PREVIEW_PAGES);
    }

    let stats = FontStats::compute(&pages, options.heading_size_ratio);
    debug!(
        "body size {:.1}pt, {} heading bucket(s)",
        stats.body_size,
        stats.heading_bucket_count()
    );
    hooks.note(&format!(
        "body size {:.1}pt, {} heading bucket(s)",
        stats.body_size,
        stats.heading_bucket_count()
    ));

    let edges = if options.remove_headers_footers {
        detect_repeating_edges(&pages)
    } else {
        RepeatingEdges::default()
    };
    if !edges.is_empty() {
        hooks.note("repeating header/footer detected");
    }

    let total = pages.len();
    let mut out = Vec::with_capacity(total);

    for (done, mut page) in pages.into_iter().enumerate() {
        if options.remove_headers_footers {
            edges::remove_edges(&mut page, &edges);
        }
        dropcaps::strip_drop_caps(&mut page);

        let mut blocks = transform_page(&page, &stats, options);
        if done + 1 < total {
            blocks.push(Block::PageBreak);
        }
        out.push(Page {
            index: page.index,
            blocks,
        });

        if let Some(progress) = hooks.progress.as_mut() {
            progress(done + 1, total);
        }
    }

    Ok(StructuredDocument { pages: out, stats })
}

/// Enforce the extraction contract: contiguous zero-based page indices and
/// positive finite font sizes.
fn validate_input(pages: &[PageText]) -> Result<()> {
    for (expected, page) in pages.iter().enumerate() {
        if page.index != expected {
            return Err(Error::PageOrder {
                expected,
                found: page.index,
            });
        }
        for line in &page.lines {
            for span in &line.spans {
                if !span.font_size.is_finite() || span.font_size <= 0.0 {
                    return Err(Error::Input(format!(
                        "span on page {} has font size {}",
                        page.index, span.font_size
                    )));
                }
            }
        }
    }
    Ok(())
}

/// Per-line classification, before paragraph grouping.
enum Entry {
    /// Paragraph candidate text
    Plain(Fragment),
    /// Already-final block
    Done(Block),
    /// List item awaiting its indent level
    ListItem {
        ordered: bool,
        number: Option<u32>,
        text: String,
        line: Line,
    },
    /// Run boundary (blank line); merges never cross it
    Break,
}

fn transform_page(page: &PageText, stats: &FontStats, options: &Options) -> Vec<Block> {
    let tables = accepted_tables(&page.lines);
    let mut entries: Vec<Entry> = Vec::with_capacity(page.lines.len());
    let mut i = 0usize;

    while i < page.lines.len() {
        if let Some((len, outcome)) = tables.iter().find_map(|(start, len, outcome)| {
            (*start == i).then(|| (*len, outcome.clone()))
        }) {
            entries.push(Entry::Break);
            entries.push(Entry::Done(Block::Table(outcome.table)));
            for line in outcome.leftovers {
                entries.push(Entry::Plain(Fragment::from_line(line)));
            }
            entries.push(Entry::Break);
            i += len;
            continue;
        }

        let line = &page.lines[i];
        i += 1;

        if line.is_blank() {
            entries.push(Entry::Break);
            continue;
        }

        if let Some(marker) = lists::parse_marker(&line.text()) {
            entries.push(Entry::ListItem {
                ordered: marker.ordered,
                number: marker.number,
                text: marker.rest,
                line: line.clone(),
            });
            continue;
        }

        if let Some(level) = headings::heading_level(line, stats, options.caps_to_headings) {
            entries.push(Entry::Break);
            entries.push(Entry::Done(Block::heading(level, line.clone())));
            entries.push(Entry::Break);
            continue;
        }

        entries.push(Entry::Plain(Fragment::from_line(line.clone())));
    }

    assign_list_indents(&mut entries);

    let mut blocks = group_entries(entries, options);

    if options.export_images {
        for (idx, image) in page.images.iter().enumerate() {
            let name = if image.name.is_empty() {
                ImageAsset::numbered_name(page.index, idx)
            } else {
                image.name.clone()
            };
            blocks.push(Block::ImageRef {
                path: format!("{}/{}", options.assets_dir(), name),
            });
        }
    }

    blocks
}

/// Run the table detector over a page and keep the candidates that built a
/// valid grid. Rejected candidates leave their lines to the later stages.
fn accepted_tables(lines: &[Line]) -> Vec<(usize, usize, table::TableOutcome)> {
    table::detect_table_runs(lines)
        .into_iter()
        .filter_map(|(start, len)| {
            table::build_table(&lines[start..start + len]).map(|outcome| (start, len, outcome))
        })
        .collect()
}

/// Map list-item left margins to nesting levels, page-wide.
fn assign_list_indents(entries: &mut [Entry]) {
    let list_lines: Vec<&Line> = entries
        .iter()
        .filter_map(|e| match e {
            Entry::ListItem { line, .. } => Some(line),
            _ => None,
        })
        .collect();
    if list_lines.is_empty() {
        return;
    }
    let levels = lists::indent_levels(&list_lines);
    let mut next = 0usize;
    for entry in entries.iter_mut() {
        if let Entry::ListItem { line, .. } = entry {
            let level = levels[next];
            next += 1;
            let bbox = line.bbox();
            let replacement = match std::mem::replace(entry, Entry::Break) {
                Entry::ListItem {
                    ordered,
                    number,
                    text,
                    line,
                } => Block::ListItem {
                    ordered,
                    indent_level: level,
                    number,
                    text,
                    lines: vec![line],
                    bbox,
                },
                _ => unreachable!(),
            };
            *entry = Entry::Done(replacement);
        }
    }
}

/// Collapse entries into final blocks: defragment plain runs, then turn
/// each fragment into a paragraph with math conversion applied.
fn group_entries(entries: Vec<Entry>, options: &Options) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut run: Vec<Fragment> = Vec::new();

    let flush = |run: &mut Vec<Fragment>, blocks: &mut Vec<Block>| {
        if run.is_empty() {
            return;
        }
        let fragments = if options.defragment_short {
            defrag::defragment(std::mem::take(run), options.orphan_max_len)
        } else {
            std::mem::take(run)
        };
        for fragment in fragments {
            if fragment.text.trim().is_empty() {
                continue;
            }
            blocks.push(paragraph_block(fragment));
        }
    };

    for entry in entries {
        match entry {
            Entry::Plain(fragment) => run.push(fragment),
            Entry::Break => flush(&mut run, &mut blocks),
            Entry::Done(block) => {
                flush(&mut run, &mut blocks);
                blocks.push(block);
            }
            Entry::ListItem { .. } => unreachable!("indents assigned before grouping"),
        }
    }
    flush(&mut run, &mut blocks);
    blocks
}

fn paragraph_block(fragment: Fragment) -> Block {
    let bbox = BBox::union_all(fragment.lines.iter().map(|l| l.bbox()));
    Block::Paragraph(Paragraph {
        inlines: math::convert_text(&fragment.text),
        lines: fragment.lines,
        bbox,
    })
}
