//! Re-cut a paragraph's runs so a text range maps to exactly one run
//!
//! Word processors split text into runs wherever formatting, spell checking
//! or edit history changed, so `${name}` typed in one go may be stored as
//! `"${"`, `"name"`, `"}"`. Isolating the range merges the pieces into the run
//! holding the first character, which keeps that run's formatting.

use tracing::trace;
use wordtemplate_document::editor::{remove_run, split_run};
use wordtemplate_document::Paragraph;

/// Make the byte range `start..=end` of the paragraph's visible text one run
///
/// Runs are cut at `start` and after `end`; runs in between are merged into
/// the first. The visible text never changes. Returns false and leaves the
/// runs as they were when the range does not lie inside the text.
pub fn isolate_range(paragraph: &mut Paragraph, start: usize, end: usize) -> bool {
    let len: usize = paragraph.runs.iter().map(|run| run.len()).sum();
    if start > end || end >= len {
        return false;
    }

    let mut start_found = false;

    'rescan: loop {
        let mut pos = 0;

        for i in 0..paragraph.runs.len() {
            let next = pos + paragraph.runs[i].len();

            // Run fully inside the range, after the start
            if start < pos && end >= next {
                merge_into_previous(paragraph, i);
                continue 'rescan;
            }

            if !start_found && start >= pos && start < next {
                start_found = true;
                if start > pos && split_run(paragraph, i, start - pos) {
                    continue 'rescan;
                }
            }

            if end >= pos && end < next {
                split_run(paragraph, i, end - pos + 1);
                if start < pos {
                    merge_into_previous(paragraph, i);
                }
                trace!(start, end, runs = paragraph.run_count(), "Isolated range");
                return true;
            }

            pos = next;
        }

        return false;
    }
}

fn merge_into_previous(paragraph: &mut Paragraph, index: usize) {
    let text = std::mem::take(&mut paragraph.runs[index].text);
    paragraph.runs[index - 1].text.push_str(&text);
    remove_run(paragraph, index);
}
