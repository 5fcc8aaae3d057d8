//! Diff-row generator: marked-up old/new rows for one non-equal delta.
//!
//! Change deltas are diffed again at word (or char) granularity across the
//! whole chunk, so a change that moves text between lines is still
//! highlighted. Insert and delete deltas become single-sided rows with the
//! whole line marked. Source text is escaped, so rows must be decoded with
//! [`diffm_markup::extract_escaped`].

use diffm_markup::{escape, push_wrapped, wrap};
use diffm_types::{InlineGranularity, StyleKind};
use similar::{DiffTag, TextDiff};

/// One aligned row of a delta.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiffRow {
    pub old_line: String,
    pub new_line: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RowGenerator {
    granularity: InlineGranularity,
}

impl RowGenerator {
    pub fn new(granularity: InlineGranularity) -> Self {
        Self { granularity }
    }

    pub fn granularity(&self) -> InlineGranularity {
        self.granularity
    }

    /// Rows for a delta with `source` old lines and `target` new lines.
    ///
    /// Produces `max(source.len(), target.len())` rows; the shorter side is
    /// padded with empty lines.
    pub fn generate(&self, source: &[String], target: &[String]) -> Vec<DiffRow> {
        match (source.is_empty(), target.is_empty()) {
            (true, true) => Vec::new(),
            (true, false) => target
                .iter()
                .map(|line| DiffRow {
                    old_line: String::new(),
                    new_line: wrap(StyleKind::Added, &escape(line)),
                })
                .collect(),
            (false, true) => source
                .iter()
                .map(|line| DiffRow {
                    old_line: wrap(StyleKind::Removed, &escape(line)),
                    new_line: String::new(),
                })
                .collect(),
            (false, false) => self.inline_rows(source, target),
        }
    }

    fn inline_rows(&self, source: &[String], target: &[String]) -> Vec<DiffRow> {
        let old = source.join("\n");
        let new = target.join("\n");
        let text_diff = match self.granularity {
            InlineGranularity::Word => TextDiff::from_words(old.as_str(), new.as_str()),
            InlineGranularity::Char => TextDiff::from_chars(old.as_str(), new.as_str()),
        };

        let mut old_rows = RowBuilder::default();
        let mut new_rows = RowBuilder::default();
        for op in text_diff.ops() {
            let (tag, old_range, new_range) = op.as_tag_tuple();
            let old_text = text_diff.old_slices()[old_range].concat();
            let new_text = text_diff.new_slices()[new_range].concat();
            match tag {
                DiffTag::Equal => {
                    old_rows.push(None, &old_text);
                    new_rows.push(None, &new_text);
                }
                DiffTag::Delete => old_rows.push(Some(StyleKind::Removed), &old_text),
                DiffTag::Insert => new_rows.push(Some(StyleKind::Added), &new_text),
                DiffTag::Replace => {
                    old_rows.push(Some(StyleKind::Removed), &old_text);
                    new_rows.push(Some(StyleKind::Added), &new_text);
                }
            }
        }

        let mut old_rows = old_rows.finish();
        let mut new_rows = new_rows.finish();
        let count = old_rows.len().max(new_rows.len());
        old_rows.resize(count, String::new());
        new_rows.resize(count, String::new());

        old_rows
            .into_iter()
            .zip(new_rows)
            .map(|(old_line, new_line)| DiffRow { old_line, new_line })
            .collect()
    }
}

/// Accumulates marked-up text for one side, splitting rows at newlines.
/// A styled piece that spans a newline is closed and reopened per row.
#[derive(Default)]
struct RowBuilder {
    rows: Vec<String>,
    current: String,
}

impl RowBuilder {
    fn push(&mut self, style: Option<StyleKind>, text: &str) {
        let mut pieces = text.split('\n');
        if let Some(first) = pieces.next() {
            self.append(style, first);
        }
        for piece in pieces {
            self.rows.push(std::mem::take(&mut self.current));
            self.append(style, piece);
        }
    }

    fn append(&mut self, style: Option<StyleKind>, text: &str) {
        let text = escape(text);
        let text = text.as_ref();
        match style {
            Some(kind) => push_wrapped(&mut self.current, kind, text),
            None => self.current.push_str(text),
        }
    }

    fn finish(mut self) -> Vec<String> {
        self.rows.push(self.current);
        self.rows
    }
}

#[cfg(test)]
mod tests {
    use diffm_markup::extract_escaped as extract;

    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    const RED: &str = r#"<annotation color="red">"#;
    const GREEN: &str = r#"<annotation color="green">"#;
    const CLOSE: &str = "</annotation>";

    #[test]
    fn insert_rows_are_single_sided() {
        let rows = RowGenerator::default().generate(&[], &lines(&["one", "two"]));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].old_line, "");
        assert_eq!(rows[0].new_line, format!("{GREEN}one{CLOSE}"));
        assert_eq!(rows[1].new_line, format!("{GREEN}two{CLOSE}"));
    }

    #[test]
    fn delete_rows_are_single_sided() {
        let rows = RowGenerator::default().generate(&lines(&["gone"]), &[]);
        assert_eq!(
            rows,
            vec![DiffRow {
                old_line: format!("{RED}gone{CLOSE}"),
                new_line: String::new(),
            }]
        );
    }

    #[test]
    fn empty_lines_are_not_wrapped() {
        let rows = RowGenerator::default().generate(&[], &lines(&[""]));
        assert_eq!(rows[0].new_line, "");
    }

    #[test]
    fn word_change_marks_only_the_changed_word() {
        let rows = RowGenerator::default().generate(&lines(&["hello world"]), &lines(&["hello universe"]));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].old_line, format!("hello {RED}world{CLOSE}"));
        assert_eq!(rows[0].new_line, format!("hello {GREEN}universe{CLOSE}"));
    }

    #[test]
    fn char_granularity_marks_characters() {
        let generator = RowGenerator::new(InlineGranularity::Char);
        let rows = generator.generate(&lines(&["cat"]), &lines(&["cut"]));
        let old = extract(&rows[0].old_line);
        let new = extract(&rows[0].new_line);
        assert_eq!(old.text, "cat");
        assert_eq!(new.text, "cut");
        assert_eq!(&old.text[old.ranges[0].range()], "a");
        assert_eq!(&new.text[new.ranges[0].range()], "u");
    }

    #[test]
    fn uneven_change_pads_shorter_side() {
        let rows = RowGenerator::default().generate(
            &lines(&["first line"]),
            &lines(&["first line", "second line", "third"]),
        );
        assert_eq!(rows.len(), 3);
        assert_eq!(extract(&rows[0].old_line).text, "first line");
        assert_eq!(rows[1].old_line, "");
        assert_eq!(rows[2].old_line, "");
        assert_eq!(extract(&rows[1].new_line).text, "second line");
        assert_eq!(extract(&rows[2].new_line).text, "third");
    }

    #[test]
    fn every_row_extracts_to_its_source_line() {
        let source = lines(&["let a = 1;", "let b = 2;"]);
        let target = lines(&["let a = 10;", "let c = 2;", "done();"]);
        let rows = RowGenerator::default().generate(&source, &target);

        let old: Vec<String> = rows.iter().map(|r| extract(&r.old_line).text).collect();
        let new: Vec<String> = rows.iter().map(|r| extract(&r.new_line).text).collect();
        assert_eq!(old, vec!["let a = 1;", "let b = 2;", ""]);
        assert_eq!(new, vec!["let a = 10;", "let c = 2;", "done();"]);
    }

    #[test]
    fn styled_ranges_never_cross_rows() {
        let rows = RowGenerator::default().generate(&lines(&["x", "y"]), &lines(&["p", "q"]));
        for row in &rows {
            let old = extract(&row.old_line);
            let new = extract(&row.new_line);
            assert!(!old.text.contains(RED) && !new.text.contains(GREEN));
            assert!(old.ranges.iter().all(|r| r.end <= old.text.len()));
            assert!(new.ranges.iter().all(|r| r.end <= new.text.len()));
        }
    }

    #[test]
    fn tag_literals_in_source_are_escaped() {
        let source = lines(&[r#"let s = "<annotation color="red">b</annotation>";"#]);
        let rows = RowGenerator::default().generate(&source, &[]);
        let old = extract(&rows[0].old_line);
        assert_eq!(old.text, source[0]);
        assert_eq!(old.ranges.len(), 1);
        assert_eq!(old.ranges[0].range(), 0..source[0].len());
    }

    #[test]
    fn changed_lines_with_markup_characters_round_trip() {
        let source = lines(&["a < b && c", "x </annotation> y"]);
        let target = lines(&["a <= b && c", "x </annotation> z"]);
        let rows = RowGenerator::default().generate(&source, &target);
        let old: Vec<String> = rows.iter().map(|r| extract(&r.old_line).text).collect();
        let new: Vec<String> = rows.iter().map(|r| extract(&r.new_line).text).collect();
        assert_eq!(old, source);
        assert_eq!(new, target);
    }

    #[test]
    fn nothing_to_generate() {
        assert!(RowGenerator::default().generate(&[], &[]).is_empty());
    }
}
