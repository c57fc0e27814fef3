//! mmCIF reader.
//!
//! Reads the first data block of a CIF 1.1 / mmCIF file into a
//! [`Document`]. Items `_category.item` become columns of `category`;
//! a tag without a dot lands in the unnamed category `""`. Additional data
//! blocks are ignored with a warning.

mod lexer;

use std::collections::HashSet;
use std::path::Path;

use mxmeta_model::{Category, CellValue, Column, Document};

use crate::encoding::read_text;
use crate::error::{IngestError, Result};
use lexer::{Token, TokenKind, tokenize};

/// Parses mmCIF text.
pub fn parse_cif(text: &str) -> Result<Document> {
    let tokens = tokenize(text)?;
    let mut tokens = tokens.into_iter().peekable();

    let block = match tokens.next() {
        None => return Err(IngestError::EmptySource),
        Some(Token {
            kind: TokenKind::DataBlock(name),
            ..
        }) => name,
        Some(token) => return Err(IngestError::NoDataBlock { line: token.line }),
    };

    let mut builder = BlockBuilder::default();
    while let Some(token) = tokens.next() {
        match token.kind {
            TokenKind::DataBlock(name) => {
                tracing::warn!(
                    block = %block,
                    ignored = %name,
                    line = token.line,
                    "ignoring additional data block"
                );
                break;
            }
            TokenKind::Tag(tag) => {
                let next = tokens.next_if(|next| matches!(next.kind, TokenKind::Value(_)));
                let Some(Token {
                    kind: TokenKind::Value(value),
                    ..
                }) = next
                else {
                    return Err(IngestError::MissingValue {
                        line: token.line,
                        tag: format!("_{tag}"),
                    });
                };
                builder.push_item(&tag, value, token.line)?;
            }
            TokenKind::Value(value) => {
                let value = match value {
                    CellValue::Present(value) => value,
                    CellValue::NotPresent => ".".to_string(),
                    CellValue::Unknown => "?".to_string(),
                };
                return Err(IngestError::ValueWithoutTag {
                    line: token.line,
                    value,
                });
            }
            TokenKind::Loop => {
                let mut tags = Vec::new();
                while let Some(Token {
                    kind: TokenKind::Tag(tag),
                    ..
                }) = tokens.next_if(|next| matches!(next.kind, TokenKind::Tag(_)))
                {
                    tags.push(tag);
                }
                let mut values = Vec::new();
                while let Some(Token {
                    kind: TokenKind::Value(value),
                    ..
                }) = tokens.next_if(|next| matches!(next.kind, TokenKind::Value(_)))
                {
                    values.push(value);
                }
                builder.push_loop(&tags, values, token.line)?;
            }
        }
    }

    let document = builder.finish(block)?;
    tracing::debug!(
        block = document.name(),
        categories = document.categories().len(),
        "parsed mmCIF data block"
    );
    Ok(document)
}

/// Reads and parses an mmCIF file.
pub fn read_cif(path: &Path) -> Result<Document> {
    parse_cif(&read_text(path)?)
}

fn split_tag(tag: &str) -> (&str, &str) {
    tag.split_once('.').unwrap_or(("", tag))
}

#[derive(Default)]
struct BlockBuilder {
    /// Categories in first-seen order, each with its columns.
    categories: Vec<(String, Vec<Column>)>,
    seen: HashSet<String>,
}

impl BlockBuilder {
    fn columns_mut(&mut self, category: &str) -> &mut Vec<Column> {
        let index = match self
            .categories
            .iter()
            .position(|(name, _)| name.eq_ignore_ascii_case(category))
        {
            Some(index) => index,
            None => {
                self.categories.push((category.to_string(), Vec::new()));
                self.categories.len() - 1
            }
        };
        &mut self.categories[index].1
    }

    fn claim(&mut self, tag: &str, line: usize) -> Result<()> {
        if self.seen.insert(tag.to_ascii_lowercase()) {
            Ok(())
        } else {
            Err(IngestError::DuplicateItem {
                line,
                tag: format!("_{tag}"),
            })
        }
    }

    fn push_item(&mut self, tag: &str, value: CellValue, line: usize) -> Result<()> {
        self.claim(tag, line)?;
        let (category, item) = split_tag(tag);
        self.columns_mut(category).push(Column::new(item, vec![value]));
        Ok(())
    }

    fn push_loop(&mut self, tags: &[String], values: Vec<CellValue>, line: usize) -> Result<()> {
        let Some(first) = tags.first() else {
            return Err(IngestError::EmptyLoop { line });
        };
        let (category, _) = split_tag(first);
        if let Some(other) = tags
            .iter()
            .map(|tag| split_tag(tag).0)
            .find(|other| !other.eq_ignore_ascii_case(category))
        {
            return Err(IngestError::MixedLoop {
                line,
                expected: category.to_string(),
                found: other.to_string(),
            });
        }
        if values.len() % tags.len() != 0 {
            return Err(IngestError::LoopMismatch {
                line,
                columns: tags.len(),
                values: values.len(),
            });
        }
        for tag in tags {
            self.claim(tag, line)?;
        }

        let width = tags.len();
        let mut cells: Vec<Vec<CellValue>> =
            vec![Vec::with_capacity(values.len() / width); width];
        for (index, value) in values.into_iter().enumerate() {
            cells[index % width].push(value);
        }
        let columns = self.columns_mut(category);
        for (tag, cells) in tags.iter().zip(cells) {
            columns.push(Column::new(split_tag(tag).1, cells));
        }
        Ok(())
    }

    fn finish(self, block: String) -> Result<Document> {
        let categories = self
            .categories
            .into_iter()
            .map(|(name, columns)| Category::new(name, columns))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Document::new(block, categories))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mxmeta_model::{CategoryView, ValueKind};

    const SAMPLE: &str = r"data_1ABC
#
_entry.id   1ABC
_cell.length_a 50.10
_cell.length_b 60.20
#
loop_
_reflns_shell.d_res_high
_reflns_shell.percent_possible_all
_reflns_shell.pdbx_diffrn_id
3.00 99.5 1
2.50 ?    1
2.10 .    1
";

    #[test]
    fn reads_pairs_and_loops() {
        let document = parse_cif(SAMPLE).unwrap();
        assert_eq!(document.name(), "1ABC");
        assert_eq!(document.column("cell.length_b").value_at(0), Some("60.20"));
        let shells = document.category("reflns_shell");
        assert_eq!(shells.row_count(), 3);
        assert_eq!(
            shells.column("percent_possible_all").kind_at(1),
            Some(ValueKind::Unknown)
        );
        assert_eq!(
            shells.column("percent_possible_all").kind_at(2),
            Some(ValueKind::NotPresent)
        );
    }

    #[test]
    fn loop_value_count_must_fit() {
        let err = parse_cif("data_x\nloop_\n_a.b\n_a.c\n1 2 3\n").unwrap_err();
        assert!(matches!(
            err,
            IngestError::LoopMismatch {
                columns: 2,
                values: 3,
                ..
            }
        ));
    }

    #[test]
    fn structural_errors() {
        assert!(matches!(parse_cif("  # nothing\n"), Err(IngestError::EmptySource)));
        assert!(matches!(
            parse_cif("_cell.length_a 1\n"),
            Err(IngestError::NoDataBlock { line: 1 })
        ));
        assert!(matches!(
            parse_cif("data_x\n_a.b 1\n_A.B 2\n"),
            Err(IngestError::DuplicateItem { line: 3, .. })
        ));
        assert!(matches!(
            parse_cif("data_x\n_a.b 1 2\n"),
            Err(IngestError::ValueWithoutTag { line: 2, .. })
        ));
        assert!(matches!(
            parse_cif("data_x\n_a.b\n_a.c 1\n"),
            Err(IngestError::MissingValue { line: 2, .. })
        ));
        assert!(matches!(
            parse_cif("data_x\nloop_\n_a.b\n_c.d\n1 2\n"),
            Err(IngestError::MixedLoop { .. })
        ));
        assert!(matches!(
            parse_cif("data_x\nloop_\n1 2\n"),
            Err(IngestError::EmptyLoop { line: 2 })
        ));
    }

    #[test]
    fn pair_and_loop_of_one_category_must_align() {
        let err = parse_cif("data_x\n_a.b 1\nloop_\n_a.c\n1 2\n").unwrap_err();
        assert!(matches!(err, IngestError::Model(_)));
    }

    #[test]
    fn only_first_block_is_read() {
        let document = parse_cif("data_one\n_a.b 1\ndata_two\n_a.b 2\n").unwrap();
        assert_eq!(document.name(), "one");
        assert_eq!(document.column("a.b").value_at(0), Some("1"));
    }

    #[test]
    fn undotted_tags_use_unnamed_category() {
        let document = parse_cif("data_x\n_symmetry_space_group_name_H-M 'P 21 21 21'\n").unwrap();
        assert_eq!(
            document
                .category("")
                .column("symmetry_space_group_name_H-M")
                .value_at(0),
            Some("P 21 21 21")
        );
    }
}
