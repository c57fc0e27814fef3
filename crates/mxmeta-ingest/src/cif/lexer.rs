//! Tokenizer for the STAR/CIF 1.1 syntax used by mmCIF files.

use mxmeta_model::CellValue;

use crate::error::{IngestError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    DataBlock(String),
    Loop,
    Tag(String),
    Value(CellValue),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    /// 1-based source line.
    pub line: usize,
}

/// Splits `text` into tokens.
///
/// Unquoted `?` and `.` become [`CellValue::Unknown`] and
/// [`CellValue::NotPresent`]; quoted values are always present.
pub(crate) fn tokenize(text: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut lines = text.lines().enumerate().map(|(index, line)| (index + 1, line));

    while let Some((line_no, line)) = lines.next() {
        if let Some(first) = line.strip_prefix(';') {
            let mut content = first.trim_end().to_string();
            let mut closed = false;
            for (_, next) in lines.by_ref() {
                if next.starts_with(';') {
                    closed = true;
                    break;
                }
                content.push('\n');
                content.push_str(next.trim_end());
            }
            if !closed {
                return Err(IngestError::UnterminatedTextField { line: line_no });
            }
            tokens.push(Token {
                kind: TokenKind::Value(CellValue::Present(content.trim().to_string())),
                line: line_no,
            });
            continue;
        }
        tokenize_line(line, line_no, &mut tokens)?;
    }
    Ok(tokens)
}

fn tokenize_line(line: &str, line_no: usize, tokens: &mut Vec<Token>) -> Result<()> {
    let mut rest = line;
    loop {
        rest = rest.trim_start();
        let Some(first) = rest.chars().next() else {
            return Ok(());
        };
        match first {
            '#' => return Ok(()),
            '\'' | '"' => {
                let (value, remaining) = quoted(rest, first, line_no)?;
                tokens.push(Token {
                    kind: TokenKind::Value(CellValue::Present(value.to_string())),
                    line: line_no,
                });
                rest = remaining;
            }
            _ => {
                let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
                let (word, remaining) = rest.split_at(end);
                tokens.push(Token {
                    kind: classify(word, line_no)?,
                    line: line_no,
                });
                rest = remaining;
            }
        }
    }
}

/// A quoted string closes at a matching quote followed by whitespace or the
/// end of the line, so `'it's'` is a single value.
fn quoted(text: &str, quote: char, line_no: usize) -> Result<(&str, &str)> {
    let body = &text[quote.len_utf8()..];
    let mut search_from = 0;
    while let Some(offset) = body[search_from..].find(quote) {
        let close = search_from + offset;
        let after = &body[close + quote.len_utf8()..];
        if after.is_empty() || after.starts_with(char::is_whitespace) {
            return Ok((&body[..close], after));
        }
        search_from = close + quote.len_utf8();
    }
    Err(IngestError::UnterminatedQuote { line: line_no })
}

fn classify(word: &str, line_no: usize) -> Result<TokenKind> {
    let lower = word.to_ascii_lowercase();
    if lower == "loop_" {
        return Ok(TokenKind::Loop);
    }
    if lower.starts_with("data_") {
        return Ok(TokenKind::DataBlock(word["data_".len()..].to_string()));
    }
    if lower.starts_with("save_") || lower == "global_" || lower == "stop_" {
        return Err(IngestError::Unsupported {
            line: line_no,
            construct: word.to_string(),
        });
    }
    if let Some(tag) = word.strip_prefix('_') {
        return Ok(TokenKind::Tag(tag.to_string()));
    }
    Ok(TokenKind::Value(match word {
        "?" => CellValue::Unknown,
        "." => CellValue::NotPresent,
        _ => CellValue::Present(word.to_string()),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        tokenize(text)
            .unwrap()
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn placeholders_only_when_unquoted() {
        assert_eq!(
            kinds("_a.b ? _a.c . _a.d '?'"),
            vec![
                TokenKind::Tag("a.b".into()),
                TokenKind::Value(CellValue::Unknown),
                TokenKind::Tag("a.c".into()),
                TokenKind::Value(CellValue::NotPresent),
                TokenKind::Tag("a.d".into()),
                TokenKind::Value(CellValue::present("?")),
            ]
        );
    }

    #[test]
    fn embedded_quote_does_not_close() {
        assert_eq!(
            kinds("_struct.title 'it's a helix'  # trailing"),
            vec![
                TokenKind::Tag("struct.title".into()),
                TokenKind::Value(CellValue::present("it's a helix")),
            ]
        );
    }

    #[test]
    fn text_field_spans_lines() {
        let tokens = tokenize("_struct.title\n;First line\n  second line\n;\n").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(
            tokens[1].kind,
            TokenKind::Value(CellValue::present("First line\n  second line"))
        );
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn unterminated_constructs_fail() {
        assert!(matches!(
            tokenize("_a.b 'open"),
            Err(IngestError::UnterminatedQuote { line: 1 })
        ));
        assert!(matches!(
            tokenize("_a.b\n;never closed\n"),
            Err(IngestError::UnterminatedTextField { line: 2 })
        ));
    }

    #[test]
    fn reserved_words() {
        assert_eq!(
            kinds("data_1ABC\nLOOP_"),
            vec![TokenKind::DataBlock("1ABC".into()), TokenKind::Loop]
        );
        assert!(matches!(
            tokenize("save_frame"),
            Err(IngestError::Unsupported { .. })
        ));
    }
}
