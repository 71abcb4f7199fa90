//! Reader for the brace-delimited definition format.

use std::fs;
use std::iter::Peekable;
use std::path::Path;
use std::str::Chars;

use crate::error::{GovMapError, Result};

use super::node::Node;

const UTF8_BOM: char = '\u{feff}';

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Word(String),
    Quoted(String),
    Assign,
    Open,
    Close,
}

#[derive(Debug)]
struct Spanned {
    token: Token,
    line: usize,
}

/// Read a definition file from disk and parse it.
///
/// Files that are not valid UTF-8 are read as Latin-1, which is what the
/// game ships most of its data files in.
pub fn load(path: &Path) -> Result<Node> {
    if !path.exists() {
        return Err(GovMapError::SourceNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = fs::read(path)?;
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => e.into_bytes().iter().map(|&b| b as char).collect(),
    };
    parse(&text)
}

/// Parse document text into a root block with an empty key.
pub fn parse(input: &str) -> Result<Node> {
    let input = input.strip_prefix(UTF8_BOM).unwrap_or(input);
    let tokens = tokenize(input)?;
    let mut tokens = tokens.into_iter().peekable();
    let children = parse_block(&mut tokens, None)?;
    Ok(Node::block("", children))
}

fn tokenize(input: &str) -> Result<Vec<Spanned>> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();
    let mut line = 1;

    while let Some(c) = chars.next() {
        match c {
            '\n' => line += 1,
            c if c.is_whitespace() => {}
            '#' => {
                // comment runs to end of line
                for ch in chars.by_ref() {
                    if ch == '\n' {
                        line += 1;
                        break;
                    }
                }
            }
            '{' => tokens.push(Spanned {
                token: Token::Open,
                line,
            }),
            '}' => tokens.push(Spanned {
                token: Token::Close,
                line,
            }),
            '=' | '<' | '>' => {
                // comparison operators in triggers are kept as plain assignments
                if chars.peek() == Some(&'=') {
                    chars.next();
                }
                tokens.push(Spanned {
                    token: Token::Assign,
                    line,
                });
            }
            '"' => {
                let start = line;
                let text = read_quoted(&mut chars, &mut line).ok_or(GovMapError::DocumentSyntax {
                    line: start,
                    message: "unterminated string".to_string(),
                })?;
                tokens.push(Spanned {
                    token: Token::Quoted(text),
                    line: start,
                });
            }
            c => {
                let mut word = String::from(c);
                while let Some(&next) = chars.peek() {
                    if next.is_whitespace() || "{}=<>\"#".contains(next) {
                        break;
                    }
                    word.push(next);
                    chars.next();
                }
                tokens.push(Spanned {
                    token: Token::Word(word),
                    line,
                });
            }
        }
    }

    Ok(tokens)
}

fn read_quoted(chars: &mut Peekable<Chars<'_>>, line: &mut usize) -> Option<String> {
    let mut text = String::new();
    for ch in chars.by_ref() {
        match ch {
            '"' => return Some(text),
            '\n' => {
                *line += 1;
                text.push(ch);
            }
            _ => text.push(ch),
        }
    }
    None
}

/// Parse entries until the matching `}` (or end of input for the root).
fn parse_block<I>(tokens: &mut Peekable<I>, opened_at: Option<usize>) -> Result<Vec<Node>>
where
    I: Iterator<Item = Spanned>,
{
    let mut children = Vec::new();

    loop {
        let Some(Spanned { token, line }) = tokens.next() else {
            return match opened_at {
                Some(open_line) => Err(GovMapError::DocumentSyntax {
                    line: open_line,
                    message: "block is never closed".to_string(),
                }),
                None => Ok(children),
            };
        };

        match token {
            Token::Close => {
                return match opened_at {
                    Some(_) => Ok(children),
                    None => Err(GovMapError::DocumentSyntax {
                        line,
                        message: "unexpected '}'".to_string(),
                    }),
                };
            }
            Token::Open => {
                let nested = parse_block(tokens, Some(line))?;
                children.push(Node::block("", nested));
            }
            Token::Assign => {
                return Err(GovMapError::DocumentSyntax {
                    line,
                    message: "'=' without a key".to_string(),
                });
            }
            Token::Word(key) | Token::Quoted(key) => {
                if !matches!(tokens.peek(), Some(Spanned { token: Token::Assign, .. })) {
                    // bare list item
                    children.push(Node::text(key, ""));
                    continue;
                }
                tokens.next();
                children.push(parse_value(tokens, key, line)?);
            }
        }
    }
}

fn parse_value<I>(tokens: &mut Peekable<I>, key: String, line: usize) -> Result<Node>
where
    I: Iterator<Item = Spanned>,
{
    match tokens.next() {
        Some(Spanned {
            token: Token::Word(text) | Token::Quoted(text),
            ..
        }) => Ok(Node::text(key, text)),
        Some(Spanned {
            token: Token::Open,
            line: open_line,
        }) => {
            let nested = parse_block(tokens, Some(open_line))?;
            Ok(Node::block(key, nested))
        }
        Some(Spanned { line, .. }) => Err(GovMapError::DocumentSyntax {
            line,
            message: format!("expected a value after '{key} ='"),
        }),
        None => Err(GovMapError::DocumentSyntax {
            line,
            message: format!("expected a value after '{key} ='"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn syntax_line(result: Result<Node>) -> usize {
        match result {
            Err(GovMapError::DocumentSyntax { line, .. }) => line,
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_assignments_and_blocks() {
        let root = parse(
            r#"
            # mapping between governments
            link = {
                vic = absolute_monarchy
                hoi = "absolute_monarchy"
                political_reforms = 0.5
            }
            "#,
        )
        .unwrap();

        assert_eq!(root.key(), "");
        let link = root.child("link").unwrap();
        assert_eq!(link.children().len(), 3);
        assert_eq!(link.child("hoi").and_then(|n| n.leaf()), Some("absolute_monarchy"));
        assert_eq!(
            link.child("political_reforms").and_then(|n| n.leaf()),
            Some("0.5")
        );
    }

    #[test]
    fn test_parse_keeps_declaration_order() {
        let root = parse("slavery = { next_step_only = yes yes_slavery = { } no_slavery = { } }")
            .unwrap();
        let keys: Vec<_> = root
            .child("slavery")
            .unwrap()
            .children()
            .iter()
            .map(|n| n.key())
            .collect();
        assert_eq!(keys, vec!["next_step_only", "yes_slavery", "no_slavery"]);
    }

    #[test]
    fn test_parse_bare_list_items() {
        let root = parse("colors = { 10 20 30 }").unwrap();
        let colors = root.child("colors").unwrap();
        let keys: Vec<_> = colors.children().iter().map(|n| n.key()).collect();
        assert_eq!(keys, vec!["10", "20", "30"]);
        assert_eq!(colors.children()[0].leaf(), Some(""));
    }

    #[test]
    fn test_parse_comparison_operators_as_assignment() {
        let root = parse("allow = { literacy >= 0.3 revolt_percentage < 0.1 }").unwrap();
        let allow = root.child("allow").unwrap();
        assert_eq!(allow.child("literacy").and_then(|n| n.leaf()), Some("0.3"));
        assert_eq!(
            allow.child("revolt_percentage").and_then(|n| n.leaf()),
            Some("0.1")
        );
    }

    #[test]
    fn test_parse_strips_bom_and_comments() {
        let root = parse("\u{feff}a = 1 # trailing\n# full line\nb = 2").unwrap();
        assert_eq!(root.children().len(), 2);
        assert_eq!(root.child("b").and_then(|n| n.leaf()), Some("2"));
    }

    #[test]
    fn test_parse_empty_input() {
        let root = parse("").unwrap();
        assert!(root.children().is_empty());
    }

    #[test]
    fn test_unclosed_block_reports_opening_line() {
        assert_eq!(syntax_line(parse("a = 1\nlink = {\nvic = x\n")), 2);
    }

    #[test]
    fn test_stray_close_brace() {
        assert_eq!(syntax_line(parse("a = 1\n}\n")), 2);
    }

    #[test]
    fn test_missing_value() {
        assert_eq!(syntax_line(parse("link = { vic = }")), 1);
        assert_eq!(syntax_line(parse("\n\nvic =")), 3);
    }

    #[test]
    fn test_unterminated_string() {
        assert_eq!(syntax_line(parse("a = 1\nname = \"open")), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load(&dir.path().join("missing.txt"));
        assert!(matches!(result, Err(GovMapError::SourceNotFound { .. })));
    }

    #[test]
    fn test_load_latin1_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("issues.txt");
        let mut file = fs::File::create(&path).unwrap();
        // "name = Mérida" in Latin-1
        file.write_all(b"name = M\xe9rida\n").unwrap();

        let root = load(&path).unwrap();
        assert_eq!(root.child("name").and_then(|n| n.leaf()), Some("Mérida"));
    }
}
