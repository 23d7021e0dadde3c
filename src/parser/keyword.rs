use std::sync::LazyLock;

use crate::ParseError;
use crate::syntax::{BinaryOperator, Operator, UnaryOperator};

/// Every operator spelled out in the input, longest first. Negation has no
/// spelling of its own.
pub static OPERATOR_KEYWORDS: LazyLock<Vec<(&'static str, Operator)>> =
  LazyLock::new(|| {
    let mut keywords: Vec<(&'static str, Operator)> = UnaryOperator::ALL
      .into_iter()
      .map(Operator::Unary)
      .chain(BinaryOperator::ALL.into_iter().map(Operator::Binary))
      .map(|op| (op.keyword(), op))
      .filter(|(keyword, _)| !keyword.is_empty())
      .collect();
    keywords.sort_by_key(|(keyword, _)| std::cmp::Reverse(keyword.len()));
    keywords
  });

/// One flat entry of a level, before containers are parsed.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
  Operator(Operator),
  Variable,
  Literal(String),
  /// Text of a parenthesized group or a comma-separated argument.
  Container(String),
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Keyword {
  Space,
  Operator(Operator),
  Variable,
}

/// Splits one level into tokens. Spaces are dropped.
pub fn tokenize(
  input: &str,
  variable: Option<&str>,
) -> Result<Vec<Token>, ParseError> {
  let mut tokens = Vec::new();
  let mut remaining = input;

  while !remaining.is_empty() {
    let mut matches: Vec<(&str, Keyword)> = Vec::new();
    if remaining.starts_with(char::is_whitespace) {
      matches.push((" ", Keyword::Space));
    }
    for &(keyword, op) in OPERATOR_KEYWORDS.iter() {
      if remaining.starts_with(keyword) {
        matches.push((keyword, Keyword::Operator(op)));
      }
    }
    if let Some(name) = variable
      && !name.is_empty()
      && remaining.starts_with(name)
    {
      matches.push((name, Keyword::Variable));
    }

    if matches.len() > 1 {
      return Err(ParseError::AmbiguousKeyword {
        input: remaining.to_string(),
        matches: matches.iter().map(|(k, _)| k.to_string()).collect(),
      });
    }

    if let Some((keyword, matched)) = matches.pop() {
      match matched {
        Keyword::Space => {
          let width = remaining.chars().next().map_or(1, char::len_utf8);
          remaining = &remaining[width..];
          continue;
        }
        Keyword::Operator(op) => tokens.push(Token::Operator(op)),
        Keyword::Variable => tokens.push(Token::Variable),
      }
      remaining = &remaining[keyword.len()..];
    } else if let Some(len) = literal_len(remaining) {
      tokens.push(Token::Literal(remaining[..len].to_string()));
      remaining = &remaining[len..];
    } else if let Some((content, len)) = container(remaining) {
      tokens.push(Token::Container(content.to_string()));
      remaining = &remaining[len..];
    } else {
      return Err(ParseError::UnexpectedInput {
        remaining: remaining.to_string(),
      });
    }
  }

  log::trace!("tokenized {input:?} into {tokens:?}");
  Ok(tokens)
}

/// Length of a leading numeric literal: digits with at most one `.` or
/// `/`. A `/` only belongs to the literal when a digit follows it.
fn literal_len(input: &str) -> Option<usize> {
  let bytes = input.as_bytes();
  let digit_at = |i: usize| bytes.get(i).is_some_and(u8::is_ascii_digit);
  if !(digit_at(0) || (bytes.first() == Some(&b'.') && digit_at(1))) {
    return None;
  }

  let mut separator = false;
  let mut end = 0;
  while end < bytes.len() {
    match bytes[end] {
      b'0'..=b'9' => end += 1,
      b'.' if !separator => {
        separator = true;
        end += 1;
      }
      b'/' if !separator && digit_at(end + 1) => {
        separator = true;
        end += 1;
      }
      _ => break,
    }
  }
  Some(end)
}

/// A group opened by `(` or `,`. It ends at the matching `)`, which is
/// consumed, or at a `,` on its own level, which starts the next group.
fn container(input: &str) -> Option<(&str, usize)> {
  let mut chars = input.char_indices();
  let (_, opener) = chars.next()?;
  if opener != '(' && opener != ',' {
    return None;
  }

  let mut depth = 1usize;
  for (i, c) in chars {
    match c {
      '(' => depth += 1,
      ')' => {
        depth -= 1;
        if depth == 0 {
          return Some((&input[1..i], i + 1));
        }
      }
      ',' if depth == 1 => return Some((&input[1..i], i)),
      _ => {}
    }
  }
  Some((&input[1..], input.len()))
}
