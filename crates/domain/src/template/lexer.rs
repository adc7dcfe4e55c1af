//! Splits template source into text runs and `{{ }}` tags, then applies
//! whitespace control and standalone-line stripping.

use super::TemplateError;

/// Marker right after the opening braces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Sigil {
    /// `{{path}}`
    None,
    /// `{{{path}}}`
    Triple,
    /// `{{& path}}`
    Ampersand,
    /// `{{#helper arg}}`
    Open,
    /// `{{/helper}}`
    Close,
    /// `{{! comment }}` and `{{!-- comment --}}`
    Comment,
    /// Partials, inverse sections, decorators
    Unsupported(char),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Tag {
    pub sigil: Sigil,
    pub body: String,
    pub line: usize,
    pub strip_before: bool,
    pub strip_after: bool,
}

impl Tag {
    pub fn is_else(&self) -> bool {
        self.sigil == Sigil::None && self.body == "else"
    }

    /// Tags that vanish together with their line when alone on it
    fn may_stand_alone(&self) -> bool {
        matches!(self.sigil, Sigil::Open | Sigil::Close | Sigil::Comment) || self.is_else()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Token {
    Text(String),
    Tag(Tag),
}

/// Tokenizes `source` with whitespace handling applied.
pub(super) fn tokenize(source: &str) -> Result<Vec<Token>, TemplateError> {
    let mut tokens = scan(source)?;
    strip_standalone_lines(&mut tokens);
    apply_whitespace_control(&mut tokens);
    tokens.retain(|token| !matches!(token, Token::Text(text) if text.is_empty()));
    Ok(tokens)
}

fn scan(source: &str) -> Result<Vec<Token>, TemplateError> {
    let mut tokens = Vec::new();
    let mut rest = source;
    let mut line = 1;

    while let Some(start) = rest.find("{{") {
        let text = &rest[..start];
        line += text.matches('\n').count();
        if !text.is_empty() {
            tokens.push(Token::Text(text.to_string()));
        }

        let after_open = &rest[start..];
        let (tag, consumed) = scan_tag(after_open, line)?;
        line += after_open[..consumed].matches('\n').count();
        tokens.push(Token::Tag(tag));
        rest = &after_open[consumed..];
    }

    if !rest.is_empty() {
        tokens.push(Token::Text(rest.to_string()));
    }
    Ok(tokens)
}

/// Scans one tag at the start of `input` (which begins with `{{`).
/// Returns the tag and the number of bytes consumed.
fn scan_tag(input: &str, line: usize) -> Result<(Tag, usize), TemplateError> {
    let triple = input.starts_with("{{{");
    let mut pos = if triple { 3 } else { 2 };

    let strip_before = input[pos..].starts_with('~');
    if strip_before {
        pos += 1;
    }

    let inner_start = pos;
    let long_comment = !triple && input[inner_start..].starts_with("!--");

    let (close_at, consumed) = if long_comment {
        find_comment_end(input, inner_start + 3).ok_or(TemplateError::UnclosedTag { line })?
    } else {
        let closer = if triple { "}}}" } else { "}}" };
        let at = input[inner_start..]
            .find(closer)
            .map(|i| i + inner_start)
            .ok_or(TemplateError::UnclosedTag { line })?;
        (at, at + closer.len())
    };

    let mut inner = &input[inner_start..close_at];
    let mut strip_after = false;
    if let Some(stripped) = inner.strip_suffix('~') {
        inner = stripped;
        strip_after = true;
    }

    let (sigil, body) = if triple {
        (Sigil::Triple, inner)
    } else if long_comment {
        let text = inner.strip_suffix("--").unwrap_or(inner);
        (Sigil::Comment, &text[3..])
    } else {
        match inner.chars().next() {
            Some('!') => (Sigil::Comment, &inner[1..]),
            Some('#') => (Sigil::Open, &inner[1..]),
            Some('/') => (Sigil::Close, &inner[1..]),
            Some('&') => (Sigil::Ampersand, &inner[1..]),
            Some(c @ ('>' | '^' | '*')) => (Sigil::Unsupported(c), &inner[1..]),
            _ => (Sigil::None, inner),
        }
    };

    Ok((
        Tag {
            sigil,
            body: body.trim().to_string(),
            line,
            strip_before,
            strip_after,
        },
        consumed,
    ))
}

/// Finds the `--}}` (or `--~}}`) closing a long comment. Returns the offset
/// where the closing braces start and the offset just past them.
fn find_comment_end(input: &str, from: usize) -> Option<(usize, usize)> {
    let mut search = from;
    while let Some(offset) = input[search..].find("}}") {
        let at = search + offset;
        let before = &input[from..at];
        if before.ends_with("--") || before.ends_with("--~") {
            return Some((at, at + 2));
        }
        search = at + 1;
    }
    None
}

fn is_inline_blank(text: &str) -> bool {
    text.chars().all(|c| c == ' ' || c == '\t' || c == '\r')
}

/// A standalone tag is alone on its line apart from spaces and tabs. The
/// decision is made against the unmodified neighbours of every tag first,
/// so consecutive standalone lines are all recognised.
fn strip_standalone_lines(tokens: &mut [Token]) {
    let standalone: Vec<usize> = (0..tokens.len())
        .filter(|&i| match &tokens[i] {
            Token::Tag(tag) => tag.may_stand_alone() && alone_on_line(tokens, i),
            Token::Text(_) => false,
        })
        .collect();

    for i in standalone {
        if i > 0 {
            if let Token::Text(text) = &mut tokens[i - 1] {
                let kept = text.trim_end_matches([' ', '\t']).len();
                text.truncate(kept);
            }
        }
        if let Some(Token::Text(text)) = tokens.get_mut(i + 1) {
            let blank = text.len() - text.trim_start_matches([' ', '\t']).len();
            let rest = &text[blank..];
            let newline = if rest.starts_with("\r\n") {
                2
            } else if rest.starts_with('\n') {
                1
            } else {
                0
            };
            text.replace_range(..blank + newline, "");
        }
    }
}

fn alone_on_line(tokens: &[Token], i: usize) -> bool {
    let starts_line = match i.checked_sub(1).map(|p| &tokens[p]) {
        None => true,
        Some(Token::Text(text)) => match text.rfind('\n') {
            Some(nl) => is_inline_blank(&text[nl + 1..]),
            None => i == 1 && is_inline_blank(text),
        },
        Some(Token::Tag(_)) => false,
    };

    let ends_line = match tokens.get(i + 1) {
        None => true,
        Some(Token::Text(text)) => match text.find('\n') {
            Some(nl) => is_inline_blank(&text[..nl]),
            None => i + 2 == tokens.len() && is_inline_blank(text),
        },
        Some(Token::Tag(_)) => false,
    };

    starts_line && ends_line
}

/// `{{~` trims all whitespace before the tag, `~}}` all whitespace after it.
fn apply_whitespace_control(tokens: &mut [Token]) {
    for i in 0..tokens.len() {
        let (strip_before, strip_after) = match &tokens[i] {
            Token::Tag(tag) => (tag.strip_before, tag.strip_after),
            Token::Text(_) => continue,
        };
        if strip_before && i > 0 {
            if let Token::Text(text) = &mut tokens[i - 1] {
                let kept = text.trim_end().len();
                text.truncate(kept);
            }
        }
        if strip_after {
            if let Some(Token::Text(text)) = tokens.get_mut(i + 1) {
                let start = text.len() - text.trim_start().len();
                text.replace_range(..start, "");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<String> {
        tokens
            .iter()
            .map(|t| match t {
                Token::Text(s) => s.clone(),
                Token::Tag(tag) => format!("<{}>", tag.body),
            })
            .collect()
    }

    #[test]
    fn test_scan_basic_tags() {
        let tokens = tokenize("Hi {{name}}, {{{raw}}}!").unwrap();
        assert_eq!(texts(&tokens), vec!["Hi ", "<name>", ", ", "<raw>", "!"]);
        match &tokens[3] {
            Token::Tag(tag) => assert_eq!(tag.sigil, Sigil::Triple),
            _ => panic!("expected tag"),
        }
    }

    #[test]
    fn test_unclosed_tag_reports_line() {
        let err = tokenize("one\ntwo {{name").unwrap_err();
        assert_eq!(err, TemplateError::UnclosedTag { line: 2 });
    }

    #[test]
    fn test_block_lines_are_removed() {
        let tokens = tokenize("a:\n{{#each xs}}\n  - {{x}}\n{{/each}}\nend").unwrap();
        assert_eq!(
            texts(&tokens),
            vec!["a:\n", "<each xs>", "  - ", "<x>", "\n", "<each>", "end"]
        );
    }

    #[test]
    fn test_inline_blocks_keep_whitespace() {
        let tokens = tokenize("fine{{#if p}} and {{p}}{{/if}}.").unwrap();
        assert_eq!(
            texts(&tokens),
            vec!["fine", "<if p>", " and ", "<p>", "<if>", "."]
        );
    }

    #[test]
    fn test_consecutive_standalone_lines() {
        let tokens = tokenize("{{#if a}}\n  {{#if b}}\nx\n  {{/if}}\n{{/if}}\n").unwrap();
        assert_eq!(
            texts(&tokens),
            vec!["<if a>", "<if b>", "x\n", "<if>", "<if>"]
        );
    }

    #[test]
    fn test_comments() {
        let tokens = tokenize("a{{! note }}b{{!-- has }} inside --}}c").unwrap();
        assert_eq!(texts(&tokens), vec!["a", "<note>", "b", "<has }} inside>", "c"]);
    }

    #[test]
    fn test_tilde_strips_whitespace() {
        let tokens = tokenize("a \n {{~x~}} \n b").unwrap();
        assert_eq!(texts(&tokens), vec!["a", "<x>", "b"]);
    }
}
