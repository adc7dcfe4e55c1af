//! Builds the node tree from lexer tokens.

use super::lexer::{Sigil, Tag, Token};
use super::TemplateError;

/// Where a path starts looking
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum PathRoot {
    /// The current context, `depth` levels up (`../`)
    Context { depth: usize },
    /// `@index`, `@first`, `@last` of the innermost `each`
    Data(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Path {
    pub root: PathRoot,
    pub segments: Vec<String>,
}

impl Path {
    pub fn parse(raw: &str) -> Result<Self, TemplateError> {
        let invalid = || TemplateError::InvalidPath(raw.to_string());

        if let Some(name) = raw.strip_prefix('@') {
            if name.is_empty() || !name.chars().all(is_identifier_char) {
                return Err(invalid());
            }
            return Ok(Self {
                root: PathRoot::Data(name.to_string()),
                segments: Vec::new(),
            });
        }

        let mut rest = raw;
        let mut depth = 0;
        while let Some(stripped) = rest.strip_prefix("../") {
            depth += 1;
            rest = stripped;
        }
        if rest == ".." {
            depth += 1;
            rest = "";
        }

        let mut segments = Vec::new();
        if !rest.is_empty() && rest != "." {
            for (i, segment) in rest.split(['.', '/']).enumerate() {
                if segment.is_empty() || !segment.chars().all(is_identifier_char) {
                    return Err(invalid());
                }
                // `this` only means something in front
                if segment == "this" && i == 0 {
                    continue;
                }
                segments.push(segment.to_string());
            }
        }

        Ok(Self {
            root: PathRoot::Context { depth },
            segments,
        })
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-' || c == '$'
}

#[derive(Debug, Clone, PartialEq)]
pub(super) enum Node {
    Text(String),
    Expression { path: Path, escape: bool },
    Each {
        path: Path,
        body: Vec<Node>,
        inverse: Vec<Node>,
    },
    If {
        path: Path,
        body: Vec<Node>,
        inverse: Vec<Node>,
    },
}

/// Block helpers the engine knows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Helper {
    Each,
    If,
}

impl Helper {
    fn name(self) -> &'static str {
        match self {
            Self::Each => "each",
            Self::If => "if",
        }
    }
}

/// How a nested sequence ended
enum Terminator {
    Eof,
    Else,
    Close(String),
}

pub(super) fn parse(tokens: Vec<Token>) -> Result<Vec<Node>, TemplateError> {
    let mut tokens = tokens.into_iter();
    let (nodes, terminator) = parse_sequence(&mut tokens)?;
    match terminator {
        Terminator::Eof => Ok(nodes),
        Terminator::Else => Err(TemplateError::UnexpectedElse),
        Terminator::Close(name) => Err(TemplateError::UnexpectedClose(name)),
    }
}

fn parse_sequence(
    tokens: &mut impl Iterator<Item = Token>,
) -> Result<(Vec<Node>, Terminator), TemplateError> {
    let mut nodes = Vec::new();

    while let Some(token) = tokens.next() {
        let tag = match token {
            Token::Text(text) => {
                nodes.push(Node::Text(text));
                continue;
            }
            Token::Tag(tag) => tag,
        };

        if tag.is_else() {
            return Ok((nodes, Terminator::Else));
        }

        match tag.sigil {
            Sigil::Comment => {}
            Sigil::None => nodes.push(expression(&tag, true)?),
            Sigil::Triple | Sigil::Ampersand => nodes.push(expression(&tag, false)?),
            Sigil::Open => nodes.push(block(&tag, tokens)?),
            Sigil::Close => return Ok((nodes, Terminator::Close(tag.body))),
            Sigil::Unsupported(c) => {
                return Err(TemplateError::Unsupported(format!("{{{{{}{}}}}}", c, tag.body)))
            }
        }
    }

    Ok((nodes, Terminator::Eof))
}

fn expression(tag: &Tag, escape: bool) -> Result<Node, TemplateError> {
    let mut words = tag.body.split_whitespace();
    let path = words
        .next()
        .ok_or(TemplateError::EmptyExpression { line: tag.line })?;
    if let Some(_argument) = words.next() {
        // `{{name arg}}` is a helper call; none are registered
        return Err(TemplateError::UnknownHelper(path.to_string()));
    }
    Ok(Node::Expression {
        path: Path::parse(path)?,
        escape,
    })
}

fn block(tag: &Tag, tokens: &mut impl Iterator<Item = Token>) -> Result<Node, TemplateError> {
    let mut words = tag.body.split_whitespace();
    let name = words
        .next()
        .ok_or(TemplateError::EmptyExpression { line: tag.line })?;
    let helper = match name {
        "each" => Helper::Each,
        "if" => Helper::If,
        other => return Err(TemplateError::UnknownHelper(other.to_string())),
    };
    let arguments: Vec<&str> = words.collect();
    let [argument] = arguments.as_slice() else {
        return Err(TemplateError::InvalidArguments {
            helper: helper.name().to_string(),
        });
    };
    let path = Path::parse(argument)?;

    let (body, terminator) = parse_sequence(tokens)?;
    let (inverse, terminator) = match terminator {
        Terminator::Else => parse_sequence(tokens)?,
        other => (Vec::new(), other),
    };

    match terminator {
        Terminator::Close(close) if close == helper.name() => {}
        Terminator::Close(close) => {
            return Err(TemplateError::MismatchedBlock {
                open: helper.name().to_string(),
                close,
            })
        }
        Terminator::Else => return Err(TemplateError::UnexpectedElse),
        Terminator::Eof => return Err(TemplateError::UnclosedBlock(helper.name().to_string())),
    }

    Ok(match helper {
        Helper::Each => Node::Each {
            path,
            body,
            inverse,
        },
        Helper::If => Node::If {
            path,
            body,
            inverse,
        },
    })
}
