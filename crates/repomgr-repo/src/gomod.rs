//! `go.mod` lexer and parser.
//!
//! The grammar is line oriented: each directive is a verb followed by its
//! arguments, or a verb followed by `(` that opens a block with one entry per
//! line until a line holding only `)`. Tokens are bare words, `"..."`
//! interpreted strings or back-quoted raw strings. `//` starts a comment that
//! runs to the end of the line; a comment after a requirement may carry the
//! `indirect` marker.
//!
//! Version strings are kept verbatim. Judging whether they are valid semantic
//! versions is left to the rules.

use repomgr_domain::model::{
    Exclude, GoDebug, GoModFile, Ignore, ModuleDecl, Replace, Require, Retract, Tool,
};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct GoModError {
    pub line: u32,
    pub message: String,
}

impl GoModError {
    fn new(line: u32, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Token {
    Word(String),
    LParen,
    RParen,
    LBrack,
    RBrack,
    Comma,
}

impl Token {
    fn word(&self) -> Option<&str> {
        match self {
            Token::Word(w) => Some(w),
            _ => None,
        }
    }
}

/// Tokens of one line plus its trailing comment text (without `//`).
#[derive(Debug, Default)]
struct Line {
    tokens: Vec<Token>,
    comment: Option<String>,
}

fn lex_line(text: &str, line: u32) -> Result<Line, GoModError> {
    let mut out = Line::default();
    let mut rest = text;

    loop {
        rest = rest.trim_start();
        let Some(c) = rest.chars().next() else {
            return Ok(out);
        };

        if rest.starts_with("//") {
            out.comment = Some(rest[2..].trim().to_string());
            return Ok(out);
        }

        let punct = match c {
            '(' => Some(Token::LParen),
            ')' => Some(Token::RParen),
            '[' => Some(Token::LBrack),
            ']' => Some(Token::RBrack),
            ',' => Some(Token::Comma),
            _ => None,
        };
        if let Some(tok) = punct {
            out.tokens.push(tok);
            rest = &rest[1..];
            continue;
        }

        match c {
            '"' => {
                let (word, tail) = lex_quoted(&rest[1..], line)?;
                out.tokens.push(Token::Word(word));
                rest = tail;
            }
            '`' => {
                let body = &rest[1..];
                let end = body
                    .find('`')
                    .ok_or_else(|| GoModError::new(line, "unterminated raw string"))?;
                out.tokens.push(Token::Word(body[..end].to_string()));
                rest = &body[end + 1..];
            }
            _ => {
                let end = word_end(rest);
                out.tokens.push(Token::Word(rest[..end].to_string()));
                rest = &rest[end..];
            }
        }
    }
}

/// Byte length of the bare word at the start of `s`.
fn word_end(s: &str) -> usize {
    let mut idx = 0;
    for (i, c) in s.char_indices() {
        if c.is_whitespace() || matches!(c, '(' | ')' | '[' | ']' | ',' | '"' | '`') {
            return i;
        }
        if s[i..].starts_with("//") {
            return i;
        }
        idx = i + c.len_utf8();
    }
    idx
}

/// Lex an interpreted string whose opening quote was already consumed.
fn lex_quoted(s: &str, line: u32) -> Result<(String, &str), GoModError> {
    let mut word = String::new();
    let mut chars = s.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Ok((word, &s[i + 1..])),
            '\\' => match chars.next() {
                Some((_, '"')) => word.push('"'),
                Some((_, '\\')) => word.push('\\'),
                Some((_, 'n')) => word.push('\n'),
                Some((_, 't')) => word.push('\t'),
                Some((_, other)) => {
                    return Err(GoModError::new(
                        line,
                        format!("unknown escape sequence `\\{other}`"),
                    ));
                }
                None => break,
            },
            _ => word.push(c),
        }
    }
    Err(GoModError::new(line, "unterminated quoted string"))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Verb {
    Module,
    Go,
    Toolchain,
    Godebug,
    Require,
    Exclude,
    Replace,
    Retract,
    Tool,
    Ignore,
}

impl Verb {
    fn parse(word: &str) -> Option<Self> {
        Some(match word {
            "module" => Verb::Module,
            "go" => Verb::Go,
            "toolchain" => Verb::Toolchain,
            "godebug" => Verb::Godebug,
            "require" => Verb::Require,
            "exclude" => Verb::Exclude,
            "replace" => Verb::Replace,
            "retract" => Verb::Retract,
            "tool" => Verb::Tool,
            "ignore" => Verb::Ignore,
            _ => return None,
        })
    }

    fn name(self) -> &'static str {
        match self {
            Verb::Module => "module",
            Verb::Go => "go",
            Verb::Toolchain => "toolchain",
            Verb::Godebug => "godebug",
            Verb::Require => "require",
            Verb::Exclude => "exclude",
            Verb::Replace => "replace",
            Verb::Retract => "retract",
            Verb::Tool => "tool",
            Verb::Ignore => "ignore",
        }
    }

    fn allows_block(self) -> bool {
        matches!(
            self,
            Verb::Godebug
                | Verb::Require
                | Verb::Exclude
                | Verb::Replace
                | Verb::Retract
                | Verb::Tool
                | Verb::Ignore
        )
    }
}

/// Parse the text of a `go.mod` file.
pub fn parse_go_mod(text: &str) -> Result<GoModFile, GoModError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut file = GoModFile::default();
    let mut block: Option<(Verb, u32)> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line = u32::try_from(idx + 1).unwrap_or(u32::MAX);
        let lexed = lex_line(raw, line)?;
        if lexed.tokens.is_empty() {
            continue;
        }

        if let Some((verb, _)) = block {
            if lexed.tokens == [Token::RParen] {
                block = None;
                continue;
            }
            apply(&mut file, verb, &lexed.tokens, lexed.comment, line)?;
            continue;
        }

        let first = lexed.tokens[0]
            .word()
            .ok_or_else(|| GoModError::new(line, "expected a directive"))?;
        let verb = Verb::parse(first)
            .ok_or_else(|| GoModError::new(line, format!("unknown directive: {first}")))?;
        let args = &lexed.tokens[1..];

        match args {
            [Token::LParen] if verb.allows_block() => block = Some((verb, line)),
            [Token::LParen, Token::RParen] if verb.allows_block() => {}
            [Token::LParen, ..] => {
                return Err(GoModError::new(
                    line,
                    format!("`{}` does not take a block here", verb.name()),
                ));
            }
            _ => apply(&mut file, verb, args, lexed.comment, line)?,
        }
    }

    if let Some((verb, start)) = block {
        return Err(GoModError::new(
            start,
            format!("unterminated `{}` block", verb.name()),
        ));
    }

    Ok(file)
}

fn apply(
    file: &mut GoModFile,
    verb: Verb,
    args: &[Token],
    comment: Option<String>,
    line: u32,
) -> Result<(), GoModError> {
    let arity = |expected: &str| {
        GoModError::new(line, format!("usage: {} {expected}", verb.name()))
    };

    match verb {
        Verb::Module => {
            if file.module.is_some() {
                return Err(GoModError::new(line, "repeated module statement"));
            }
            let [path] = words(args, verb, line)?[..] else {
                return Err(arity("module/path"));
            };
            let deprecated = comment
                .as_deref()
                .and_then(|c| c.strip_prefix("Deprecated:"))
                .map(|msg| msg.trim().to_string());
            file.module = Some(ModuleDecl {
                path: path.to_string(),
                deprecated,
                line,
            });
        }
        Verb::Go => {
            if file.go.is_some() {
                return Err(GoModError::new(line, "repeated go statement"));
            }
            let [version] = words(args, verb, line)?[..] else {
                return Err(arity("1.23"));
            };
            file.go = Some(version.to_string());
        }
        Verb::Toolchain => {
            if file.toolchain.is_some() {
                return Err(GoModError::new(line, "repeated toolchain statement"));
            }
            let [name] = words(args, verb, line)?[..] else {
                return Err(arity("go1.23.4"));
            };
            file.toolchain = Some(name.to_string());
        }
        Verb::Godebug => {
            let [setting] = words(args, verb, line)?[..] else {
                return Err(arity("key=value"));
            };
            let (key, value) = setting
                .split_once('=')
                .filter(|(k, _)| !k.is_empty())
                .ok_or_else(|| arity("key=value"))?;
            file.godebug.push(GoDebug {
                key: key.to_string(),
                value: value.to_string(),
                line,
            });
        }
        Verb::Require => {
            let [path, version] = words(args, verb, line)?[..] else {
                return Err(arity("module/path v1.2.3"));
            };
            file.requires.push(Require {
                path: path.to_string(),
                version: version.to_string(),
                indirect: is_indirect(comment.as_deref()),
                line,
            });
        }
        Verb::Exclude => {
            let [path, version] = words(args, verb, line)?[..] else {
                return Err(arity("module/path v1.2.3"));
            };
            file.excludes.push(Exclude {
                path: path.to_string(),
                version: version.to_string(),
                line,
            });
        }
        Verb::Replace => {
            let usage = "module/path [v1.2.3] => other/module v1.4 | ../local/dir";
            let parts = words(args, verb, line)?;
            let arrow = parts
                .iter()
                .position(|w| *w == "=>")
                .ok_or_else(|| arity(usage))?;
            let (old, new) = (&parts[..arrow], &parts[arrow + 1..]);
            let (old_path, old_version) = match old {
                [path] => (*path, None),
                [path, version] => (*path, Some(version.to_string())),
                _ => return Err(arity(usage)),
            };
            let (new_path, new_version) = match new {
                [path] => (*path, None),
                [path, version] => (*path, Some(version.to_string())),
                _ => return Err(arity(usage)),
            };
            file.replaces.push(Replace {
                old_path: old_path.to_string(),
                old_version,
                new_path: new_path.to_string(),
                new_version,
                line,
            });
        }
        Verb::Retract => {
            let (low, high) = match args {
                [Token::Word(v)] => (v.clone(), v.clone()),
                [Token::LBrack, Token::Word(low), Token::Comma, Token::Word(high), Token::RBrack] => {
                    (low.clone(), high.clone())
                }
                _ => return Err(arity("v1.2.3 | [v1.2.3, v1.3.0]")),
            };
            file.retracts.push(Retract {
                low,
                high,
                rationale: comment.filter(|c| !c.is_empty()),
                line,
            });
        }
        Verb::Tool => {
            let [path] = words(args, verb, line)?[..] else {
                return Err(arity("package/path"));
            };
            file.tools.push(Tool {
                path: path.to_string(),
                line,
            });
        }
        Verb::Ignore => {
            let [path] = words(args, verb, line)?[..] else {
                return Err(arity("./dir"));
            };
            file.ignores.push(Ignore {
                path: path.to_string(),
                line,
            });
        }
    }
    Ok(())
}

fn words(args: &[Token], verb: Verb, line: u32) -> Result<Vec<&str>, GoModError> {
    args.iter()
        .map(|t| {
            t.word().ok_or_else(|| {
                GoModError::new(line, format!("unexpected punctuation in `{}`", verb.name()))
            })
        })
        .collect()
}

fn is_indirect(comment: Option<&str>) -> bool {
    comment.is_some_and(|c| c == "indirect" || c.starts_with("indirect;"))
}
