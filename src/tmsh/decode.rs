use crate::errors::DecodeError;
use crate::tmsh::literal::{
    parse_mapping,
    quote,
};
use crate::tmsh::node::Mapping;
use crate::util::strings::{
    split_quoted_tokens,
    string_contains_unquoted_char,
    trim_quotes,
};
use log::{
    debug,
    trace,
};

const BRACES: [char; 2] = ['{', '}'];

/// The shape of a single (non blank) line of tmsh output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LineKind {
    /// `net interface 1.0 {` -- opens a block keyed by every token before the brace.
    Open(String),
    /// `2.0 { }` -- a key (every token before the brace) holding an empty list.
    EmptyList(String),
    /// `vlans { internal external }` -- a key holding a list written on one line.
    InlineList(String, Vec<String>),
    /// `mtu 9198` or `vendor "F5 NETWORKS INC."`.
    Pair(String, String),
    /// `tcp:ssh` -- a lone token, only valid as a list member.
    Item(String),
    /// `}`.
    Close,
}

struct SourceLine<'a> {
    number: usize,
    content: &'a str,
    kind: LineKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Mapping,
    Sequence,
}

struct OpenBlock<'a> {
    kind: BlockKind,
    number: usize,
    content: &'a str,
}

/// Decodes the text output of a tmsh `list` command into a nested `Mapping`.
///
/// Every non blank line is first classified (block open, empty list, key/value pair, lone list
/// member or block close). A block is a sequence if the line right after its opening brace is a
/// lone token, otherwise it is a mapping. The classified lines are then rewritten into a literal
/// mapping expression -- sequence blocks get their closing brace rewritten as a list terminator
/// and sibling blocks are comma separated -- which is finally parsed into the returned structure.
///
/// # Errors
///
/// Returns a `DecodeError` (with the line number and content of the offending line) if a line does
/// not fit any of the known shapes, if a block holds entries of the wrong kind, if braces are
/// unbalanced or if the assembled expression fails to parse. Nothing is returned on error.
pub fn decode(text: &str) -> Result<Mapping, DecodeError> {
    let lines = classify_lines(text)?;

    debug!("decoding {} lines of tmsh output", lines.len());

    let (assembled, spans) = assemble(&lines)?;

    trace!("assembled tmsh literal: {assembled}");

    parse_mapping(&assembled).map_err(|err| {
        let (number, content) = spans
            .iter()
            .rev()
            .find(|(start, _, _)| *start <= err.offset)
            .map_or((0, ""), |(_, number, content)| (*number, *content));

        DecodeError::new(
            number,
            content,
            &format!("invalid structure: {}", err.details),
        )
    })
}

fn classify_lines(text: &str) -> Result<Vec<SourceLine<'_>>, DecodeError> {
    let mut lines = vec![];

    for (idx, raw) in text.lines().enumerate() {
        let content = raw.trim();

        if content.is_empty() {
            continue;
        }

        let number = idx + 1;
        let kind = classify(content)
            .map_err(|details| DecodeError::new(number, content, &details))?;

        trace!("line {number} classified as {kind:?}");

        lines.push(SourceLine {
            number,
            content,
            kind,
        });
    }

    Ok(lines)
}

/// Classifies a single trimmed line of tmsh output. Tokens are split with quote awareness, so a
/// fully quoted line such as `"/Common/my rule"` is a single token. Braces only count as structure
/// when they stand alone as a token; a brace glued to other text outside of quotes is rejected.
pub(crate) fn classify(line: &str) -> Result<LineKind, String> {
    let line = line.trim();
    let tokens =
        split_quoted_tokens(line).ok_or_else(|| "unbalanced double quotes".to_owned())?;

    if tokens
        .iter()
        .any(|token| !is_brace(token) && string_contains_unquoted_char(token, &BRACES))
    {
        return Err("brace inside a token".to_owned());
    }

    let braces: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| is_brace(token))
        .map(|(idx, _)| idx)
        .collect();
    let last = tokens.len().saturating_sub(1);

    match braces.as_slice() {
        [] => match tokens.as_slice() {
            [] => Err("empty line".to_owned()),
            [item] => Ok(LineKind::Item(trim_quotes(item).to_owned())),
            [key, ..] => {
                let value = line[key.len()..].trim();

                Ok(LineKind::Pair((*key).to_owned(), trim_quotes(value).to_owned()))
            }
        },
        [close] if tokens[*close] == "}" => {
            if tokens.len() != 1 {
                return Err("content around a closing brace".to_owned());
            }

            Ok(LineKind::Close)
        }
        [open] => {
            if *open != last {
                return Err("content after an opening brace".to_owned());
            }

            if *open == 0 {
                return Err("block opened without a key".to_owned());
            }

            Ok(LineKind::Open(tokens[..*open].join(" ")))
        }
        [open, close] if tokens[*open] == "{" && tokens[*close] == "}" => {
            if *close != last {
                return Err("content after a closing brace".to_owned());
            }

            if *open == 0 {
                return Err("list declared without a key".to_owned());
            }

            let key = tokens[..*open].join(" ");
            let items = &tokens[*open + 1..*close];

            if items.is_empty() {
                return Ok(LineKind::EmptyList(key));
            }

            Ok(LineKind::InlineList(
                key,
                items
                    .iter()
                    .map(|item| trim_quotes(item).to_owned())
                    .collect(),
            ))
        }
        _ => Err("unexpected braces on a single line".to_owned()),
    }
}

fn is_brace(token: &str) -> bool {
    token == "{" || token == "}"
}

type Span<'a> = (usize, usize, &'a str);

/// Appends `fragment` to `out`, inserting a separator wherever a closed block is directly followed
/// by a sibling key -- the same as replacing every `}"` with `},"` in the joined text.
fn push_fragment(
    out: &mut String,
    fragment: &str,
) {
    if out.ends_with('}') && fragment.starts_with('"') {
        out.push(',');
    }

    out.push_str(fragment);
}

fn assemble<'a>(lines: &[SourceLine<'a>]) -> Result<(String, Vec<Span<'a>>), DecodeError> {
    let mut out = String::from("{");
    let mut spans: Vec<Span<'a>> = vec![(0, 1, "")];
    let mut stack: Vec<OpenBlock<'a>> = vec![];

    for (idx, line) in lines.iter().enumerate() {
        let in_sequence = stack
            .last()
            .is_some_and(|block| block.kind == BlockKind::Sequence);
        let fail = |details: &str| DecodeError::new(line.number, line.content, details);

        let fragment = match &line.kind {
            LineKind::Close => {
                let block = stack
                    .pop()
                    .ok_or_else(|| fail("closing brace without a matching opening brace"))?;

                match block.kind {
                    BlockKind::Sequence => "],".to_owned(),
                    BlockKind::Mapping => "}".to_owned(),
                }
            }
            LineKind::Item(item) => {
                if !in_sequence {
                    return Err(fail("lone token outside of a list block"));
                }

                format!("{},", quote(item))
            }
            _ if in_sequence => {
                return Err(fail("list block may only hold lone tokens"));
            }
            LineKind::Open(key) => {
                let kind = match lines.get(idx + 1).map(|next| &next.kind) {
                    Some(LineKind::Item(_)) => BlockKind::Sequence,
                    _ => BlockKind::Mapping,
                };

                stack.push(OpenBlock {
                    kind,
                    number: line.number,
                    content: line.content,
                });

                match kind {
                    BlockKind::Sequence => format!("{}: [", quote(key)),
                    BlockKind::Mapping => format!("{}: {{", quote(key)),
                }
            }
            LineKind::EmptyList(key) => format!("{}: [],", quote(key)),
            LineKind::InlineList(key, items) => {
                let items: Vec<String> = items.iter().map(|item| quote(item)).collect();

                format!("{}: [{}],", quote(key), items.join(", "))
            }
            LineKind::Pair(key, value) => format!("{}: {},", quote(key), quote(value)),
        };

        spans.push((out.len(), line.number, line.content));

        push_fragment(&mut out, &fragment);
    }

    if let Some(block) = stack.last() {
        return Err(DecodeError::new(
            block.number,
            block.content,
            "block is never closed",
        ));
    }

    out.push('}');

    Ok((out, spans))
}
