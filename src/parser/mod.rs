//! Source parsing seam.
//!
//! The analyzer never interprets source syntax itself; it hands raw text to a
//! [`SourceParser`] and gets back the declared members, each tagged with its
//! accessibility and whether a leading `///` documentation block precedes it.
//! Swap in a syntax-tree backed implementation here without touching the
//! analysis pipeline.

use crate::models::{Accessibility, MemberKind, MemberRecord};

/// Extracts declared members from raw source text.
pub trait SourceParser {
    fn parse_members(&self, text: &str) -> Vec<MemberRecord>;
}

/// Default line-oriented scanner for C# source.
///
/// Recognizes declarations whose line starts with an explicit accessibility
/// modifier and treats a contiguous `///` block in the immediately preceding
/// leading trivia (doc lines, attributes, blank lines) as documentation.
/// One declaration per line; multi-line signatures are attributed to the
/// line carrying the modifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineScanParser;

/// Non-access modifiers that may precede the declaration keyword.
const MODIFIERS: &[&str] = &[
    "static", "sealed", "abstract", "virtual", "override", "async", "readonly", "partial",
    "unsafe", "extern", "new", "const", "required", "ref",
];

const ACCESS: &[&str] = &["public", "protected", "internal", "private"];

impl SourceParser for LineScanParser {
    fn parse_members(&self, text: &str) -> Vec<MemberRecord> {
        let mut members = Vec::new();
        // True while the leading trivia gathered so far contains a `///` block.
        let mut doc_pending = false;

        for raw in text.lines() {
            let line = raw.trim();

            if line.is_empty() || line.starts_with('[') {
                // Blank lines and attributes stay part of the leading trivia.
                continue;
            }
            if line.starts_with("///") {
                doc_pending = true;
                continue;
            }

            if let Some(record) = scan_declaration(line, doc_pending) {
                members.push(record);
            }
            doc_pending = false;
        }

        members
    }
}

/// Parse a single trimmed line as a member declaration, if it is one.
fn scan_declaration(line: &str, has_documentation: bool) -> Option<MemberRecord> {
    let mut tokens = line.split_whitespace().peekable();

    if !ACCESS.contains(tokens.peek()?) {
        return None;
    }

    let mut is_public = false;
    let mut is_protected = false;
    let mut is_internal = false;
    let mut is_private = false;

    while let Some(&token) = tokens.peek() {
        match token {
            "public" => is_public = true,
            "protected" => is_protected = true,
            "internal" => is_internal = true,
            "private" => is_private = true,
            t if MODIFIERS.contains(&t) => {}
            _ => break,
        }
        tokens.next();
    }

    let accessibility = if is_public {
        Accessibility::Public
    } else if is_protected && is_internal {
        Accessibility::ProtectedInternal
    } else if is_protected && is_private {
        Accessibility::PrivateProtected
    } else if is_protected {
        Accessibility::Protected
    } else if is_internal {
        Accessibility::Internal
    } else {
        Accessibility::Private
    };

    let rest: Vec<&str> = tokens.collect();
    let kind = member_kind(&rest, line);

    Some(MemberRecord {
        kind,
        accessibility,
        has_documentation,
    })
}

fn member_kind(rest: &[&str], line: &str) -> MemberKind {
    for token in rest {
        match *token {
            "class" => return MemberKind::Class,
            "struct" => return MemberKind::Struct,
            "interface" => return MemberKind::Interface,
            "enum" => return MemberKind::Enum,
            "record" => return MemberKind::Record,
            "delegate" => return MemberKind::Delegate,
            "event" => return MemberKind::Event,
            _ => {}
        }
    }
    if line.contains('(') {
        MemberKind::Method
    } else if line.ends_with(';') && !line.contains('{') && !line.contains("=>") {
        MemberKind::Field
    } else {
        MemberKind::Property
    }
}
