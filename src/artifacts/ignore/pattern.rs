use crate::artifacts::core::{segments, slash_path};
use std::path::Path;

/// Characters with a special meaning in a `.gitignore` line.
const GLOB_CHARS: [char; 4] = ['*', '?', '[', '\\'];

/// One line of the ignore list.
///
/// The lines `vc` writes itself are anchored at the root, so a choice made for
/// one file never reaches a same-named file or folder elsewhere. Hand-written
/// slash-free names are understood too and match at any depth, as git does.
/// Every other line (comments, negations, wildcard globs, unanchored folders)
/// is carried verbatim and left for git to evaluate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IgnorePattern {
    /// A literal path relative to the root, written `/notes.tmp` or `/docs/draft.md`
    Path(String),
    /// A slash-free file or folder name matched at any depth, e.g. `build.out`
    Name(String),
    /// A filename suffix such as `.log` or `~`, written as `*.log`
    Extension(String),
    /// A directory relative to the root, written `/build/out/`
    Ancestor(String),
    Verbatim(String),
}

impl IgnorePattern {
    pub fn for_path(path: &Path) -> Self {
        IgnorePattern::Path(slash_path(path))
    }

    /// The extension pattern for `path`, if its name has one.
    ///
    /// The extension is the literal final suffix of the name: `a.tar.gz` yields
    /// `.gz`. Editor backups ending in `~` yield `~`.
    pub fn for_extension(path: &Path) -> Option<Self> {
        extension_of(path).map(IgnorePattern::Extension)
    }

    /// The directory made of the first `depth` segments of `path`.
    ///
    /// `depth` is clamped to the deepest proper ancestor. Returns `None` when the
    /// path sits directly in the root or `depth` is zero.
    pub fn for_ancestor(path: &Path, depth: usize) -> Option<Self> {
        let segments = segments(path);
        if depth == 0 || segments.len() < 2 {
            return None;
        }

        let depth = depth.min(segments.len() - 1);
        Some(IgnorePattern::Ancestor(segments[..depth].join("/")))
    }

    /// Interpret one line of a `.gitignore` file. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return None;
        }

        let verbatim = || Some(IgnorePattern::Verbatim(line.to_string()));

        if line.starts_with('#') || line.starts_with('!') {
            return verbatim();
        }

        if let Some(suffix) = line.strip_prefix('*') {
            return match suffix {
                "~" => Some(IgnorePattern::Extension(suffix.to_string())),
                s if s.len() > 1 && s.starts_with('.') && !s.contains(GLOB_CHARS) && !s.contains('/') => {
                    Some(IgnorePattern::Extension(s.to_string()))
                }
                _ => verbatim(),
            };
        }

        let (body, leading_slash) = match line.strip_prefix('/') {
            Some(body) => (body, true),
            None => (line, false),
        };
        let (body, is_dir) = match body.strip_suffix('/') {
            Some(body) => (body, true),
            None => (body, false),
        };
        // git anchors a line at the root when it has a slash before its last character
        let anchored = leading_slash || body.contains('/');

        let literal = match unescape(body) {
            Some(literal) if !literal.is_empty() && !literal.starts_with('/') => literal,
            _ => return verbatim(),
        };

        match (anchored, is_dir) {
            (true, true) => Some(IgnorePattern::Ancestor(literal)),
            (true, false) => Some(IgnorePattern::Path(literal)),
            (false, false) => Some(IgnorePattern::Name(literal)),
            (false, true) => verbatim(),
        }
    }

    /// Whether this pattern excludes the file at relative `path`.
    pub fn matches(&self, path: &Path) -> bool {
        match self {
            IgnorePattern::Path(literal) => {
                let path = slash_path(path);
                path == *literal || is_under(&path, literal)
            }
            IgnorePattern::Name(name) => segments(path).iter().any(|segment| segment == name),
            IgnorePattern::Extension(suffix) => path
                .file_name()
                .map(|name| name.to_string_lossy().ends_with(suffix.as_str()))
                .unwrap_or(false),
            IgnorePattern::Ancestor(dir) => is_under(&slash_path(path), dir),
            IgnorePattern::Verbatim(_) => false,
        }
    }

    /// The line written to the ignore file.
    pub fn to_line(&self) -> String {
        match self {
            IgnorePattern::Path(literal) => format!("/{}", escape(literal)),
            IgnorePattern::Name(name) => escape(name),
            IgnorePattern::Extension(suffix) => format!("*{suffix}"),
            IgnorePattern::Ancestor(dir) => format!("/{}/", escape(dir)),
            IgnorePattern::Verbatim(line) => line.clone(),
        }
    }
}

impl std::fmt::Display for IgnorePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_line())
    }
}

/// The literal suffix used by the `x` response: `.ext`, or `~` for backups.
pub fn extension_of(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_string_lossy();
    if name.ends_with('~') {
        return Some("~".to_string());
    }

    path.extension()
        .map(|ext| ext.to_string_lossy())
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!(".{ext}"))
}

fn is_under(path: &str, dir: &str) -> bool {
    path.strip_prefix(dir)
        .map(|rest| rest.starts_with('/'))
        .unwrap_or(false)
}

fn escape(literal: &str) -> String {
    let mut escaped = String::with_capacity(literal.len());
    for (i, c) in literal.chars().enumerate() {
        if GLOB_CHARS.contains(&c) || (i == 0 && (c == '#' || c == '!')) {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    if escaped.ends_with(' ') {
        escaped.pop();
        escaped.push_str("\\ ");
    }

    escaped
}

/// Undo `escape`; `None` if the text holds an unescaped wildcard.
fn unescape(text: &str) -> Option<String> {
    let mut literal = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => literal.push(chars.next()?),
            '*' | '?' | '[' => return None,
            c => literal.push(c),
        }
    }

    Some(literal)
}
