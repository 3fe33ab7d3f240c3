use super::PathParseError;

/// One part of an [`EntityPath`][crate::EntityPath].
///
/// A non-empty string. In the file system analogy, this is the name of a
/// folder.
///
/// Note that the contents of the string is NOT escaped, so escaping needs to
/// be done when printing this using [`Self::escaped_string`].
///
/// Because of this, `EntityPathPart` does NOT implement `AsRef<str>` nor
/// `Display`: you must explicitly choose either the escaped or the unescaped
/// version of it.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct EntityPathPart(String);

impl EntityPathPart {
    /// The given string is expected to be unescaped, i.e. any `\` is treated
    /// as a normal character.
    #[inline]
    pub fn new(unescaped_string: impl Into<String>) -> Self {
        Self(unescaped_string.into())
    }

    /// Unescape the string, forgiving any syntax error with a best-effort
    /// approach.
    pub fn parse_forgiving(input: &str) -> Self {
        let mut output = String::with_capacity(input.len());
        let mut chars = input.chars();

        while let Some(c) = chars.next() {
            if c == '\\' {
                if let Some(c) = chars.next() {
                    match c {
                        'n' => output.push('\n'),
                        'r' => output.push('\r'),
                        't' => output.push('\t'),
                        'u' => match parse_unicode_escape(&mut chars) {
                            Ok(c) => output.push(c),
                            Err(s) => {
                                // Invalid unicode escape: treat the backslash
                                // as a literal one.
                                output.push('\\');
                                output.push('u');
                                output.push_str(&s);
                            }
                        },
                        c => output.push(c),
                    }
                } else {
                    // Trailing escape: treat it as a literal backslash.
                    output.push('\\');
                }
            } else {
                output.push(c);
            }
        }

        Self::new(output)
    }

    /// Unescape the string, returning errors on wrongly escaped input.
    pub fn parse_strict(input: &str) -> Result<Self, PathParseError> {
        let mut output = String::with_capacity(input.len());
        let mut chars = input.chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                if let Some(c) = chars.next() {
                    match c {
                        'n' => output.push('\n'),
                        'r' => output.push('\r'),
                        't' => output.push('\t'),
                        'u' => match parse_unicode_escape(&mut chars) {
                            Ok(c) => output.push(c),
                            Err(s) => return Err(PathParseError::InvalidUnicodeEscape(s)),
                        },
                        c if c.is_ascii_punctuation() || c == ' ' => output.push(c),
                        c => return Err(PathParseError::UnknownEscapeSequence(c)),
                    }
                } else {
                    return Err(PathParseError::TrailingBackslash);
                }
            } else if c.is_alphanumeric() || matches!(c, '_' | '-' | '.') {
                output.push(c);
            } else {
                return Err(PathParseError::MissingEscape(c));
            }
        }
        Ok(Self::new(output))
    }

    /// The unescaped string.
    ///
    /// Use this when it is standalone in a UI somewhere.
    #[inline]
    pub fn unescaped_str(&self) -> &str {
        &self.0
    }

    /// Use this when it is part of a full entity path.
    pub fn escaped_string(&self) -> String {
        let mut out = String::with_capacity(self.0.len());
        for c in self.0.chars() {
            match c {
                // All unicode alphanumerics (e.g. `åäö`) pass through as-is.
                c if c.is_alphanumeric() || matches!(c, '_' | '-' | '.') => out.push(c),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c if c.is_ascii_punctuation() || c == ' ' => {
                    out.push('\\');
                    out.push(c);
                }
                // Everything else gets a Rust-style unicode escape, e.g. `\u{262E}`.
                c => out.push_str(&format!("\\u{{{:04X}}}", c as u32)),
            }
        }
        out
    }
}

/// Parses e.g. `{262E}`.
///
/// Returns the consumed input characters on fail.
fn parse_unicode_escape(input: &mut impl Iterator<Item = char>) -> Result<char, String> {
    let mut all_chars = String::new();
    for c in input {
        all_chars.push(c);
        if c == '}' || all_chars.len() == 6 {
            break;
        }
    }

    let chars = all_chars.as_str();

    let Some(chars) = chars.strip_prefix('{') else {
        return Err(all_chars);
    };
    let Some(chars) = chars.strip_suffix('}') else {
        return Err(all_chars);
    };

    if chars.len() != 4 {
        return Err(all_chars);
    }

    let Ok(num) = u32::from_str_radix(chars, 16) else {
        return Err(all_chars);
    };

    char::from_u32(num).ok_or(all_chars)
}

impl From<&str> for EntityPathPart {
    #[inline]
    fn from(part: &str) -> Self {
        Self::new(part)
    }
}

impl From<String> for EntityPathPart {
    #[inline]
    fn from(part: String) -> Self {
        Self(part)
    }
}
