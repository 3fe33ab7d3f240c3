use super::{EntityPathPart, PathParseError};

/// The unique identifier of an entity, e.g. `camera/"ACME Örnöga"`.
///
/// The entity path is a list of [parts][EntityPathPart], like a file path but
/// for things that are logged. Each part is stored unescaped; escaping only
/// happens when parsing from or formatting to a single string.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct EntityPath {
    parts: Vec<EntityPathPart>,
}

impl EntityPath {
    /// The root path, i.e. the one with no parts.
    #[inline]
    pub fn root() -> Self {
        Self { parts: Vec::new() }
    }

    #[inline]
    pub fn new(parts: Vec<EntityPathPart>) -> Self {
        Self { parts }
    }

    /// Treat the string as one opaque, unescaped part.
    #[inline]
    pub fn from_single_string(string: impl Into<String>) -> Self {
        Self::new(vec![EntityPathPart::new(string)])
    }

    /// Parses an entity path, e.g. `world/points`, returning an error on any
    /// wrongly escaped or empty part.
    ///
    /// A single leading slash is accepted and ignored.
    pub fn parse_strict(input: &str) -> Result<Self, PathParseError> {
        let input = input.strip_prefix('/').unwrap_or(input);
        if input.is_empty() {
            return Ok(Self::root());
        }

        split_on_unescaped_slash(input)
            .map(|part| {
                if part.is_empty() {
                    Err(PathParseError::DoubleSlash)
                } else {
                    EntityPathPart::parse_strict(part)
                }
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    /// Parses an entity path with a best-effort approach: empty parts are
    /// dropped, bad escapes are kept as-is.
    pub fn parse_forgiving(input: &str) -> Self {
        let input = input.strip_prefix('/').unwrap_or(input);

        Self::new(
            split_on_unescaped_slash(input)
                .filter(|part| !part.is_empty())
                .map(EntityPathPart::parse_forgiving)
                .collect(),
        )
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parts.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    #[inline]
    pub fn parts(&self) -> &[EntityPathPart] {
        &self.parts
    }

    /// Returns `[self, part]` concatenated.
    #[inline]
    pub fn join(&self, other: &Self) -> Self {
        Self::new(
            self.parts
                .iter()
                .chain(other.parts.iter())
                .cloned()
                .collect(),
        )
    }
}

/// Splits on `/`, ignoring any slash that is preceded by an odd number of
/// backslashes.
fn split_on_unescaped_slash(input: &str) -> impl Iterator<Item = &str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (index, c) in input.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '/' {
            parts.push(&input[start..index]);
            start = index + 1;
        }
    }
    parts.push(&input[start..]);
    parts.into_iter()
}

impl std::fmt::Display for EntityPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_root() {
            f.write_str("/")
        } else {
            f.write_str(
                &self
                    .parts
                    .iter()
                    .map(|part| part.escaped_string())
                    .collect::<Vec<_>>()
                    .join("/"),
            )
        }
    }
}

impl From<&str> for EntityPath {
    #[inline]
    fn from(path: &str) -> Self {
        Self::parse_forgiving(path)
    }
}

impl From<String> for EntityPath {
    #[inline]
    fn from(path: String) -> Self {
        Self::parse_forgiving(&path)
    }
}

impl From<Vec<EntityPathPart>> for EntityPath {
    #[inline]
    fn from(parts: Vec<EntityPathPart>) -> Self {
        Self::new(parts)
    }
}

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;

    use super::*;

    #[test]
    fn strict_parsing() {
        let path = EntityPath::parse_strict("world/points").unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(path.parts()[0].unescaped_str(), "world");
        assert_eq!(path.parts()[1].unescaped_str(), "points");

        // A leading slash is accepted, and the root spells as "/".
        assert_eq!(
            EntityPath::parse_strict("/world/points").unwrap(),
            EntityPath::parse_strict("world/points").unwrap()
        );
        assert_eq!(EntityPath::parse_strict("").unwrap(), EntityPath::root());
        assert_eq!(EntityPath::parse_strict("/").unwrap(), EntityPath::root());
        assert_eq!(EntityPath::root().to_string(), "/");

        assert_eq!(
            EntityPath::parse_strict("world//points"),
            Err(PathParseError::DoubleSlash)
        );
        assert_eq!(
            EntityPath::parse_strict("world/my points"),
            Err(PathParseError::MissingEscape(' '))
        );
    }

    #[test]
    fn escaped_slashes_do_not_split() {
        let path = EntityPath::parse_strict(r"world/a\/b").unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(path.parts()[1].unescaped_str(), "a/b");
        assert_eq!(path.to_string(), r"world/a\/b");
    }

    #[test]
    fn forgiving_parsing() {
        let path = EntityPath::parse_forgiving("world//my points/");
        assert_eq!(path.len(), 2);
        assert_eq!(path.parts()[0].unescaped_str(), "world");
        assert_eq!(path.parts()[1].unescaped_str(), "my points");
    }

    #[test]
    fn display_round_trips_through_strict_parsing() {
        for input in ["world/points", r"world/a\ b", r"\u{262E}/peace"] {
            let path = EntityPath::parse_strict(input).unwrap();
            assert_eq!(path.to_string(), input);
            assert_eq!(EntityPath::parse_strict(&path.to_string()).unwrap(), path);
        }
    }

    #[test]
    fn join_concatenates() {
        let base = EntityPath::from("world");
        let leaf = EntityPath::from("points");
        assert_eq!(base.join(&leaf), EntityPath::from("world/points"));
    }
}
