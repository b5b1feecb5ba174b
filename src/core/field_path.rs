use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

/// Location of a value inside a hand history document.
///
/// Rendered the way a reader would index into the JSON, for example
/// `rounds[1].actions[0].player_id`. The empty path renders as `$`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn field(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.to_string()));
        Self { segments }
    }

    pub fn index(&self, idx: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(idx));
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("$");
        }
        for (idx, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if idx == 0 => f.write_str(name)?,
                PathSegment::Field(name) => write!(f, ".{name}")?,
                PathSegment::Index(i) => write!(f, "[{i}]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(FieldPath::root().to_string(), "$");
        let path = FieldPath::root()
            .field("rounds")
            .index(1)
            .field("actions")
            .index(0)
            .field("player_id");
        assert_eq!(path.to_string(), "rounds[1].actions[0].player_id");
        assert_eq!(path.segments().len(), 5);
    }

    #[test]
    fn test_children_do_not_alias_parent() {
        let parent = FieldPath::root().field("pots");
        let child = parent.index(3);
        assert_eq!(parent.to_string(), "pots");
        assert_eq!(child.to_string(), "pots[3]");
    }
}
