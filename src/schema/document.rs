use super::types::{Header, OutputDocument};

/// Per-pass accumulator for converted records.
///
/// Created empty for each source file; the index handed out by [`push`]
/// grows by one per record with no gaps.
///
/// [`push`]: DocumentBuilder::push
#[derive(Debug)]
pub struct DocumentBuilder<T> {
    header: Header,
    body: Vec<T>,
}

impl<T> DocumentBuilder<T> {
    pub fn new(kind: &str, version: u32) -> Self {
        Self {
            header: Header::new(kind, version),
            body: Vec::new(),
        }
    }

    /// Append a node and return its body index.
    pub fn push(&mut self, node: T) -> usize {
        self.body.push(node);
        self.body.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn finish(self) -> OutputDocument<T> {
        OutputDocument {
            header: self.header,
            body: self.body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_monotonic() {
        let mut b = DocumentBuilder::new("PET_DB", 1);
        assert!(b.is_empty());
        assert_eq!(b.push("a"), 0);
        assert_eq!(b.push("b"), 1);
        assert_eq!(b.push("c"), 2);

        let doc = b.finish();
        assert_eq!(doc.header, Header::new("PET_DB", 1));
        assert_eq!(doc.body, vec!["a", "b", "c"]);
    }

    #[test]
    fn serializes_header_and_body() {
        let mut b = DocumentBuilder::new("QUEST_DB", 1);
        b.push(7u32);
        let yaml = serde_yaml::to_string(&b.finish()).unwrap();
        assert_eq!(yaml, "Header:\n  Type: QUEST_DB\n  Version: 1\nBody:\n- 7\n");
    }
}
