use crate::model::file::FileHandle;

#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Text { name: String, value: String },
    File { name: String, file: FileHandle },
}

impl Part {
    pub fn name(&self) -> &str {
        match self {
            Part::Text { name, .. } | Part::File { name, .. } => name,
        }
    }
}

/// Transport-neutral multipart body. Parts keep insertion order; the frontend
/// turns this into a browser `FormData` and the server rebuilds it for the relay.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartForm {
    parts: Vec<Part>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parts.push(Part::Text {
            name: name.into(),
            value: value.into(),
        });
    }

    pub fn push_file(&mut self, name: impl Into<String>, file: FileHandle) {
        self.parts.push(Part::File {
            name: name.into(),
            file,
        });
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// First text part with the given name.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|part| match part {
            Part::Text { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// All file parts with the given name, in insertion order.
    pub fn files<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a FileHandle> + 'a {
        self.parts.iter().filter_map(move |part| match part {
            Part::File { name: n, file } if n == name => Some(file),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order_per_name() {
        let first = FileHandle::new("a.pdf", "application/pdf", b"a".to_vec());
        let second = FileHandle::new("b.pdf", "application/pdf", b"b".to_vec());

        let mut form = MultipartForm::new();
        form.push_text("payload", "{}");
        form.push_file("documents", first.clone());
        form.push_file("pan", FileHandle::new("pan.png", "image/png", b"p".to_vec()));
        form.push_file("documents", second.clone());

        let docs: Vec<_> = form.files("documents").collect();
        assert_eq!(docs, vec![&first, &second]);
        assert_eq!(form.text("payload"), Some("{}"));
        assert_eq!(form.text("missing"), None);
        assert_eq!(form.len(), 4);
    }
}
