/// Input kind of a registry field. Maps one-to-one to the HTML control used to render it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Date,
    Textarea,
    Select,
}

impl FieldKind {
    /// Value for the `type` attribute of an `<input>`. `Textarea` and `Select`
    /// render their own elements and fall back to `text`.
    pub fn input_type(self) -> &'static str {
        match self {
            FieldKind::Email => "email",
            FieldKind::Tel => "tel",
            FieldKind::Date => "date",
            FieldKind::Text | FieldKind::Textarea | FieldKind::Select => "text",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

impl Choice {
    pub const fn new(value: &'static str, label: &'static str) -> Self {
        Self { value, label }
    }
}

/// Declarative description of a single form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Ordered choices; empty unless `kind` is `Select`.
    pub choices: &'static [Choice],
}

impl FieldSpec {
    pub const fn text(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Text,
            required: false,
            choices: &[],
        }
    }

    pub const fn of(self, kind: FieldKind) -> Self {
        Self { kind, ..self }
    }

    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    pub const fn select(self, choices: &'static [Choice]) -> Self {
        Self {
            kind: FieldKind::Select,
            choices,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENDERS: &[Choice] = &[Choice::new("Male", "Male"), Choice::new("Female", "Female")];

    #[test]
    fn builders_compose() {
        let spec = FieldSpec::text("email", "Email").of(FieldKind::Email).required();
        assert_eq!(spec.kind, FieldKind::Email);
        assert!(spec.required);
        assert!(spec.choices.is_empty());

        let gender = FieldSpec::text("gender", "Gender").select(GENDERS);
        assert_eq!(gender.kind, FieldKind::Select);
        assert_eq!(gender.choices.len(), 2);
        assert!(!gender.required);
    }

    #[test]
    fn input_type_falls_back_to_text() {
        assert_eq!(FieldKind::Tel.input_type(), "tel");
        assert_eq!(FieldKind::Textarea.input_type(), "text");
    }
}
