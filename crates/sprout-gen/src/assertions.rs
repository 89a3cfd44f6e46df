//! Runtime checks derived from return annotations.
//!
//! `isinstance` only accepts classes, so annotations are reduced to the
//! builtin or named class a value can be checked against: subscripted
//! builtin generics lose their parameters, unions become tuples, and
//! anything that cannot be checked at runtime yields no assertion.

/// The check a happy-path test makes on its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeCheck {
    /// `assert result is None`.
    IsNone,
    /// `assert isinstance(result, T)` or `(A, B)` for several classes.
    Instance(Vec<String>),
    /// Nothing checkable.
    Skip,
}

impl RuntimeCheck {
    /// Check for an optional annotation; `self_type` resolves `Self`.
    #[must_use]
    pub fn for_annotation(annotation: Option<&str>, self_type: Option<&str>) -> Self {
        let Some(annotation) = annotation else {
            return Self::Skip;
        };
        let annotation = unquote(annotation.trim());
        if annotation == "None" {
            return Self::IsNone;
        }
        match runtime_classes(annotation, self_type) {
            Some(classes) if !classes.is_empty() => Self::Instance(classes),
            _ => Self::Skip,
        }
    }

    /// Assertion line against `subject`, if any.
    #[must_use]
    pub fn assertion(&self, subject: &str) -> Option<String> {
        match self {
            Self::IsNone => Some(format!("assert {subject} is None")),
            Self::Instance(classes) if classes.len() == 1 => {
                Some(format!("assert isinstance({subject}, {})", classes[0]))
            }
            Self::Instance(classes) => Some(format!(
                "assert isinstance({subject}, ({}))",
                classes.join(", ")
            )),
            Self::Skip => None,
        }
    }
}

/// Whether the annotation is `int` or `float`.
#[must_use]
pub fn is_numeric_annotation(annotation: Option<&str>) -> bool {
    annotation.is_some_and(|a| matches!(unquote(a.trim()), "int" | "float"))
}

/// Whether the annotation names a sized collection.
#[must_use]
pub fn is_collection_annotation(annotation: &str) -> bool {
    let (head, _) = split_subscript(unquote(annotation.trim()));
    matches!(
        strip_typing(head),
        "list"
            | "List"
            | "set"
            | "Set"
            | "frozenset"
            | "FrozenSet"
            | "tuple"
            | "Tuple"
            | "Sequence"
            | "MutableSequence"
            | "Iterable"
            | "Collection"
    )
}

fn runtime_classes(annotation: &str, self_type: Option<&str>) -> Option<Vec<String>> {
    let members = split_top_level(annotation, '|');
    if members.len() > 1 {
        return union_classes(&members, self_type);
    }

    let (head, args) = split_subscript(annotation);
    let head = strip_typing(head);
    match (head, args) {
        ("Optional", Some(inner)) => {
            let mut classes = runtime_classes(inner.trim(), self_type)?;
            classes.push("type(None)".to_string());
            Some(classes)
        }
        ("Union", Some(inner)) => union_classes(&split_top_level(inner, ','), self_type),
        ("Any" | "object" | "Literal" | "Callable" | "TypeVar" | "Annotated", _) => None,
        ("Self", None) => self_type.map(|t| vec![t.to_string()]),
        (name, generic) => builtin_for(name)
            .map(str::to_string)
            .or_else(|| generic.is_none().then(|| name.to_string()))
            .map(|class| vec![class]),
    }
}

fn union_classes(members: &[&str], self_type: Option<&str>) -> Option<Vec<String>> {
    let mut classes = Vec::new();
    for member in members {
        let member = member.trim();
        if member == "None" {
            classes.push("type(None)".to_string());
        } else {
            for class in runtime_classes(member, self_type)? {
                if !classes.contains(&class) {
                    classes.push(class);
                }
            }
        }
    }
    Some(classes)
}

/// Builtin class behind a typing alias or builtin generic.
fn builtin_for(name: &str) -> Option<&'static str> {
    Some(match name {
        "List" | "list" => "list",
        "Dict" | "dict" | "DefaultDict" | "OrderedDict" => "dict",
        "Set" | "set" => "set",
        "FrozenSet" | "frozenset" => "frozenset",
        "Tuple" | "tuple" => "tuple",
        "Type" | "type" => "type",
        "int" => "int",
        "float" => "float",
        "str" => "str",
        "bool" => "bool",
        "bytes" => "bytes",
        _ => return None,
    })
}

fn strip_typing(name: &str) -> &str {
    name.strip_prefix("typing.").unwrap_or(name)
}

fn unquote(annotation: &str) -> &str {
    annotation
        .strip_prefix('"')
        .and_then(|a| a.strip_suffix('"'))
        .or_else(|| {
            annotation
                .strip_prefix('\'')
                .and_then(|a| a.strip_suffix('\''))
        })
        .unwrap_or(annotation)
}

/// `Name[args]` -> `("Name", Some("args"))`.
fn split_subscript(annotation: &str) -> (&str, Option<&str>) {
    match annotation.find('[') {
        Some(open) if annotation.ends_with(']') => (
            annotation[..open].trim(),
            Some(&annotation[open + 1..annotation.len() - 1]),
        ),
        _ => (annotation, None),
    }
}

/// Split on `sep` outside of brackets.
fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '[' | '(' => depth += 1,
            ']' | ')' => depth = depth.saturating_sub(1),
            c if c == sep && depth == 0 => {
                parts.push(text[start..i].trim());
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(text[start..].trim());
    parts
}
