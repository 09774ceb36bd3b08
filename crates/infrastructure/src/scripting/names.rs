//! Identifier rules shared by the script engine and the script highlighter.

/// Reserved words; they cannot name variables.
pub(crate) const KEYWORDS: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
    "else", "enum", "export", "extends", "finally", "for", "function", "if", "import", "in", "instanceof",
    "let", "new", "return", "super", "switch", "this", "throw", "try", "typeof", "var", "void", "while",
    "with", "yield",
];

/// Literal names styled as atoms by the editor.
pub(crate) const ATOMS: &[&str] = &["true", "false", "null", "undefined", "NaN", "Infinity"];

pub(crate) fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

pub(crate) fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// True if `name` can be declared as a function parameter.
pub(crate) fn is_binding_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(is_ident_start)
        && chars.all(is_ident_char)
        && !KEYWORDS.contains(&name)
        && !matches!(name, "true" | "false" | "null")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_names() {
        assert!(is_binding_name("token"));
        assert!(is_binding_name("$id_2"));
        assert!(!is_binding_name("2fa"));
        assert!(!is_binding_name("api-key"));
        assert!(!is_binding_name("class"));
        assert!(!is_binding_name("null"));
        assert!(!is_binding_name(""));
    }
}
