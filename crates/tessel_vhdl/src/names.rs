//! Mapping of netlist names onto legal VHDL identifiers.

/// VHDL-93 reserved words, lowercase.
const RESERVED: &[&str] = &[
    "abs", "access", "after", "alias", "all", "and", "architecture", "array", "assert",
    "attribute", "begin", "block", "body", "buffer", "bus", "case", "component",
    "configuration", "constant", "disconnect", "downto", "else", "elsif", "end", "entity",
    "exit", "file", "for", "function", "generate", "generic", "group", "guarded", "if",
    "impure", "in", "inertial", "inout", "is", "label", "library", "linkage", "literal", "loop",
    "map", "mod", "nand", "new", "next", "nor", "not", "null", "of", "on", "open", "or",
    "others", "out", "package", "port", "postponed", "procedure", "process", "pure", "range",
    "record", "register", "reject", "rem", "report", "return", "rol", "ror", "select",
    "severity", "shared", "signal", "sla", "sll", "sra", "srl", "subtype", "then", "to",
    "transport", "type", "unaffected", "units", "until", "use", "variable", "wait", "when",
    "while", "with", "xnor", "xor",
];

const RENAME_PREFIX: &str = "VL_";

/// Returns `true` if `name` is a legal VHDL basic identifier.
pub fn is_legal(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_ascii_alphabetic()
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !name.ends_with('_')
        && !name.contains("__")
        && !RESERVED.contains(&name.to_ascii_lowercase().as_str())
}

/// Returns a legal VHDL identifier for `name`.
///
/// Legal names are kept. Anything else is prefixed with `VL_`, with
/// illegal characters replaced by `_` and runs of underscores collapsed,
/// so `\bus[0]` becomes `VL_bus_0` and `in` becomes `VL_in`.
pub fn legalize(name: &str) -> String {
    if is_legal(name) {
        return name.to_string();
    }
    let mut out = String::from(RENAME_PREFIX);
    for c in name.chars() {
        let c = if c.is_ascii_alphanumeric() { c } else { '_' };
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }
    while out.ends_with('_') && out.len() > RENAME_PREFIX.len() {
        out.pop();
    }
    if out.len() == RENAME_PREFIX.len() {
        out.push('x');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legal_names_unchanged() {
        assert_eq!(legalize("data_in"), "data_in");
        assert_eq!(legalize("LPMadd0_Out"), "LPMadd0_Out");
    }

    #[test]
    fn reserved_words_renamed() {
        assert_eq!(legalize("in"), "VL_in");
        assert_eq!(legalize("Signal"), "VL_Signal");
    }

    #[test]
    fn illegal_characters_replaced() {
        assert_eq!(legalize("\\bus[0]"), "VL_bus_0");
        assert_eq!(legalize("_tmp"), "VL_tmp");
        assert_eq!(legalize("a$b"), "VL_a_b");
        assert_eq!(legalize("x__y"), "VL_x_y");
    }

    #[test]
    fn degenerate_names() {
        assert_eq!(legalize(""), "VL_x");
        assert_eq!(legalize("$"), "VL_x");
        assert!(is_legal(&legalize("9lives")));
    }
}
