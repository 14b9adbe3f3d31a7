//! Character classification and reserved-word tables.

/// Line terminators: LF, CR, LS and PS.
pub fn is_line_terminator(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Whitespace other than line terminators, including Unicode Zs and BOM.
pub fn is_whitespace(ch: char) -> bool {
    matches!(
        ch,
        ' ' | '\t'
            | '\u{000B}'
            | '\u{000C}'
            | '\u{00A0}'
            | '\u{FEFF}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
    )
}

/// Characters that may begin an identifier.
pub fn is_identifier_start(ch: char) -> bool {
    if ch.is_ascii() {
        return ch == '$' || ch == '_' || ch.is_ascii_alphabetic();
    }
    ch.is_alphabetic() || matches!(ch, '\u{2118}' | '\u{212E}' | '\u{309B}' | '\u{309C}')
}

/// Characters that may continue an identifier.
pub fn is_identifier_part(ch: char) -> bool {
    if ch.is_ascii() {
        return ch == '$' || ch == '_' || ch.is_ascii_alphanumeric();
    }
    is_identifier_start(ch)
        || ch.is_alphanumeric()
        || matches!(ch, '\u{200C}' | '\u{200D}')
        || is_connector_punctuation(ch)
        || is_combining_mark(ch)
        || matches!(ch, '\u{00B7}' | '\u{0387}' | '\u{1369}'..='\u{1371}' | '\u{19DA}')
}

fn is_connector_punctuation(ch: char) -> bool {
    matches!(
        ch,
        '\u{203F}' | '\u{2040}' | '\u{2054}' | '\u{FE33}' | '\u{FE34}' | '\u{FE4D}'..='\u{FE4F}'
            | '\u{FF3F}'
    )
}

fn is_combining_mark(ch: char) -> bool {
    matches!(
        ch,
        '\u{0300}'..='\u{036F}'
            | '\u{0483}'..='\u{0489}'
            | '\u{0591}'..='\u{05BD}'
            | '\u{0610}'..='\u{061A}'
            | '\u{064B}'..='\u{065F}'
            | '\u{0900}'..='\u{0903}'
            | '\u{093A}'..='\u{094F}'
            | '\u{1AB0}'..='\u{1AFF}'
            | '\u{1DC0}'..='\u{1DFF}'
            | '\u{20D0}'..='\u{20FF}'
            | '\u{FE00}'..='\u{FE0F}'
            | '\u{FE20}'..='\u{FE2F}'
    )
}

/// Decimal digit check.
pub fn is_decimal_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

/// Octal digit check.
pub fn is_octal_digit(ch: char) -> bool {
    matches!(ch, '0'..='7')
}

/// Words that always scan as keywords.
pub fn is_keyword(id: &str) -> bool {
    matches!(
        id,
        "break"
            | "case"
            | "catch"
            | "class"
            | "const"
            | "continue"
            | "debugger"
            | "default"
            | "delete"
            | "do"
            | "else"
            | "enum"
            | "export"
            | "extends"
            | "finally"
            | "for"
            | "function"
            | "if"
            | "import"
            | "in"
            | "instanceof"
            | "new"
            | "return"
            | "super"
            | "switch"
            | "this"
            | "throw"
            | "try"
            | "typeof"
            | "var"
            | "void"
            | "while"
            | "with"
    )
}

/// Identifiers reserved only in strict mode code.
pub fn is_strict_mode_reserved_word(id: &str) -> bool {
    matches!(
        id,
        "implements"
            | "interface"
            | "package"
            | "private"
            | "protected"
            | "public"
            | "static"
            | "yield"
            | "let"
    )
}

/// `eval` and `arguments` cannot be bound or assigned in strict mode.
pub fn is_restricted_word(id: &str) -> bool {
    id == "eval" || id == "arguments"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_classes() {
        assert!(is_identifier_start('$'));
        assert!(is_identifier_start('é'));
        assert!(!is_identifier_start('1'));
        assert!(is_identifier_part('1'));
        assert!(is_identifier_part('\u{200D}'));
        assert!(!is_identifier_part('-'));
    }

    #[test]
    fn test_whitespace_and_terminators() {
        assert!(is_whitespace('\u{3000}'));
        assert!(!is_whitespace('\n'));
        assert!(is_line_terminator('\u{2028}'));
    }

    #[test]
    fn test_reserved_words() {
        assert!(is_keyword("typeof"));
        assert!(!is_keyword("let"));
        assert!(is_strict_mode_reserved_word("let"));
        assert!(is_restricted_word("arguments"));
    }
}
