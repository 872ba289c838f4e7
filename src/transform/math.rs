//! Math and Unicode symbol conversion.
//!
//! Extracted text encodes math with Unicode codepoints: mathematical
//! alphanumerics, Greek letters, sub/superscript digits, operator symbols.
//! This stage rewrites such runs as TeX-style token streams wrapped in
//! [`Inline::Math`] so the renderer can emit them inside dollar delimiters
//! without escaping.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::model::Inline;

/// A paragraph with more than this share of mapped symbols (among
/// non-whitespace chars) becomes a display expression.
const DISPLAY_RATIO: f32 = 0.5;

/// Greek letters and operator symbols with fixed TeX commands.
static SYMBOL_MAP: Lazy<HashMap<char, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ('α', "\\alpha"),
        ('β', "\\beta"),
        ('γ', "\\gamma"),
        ('δ', "\\delta"),
        ('ε', "\\epsilon"),
        ('ζ', "\\zeta"),
        ('η', "\\eta"),
        ('θ', "\\theta"),
        ('ι', "\\iota"),
        ('κ', "\\kappa"),
        ('λ', "\\lambda"),
        ('μ', "\\mu"),
        ('ν', "\\nu"),
        ('ξ', "\\xi"),
        ('π', "\\pi"),
        ('ρ', "\\rho"),
        ('σ', "\\sigma"),
        ('τ', "\\tau"),
        ('υ', "\\upsilon"),
        ('φ', "\\phi"),
        ('χ', "\\chi"),
        ('ψ', "\\psi"),
        ('ω', "\\omega"),
        ('Γ', "\\Gamma"),
        ('Δ', "\\Delta"),
        ('Θ', "\\Theta"),
        ('Λ', "\\Lambda"),
        ('Ξ', "\\Xi"),
        ('Π', "\\Pi"),
        ('Σ', "\\Sigma"),
        ('Υ', "\\Upsilon"),
        ('Φ', "\\Phi"),
        ('Ψ', "\\Psi"),
        ('Ω', "\\Omega"),
        ('×', "\\times"),
        ('÷', "\\div"),
        ('±', "\\pm"),
        ('∓', "\\mp"),
        ('≤', "\\le"),
        ('≥', "\\ge"),
        ('≠', "\\ne"),
        ('≈', "\\approx"),
        ('≡', "\\equiv"),
        ('∞', "\\infty"),
        ('∑', "\\sum"),
        ('∏', "\\prod"),
        ('∫', "\\int"),
        ('√', "\\sqrt"),
        ('∂', "\\partial"),
        ('∇', "\\nabla"),
        ('∈', "\\in"),
        ('∉', "\\notin"),
        ('⊂', "\\subset"),
        ('⊆', "\\subseteq"),
        ('∪', "\\cup"),
        ('∩', "\\cap"),
        ('∀', "\\forall"),
        ('∃', "\\exists"),
        ('→', "\\to"),
        ('⇒', "\\Rightarrow"),
        ('⇔', "\\Leftrightarrow"),
        ('⋅', "\\cdot"),
        ('·', "\\cdot"),
        ('−', "-"),
    ])
});

/// ASCII equivalent of a mathematical alphanumeric codepoint, if any.
///
/// The styled letter blocks (bold, italic, script, fraktur, sans, mono)
/// repeat in 52-codepoint runs; the styled digit blocks repeat in tens.
fn fold_math_alphanumeric(c: char) -> Option<char> {
    let cp = c as u32;
    match cp {
        0x1D400..=0x1D6A3 => {
            let index = (cp - 0x1D400) % 52;
            if index < 26 {
                char::from_u32('A' as u32 + index)
            } else {
                char::from_u32('a' as u32 + index - 26)
            }
        }
        0x1D7CE..=0x1D7FF => char::from_u32('0' as u32 + (cp - 0x1D7CE) % 10),
        _ => None,
    }
}

fn superscript_digit(c: char) -> Option<char> {
    match c {
        '⁰' => Some('0'),
        '¹' => Some('1'),
        '²' => Some('2'),
        '³' => Some('3'),
        '⁴' => Some('4'),
        '⁵' => Some('5'),
        '⁶' => Some('6'),
        '⁷' => Some('7'),
        '⁸' => Some('8'),
        '⁹' => Some('9'),
        'ⁿ' => Some('n'),
        _ => None,
    }
}

fn subscript_digit(c: char) -> Option<char> {
    let cp = c as u32;
    if (0x2080..=0x2089).contains(&cp) {
        char::from_u32('0' as u32 + cp - 0x2080)
    } else {
        None
    }
}

/// Check whether a character participates in math conversion.
pub fn is_math_char(c: char) -> bool {
    SYMBOL_MAP.contains_key(&c)
        || fold_math_alphanumeric(c).is_some()
        || superscript_digit(c).is_some()
        || subscript_digit(c).is_some()
}

/// Check whether a character alone justifies wrapping its word as math.
///
/// The Unicode minus also appears in page ranges and negative temperatures,
/// so it converts inside a math run but never starts one by itself.
fn is_trigger_char(c: char) -> bool {
    c != '−' && is_math_char(c)
}

/// Share of non-whitespace characters that are math symbols.
pub fn mapped_ratio(text: &str) -> f32 {
    let mut total = 0usize;
    let mut mapped = 0usize;
    for c in text.chars().filter(|c| !c.is_whitespace()) {
        total += 1;
        if is_math_char(c) {
            mapped += 1;
        }
    }
    if total == 0 {
        0.0
    } else {
        mapped as f32 / total as f32
    }
}

/// Convert a text run to a TeX-style token stream.
///
/// Commands are space-separated from following alphanumerics; sub and
/// superscript groups attach directly to the preceding token.
pub fn to_tex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut needs_sep = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if let Some(digit) = superscript_digit(c) {
            let mut group = String::from(digit);
            while let Some(d) = chars.peek().copied().and_then(superscript_digit) {
                group.push(d);
                chars.next();
            }
            out.push_str("^{");
            out.push_str(&group);
            out.push('}');
            needs_sep = false;
            continue;
        }
        if let Some(digit) = subscript_digit(c) {
            let mut group = String::from(digit);
            while let Some(d) = chars.peek().copied().and_then(subscript_digit) {
                group.push(d);
                chars.next();
            }
            out.push_str("_{");
            out.push_str(&group);
            out.push('}');
            needs_sep = false;
            continue;
        }
        if let Some(command) = SYMBOL_MAP.get(&c) {
            if needs_sep
                || out
                    .chars()
                    .next_back()
                    .is_some_and(|p| p.is_alphanumeric() || p == '}')
            {
                out.push(' ');
            }
            out.push_str(command);
            needs_sep = command.starts_with('\\');
            continue;
        }
        let folded = fold_math_alphanumeric(c).unwrap_or(c);
        if needs_sep && folded.is_alphanumeric() {
            out.push(' ');
        }
        out.push(folded);
        needs_sep = false;
    }

    out.trim().to_string()
}

/// Convert paragraph text to inline content.
///
/// A run mostly made of math symbols becomes one display expression.
/// Otherwise only the whitespace-delimited words containing math symbols
/// are wrapped as inline math; surrounding text stays literal.
pub fn convert_text(text: &str) -> Vec<Inline> {
    if !text.chars().any(is_trigger_char) {
        return vec![Inline::Text(text.to_string())];
    }
    if mapped_ratio(text) > DISPLAY_RATIO {
        return vec![Inline::Math {
            tex: to_tex(text),
            display: true,
        }];
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    let mut is_math: Vec<bool> = words
        .iter()
        .map(|w| w.chars().any(is_trigger_char))
        .collect();
    // A minus-only word joins an adjacent math run instead of splitting it.
    for i in 0..words.len() {
        if !is_math[i] && words[i].chars().any(|c| c == '−') {
            let prev = i > 0 && is_math[i - 1];
            let next = i + 1 < words.len() && is_math[i + 1];
            if prev || next {
                is_math[i] = true;
            }
        }
    }

    // Group consecutive words by whether they belong to a math run.
    let mut groups: Vec<(bool, Vec<&str>)> = Vec::new();
    for (word, math) in words.into_iter().zip(is_math) {
        match groups.last_mut() {
            Some((m, ws)) if *m == math => ws.push(word),
            _ => groups.push((math, vec![word])),
        }
    }

    let count = groups.len();
    let mut out = Vec::with_capacity(count);
    for (i, (math, words)) in groups.into_iter().enumerate() {
        let joined = words.join(" ");
        if math {
            out.push(Inline::Math {
                tex: to_tex(&joined),
                display: false,
            });
        } else {
            let mut t = joined;
            if i > 0 {
                t.insert(0, ' ');
            }
            if i + 1 < count {
                t.push(' ');
            }
            out.push(Inline::Text(t));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_bold_letters() {
        // U+1D400 is bold capital A, U+1D41A bold small a.
        assert_eq!(fold_math_alphanumeric('\u{1D400}'), Some('A'));
        assert_eq!(fold_math_alphanumeric('\u{1D41A}'), Some('a'));
        assert_eq!(fold_math_alphanumeric('\u{1D7CE}'), Some('0'));
        assert_eq!(fold_math_alphanumeric('x'), None);
    }

    #[test]
    fn test_to_tex_symbols() {
        assert_eq!(to_tex("α + β"), "\\alpha + \\beta");
        assert_eq!(to_tex("x²"), "x^{2}");
        assert_eq!(to_tex("H₂O"), "H_{2}O");
        assert_eq!(to_tex("a ≤ b"), "a \\le b");
        assert_eq!(to_tex("x₁₂"), "x_{12}");
    }

    #[test]
    fn test_command_separation() {
        assert_eq!(to_tex("αβ"), "\\alpha \\beta");
        assert_eq!(to_tex("πr²"), "\\pi r^{2}");
    }

    #[test]
    fn test_display_detection() {
        let inlines = convert_text("∑ αβ ≤ ∞");
        assert_eq!(inlines.len(), 1);
        match &inlines[0] {
            Inline::Math { display, tex } => {
                assert!(*display);
                assert!(tex.starts_with("\\sum"));
            }
            other => panic!("expected display math, got {other:?}"),
        }
    }

    #[test]
    fn test_inline_runs() {
        let inlines = convert_text("the area is πr² for a circle");
        assert_eq!(inlines.len(), 3);
        assert!(matches!(&inlines[0], Inline::Text(t) if t == "the area is "));
        assert!(matches!(&inlines[1], Inline::Math { display: false, tex } if tex == "\\pi r^{2}"));
        assert!(matches!(&inlines[2], Inline::Text(t) if t == " for a circle"));
    }

    #[test]
    fn test_bare_minus_stays_literal() {
        for text in ["pages 10−12 cover it", "it was −5 degrees"] {
            let inlines = convert_text(text);
            assert_eq!(inlines.len(), 1, "{text:?}");
            assert!(matches!(&inlines[0], Inline::Text(t) if t == text));
        }
    }

    #[test]
    fn test_minus_joins_adjacent_math_run() {
        let inlines = convert_text("so x² − y² factors");
        assert_eq!(inlines.len(), 3);
        assert!(
            matches!(&inlines[1], Inline::Math { display: false, tex } if tex == "x^{2} - y^{2}")
        );
    }

    #[test]
    fn test_plain_text_untouched() {
        let inlines = convert_text("no symbols here");
        assert_eq!(inlines.len(), 1);
        assert!(matches!(&inlines[0], Inline::Text(t) if t == "no symbols here"));
    }

    #[test]
    fn test_ratio() {
        assert!(mapped_ratio("αβγ") > 0.99);
        assert!(mapped_ratio("mostly words α") < 0.2);
        assert_eq!(mapped_ratio(""), 0.0);
    }
}
