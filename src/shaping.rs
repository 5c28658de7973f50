//! Contextual shaping of Arabic text.
//!
//! Arabic letters take one of four visual forms depending on whether they join the letters around
//! them. Shaping walks a string in display order, which for right-to-left text is the reverse of
//! its logical order, and picks for every character the variant table to draw it from.
//!
//! Throughout this module, for the character at logical index `i`, `next` is the character at
//! `i - 1` (drawn immediately after it) and `prev` is the character at `i + 1` (drawn immediately
//! before it).

use core::iter::{Peekable, Rev};
use core::str::Chars;

use crate::font::{ArabicFonts, ARABIC};

/// The visual form of a letter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// The letter joins neither neighbour.
    Separate,
    /// The letter opens a joined run.
    Starting,
    /// The letter joins both neighbours.
    Medial,
    /// The letter closes a joined run.
    Ending,
}

/// Letters that never join the letter after them, so the following letter must start a new run.
pub const DISCONNECTORS: [char; 20] = [
    ' ',
    '\u{0627}', // alef
    '\u{0623}', // alef with hamza above
    '\u{0622}', // alef with madda above
    '\u{0625}', // alef with hamza below
    '\u{0621}', // hamza
    '\u{0624}', // waw with hamza above
    '\u{062F}', // dal
    '\u{0630}', // thal
    '\u{0631}', // reh
    '\u{0632}', // zain
    '\u{0648}', // waw
    '\u{FEF5}', // lam-alef ligatures
    '\u{FEF6}',
    '\u{FEF7}',
    '\u{FEF8}',
    '\u{FEF9}',
    '\u{FEFA}',
    '\u{FEFB}',
    '\u{FEFC}',
];

/// Arabic letters U+0621..=U+063A and U+0640..=U+064A sit at `codepoint - ARABIC_SLOT_BASE` in the
/// Arabic font tables.
const ARABIC_SLOT_BASE: u32 = 0x0620;

/// What a single input character resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symbol {
    /// The space character.
    Space,
    /// A character with a glyph in the font tables, by table index.
    Letter(u8),
    /// A lam-alef presentation form. These have no glyph of their own.
    LamAlef(char),
    /// A character no table can represent.
    Unmapped(char),
}

impl Symbol {
    /// Resolve an input character. Arabic letters map to the table slot of their transliteration;
    /// any other character in 33..=127 is taken as the transliteration itself.
    pub fn resolve(c: char) -> Self {
        match c {
            ' ' => Symbol::Space,
            '\u{0621}'..='\u{063A}' | '\u{0640}'..='\u{064A}' => {
                Symbol::Letter((c as u32 - ARABIC_SLOT_BASE) as u8)
            }
            '\u{FEF5}'..='\u{FEFC}' => Symbol::LamAlef(c),
            '!'..='\x7F' => Symbol::Letter((c as u32 - 32) as u8),
            _ => Symbol::Unmapped(c),
        }
    }

    /// The font table index this symbol is drawn from, if it has a glyph.
    pub fn slot(self) -> Option<usize> {
        match self {
            Symbol::Space => Some(0),
            Symbol::Letter(slot) => Some(slot as usize),
            Symbol::LamAlef(_) | Symbol::Unmapped(_) => None,
        }
    }

    /// The Unicode character this symbol stands for, with transliterated slots mapped back to the
    /// Arabic letter they hold.
    fn canonical(self) -> Option<char> {
        match self {
            Symbol::Space => Some(' '),
            Symbol::Letter(slot @ (1..=26 | 32..=42)) => {
                char::from_u32(ARABIC_SLOT_BASE + u32::from(slot))
            }
            Symbol::Letter(slot) => char::from_u32(u32::from(slot) + 32),
            Symbol::LamAlef(c) => Some(c),
            Symbol::Unmapped(_) => None,
        }
    }

    /// Whether this symbol is in the disconnector set. Space counts; unmapped characters never do.
    pub fn is_disconnector(self) -> bool {
        self.canonical()
            .map_or(false, |c| DISCONNECTORS.contains(&c))
    }
}

/// Whether `c` is in the disconnector set, after resolving ASCII transliterations.
pub fn is_disconnector(c: char) -> bool {
    Symbol::resolve(c).is_disconnector()
}

impl Shape {
    /// Classify `current` given its neighbours. `None` marks a string boundary.
    ///
    /// Disconnector letters are always drawn separate. Otherwise the character that is drawn first
    /// (no `prev`) is separate when a break follows it and starting when not, and is classified
    /// by this rule even when it is also the last character drawn. The character drawn last (no
    /// `next`) is starting after a space and ending after anything else. Interior characters
    /// open a run after a break, close it before a space, and are medial otherwise.
    pub fn classify(prev: Option<Symbol>, current: Symbol, next: Option<Symbol>) -> Shape {
        if current.is_disconnector() {
            return Shape::Separate;
        }
        let break_next = next.map_or(true, Symbol::is_disconnector);
        match (prev, next) {
            (None, _) => {
                if break_next {
                    Shape::Separate
                } else {
                    Shape::Starting
                }
            }
            (Some(prev), None) => {
                if prev == Symbol::Space {
                    Shape::Starting
                } else {
                    Shape::Ending
                }
            }
            (Some(prev), Some(_)) => match (break_next, prev == Symbol::Space) {
                (true, true) => Shape::Separate,
                (true, false) => Shape::Starting,
                (false, true) => Shape::Ending,
                (false, false) => Shape::Medial,
            },
        }
    }
}

/// One shaped character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShapedGlyph {
    /// Logical index of the character, counted in `char`s.
    pub index: usize,
    pub symbol: Symbol,
    pub shape: Shape,
    /// Column bytes to draw.
    pub glyph: &'static [u8],
}

/// Iterator over the shaped characters of a string, in display order. Created by `shape`.
#[derive(Clone, Debug)]
pub struct Shaper<'s, 'f, const W: usize> {
    chars: Peekable<Rev<Chars<'s>>>,
    prev: Option<Symbol>,
    remaining: usize,
    fonts: &'f ArabicFonts<W>,
}

/// Shape `s` against `fonts`, yielding one `ShapedGlyph` per character from the last character of
/// `s` to the first.
pub fn shape<'s, 'f, const W: usize>(s: &'s str, fonts: &'f ArabicFonts<W>) -> Shaper<'s, 'f, W> {
    Shaper {
        chars: s.chars().rev().peekable(),
        prev: None,
        remaining: s.chars().count(),
        fonts,
    }
}

/// The shapes of the characters of `s` in display order, without glyph lookup.
pub fn shapes(s: &str) -> impl Iterator<Item = Shape> + '_ {
    shape(s, &ARABIC).map(|g| g.shape)
}

impl<'s, 'f, const W: usize> Iterator for Shaper<'s, 'f, W> {
    type Item = ShapedGlyph;

    fn next(&mut self) -> Option<ShapedGlyph> {
        let current = Symbol::resolve(self.chars.next()?);
        let next = self.chars.peek().map(|c| Symbol::resolve(*c));
        let shape = Shape::classify(self.prev, current, next);
        self.prev = Some(current);
        self.remaining -= 1;

        let placeholder: &'static [u8] = self.fonts.placeholder;
        let glyph = current
            .slot()
            .and_then(|slot| self.fonts.table(shape).get(slot))
            .unwrap_or(placeholder);
        Some(ShapedGlyph {
            index: self.remaining,
            symbol: current,
            shape,
            glyph,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'s, 'f, const W: usize> ExactSizeIterator for Shaper<'s, 'f, W> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{BLANK, PLACEHOLDER};
    use std::vec::Vec;

    use super::Shape::*;

    const BEH: char = '\u{0628}';
    const TEH: char = '\u{062A}';
    const DAL: char = '\u{062F}';
    const LAM: char = '\u{0644}';
    const MEEM: char = '\u{0645}';
    const KAF: char = '\u{0643}';
    const ALEF: char = '\u{0627}';

    fn shaped(s: &str) -> Vec<Shape> {
        shapes(s).collect()
    }

    fn string(chars: &[char]) -> std::string::String {
        chars.iter().collect()
    }

    #[test]
    fn empty_string() {
        assert_eq!(shape("", &ARABIC).len(), 0);
        assert_eq!(shape("", &ARABIC).next(), None);
    }

    #[test]
    fn single_space_is_blank() {
        let out = shape(" ", &ARABIC).collect::<Vec<_>>();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].symbol, Symbol::Space);
        assert_eq!(out[0].glyph, &BLANK[..]);
    }

    #[test]
    fn all_spaces_are_blank() {
        let out = shape("     ", &ARABIC).collect::<Vec<_>>();
        assert_eq!(out.len(), 5);
        assert!(out.iter().all(|g| g.glyph == &BLANK[..]));
    }

    #[test]
    fn single_letter_is_separate() {
        assert_eq!(shaped(&string(&[BEH])), [Separate]);
        assert_eq!(shaped(&string(&[LAM])), [Separate]);
    }

    #[test]
    fn two_letter_word() {
        // Display order is index 1 then index 0.
        let out = shape(&string(&[BEH, TEH]), &ARABIC).collect::<Vec<_>>();
        assert_eq!(out[0].index, 1);
        assert_eq!(out[0].shape, Starting);
        assert_eq!(out[1].index, 0);
        assert_eq!(out[1].shape, Ending);
    }

    #[test]
    fn three_letter_word() {
        assert_eq!(shaped(&string(&[LAM, MEEM, KAF])), [Starting, Medial, Ending]);
    }

    #[test]
    fn disconnector_in_the_middle_is_separate() {
        for &x in &[BEH, LAM, MEEM, '\u{00C8}'] {
            let out = shape(&string(&[x, DAL, x]), &ARABIC).collect::<Vec<_>>();
            assert_eq!(out[1].index, 1);
            assert_eq!(out[1].shape, Separate);
        }
    }

    #[test]
    fn letter_after_disconnector_starts_a_run() {
        // Logical [beh, dal, lam, meem]: lam follows dal, so it starts a new run.
        let out = shaped(&string(&[BEH, DAL, LAM, MEEM]));
        assert_eq!(out, [Starting, Starting, Separate, Ending]);
    }

    #[test]
    fn words_split_by_spaces() {
        let s = string(&[LAM, MEEM, ' ', BEH, TEH, KAF]);
        // Display order: kaf, teh, beh, space, meem, lam.
        assert_eq!(
            shaped(&s),
            [Starting, Medial, Starting, Separate, Ending, Ending]
        );
    }

    #[test]
    fn consecutive_spaces_never_produce_medial() {
        let s = string(&[LAM, ' ', ' ', MEEM, ' ', ' ', KAF]);
        let out = shape(&s, &ARABIC).collect::<Vec<_>>();
        for g in out.iter().filter(|g| g.symbol != Symbol::Space) {
            assert_ne!(g.shape, Medial);
        }
        let kaf = out.iter().find(|g| g.index == 6).unwrap();
        assert_eq!(kaf.shape, Separate);
        let meem = out.iter().find(|g| g.index == 3).unwrap();
        assert_eq!(meem.shape, Separate);
        let lam = out.iter().find(|g| g.index == 0).unwrap();
        assert_eq!(lam.shape, Starting);
    }

    #[test]
    fn out_of_range_renders_placeholder_and_joins_like_a_letter() {
        let s = string(&[LAM, '\u{00C8}', MEEM]);
        let out = shape(&s, &ARABIC).collect::<Vec<_>>();
        assert_eq!(out[1].symbol, Symbol::Unmapped('\u{00C8}'));
        assert_eq!(out[1].glyph, &PLACEHOLDER[..]);
        assert_eq!(out[1].shape, Medial);
        assert_eq!(shaped(&s), shaped(&string(&[LAM, BEH, MEEM])));
    }

    #[test]
    fn control_characters_degrade_to_placeholder() {
        let out = shape("\u{7}\n", &ARABIC).collect::<Vec<_>>();
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|g| g.glyph == &PLACEHOLDER[..]));
    }

    #[test]
    fn lam_alef_is_a_disconnector_with_placeholder_glyph() {
        assert!(is_disconnector('\u{FEFB}'));
        let out = shape(&string(&['\u{FEFB}', LAM]), &ARABIC).collect::<Vec<_>>();
        assert_eq!(out[0].shape, Separate);
        assert_eq!(out[1].symbol, Symbol::LamAlef('\u{FEFB}'));
        assert_eq!(out[1].shape, Separate);
        assert_eq!(out[1].glyph, &PLACEHOLDER[..]);
    }

    #[test]
    fn disconnector_set_membership() {
        for &c in &[
            ' ', ALEF, '\u{0623}', '\u{0622}', '\u{0625}', '\u{0621}', '\u{0624}', DAL, '\u{0630}',
            '\u{0631}', '\u{0632}', '\u{0648}',
        ] {
            assert!(is_disconnector(c), "{:?}", c);
        }
        for &c in &[BEH, TEH, LAM, MEEM, KAF, '\u{0626}', '\u{0649}', 'a', '\u{00C8}'] {
            assert!(!is_disconnector(c), "{:?}", c);
        }
    }

    #[test]
    fn transliteration_shares_disconnectors() {
        // '/' is dal, 'H' is waw, '\'' is alef in the font tables.
        assert!(is_disconnector('/'));
        assert!(is_disconnector('H'));
        assert!(is_disconnector('\''));
        assert!(!is_disconnector('('));
        assert_eq!(Symbol::resolve('('), Symbol::resolve(BEH));
        assert_eq!(shaped("(/("), shaped(&string(&[BEH, DAL, BEH])));
    }

    #[test]
    fn resolve_slots() {
        assert_eq!(Symbol::resolve('\u{0621}'), Symbol::Letter(1));
        assert_eq!(Symbol::resolve('\u{063A}'), Symbol::Letter(26));
        assert_eq!(Symbol::resolve('\u{0640}'), Symbol::Letter(32));
        assert_eq!(Symbol::resolve('\u{064A}'), Symbol::Letter(42));
        assert_eq!(Symbol::resolve('~'), Symbol::Letter(94));
        assert_eq!(Symbol::resolve('\u{064B}'), Symbol::Unmapped('\u{064B}'));
        assert_eq!(Symbol::resolve('\u{1F600}'), Symbol::Unmapped('\u{1F600}'));
    }

    #[test]
    fn one_glyph_per_char_in_reverse_order() {
        let s = string(&[LAM, ALEF, ' ', MEEM, '\u{00C8}', 'x', KAF]);
        let out = shape(&s, &ARABIC).collect::<Vec<_>>();
        assert_eq!(out.len(), s.chars().count());
        let indices = out.iter().map(|g| g.index).collect::<Vec<_>>();
        assert_eq!(indices, [6, 5, 4, 3, 2, 1, 0]);
        let total = out.iter().map(|g| g.glyph.len()).sum::<usize>();
        assert_eq!(total, 8 * out.len());
    }

    #[test]
    fn shapes_can_be_recovered_from_glyphs() {
        // Lam, meem and kaf have four distinct variants each, so the emitted glyph identifies the
        // table it came from.
        let s = string(&[LAM, MEEM, KAF, ' ', KAF, LAM, ' ', MEEM]);
        let symbols = s.chars().rev().map(Symbol::resolve).collect::<Vec<_>>();
        let direct = (0..symbols.len())
            .map(|pos| {
                let prev = if pos == 0 { None } else { Some(symbols[pos - 1]) };
                let next = symbols.get(pos + 1).cloned();
                Shape::classify(prev, symbols[pos], next)
            })
            .collect::<Vec<_>>();
        let recovered = shape(&s, &ARABIC)
            .map(|g| {
                let slot = g.symbol.slot().unwrap();
                [Separate, Starting, Medial, Ending]
                    .iter()
                    .cloned()
                    .find(|&shape| ARABIC.table(shape).get(slot) == Some(g.glyph))
                    .unwrap()
            })
            .collect::<Vec<_>>();
        assert_eq!(recovered, direct);
        assert_eq!(shaped(&s), direct);
    }

    #[test]
    fn classify_boundaries() {
        let beh = Symbol::resolve(BEH);
        let dal = Symbol::resolve(DAL);
        assert_eq!(Shape::classify(None, beh, None), Separate);
        assert_eq!(Shape::classify(None, beh, Some(beh)), Starting);
        assert_eq!(Shape::classify(None, beh, Some(dal)), Separate);
        assert_eq!(Shape::classify(None, beh, Some(Symbol::Space)), Separate);
        assert_eq!(Shape::classify(Some(Symbol::Space), beh, None), Starting);
        assert_eq!(Shape::classify(Some(beh), beh, None), Ending);
        assert_eq!(Shape::classify(Some(dal), beh, None), Ending);
    }

    #[test]
    fn classify_interior() {
        let beh = Symbol::resolve(BEH);
        let dal = Symbol::resolve(DAL);
        let sp = Symbol::Space;
        assert_eq!(Shape::classify(Some(sp), beh, Some(sp)), Separate);
        assert_eq!(Shape::classify(Some(sp), beh, Some(dal)), Separate);
        assert_eq!(Shape::classify(Some(beh), beh, Some(dal)), Starting);
        assert_eq!(Shape::classify(Some(sp), beh, Some(beh)), Ending);
        assert_eq!(Shape::classify(Some(beh), beh, Some(beh)), Medial);
        assert_eq!(Shape::classify(Some(beh), dal, Some(beh)), Separate);
    }

    #[test]
    fn shaping_is_deterministic() {
        let s = string(&[BEH, ' ', LAM, ALEF, MEEM]);
        assert_eq!(
            shape(&s, &ARABIC).collect::<Vec<_>>(),
            shape(&s, &ARABIC).collect::<Vec<_>>()
        );
    }
}
