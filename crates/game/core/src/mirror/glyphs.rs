use std::collections::HashMap;

use crate::state::BaseType;

/// Glyph drawn for the topmost item of a cell, keyed by base type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemGlyphs {
    table: HashMap<BaseType, char>,
    fallback: char,
}

impl ItemGlyphs {
    pub const FALLBACK: char = '?';

    /// Empty table; every base type draws the fallback glyph.
    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
            fallback: Self::FALLBACK,
        }
    }

    /// Roguelike defaults. `Unclassified` has no entry.
    pub fn standard() -> Self {
        [
            (BaseType::Armor, '['),
            (BaseType::Weapon, ')'),
            (BaseType::Consumable, '%'),
            (BaseType::Container, '&'),
            (BaseType::Gem, '\u{263c}'),
            (BaseType::Key, '\u{2552}'),
            (BaseType::Money, '$'),
            (BaseType::Reagent, '\u{220f}'),
            (BaseType::Recipe, '\u{222b}'),
            (BaseType::Projectile, '('),
            (BaseType::Quest, '\u{2021}'),
            (BaseType::Quiver, '\u{00b6}'),
            (BaseType::TradeGoods, '\u{2211}'),
            (BaseType::Miscellaneous, '}'),
        ]
        .into_iter()
        .fold(Self::empty(), |glyphs, (base, glyph)| glyphs.with_glyph(base, glyph))
    }

    pub fn with_glyph(mut self, base: BaseType, glyph: char) -> Self {
        self.table.insert(base, glyph);
        self
    }

    pub fn with_fallback(mut self, fallback: char) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn glyph(&self, base: BaseType) -> char {
        self.table.get(&base).copied().unwrap_or(self.fallback)
    }
}

impl Default for ItemGlyphs {
    fn default() -> Self {
        Self::standard()
    }
}
