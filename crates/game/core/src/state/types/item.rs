/// Identifier for an item instance lying on the grid or carried by an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub u32);

/// Broad item category. Drives the glyph the mirror draws for the topmost
/// item of a cell.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BaseType {
    Armor,
    Weapon,
    Consumable,
    Container,
    Gem,
    Key,
    Money,
    Reagent,
    Recipe,
    Projectile,
    Quest,
    Quiver,
    TradeGoods,
    Miscellaneous,
    /// Items whose category is unknown to the glyph table.
    Unclassified,
}

/// Item instance. Definitions and slot management live outside the core.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub base_type: BaseType,
}

impl Item {
    pub fn new(id: ItemId, name: impl Into<String>, base_type: BaseType) -> Self {
        Self {
            id,
            name: name.into(),
            base_type,
        }
    }
}
