//! Display overlay flags understood by `mob_avail.txt`.

use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const OPTION_SIGHT: u32 = 0x0000_0001;
pub const OPTION_CART1: u32 = 0x0000_0008;
pub const OPTION_FALCON: u32 = 0x0000_0010;
pub const OPTION_RIDING: u32 = 0x0000_0020;
pub const OPTION_CART2: u32 = 0x0000_0080;
pub const OPTION_CART3: u32 = 0x0000_0100;
pub const OPTION_CART4: u32 = 0x0000_0200;
pub const OPTION_CART5: u32 = 0x0000_0400;
pub const OPTION_ORCISH: u32 = 0x0000_0800;
pub const OPTION_WEDDING: u32 = 0x0000_1000;
pub const OPTION_RUWACH: u32 = 0x0000_2000;
pub const OPTION_FLYING: u32 = 0x0000_8000;
pub const OPTION_XMAS: u32 = 0x0001_0000;
pub const OPTION_TRANSFORM: u32 = 0x0002_0000;
pub const OPTION_SUMMER: u32 = 0x0004_0000;
pub const OPTION_DRAGON1: u32 = 0x0008_0000;
pub const OPTION_WUG: u32 = 0x0010_0000;
pub const OPTION_WUGRIDER: u32 = 0x0020_0000;
pub const OPTION_MADOGEAR: u32 = 0x0040_0000;
pub const OPTION_DRAGON2: u32 = 0x0080_0000;
pub const OPTION_DRAGON3: u32 = 0x0100_0000;
pub const OPTION_DRAGON4: u32 = 0x0200_0000;
pub const OPTION_DRAGON5: u32 = 0x0400_0000;
pub const OPTION_HANBOK: u32 = 0x0800_0000;
pub const OPTION_OKTOBERFEST: u32 = 0x1000_0000;
pub const OPTION_SUMMER2: u32 = 0x2000_0000;

pub const OPTION_CART: u32 =
    OPTION_CART1 | OPTION_CART2 | OPTION_CART3 | OPTION_CART4 | OPTION_CART5;
pub const OPTION_DRAGON: u32 =
    OPTION_DRAGON1 | OPTION_DRAGON2 | OPTION_DRAGON3 | OPTION_DRAGON4 | OPTION_DRAGON5;
pub const OPTION_COSTUME: u32 = OPTION_WEDDING
    | OPTION_XMAS
    | OPTION_SUMMER
    | OPTION_HANBOK
    | OPTION_OKTOBERFEST
    | OPTION_SUMMER2;

static OPTION_NAMES: Lazy<HashMap<u32, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (OPTION_SIGHT, "OPTION_SIGHT"),
        (OPTION_CART1, "OPTION_CART1"),
        (OPTION_FALCON, "OPTION_FALCON"),
        (OPTION_RIDING, "OPTION_RIDING"),
        (OPTION_CART2, "OPTION_CART2"),
        (OPTION_CART3, "OPTION_CART3"),
        (OPTION_CART4, "OPTION_CART4"),
        (OPTION_CART5, "OPTION_CART5"),
        (OPTION_ORCISH, "OPTION_ORCISH"),
        (OPTION_WEDDING, "OPTION_WEDDING"),
        (OPTION_RUWACH, "OPTION_RUWACH"),
        (OPTION_FLYING, "OPTION_FLYING"),
        (OPTION_XMAS, "OPTION_XMAS"),
        (OPTION_TRANSFORM, "OPTION_TRANSFORM"),
        (OPTION_SUMMER, "OPTION_SUMMER"),
        (OPTION_DRAGON1, "OPTION_DRAGON1"),
        (OPTION_WUG, "OPTION_WUG"),
        (OPTION_WUGRIDER, "OPTION_WUGRIDER"),
        (OPTION_MADOGEAR, "OPTION_MADOGEAR"),
        (OPTION_DRAGON2, "OPTION_DRAGON2"),
        (OPTION_DRAGON3, "OPTION_DRAGON3"),
        (OPTION_DRAGON4, "OPTION_DRAGON4"),
        (OPTION_DRAGON5, "OPTION_DRAGON5"),
        (OPTION_HANBOK, "OPTION_HANBOK"),
        (OPTION_OKTOBERFEST, "OPTION_OKTOBERFEST"),
        (OPTION_SUMMER2, "OPTION_SUMMER2"),
        (OPTION_CART, "OPTION_CART"),
        (OPTION_DRAGON, "OPTION_DRAGON"),
        (OPTION_COSTUME, "OPTION_COSTUME"),
    ])
});

/// Constant name of an overlay value. Only single flags and the three
/// compounds have names; any other combination is unknown.
pub fn option_name(value: u32) -> Option<&'static str> {
    OPTION_NAMES.get(&value).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singles_and_compounds() {
        assert_eq!(option_name(0x20), Some("OPTION_RIDING"));
        assert_eq!(option_name(0x8000), Some("OPTION_FLYING"));
        assert_eq!(option_name(0x788), Some("OPTION_CART"));
        assert_eq!(option_name(0x780_0000 | 0x8_0000), Some("OPTION_DRAGON"));
        assert_eq!(option_name(0x3805_1000), Some("OPTION_COSTUME"));
    }

    #[test]
    fn unnamed_values() {
        assert_eq!(option_name(0), None);
        assert_eq!(option_name(0x4000), None);
        assert_eq!(option_name(OPTION_SIGHT | OPTION_FALCON), None);
    }
}
