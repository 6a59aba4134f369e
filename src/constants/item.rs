//! `item_db.txt` ingestion: item names and head gear view ids.

use tracing::trace;

use super::SymbolResolver;
use crate::process::{utils, RawRecord, RecordLayout};

/// 19 plain columns, then Script, OnEquip_Script and OnUnequip_Script.
pub const ITEM_LAYOUT: RecordLayout = RecordLayout::with_scripts(19, 3);

const NAME_COLUMN: usize = 1;
const EQUIP_COLUMN: usize = 14;
const VIEW_COLUMN: usize = 18;

const EQP_HEAD_LOW: u32 = 0x0001;
const EQP_HEAD_TOP: u32 = 0x0100;
const EQP_HEAD_MID: u32 = 0x0200;
const EQP_COSTUME_HEAD_TOP: u32 = 0x0400;
const EQP_COSTUME_HEAD_MID: u32 = 0x0800;
const EQP_COSTUME_HEAD_LOW: u32 = 0x1000;

pub const EQP_HELM: u32 = EQP_HEAD_LOW | EQP_HEAD_MID | EQP_HEAD_TOP;
pub const EQP_COSTUME_HELM: u32 =
    EQP_COSTUME_HEAD_TOP | EQP_COSTUME_HEAD_MID | EQP_COSTUME_HEAD_LOW;

/// Register one item record: always its name, and its view id when the item
/// is worn in a head slot and the view id is not taken yet.
pub fn ingest_item(resolver: &mut SymbolResolver, record: &RawRecord<'_>) {
    let item_id = utils::parse_id(record.id());
    let Ok(name) = record.field(NAME_COLUMN) else {
        return;
    };
    resolver.insert_item(item_id, name);

    let equip = record.int(EQUIP_COLUMN).unwrap_or(0) as u32;
    if equip & (EQP_HELM | EQP_COSTUME_HELM) == 0 {
        return;
    }
    let view = record.id_at(VIEW_COLUMN).unwrap_or(0);
    if resolver.insert_item_view(view, item_id) {
        trace!(item_id, view, "registered head gear view");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::item_line;

    #[test]
    fn names_are_trimmed_and_registered() {
        let mut r = SymbolResolver::new();
        r.ingest_items(&item_line(501, " Red_Potion ", 0, 0));
        assert_eq!(r.item_name(501), Some("Red_Potion"));
        assert_eq!(r.item_for_view(0), None);
    }

    #[test]
    fn head_gear_registers_view_first_wins() {
        let mut r = SymbolResolver::new();
        let text = item_line(2220, "Hat", EQP_HEAD_TOP, 16)
            + &item_line(2221, "Hat_", EQP_HEAD_TOP, 16)
            + &item_line(19500, "C_Hat", EQP_COSTUME_HEAD_MID, 42)
            + &item_line(1201, "Knife", 0x02, 1);
        assert_eq!(r.ingest_items(&text), 4);
        assert_eq!(r.item_for_view(16), Some(2220));
        assert_eq!(r.item_for_view(42), Some(19500));
        assert_eq!(r.item_for_view(1), None);
        assert_eq!(r.item_name(2221), Some("Hat_"));
    }

    #[test]
    fn later_item_load_overrides_name() {
        let mut r = SymbolResolver::new();
        r.ingest_items(&item_line(501, "Red_Potion", 0, 0));
        r.ingest_items(&(item_line(501, "Red_Potion_Custom", 0, 0) + &item_line(502, "Orange_Potion", 0, 0)));
        assert_eq!(r.item_name(501), Some("Red_Potion_Custom"));
        assert_eq!(r.item_name(502), Some("Orange_Potion"));
    }
}
