//! Fixtures shared by the unit tests.

use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::constants::{item::ITEM_LAYOUT, SymbolResolver, MOB_LAYOUT, SKILL_LAYOUT};

pub fn init_test_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,csv2yaml=debug")),
        )
        .with_test_writer()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// A 22 column `item_db.txt` line with empty scripts.
pub fn item_line(id: u32, name: &str, equip: u32, view: u32) -> String {
    let mut cols = vec![String::new(); ITEM_LAYOUT.min_columns - ITEM_LAYOUT.script_columns];
    cols[0] = id.to_string();
    cols[1] = name.to_string();
    cols[2] = name.to_string();
    cols[14] = equip.to_string();
    cols[18] = view.to_string();
    cols.join(",") + ",{},{},{}\n"
}

/// A full width `mob_db.txt` line.
pub fn mob_line(id: u32, name: &str) -> String {
    let mut cols = vec![id.to_string(), name.to_string(), name.to_string(), name.to_string()];
    cols.resize(MOB_LAYOUT.min_columns, "0".to_string());
    cols.join(",") + "\n"
}

/// An 18 column `skill_db.txt` line.
pub fn skill_line(id: u32, name: &str) -> String {
    let mut cols = vec![id.to_string(); SKILL_LAYOUT.min_columns - 2];
    cols.push(name.to_string());
    cols.push("Description".to_string());
    cols.join(",") + "\n"
}

/// The 20 plain columns of a `pet_db.txt` line for PORING, every
/// defaulted value at its default.
pub fn pet_columns() -> Vec<String> {
    [
        "1002", "PORING", "Poring", "619", "9001", "10013", "531", "80", "60", "50", "100",
        "250", "20", "2000", "150", "1", "0", "350", "400", "800",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Tables with a handful of well-known entries.
pub fn resolver() -> SymbolResolver {
    let mut r = SymbolResolver::new();
    r.insert_item(501, "Red_Potion");
    r.insert_item(619, "Unripe_Apple");
    r.insert_item(9001, "Poring_Egg");
    r.insert_item(10013, "Backpack");
    r.insert_item(531, "Apple_Juice");
    r.insert_item(1201, "Knife");
    r.insert_item(2101, "Guard");
    r.insert_item(2220, "Hat");
    r.insert_item(2241, "Beard");
    r.insert_item_view(16, 2220);
    r.insert_item_view(21, 2241);

    r.insert_mob(1002, "PORING");
    r.insert_mob(1113, "DROPS");
    r.insert_mob(1031, "POPORING");

    r.insert_skill(10000, "GD_APPROVAL");
    r.insert_skill(10001, "GD_KAFRACONTRACT");
    r.insert_skill(10002, "GD_GUARDRESEARCH");
    r.insert_skill(10004, "GD_EXTENSION");
    r
}
