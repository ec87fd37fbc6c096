use comfy_table::{ContentArrangement, Table};

use lp_mechanics::LockPreset;

pub fn run() -> Result<(), String> {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Lock", "Name", "DC", "Successes"]);

    for preset in LockPreset::all() {
        let name = format!("{preset:?}").to_lowercase();
        table.add_row(vec![
            preset.to_string(),
            name,
            preset.dc().to_string(),
            preset.required_successes().to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  Custom locks take --dc and --successes (default DC 20, 3 successes).");
    Ok(())
}
