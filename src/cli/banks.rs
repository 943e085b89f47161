use comfy_table::{Cell, Table};

use bankconv::error::Result;
use bankconv::profiles::ProfileRegistry;
use bankconv::settings::load_settings;

pub fn run() -> Result<()> {
    let registry = ProfileRegistry::builtin().with_policies(&load_settings().row_policies);

    let mut table = Table::new();
    table.set_header(vec!["Key", "Name", "Date format", "Header rows", "Footer rows", "Policy"]);
    for profile in registry.iter() {
        table.add_row(vec![
            Cell::new(profile.key),
            Cell::new(profile.name),
            Cell::new(profile.date_format),
            Cell::new(profile.skip_rows),
            Cell::new(profile.trim_footer_rows),
            Cell::new(profile.policy),
        ]);
    }
    println!("Banks\n{table}");
    Ok(())
}
