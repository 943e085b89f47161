use comfy_table::{Cell, Table};

use bankconv::error::Result;
use bankconv::profiles::{ProfileRegistry, RowPolicy};
use bankconv::settings::{load_settings, save_settings, settings_path};

pub fn show() -> Result<()> {
    let settings = load_settings();
    println!("Settings:   {}", settings_path().display());
    println!("Output dir: {}", settings.output_dir);

    if settings.row_policies.is_empty() {
        println!("Row policies: (built-in defaults)");
        return Ok(());
    }
    let mut table = Table::new();
    table.set_header(vec!["Bank", "Policy"]);
    for (bank, policy) in &settings.row_policies {
        table.add_row(vec![Cell::new(bank), Cell::new(policy)]);
    }
    println!("Row policies\n{table}");
    Ok(())
}

pub fn set_output_dir(dir: &str) -> Result<()> {
    let mut settings = load_settings();
    settings.output_dir = dir.to_string();
    save_settings(&settings)?;
    println!("Output dir set to {dir}");
    Ok(())
}

pub fn set_policy(bank: &str, policy: &str) -> Result<()> {
    let profile = ProfileRegistry::builtin().require(bank)?.clone();
    let policy: RowPolicy = policy.parse()?;
    let mut settings = load_settings();
    settings.row_policies.insert(profile.key.to_string(), policy);
    save_settings(&settings)?;
    println!("{} now uses the {policy} row policy", profile.name);
    Ok(())
}
