//! Daily combo listing

use farm_admin::client::{AdminApiClient, AdminStore};
use farm_admin::config::AdminConfig;
use farm_admin::models::DailyCombo;

use crate::ComboCommands;

pub async fn handle_combo_command(cmd: ComboCommands, config: &AdminConfig) -> anyhow::Result<()> {
    let client = AdminApiClient::new(config.api.clone())?;

    let combos = match cmd {
        ComboCommands::List => client.list_daily_combos().await?,
        ComboCommands::Current => client.current_daily_combos().await?,
    };

    println!("{} daily combos", combos.len());
    for combo in &combos {
        print_combo(combo);
    }
    Ok(())
}

fn print_combo(combo: &DailyCombo) {
    let active = match combo.is_active {
        Some(true) => "active",
        Some(false) => "inactive",
        None => "-",
    };
    println!(
        "  {:<16} {:<10} items [{}, {}, {}] reward {:<8} {}",
        combo.combo_name,
        combo.start_date.get(..10).unwrap_or(&combo.start_date),
        combo.item_1,
        combo.item_2,
        combo.item_3,
        combo.combo_reward,
        active
    );
}
