//! Configuration display

use farm_admin::config::AdminConfig;

use crate::ConfigCommands;

pub fn handle_config_command(cmd: ConfigCommands, config: &AdminConfig) -> anyhow::Result<()> {
    match cmd {
        ConfigCommands::Show => {
            match AdminConfig::find_config_file() {
                Some(path) => println!("# discovered config file: {}", path.display()),
                None => println!("# no config file found, using defaults and environment"),
            }
            print!("{}", config.sanitized().to_toml()?);
        }
    }
    Ok(())
}
