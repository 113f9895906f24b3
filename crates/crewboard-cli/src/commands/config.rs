use anyhow::Result;
use crewboard_core::CrewConfig;
use crewboard_infrastructure::CrewPaths;
use std::path::Path;

pub fn show(paths: &CrewPaths, config: &CrewConfig, data_dir: &Path) -> Result<()> {
    println!("config file: {}", paths.config_file().display());
    println!("data dir:    {}", data_dir.display());
    println!("log level:   {}", config.log_level);
    Ok(())
}
