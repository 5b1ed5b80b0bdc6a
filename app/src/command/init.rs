use std::path::PathBuf;
use strand_config::Config;

/// Strategy for writing the default configuration to the active config path,
/// `~/strand/config.json` unless `--config` names another.
#[derive(Debug, Clone, Copy)]
pub struct InitStrategy;

impl super::CommandStrategy for InitStrategy {
    type Input = PathBuf;

    async fn execute(&self, path: Self::Input) -> anyhow::Result<()> {
        Config::create_config_at(&path)?;
        println!("Created {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandStrategy;

    #[tokio::test]
    async fn test_init_writes_to_given_path() -> anyhow::Result<()> {
        let dir = std::env::temp_dir().join(format!("strand-init-{}", std::process::id()));
        let path = dir.join("custom.json");

        InitStrategy.execute(path.clone()).await?;
        let written = Config::read(&path)?;
        let second = InitStrategy.execute(path.clone()).await;
        std::fs::remove_dir_all(&dir)?;

        assert_eq!(written, Some(Config::default()));
        assert!(second.is_err());
        Ok(())
    }
}
