// Standard Library Imports
use std::{collections::HashSet, fs::File, io::Read, path::Path, sync::Arc};

// External Crate Imports
use color_eyre::{
    Result,
    eyre::{WrapErr, eyre},
};
use serde::Deserialize;
use tracing::debug;

// Local Crate Imports
use crate::queue_state::{Flags, QueueState};

// Public API ==========================================================================================================

/// The set of queues the console starts with
#[derive(Clone, Eq, PartialEq, Debug, Deserialize)]
pub struct QueuesConfig {
    queues: Vec<QueueConfig>,
}

#[derive(Clone, Eq, PartialEq, Debug, Deserialize)]
pub struct QueueConfig {
    pub name: String,
    #[serde(flatten)]
    pub flags: Flags,
}

impl QueuesConfig {
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let config: Self =
            serde_json::from_reader(reader).wrap_err("failed to parse the queue set as JSON")?;
        config.validate()?;

        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .wrap_err_with(|| format!("failed to open the queue set at {}", path.display()))?;

        let config = Self::from_reader(file)
            .wrap_err_with(|| format!("failed to load the queue set at {}", path.display()))?;
        debug!(path = %path.display(), queues = config.queues.len(), "loaded queue set");

        Ok(config)
    }

    #[must_use]
    pub fn queues(&self) -> &[QueueConfig] {
        &self.queues
    }

    #[must_use]
    pub fn into_queues(self) -> Vec<Arc<QueueState>> {
        self.queues
            .into_iter()
            .map(|QueueConfig { name, flags }| Arc::new(QueueState::with_flags(name, flags)))
            .collect()
    }
}

// Private Helper Code =================================================================================================

impl QueuesConfig {
    fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();

        for (index, QueueConfig { name, .. }) in self.queues.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(eyre!("queue #{index} has an empty name"));
            }

            if !names.insert(name.as_str()) {
                return Err(eyre!("the queue {name:?} is listed more than once"));
            }
        }

        Ok(())
    }
}

// Unit Tests ==========================================================================================================
