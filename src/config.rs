// Runtime configuration - command line flags with environment fallbacks

use crate::expenses::ExpenseHandler;
use crate::groups::GroupHandler;
use crate::ids::IdScheme;
use clap::Args;
use std::path::PathBuf;

pub const EXPENSES_FILE: &str = "expenses.json";
pub const GROUPS_FILE: &str = "groups.json";

/// Where the two document stores live and how new ids are minted
#[derive(Debug, Clone, Args)]
pub struct StoreConfig {
    /// Directory holding expenses.json and groups.json
    #[arg(long, env = "EXPENSE_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Id scheme for new records: timestamp or uuid
    #[arg(long, env = "EXPENSE_ID_SCHEME", default_value = "timestamp")]
    pub id_scheme: IdScheme,
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        StoreConfig {
            data_dir: data_dir.into(),
            id_scheme: IdScheme::default(),
        }
    }

    pub fn expenses_path(&self) -> PathBuf {
        self.data_dir.join(EXPENSES_FILE)
    }

    pub fn groups_path(&self) -> PathBuf {
        self.data_dir.join(GROUPS_FILE)
    }

    pub fn expense_handler(&self) -> ExpenseHandler {
        ExpenseHandler::new(self.expenses_path(), self.id_scheme)
    }

    pub fn group_handler(&self) -> GroupHandler {
        GroupHandler::new(self.groups_path(), self.id_scheme)
    }
}

#[derive(Debug, Clone, Args)]
pub struct LogConfig {
    /// tracing filter directive, e.g. "info" or "expense_tracker=debug"
    #[arg(long = "log-filter", env = "RUST_LOG", default_value = "info")]
    pub filter: String,
}
