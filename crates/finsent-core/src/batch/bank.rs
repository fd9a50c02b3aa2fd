//! Banks covered by the datasets

use crate::error::{FinsentError, FinsentResult};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Bank {
    CreditSuisse,
    Ubs,
}

impl Bank {
    pub const ALL: [Bank; 2] = [Bank::CreditSuisse, Bank::Ubs];

    /// Name used in prompts
    pub fn display_name(&self) -> &'static str {
        match self {
            Bank::CreditSuisse => "Credit Suisse",
            Bank::Ubs => "UBS",
        }
    }

    /// Folder name under the data, output and log roots
    pub fn folder(&self) -> &'static str {
        match self {
            Bank::CreditSuisse => "CS",
            Bank::Ubs => "UBS",
        }
    }

    /// Menu key shown in the interactive prompt
    pub fn choice_key(&self) -> &'static str {
        match self {
            Bank::CreditSuisse => "1",
            Bank::Ubs => "2",
        }
    }

    /// Resolve an interactive menu answer. Only `"1"` and `"2"` are accepted.
    pub fn from_choice(choice: &str) -> FinsentResult<Self> {
        let choice = choice.trim();
        Self::ALL
            .into_iter()
            .find(|bank| bank.choice_key() == choice)
            .ok_or_else(|| {
                FinsentError::invalid_input_field(
                    format!(
                        "Invalid choice '{}'. Please run the program again and select either 1 or 2.",
                        choice
                    ),
                    "bank",
                )
            })
    }

    /// Input directory of this bank
    pub fn data_dir(&self, data_root: &Path) -> PathBuf {
        data_root.join(self.folder())
    }
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Bank {
    type Err = FinsentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cs" | "credit-suisse" | "credit suisse" | "creditsuisse" => Ok(Bank::CreditSuisse),
            "ubs" => Ok(Bank::Ubs),
            other => Err(FinsentError::invalid_input_field(
                format!("Unknown bank '{}'", other),
                "bank",
            )),
        }
    }
}
