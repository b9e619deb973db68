pub mod prompt;

use anyhow::Result;

#[derive(Debug)]
pub enum Action {
    Prompt(prompt::Args),
}

impl Action {
    /// Execute the action.
    ///
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> Result<()> {
        match self {
            Self::Prompt(args) => prompt::execute(args).await,
        }
    }
}
