use clap::Parser;

use super::{
    actions::{csr::ConditionSource, ActionOptions},
    args::ConsoleArgs,
};

#[derive(Clone)]
pub struct ConsoleCtx {
    pub client: kube::Client,
    pub args: ConsoleArgs,
}

impl ConsoleCtx {
    pub async fn new() -> anyhow::Result<Self> {
        let args = ConsoleArgs::parse();
        tracing::info!("Connecting to Kubernetes");
        let client = kube::Client::try_default().await?;
        tracing::info!("Connected to Kubernetes");
        Ok(Self { client, args })
    }

    #[must_use]
    pub fn condition_source(&self) -> ConditionSource {
        ConditionSource {
            console_name: self.args.console_name.clone(),
            reason: self.args.csr_reason.clone(),
        }
    }

    #[must_use]
    pub const fn action_options(&self) -> ActionOptions {
        ActionOptions {
            node_maintenance: self.args.node_maintenance,
        }
    }
}
