use std::sync::Arc;

use k8s_openapi::api::{certificates::v1::CertificateSigningRequest, core::v1::Node};
use kna::{
    console::{
        actions::{build_menu, csr, find_action, ActionContext},
        args::{Command, CsrCommand, NodeCommand},
        ctx::ConsoleCtx,
        modals::TerminalModals,
    },
    models::{ResourceKind, UniqueInfo},
};

#[cfg(unix)]
extern crate libc;

async fn run_csr(ctx: &ConsoleCtx, command: &CsrCommand) -> anyhow::Result<()> {
    let Some((name, decision)) = command.decision() else {
        for (csr, state) in csr::list_csrs(ctx.client.clone()).await? {
            let requestor = csr.spec.username.clone().unwrap_or_default();
            println!("{:<50} {:<10} {requestor}", csr.unique_info(), state);
        }
        return Ok(());
    };
    let api = kube::Api::<CertificateSigningRequest>::all(ctx.client.clone());
    let current = api.get(name).await?;
    let updated = csr::update_csr(ctx.client.clone(), &current, decision, &ctx.condition_source())
        .await?;
    println!("{} {}", updated.unique_info(), csr::csr_state(&updated));
    Ok(())
}

async fn run_node(ctx: &ConsoleCtx, command: &NodeCommand) -> anyhow::Result<()> {
    let action_ctx = ActionContext {
        client: ctx.client.clone(),
        modals: Arc::new(TerminalModals::new(ctx.client.clone(), ctx.args.yes)),
    };
    let kind = ResourceKind::node();
    let api = kube::Api::<Node>::all(ctx.client.clone());
    match command {
        NodeCommand::Actions { name } => {
            let node = api.get(name).await?;
            let menu = build_menu(&kind, &node, &action_ctx, &ctx.action_options());
            for action in menu.iter().filter(|action| !action.hidden) {
                println!("{:<24} {}", action.id, action.label);
            }
        }
        NodeCommand::Run { name, action } => {
            let node = api.get(name).await?;
            find_action(&kind, &node, &action_ctx, &ctx.action_options(), action)?
                .run(ctx.client.clone())
                .await?;
        }
    }
    Ok(())
}

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    #[cfg(unix)]
    {
        unsafe {
            // Output is often piped to other commands.
            // Restore default SIGPIPE handling, so we exit quietly
            // instead of panicking on a closed pipe.
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let ctx = Arc::new(ConsoleCtx::new().await?);

    match &ctx.args.command {
        Command::Csr(command) => run_csr(&ctx, command).await?,
        Command::Node(command) => run_node(&ctx, command).await?,
        Command::Serve(server_args) => {
            let server = kna::server::run(ctx.clone(), server_args);
            tokio::select! {
                res = server => {
                    match res {
                        Ok(()) => tracing::info!("Server has stopped."),
                        Err(e) => tracing::error!("Server has crashed: {:?}", e),
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Shutting down.");
                }
            }
        }
    }
    Ok(())
}
