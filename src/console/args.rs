use crate::console::actions::csr::CsrDecision;

#[derive(clap::Args, Debug, Clone)]
pub struct ServerArgs {
    /// Host to bind the HTTP API to.
    #[clap(
        long = "server-host",
        env = "KNA_SERVER_HOST",
        default_value = "0.0.0.0"
    )]
    pub host: String,

    /// Port to bind the HTTP API to.
    #[clap(long = "server-port", env = "KNA_SERVER_PORT", default_value = "8000")]
    pub port: u16,
}

#[derive(clap::Subcommand, Debug, Clone)]
pub enum CsrCommand {
    /// List certificate signing requests and their state.
    List,
    /// Approve a certificate signing request.
    Approve { name: String },
    /// Deny a certificate signing request.
    Deny { name: String },
}

impl CsrCommand {
    #[must_use]
    pub fn decision(&self) -> Option<(&str, CsrDecision)> {
        match self {
            Self::List => None,
            Self::Approve { name } => Some((name, CsrDecision::Approved)),
            Self::Deny { name } => Some((name, CsrDecision::Denied)),
        }
    }
}

#[derive(clap::Subcommand, Debug, Clone)]
pub enum NodeCommand {
    /// Show the action menu of a node.
    Actions { name: String },
    /// Run a menu action on a node.
    Run {
        name: String,
        /// Action id, as shown by `kna node actions`.
        action: String,
    },
}

#[derive(clap::Subcommand, Debug, Clone)]
pub enum Command {
    /// Certificate signing request actions.
    #[clap(subcommand)]
    Csr(CsrCommand),
    /// Node actions.
    #[clap(subcommand)]
    Node(NodeCommand),
    /// Serve node and CSR actions over HTTP.
    Serve(ServerArgs),
}

#[derive(clap::Parser, Debug, Clone)]
#[clap(name = "kna", version, author, about)]
pub struct ConsoleArgs {
    /// Name of the console, mentioned in the message
    /// of every CSR condition created by kna.
    #[clap(
        long,
        env = "KNA_CONSOLE_NAME",
        default_value = "Kubernetes Console"
    )]
    pub console_name: String,

    /// Reason code of CSR conditions created by kna.
    #[clap(
        long,
        env = "KNA_CSR_REASON",
        default_value = "KubernetesConsoleCSRApprove"
    )]
    pub csr_reason: String,

    /// Nodes are under maintenance.
    /// Hides the "Mark as schedulable" action.
    #[clap(long, env = "KNA_NODE_MAINTENANCE")]
    pub node_maintenance: bool,

    /// Don't ask for confirmations.
    #[clap(long, short = 'y', env = "KNA_ASSUME_YES")]
    pub yes: bool,

    #[clap(subcommand)]
    pub command: Command,
}
