use std::{collections::BTreeMap, io::Write};

use k8s_openapi::api::core::v1::Node;
use kube::ResourceExt;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::{
    console::{
        error::{KnaError, KnaResult},
        requests::{replace_node, replace_node_annotations, replace_node_labels},
        utils::{format_pairs, parse_key_values, removed_keys},
    },
    models::ResourceKind,
};

use super::{DeleteModalParams, DirectModals, ModalLauncher};

const UNSCHEDULABLE_MESSAGE: &str =
    "Unschedulable nodes won't accept new pods. This is useful before performing maintenance on the node.";

/// Dialogs rendered as terminal prompts.
pub struct TerminalModals {
    client: kube::Client,
    direct: DirectModals,
    assume_yes: bool,
}

impl TerminalModals {
    #[must_use]
    pub fn new(client: kube::Client, assume_yes: bool) -> Self {
        Self {
            direct: DirectModals::new(client.clone()),
            client,
            assume_yes,
        }
    }

    async fn ask(&self, question: &str) -> KnaResult<String> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(question.as_bytes()).await?;
        stdout.flush().await?;
        let mut answer = String::new();
        BufReader::new(tokio::io::stdin())
            .read_line(&mut answer)
            .await?;
        Ok(answer.trim().to_string())
    }

    async fn confirm(&self, title: &str, message: &str) -> KnaResult<bool> {
        if self.assume_yes {
            return Ok(true);
        }
        let answer = self.ask(&format!("{title}\n\n{message}\n\nContinue? [y/N] ")).await?;
        Ok(is_confirmation(&answer))
    }

    /// Let the user edit `current` and confirm removed keys.
    async fn edit_pairs(
        &self,
        field: &str,
        kind: &ResourceKind,
        node: &Node,
        current: &BTreeMap<String, String>,
    ) -> KnaResult<Option<BTreeMap<String, String>>> {
        let edited = edit_in_editor(
            &format!("kna-{}-{field}-", node.name_any()),
            ".txt",
            &pairs_template(field, kind, node, current),
        )
        .await?;
        let Some(pairs) = edited_pairs(current, &edited)? else {
            tracing::info!("No {field} changed");
            return Ok(None);
        };
        let removed = removed_keys(current, &pairs);
        if !removed.is_empty() {
            let title = format!("Remove {field} from {}?", node.name_any());
            if !self.confirm(&title, &removed.join("\n")).await? {
                tracing::info!("Cancelled");
                return Ok(None);
            }
        }
        Ok(Some(pairs))
    }
}

fn is_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn editor() -> String {
    std::env::var("KUBE_EDITOR")
        .or_else(|_| std::env::var("EDITOR"))
        .unwrap_or_else(|_| String::from("vi"))
}

/// Open `contents` in the user's editor and return the saved text.
async fn edit_in_editor(prefix: &str, suffix: &str, contents: &str) -> KnaResult<String> {
    let mut file = tempfile::Builder::new()
        .prefix(prefix)
        .suffix(suffix)
        .tempfile()?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    let editor = editor();
    let status = tokio::process::Command::new(&editor)
        .arg(file.path())
        .status()
        .await?;
    if !status.success() {
        return Err(KnaError::CannotEdit(format!("{editor} exited with {status}")));
    }
    Ok(tokio::fs::read_to_string(file.path()).await?)
}

fn pairs_template(
    field: &str,
    kind: &ResourceKind,
    node: &Node,
    pairs: &BTreeMap<String, String>,
) -> String {
    format!(
        "# Edit {field} of {} {}, one key=value per line.\n\
         # Only the first '=' separates the key from the value.\n\
         # Removed lines delete the key. Leaving no entries keeps {field} unchanged.\n{}",
        kind.label,
        node.name_any(),
        format_pairs(pairs)
    )
}

/// New contents of a key/value map after the user edited it.
///
/// `None` means the map stays as it is: the text was not
/// changed or every entry was removed.
fn edited_pairs(
    current: &BTreeMap<String, String>,
    edited: &str,
) -> KnaResult<Option<BTreeMap<String, String>>> {
    let pairs = parse_key_values(edited)?;
    if pairs.is_empty() || &pairs == current {
        return Ok(None);
    }
    Ok(Some(pairs))
}

#[async_trait::async_trait]
impl ModalLauncher for TerminalModals {
    async fn configure_unschedulable(&self, node: Node) -> KnaResult<()> {
        let title = format!("Mark {} as unschedulable?", node.name_any());
        if !self.confirm(&title, UNSCHEDULABLE_MESSAGE).await? {
            tracing::info!("Cancelled");
            return Ok(());
        }
        self.direct.configure_unschedulable(node).await
    }

    async fn delete_resource(&self, params: DeleteModalParams) -> KnaResult<()> {
        let title = format!(
            "Delete {} {}?",
            params.kind.label,
            params.resource.name_any()
        );
        if !self.confirm(&title, &params.message).await? {
            tracing::info!("Cancelled");
            return Ok(());
        }
        self.direct.delete_resource(params).await
    }

    async fn modify_labels(&self, kind: ResourceKind, node: Node) -> KnaResult<()> {
        let current = node.labels().clone();
        if let Some(labels) = self.edit_pairs("labels", &kind, &node, &current).await? {
            replace_node_labels(self.client.clone(), &node, &labels).await?;
        }
        Ok(())
    }

    async fn modify_annotations(&self, kind: ResourceKind, node: Node) -> KnaResult<()> {
        let current = node.annotations().clone();
        if let Some(annotations) = self
            .edit_pairs("annotations", &kind, &node, &current)
            .await?
        {
            replace_node_annotations(self.client.clone(), &node, &annotations).await?;
        }
        Ok(())
    }

    async fn edit_resource(&self, _kind: ResourceKind, mut node: Node) -> KnaResult<()> {
        node.managed_fields_mut().clear();
        let original = serde_yaml::to_string(&node)?;
        let edited =
            edit_in_editor(&format!("kna-{}-", node.name_any()), ".yaml", &original).await?;
        if edited == original {
            tracing::info!("Edit cancelled, no changes made");
            return Ok(());
        }
        let new_node: Node = serde_yaml::from_str(&edited)?;
        if new_node.name_any() != node.name_any() {
            return Err(KnaError::CannotEdit(String::from(
                "The name of the resource cannot be changed",
            )));
        }
        replace_node(self.client.clone(), &new_node).await?;
        Ok(())
    }
}
