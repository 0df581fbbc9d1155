pub type KnaResult<T> = Result<T, KnaError>;

#[derive(thiserror::Error, Debug)]
pub enum KnaError {
    #[error("Unknown action: {0}")]
    UnknownAction(String),
    #[error("Action {0} is not available for this resource")]
    ActionHidden(String),
    #[error("Not allowed to {verb} {resource}/{name}")]
    AccessDenied {
        verb: String,
        resource: String,
        name: String,
    },
    #[error("Action {0} requires an interactive session")]
    InteractiveOnly(String),
    #[error("Cannot parse key-value pair: {0}")]
    InvalidKeyValue(String),
    #[error("Cannot edit resource. Reason: {0}")]
    CannotEdit(String),
    #[error("Resource has no name")]
    NamelessResource,
    #[error("StdError: {0}")]
    StdError(#[from] std::io::Error),
    #[error("KubeError: {0}")]
    KubeError(#[from] kube::Error),
    #[error("Cannot serialize/deserialize YAML. Reason: {0}")]
    YAMLError(#[from] serde_yaml::Error),
    #[error("Cannot serialize/deserialize JSON. Reason: {0}")]
    JSONError(#[from] serde_json::Error),
}

impl KnaError {
    /// Whether the API server answered with 404.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::KubeError(kube::Error::Api(resp)) if resp.code == 404)
    }
}
