use crate::console::error::{KnaError, KnaResult};
use kube::api::{Patch, PatchParams};
use serde::{de::DeserializeOwned, Serialize};

pub(crate) trait KnaResourceExt<T>: kube::Resource + Sized {
    fn name_or_err(&self) -> KnaResult<String>;
    async fn merge_patch<P>(&self, api: kube::Api<T>, patch: &P) -> KnaResult<Self>
    where
        P: Serialize + std::fmt::Debug + Send + Sync;
}

impl<K> KnaResourceExt<K> for K
where
    K: kube::Resource<DynamicType = ()> + DeserializeOwned + Serialize + Clone + std::fmt::Debug,
{
    fn name_or_err(&self) -> KnaResult<String> {
        self.meta().name.clone().ok_or(KnaError::NamelessResource)
    }

    async fn merge_patch<P>(&self, api: kube::Api<K>, patch: &P) -> KnaResult<Self>
    where
        P: Serialize + std::fmt::Debug + Send + Sync,
    {
        let name = self.name_or_err()?;
        let new_obj = api
            .patch(&name, &PatchParams::default(), &Patch::Merge(patch))
            .await?;
        Ok(new_obj)
    }
}
