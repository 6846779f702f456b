use gpgit_types::ObjectId;

/// One reference moved by a sync operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefUpdate {
    pub name: String,
    pub old: Option<ObjectId>,
    pub new: ObjectId,
}

impl RefUpdate {
    pub fn is_noop(&self) -> bool {
        self.old == Some(self.new)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FetchResult {
    pub objects_copied: usize,
    pub refs_updated: Vec<RefUpdate>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PushResult {
    pub objects_copied: usize,
    pub update: RefUpdate,
}
