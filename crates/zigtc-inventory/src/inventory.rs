use zigtc_core::{ReleaseItem, ToolchainError, Version, VersionSelector};

/// Releases known to this machine, at most one per version, sorted newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    items: Vec<ReleaseItem>,
}

impl Inventory {
    pub fn items(&self) -> &[ReleaseItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, version: &Version) -> Option<&ReleaseItem> {
        self.items.iter().find(|item| &item.version == version)
    }

    pub fn get_mut(&mut self, version: &Version) -> Option<&mut ReleaseItem> {
        self.items.iter_mut().find(|item| &item.version == version)
    }

    pub fn master(&self) -> Option<&ReleaseItem> {
        self.items.iter().find(|item| item.master)
    }

    pub fn current(&self) -> Option<&ReleaseItem> {
        self.items.iter().find(|item| item.current)
    }

    pub fn indexed(&self) -> impl Iterator<Item = &ReleaseItem> {
        self.items.iter().filter(|item| item.indexed)
    }

    pub fn downloaded(&self) -> impl Iterator<Item = &ReleaseItem> {
        self.items.iter().filter(|item| item.downloaded)
    }

    /// Resolves a command-line selector to the version of a known item.
    pub fn resolve(&self, selector: &VersionSelector) -> Result<Version, ToolchainError> {
        match selector {
            VersionSelector::Master => self
                .master()
                .map(|item| item.version.clone())
                .ok_or(ToolchainError::MasterNotFound),
            VersionSelector::Exact(version) => self
                .get(version)
                .map(|item| item.version.clone())
                .ok_or_else(|| ToolchainError::UnknownVersion {
                    version: version.clone(),
                }),
        }
    }

    /// Makes `version` the only current item.
    pub fn mark_current(&mut self, version: &Version) {
        for item in &mut self.items {
            item.current = &item.version == version;
        }
    }

    /// Adds `item` unless an equal version is already present.
    pub(crate) fn insert(&mut self, item: ReleaseItem) -> bool {
        if self.get(&item.version).is_some() {
            return false;
        }
        self.items.push(item);
        true
    }

    pub(crate) fn sort_descending(&mut self) {
        self.items.sort_by(|a, b| b.version.cmp(&a.version));
    }
}

impl FromIterator<ReleaseItem> for Inventory {
    fn from_iter<I: IntoIterator<Item = ReleaseItem>>(iter: I) -> Self {
        let mut inventory = Self::default();
        for item in iter {
            inventory.insert(item);
        }
        inventory.sort_descending();
        inventory
    }
}
