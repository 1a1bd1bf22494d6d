//! Uid-keyed registry of spaces, kept consistent with the server by
//! reconciling fetched listings into the existing entries.

use std::collections::{HashMap, hash_map::Entry};

use crate::http::ApiClient;

/// Per-variant hooks the registry needs: uid extraction from a payload,
/// construction, and wholesale field replacement.
pub(crate) trait Reconcile: Sized {
    type View;

    fn view_uid(view: &Self::View) -> &str;
    fn from_view(client: &ApiClient, account_uid: &str, view: Self::View) -> Self;
    fn absorb(&mut self, view: Self::View);
}

/// Mapping from space uid to the owned space instance. At most one instance
/// exists per uid for the life of the account.
#[derive(Debug)]
pub struct SpaceRegistry<S> {
    spaces: HashMap<String, S>,
}

impl<S> Default for SpaceRegistry<S> {
    fn default() -> Self {
        Self {
            spaces: HashMap::new(),
        }
    }
}

impl<S> SpaceRegistry<S> {
    pub fn get(&self, uid: &str) -> Option<&S> {
        self.spaces.get(uid)
    }

    pub fn get_mut(&mut self, uid: &str) -> Option<&mut S> {
        self.spaces.get_mut(uid)
    }

    pub fn contains(&self, uid: &str) -> bool {
        self.spaces.contains_key(uid)
    }

    pub fn iter(&self) -> impl Iterator<Item = &S> {
        self.spaces.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut S> {
        self.spaces.values_mut()
    }

    pub fn uids(&self) -> impl Iterator<Item = &str> {
        self.spaces.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.spaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spaces.is_empty()
    }
}

impl<S: Reconcile> SpaceRegistry<S> {
    /// Merges a fetched listing into the registry: known uids have their
    /// fields replaced through the existing slot, unknown uids are inserted
    /// as new instances. Entries absent from the listing are kept as-is; a
    /// space closed server-side stays visible, just stale, until the
    /// process ends.
    pub(crate) fn reconcile(
        &mut self,
        client: &ApiClient,
        account_uid: &str,
        views: Vec<S::View>,
    ) {
        for view in views {
            let uid = S::view_uid(&view).to_string();
            match self.spaces.entry(uid) {
                Entry::Occupied(mut entry) => entry.get_mut().absorb(view),
                Entry::Vacant(entry) => {
                    entry.insert(S::from_view(client, account_uid, view));
                }
            }
        }
    }
}
