use std::collections::HashSet;

/// Persistent set of node or link ids.
///
/// Every mutator returns a new set and leaves the receiver untouched, so a
/// previous [`super::SelectionState`] stays valid after a transition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdSet {
    ids: HashSet<String>,
}

impl IdSet {
    /// A fresh empty set. Each call allocates its own instance.
    pub fn empty() -> Self {
        Self {
            ids: HashSet::new(),
        }
    }

    pub fn add(&self, id: &str) -> Self {
        let mut next = self.clone();
        next.ids.insert(id.to_owned());
        next
    }

    pub fn remove(&self, id: &str) -> Self {
        let mut next = self.clone();
        next.ids.remove(id);
        next
    }

    pub fn toggle(&self, id: &str) -> Self {
        if self.includes(id) {
            self.remove(id)
        } else {
            self.add(id)
        }
    }

    pub fn includes(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn size(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Members in sorted order.
    pub fn to_array(&self) -> Vec<String> {
        let mut ids = self.ids.iter().cloned().collect::<Vec<_>>();
        ids.sort_unstable();
        ids
    }
}

impl<S: Into<String>> FromIterator<S> for IdSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}
