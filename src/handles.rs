//! Handle table mapping [`NodeId`]s to host objects.

use std::collections::HashMap;

use replyguy_protocols::NodeId;

/// Entries kept before a sweep is attempted.
pub(crate) const SWEEP_THRESHOLD: usize = 512;

#[derive(Debug)]
pub(crate) struct HandleTable<E> {
    entries: HashMap<u64, E>,
    next: u64,
    base_limit: usize,
    limit: usize,
}

impl<E> HandleTable<E> {
    pub(crate) fn new(limit: usize) -> Self {
        Self {
            entries: HashMap::new(),
            next: 1,
            base_limit: limit,
            limit,
        }
    }

    pub(crate) fn insert(&mut self, entry: E) -> NodeId {
        let id = self.next;
        self.next += 1;
        self.entries.insert(id, entry);
        NodeId(id)
    }

    pub(crate) fn get(&self, node: NodeId) -> Option<&E> {
        self.entries.get(&node.0)
    }

    pub(crate) fn contains(&self, node: NodeId) -> bool {
        self.entries.contains_key(&node.0)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Drop every entry `keep` rejects. Returns how many went.
    pub(crate) fn prune(&mut self, keep: impl Fn(&E) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| keep(entry));
        before - self.entries.len()
    }

    /// [`prune`](Self::prune), but only once the table has outgrown its
    /// limit. The limit follows the surviving size so a page that really
    /// holds many live nodes is not swept on every call.
    pub(crate) fn sweep(&mut self, keep: impl Fn(&E) -> bool) -> usize {
        if self.entries.len() <= self.limit {
            return 0;
        }
        let pruned = self.prune(keep);
        self.limit = self.base_limit.max(self.entries.len() * 2);
        pruned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Entry {
        attached: bool,
        overlay: bool,
    }

    fn keep(entry: &Entry) -> bool {
        entry.attached || entry.overlay
    }

    #[test]
    fn test_sweep_waits_for_limit() {
        let mut table = HandleTable::new(4);
        for _ in 0..4 {
            table.insert(Entry {
                attached: false,
                overlay: false,
            });
        }
        assert_eq!(table.sweep(keep), 0);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_sweep_drops_detached_but_keeps_overlay() {
        let mut table = HandleTable::new(4);
        let overlay = table.insert(Entry {
            attached: false,
            overlay: true,
        });
        let live = table.insert(Entry {
            attached: true,
            overlay: false,
        });
        let gone: Vec<NodeId> = (0..10)
            .map(|_| {
                table.insert(Entry {
                    attached: false,
                    overlay: false,
                })
            })
            .collect();

        assert_eq!(table.sweep(keep), 10);
        assert!(table.contains(overlay));
        assert!(table.contains(live));
        assert!(gone.iter().all(|n| table.get(*n).is_none()));
    }

    #[test]
    fn test_timeline_churn_stays_bounded() {
        // entries are batch numbers; only the last two batches are attached
        let mut table = HandleTable::new(SWEEP_THRESHOLD);
        for batch in 0u64..1_000 {
            for _ in 0..8 {
                table.insert(batch);
            }
            table.sweep(|b| *b + 2 > batch);
            assert!(table.len() <= SWEEP_THRESHOLD);
        }
    }

    #[test]
    fn test_limit_follows_live_size() {
        let mut table = HandleTable::new(2);
        for _ in 0..5 {
            table.insert(Entry {
                attached: true,
                overlay: false,
            });
        }
        assert_eq!(table.sweep(keep), 0);
        table.insert(Entry {
            attached: true,
            overlay: false,
        });
        // limit is now 10, so no sweep runs yet
        assert_eq!(table.sweep(|_| false), 0);
        assert_eq!(table.len(), 6);
    }
}
