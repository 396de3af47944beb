use std::collections::VecDeque;

use crate::item::HistoryItem;

/// Clips generated during one session, newest first.
///
/// With a capacity set, pushing past it evicts the oldest item.
#[derive(Debug, Default)]
pub struct SessionHistory {
    items: VecDeque<HistoryItem>,
    capacity: Option<usize>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A capacity of zero is treated as unbounded.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: VecDeque::new(),
            capacity: (capacity > 0).then_some(capacity),
        }
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Add a clip at the front. Returns the evicted item, if any.
    pub fn push(&mut self, item: HistoryItem) -> Option<HistoryItem> {
        log::debug!("history: recorded {}", item.id);
        self.items.push_front(item);
        match self.capacity {
            Some(cap) if self.items.len() > cap => {
                let evicted = self.items.pop_back();
                if let Some(old) = &evicted {
                    log::debug!("history: evicted {}", old.id);
                }
                evicted
            }
            _ => None,
        }
    }

    pub fn get(&self, id: &str) -> Option<&HistoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Most recently generated clip.
    pub fn latest(&self) -> Option<&HistoryItem> {
        self.items.front()
    }

    pub fn remove(&mut self, id: &str) -> Option<HistoryItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        self.items.remove(index)
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use speech_service::GenerationSettings;
    use vozgen_core::{encode, AudioDescriptor};

    fn item(text: &str) -> HistoryItem {
        let clip = encode(&[0.25], &AudioDescriptor::mono16(24000)).unwrap();
        HistoryItem::new(&GenerationSettings::new(text), clip)
    }

    #[test]
    fn test_newest_first() {
        let mut history = SessionHistory::new();
        assert!(history.is_empty());
        assert!(history.latest().is_none());

        history.push(item("uno"));
        history.push(item("dos"));
        history.push(item("tres"));

        let snippets: Vec<_> = history.iter().map(|i| i.text_snippet.as_str()).collect();
        assert_eq!(snippets, ["tres", "dos", "uno"]);
        assert_eq!(history.latest().unwrap().text_snippet, "tres");
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = SessionHistory::with_capacity(2);
        assert!(history.push(item("uno")).is_none());
        assert!(history.push(item("dos")).is_none());
        let evicted = history.push(item("tres")).unwrap();
        assert_eq!(evicted.text_snippet, "uno");
        assert_eq!(history.len(), 2);
        assert_eq!(history.latest().unwrap().text_snippet, "tres");
    }

    #[test]
    fn test_zero_capacity_is_unbounded() {
        let mut history = SessionHistory::with_capacity(0);
        assert_eq!(history.capacity(), None);
        for _ in 0..5 {
            history.push(item("x"));
        }
        assert_eq!(history.len(), 5);
    }

    #[test]
    fn test_get_and_remove() {
        let mut history = SessionHistory::new();
        let first = item("uno");
        let id = first.id.clone();
        history.push(first);
        history.push(item("dos"));

        assert_eq!(history.get(&id).unwrap().text_snippet, "uno");
        let removed = history.remove(&id).unwrap();
        assert_eq!(removed.id, id);
        assert!(history.get(&id).is_none());
        assert!(history.remove(&id).is_none());
        assert_eq!(history.len(), 1);

        history.clear();
        assert!(history.is_empty());
    }
}
