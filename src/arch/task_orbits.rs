//! A growing set of previously computed canonical task mappings, used to
//! short-circuit [`super::canonicalizer`] searches that rediscover a mapping
//! whose orbit representative is already known.

use super::task_mapping::TaskMapping;
use crate::DetHashSet;

#[derive(Debug, Clone, Default)]
pub struct TaskOrbits {
    representatives: DetHashSet<TaskMapping>,
}

impl TaskOrbits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, representative: TaskMapping) {
        self.representatives.insert(representative);
    }

    pub fn is_repr(&self, mapping: &TaskMapping) -> bool {
        self.representatives.contains(mapping)
    }

    pub fn len(&self) -> usize {
        self.representatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.representatives.is_empty()
    }
}
