use std::collections::HashSet;

/// Remove repeated fragments, keeping the first occurrence of each, and stop at `cap`.
pub fn dedupe<I, S>(fragments: I, cap: usize) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    let mut kept = Vec::new();

    for fragment in fragments {
        if kept.len() >= cap {
            break;
        }
        let fragment = fragment.into();
        if seen.insert(fragment.clone()) {
            kept.push(fragment);
        }
    }

    kept
}

/// Order-preserving accumulator used when fragments arrive in several batches
#[derive(Debug, Default)]
pub struct Deduper {
    seen: HashSet<String>,
    kept: Vec<String>,
    cap: usize,
}

impl Deduper {
    pub fn with_cap(cap: usize) -> Self {
        Self {
            seen: HashSet::new(),
            kept: Vec::new(),
            cap,
        }
    }

    /// Returns true when the fragment was new and there was room for it
    pub fn push(&mut self, fragment: String) -> bool {
        if self.is_full() || self.seen.contains(&fragment) {
            return false;
        }
        self.seen.insert(fragment.clone());
        self.kept.push(fragment);
        true
    }

    pub fn len(&self) -> usize {
        self.kept.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.kept.len() >= self.cap
    }

    pub fn into_vec(self) -> Vec<String> {
        self.kept
    }
}
