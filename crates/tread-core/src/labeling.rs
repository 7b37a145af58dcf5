//! Optional labeling of choices with human-readable action names.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::id::ChoiceIndex;

/// Associates each choice of a model with zero or more labels.
///
/// Label names are interned in insertion order; each choice stores the
/// indices of its labels. The common case of one label per choice stays
/// inline without a heap allocation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceLabeling {
    names: IndexSet<String>,
    choices: Vec<SmallVec<[u32; 1]>>,
}

impl ChoiceLabeling {
    /// An empty labeling covering `nr_choices` choices.
    pub fn new(nr_choices: usize) -> Self {
        Self {
            names: IndexSet::new(),
            choices: vec![SmallVec::new(); nr_choices],
        }
    }

    /// Number of choices this labeling covers.
    pub fn nr_choices(&self) -> usize {
        self.choices.len()
    }

    /// All label names, in the order they were first added.
    pub fn label_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Whether `label` is known to this labeling.
    pub fn contains_label(&self, label: &str) -> bool {
        self.names.contains(label)
    }

    /// Attach `label` to `choice`.
    ///
    /// Adding the same label to the same choice twice is a no-op. Returns
    /// `false` if `choice` is outside the covered range.
    pub fn add_label_to_choice(&mut self, label: &str, choice: ChoiceIndex) -> bool {
        let Some(slot) = self.choices.get_mut(choice.0) else {
            return false;
        };
        let (idx, _) = self.names.insert_full(label.to_string());
        let idx = idx as u32;
        if !slot.contains(&idx) {
            slot.push(idx);
        }
        true
    }

    /// Labels attached to `choice`, in the order they were attached.
    ///
    /// Empty for unlabeled or out-of-range choices.
    pub fn labels_of_choice(&self, choice: ChoiceIndex) -> SmallVec<[&str; 1]> {
        self.choices
            .get(choice.0)
            .map(|ids| {
                ids.iter()
                    .filter_map(|&i| self.names.get_index(i as usize))
                    .map(String::as_str)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Choices carrying `label`, in ascending order.
    pub fn choices_with_label(&self, label: &str) -> Vec<ChoiceIndex> {
        let Some(idx) = self.names.get_index_of(label) else {
            return Vec::new();
        };
        let idx = idx as u32;
        self.choices
            .iter()
            .enumerate()
            .filter(|(_, ids)| ids.contains(&idx))
            .map(|(c, _)| ChoiceIndex(c))
            .collect()
    }
}
