//! The set of audio sources selected for the stream.

use crate::source::{AudioSource, SourceFilter};

/// The audio sources currently selected for the screenshare.
///
/// Order is irrelevant; the set is never empty and upholds one invariant: if
/// it contains [`AudioSource::EntireSystem`] it contains nothing else. The
/// default selection is `{EntireSystem}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    sources: Vec<AudioSource>,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            sources: vec![AudioSource::EntireSystem],
        }
    }
}

impl SelectionState {
    /// Creates the default selection, `{EntireSystem}`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the selected sources.
    pub fn sources(&self) -> &[AudioSource] {
        &self.sources
    }

    /// Returns true when the selection is exactly `{EntireSystem}`.
    pub fn is_entire_system(&self) -> bool {
        self.sources == [AudioSource::EntireSystem]
    }

    /// Returns true when the selection contains the given source.
    pub fn contains(&self, source: &AudioSource) -> bool {
        self.sources.contains(source)
    }

    /// Resets the selection to the default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Applies a dropdown change.
    ///
    /// `value` is the entry the user clicked; `new_set` is the set the
    /// dropdown now holds. Two rules keep the invariant:
    /// - picking [`EntireSystem`](AudioSource::EntireSystem), or emptying the
    ///   set, collapses the selection to the default
    /// - picking anything else strips `EntireSystem` from the set
    pub fn apply_change(&mut self, value: &AudioSource, new_set: Vec<AudioSource>) {
        if *value == AudioSource::EntireSystem || new_set.is_empty() {
            self.reset();
            return;
        }

        self.sources = new_set
            .into_iter()
            .filter(|s| *s != AudioSource::EntireSystem)
            .collect();

        // Stripping the sentinel must never leave the set observably empty.
        if self.sources.is_empty() {
            self.reset();
        }
    }

    /// Expands the selection into the inclusion-filter list for the helper.
    ///
    /// The host-output filter comes first when "discord output" is selected,
    /// followed by one filter per concrete source. Empty exactly when the
    /// selection is `{EntireSystem}`, which maps to whole-system capture
    /// instead.
    pub fn inclusion_filters(&self) -> Vec<SourceFilter> {
        let mut filters = Vec::new();
        if self.contains(&AudioSource::DiscordOutput) {
            filters.push(SourceFilter::host_output());
        }
        for source in &self.sources {
            if let AudioSource::Node { .. } = source {
                if let Some(filter) = source.to_filter() {
                    filters.push(filter);
                }
            }
        }
        filters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_entire_system() {
        let selection = SelectionState::new();
        assert!(selection.is_entire_system());
        assert_eq!(selection.sources(), [AudioSource::EntireSystem]);
    }

    #[test]
    fn test_picking_entire_system_collapses() {
        let mut selection = SelectionState::new();
        selection.apply_change(
            &AudioSource::node("Firefox"),
            vec![AudioSource::node("Firefox"), AudioSource::DiscordOutput],
        );
        assert!(!selection.is_entire_system());

        selection.apply_change(
            &AudioSource::EntireSystem,
            vec![
                AudioSource::node("Firefox"),
                AudioSource::DiscordOutput,
                AudioSource::EntireSystem,
            ],
        );
        assert!(selection.is_entire_system());
    }

    #[test]
    fn test_emptying_yields_default() {
        let mut selection = SelectionState::new();
        selection.apply_change(&AudioSource::node("Firefox"), vec![AudioSource::node("Firefox")]);
        selection.apply_change(&AudioSource::node("Firefox"), vec![]);
        assert!(selection.is_entire_system());
    }

    #[test]
    fn test_picking_other_source_strips_sentinel() {
        let mut selection = SelectionState::new();
        selection.apply_change(
            &AudioSource::node("Firefox"),
            vec![AudioSource::EntireSystem, AudioSource::node("Firefox")],
        );
        assert!(!selection.contains(&AudioSource::EntireSystem));
        assert!(selection.contains(&AudioSource::node("Firefox")));
    }

    #[test]
    fn test_invariant_over_change_sequences() {
        // No sequence of changes may leave the sentinel mixed with other
        // sources, or the set empty.
        let changes: Vec<(AudioSource, Vec<AudioSource>)> = vec![
            (
                AudioSource::node("Firefox"),
                vec![AudioSource::EntireSystem, AudioSource::node("Firefox")],
            ),
            (
                AudioSource::DiscordOutput,
                vec![AudioSource::node("Firefox"), AudioSource::DiscordOutput],
            ),
            (AudioSource::EntireSystem, vec![AudioSource::EntireSystem]),
            (AudioSource::node("Spotify"), vec![]),
            (
                AudioSource::node_with_object("Firefox", "12"),
                vec![AudioSource::node_with_object("Firefox", "12")],
            ),
        ];

        let mut selection = SelectionState::new();
        for (value, new_set) in changes {
            selection.apply_change(&value, new_set);
            assert!(!selection.sources().is_empty());
            if selection.contains(&AudioSource::EntireSystem) {
                assert!(selection.is_entire_system());
            }
        }
    }

    #[test]
    fn test_filters_for_entire_system_are_empty() {
        assert!(SelectionState::new().inclusion_filters().is_empty());
    }

    #[test]
    fn test_filters_put_host_output_first() {
        let mut selection = SelectionState::new();
        selection.apply_change(
            &AudioSource::DiscordOutput,
            vec![
                AudioSource::node_with_object("Firefox", "12"),
                AudioSource::DiscordOutput,
            ],
        );

        let filters = selection.inclusion_filters();
        assert_eq!(filters.len(), 2);
        assert_eq!(filters[0], SourceFilter::host_output());
        assert_eq!(filters[1].node_name.as_deref(), Some("Firefox"));
        assert_eq!(filters[1].object_id.as_deref(), Some("12"));
    }

    #[test]
    fn test_filters_do_not_mutate_selection() {
        let mut selection = SelectionState::new();
        selection.apply_change(
            &AudioSource::DiscordOutput,
            vec![AudioSource::DiscordOutput, AudioSource::node("Firefox")],
        );

        let before = selection.clone();
        let _ = selection.inclusion_filters();
        assert_eq!(selection, before);
    }
}
