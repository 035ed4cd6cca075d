//! Audio source data model.
//!
//! This module defines the sources a user can pick for a screenshare
//! ([`AudioSource`]), the live-source descriptors reported by the native
//! helper ([`SourceDescriptor`]), and the inclusion filters passed back to it
//! ([`SourceFilter`]).

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Process binary name of the host client.
///
/// Live sources owned by this process are excluded from the selectable
/// options so the stream cannot capture its own output in a loop.
pub const HOST_PROCESS_BINARY: &str = "Discord";

/// Node name the host client's audio output registers under.
///
/// The client is Chromium-based, so its output streams carry this node name
/// rather than the client's own binary name.
const HOST_OUTPUT_NODE: &str = "Chromium";

/// Dropdown value of the "entire system" sentinel.
const ENTIRE_SYSTEM_VALUE: &str = "system";

/// Dropdown value of the "discord output" sentinel.
const DISCORD_OUTPUT_VALUE: &str = "discord";

/// One selectable audio input.
///
/// Either a sentinel ("entire system", "discord output") or a concrete source
/// discovered from the native helper's live source list. Equality is by
/// sentinel identity or by `(node_name, object_id)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AudioSource {
    /// Mix all system audio. This is the default selection.
    EntireSystem,

    /// Mix only the host client's own audio output.
    DiscordOutput,

    /// A concrete source from the helper's live source list.
    ///
    /// Without an `object_id` the source matches every live stream with the
    /// given node name, e.g. all windows of one application.
    Node {
        /// Device (node) name of the source.
        node_name: String,
        /// Object id qualifying one specific stream, if any.
        object_id: Option<String>,
    },
}

impl AudioSource {
    /// Creates a source matching every stream with the given node name.
    pub fn node(node_name: impl Into<String>) -> Self {
        Self::Node {
            node_name: node_name.into(),
            object_id: None,
        }
    }

    /// Creates a source matching one specific stream.
    pub fn node_with_object(node_name: impl Into<String>, object_id: impl Into<String>) -> Self {
        Self::Node {
            node_name: node_name.into(),
            object_id: Some(object_id.into()),
        }
    }

    /// Parses a host dropdown value.
    ///
    /// The encoding is `"system"`, `"discord"`, `"<node>"` or
    /// `"<node>:<object id>"`; the value is split on the first colon.
    pub fn parse_value(value: &str) -> Self {
        match value {
            ENTIRE_SYSTEM_VALUE => Self::EntireSystem,
            DISCORD_OUTPUT_VALUE => Self::DiscordOutput,
            other => match other.split_once(':') {
                Some((node, object)) => Self::node_with_object(node, object),
                None => Self::node(other),
            },
        }
    }

    /// Expands this source into the inclusion filter passed to the helper.
    ///
    /// Returns `None` for [`EntireSystem`](Self::EntireSystem), which maps to
    /// whole-system capture instead of a filter list.
    pub fn to_filter(&self) -> Option<SourceFilter> {
        match self {
            Self::EntireSystem => None,
            Self::DiscordOutput => Some(SourceFilter::host_output()),
            Self::Node {
                node_name,
                object_id,
            } => Some(SourceFilter {
                process_binary: None,
                node_name: Some(node_name.clone()),
                object_id: object_id.clone(),
            }),
        }
    }
}

impl fmt::Display for AudioSource {
    /// Formats the source as its host dropdown value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EntireSystem => f.write_str(ENTIRE_SYSTEM_VALUE),
            Self::DiscordOutput => f.write_str(DISCORD_OUTPUT_VALUE),
            Self::Node {
                node_name,
                object_id: Some(object_id),
            } => write!(f, "{node_name}:{object_id}"),
            Self::Node {
                node_name,
                object_id: None,
            } => f.write_str(node_name),
        }
    }
}

/// A live audio source reported by the native helper.
///
/// Field names mirror the helper's own property keys (`node.name`,
/// `media.name`, `object.id`, `application.process.binary`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDescriptor {
    /// Device (node) name, e.g. `"Firefox"`.
    pub node_name: String,
    /// Media name, e.g. the title of the stream being played.
    pub media_name: String,
    /// Object id of this specific stream.
    pub object_id: String,
    /// Binary name of the owning process.
    pub process_binary: String,
}

impl SourceDescriptor {
    /// Creates a descriptor. Mostly useful for tests and mock helpers.
    pub fn new(
        node_name: impl Into<String>,
        media_name: impl Into<String>,
        object_id: impl Into<String>,
        process_binary: impl Into<String>,
    ) -> Self {
        Self {
            node_name: node_name.into(),
            media_name: media_name.into(),
            object_id: object_id.into(),
            process_binary: process_binary.into(),
        }
    }
}

/// An inclusion filter passed to the native helper's capture call.
///
/// A live stream matches when every set field matches. Serializes with the
/// helper's dotted key names, omitting unset fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFilter {
    /// Match on the owning process binary name.
    #[serde(
        rename = "application.process.binary",
        skip_serializing_if = "Option::is_none"
    )]
    pub process_binary: Option<String>,

    /// Match on the node name.
    #[serde(rename = "node.name", skip_serializing_if = "Option::is_none")]
    pub node_name: Option<String>,

    /// Match on the object id.
    #[serde(rename = "object.id", skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
}

impl SourceFilter {
    /// Filter matching the host client's own audio output.
    pub fn host_output() -> Self {
        Self {
            process_binary: Some(HOST_PROCESS_BINARY.to_string()),
            node_name: Some(HOST_OUTPUT_NODE.to_string()),
            object_id: None,
        }
    }
}

/// One entry in the audio-source dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOption {
    /// Label shown to the user.
    pub label: String,
    /// The source this entry selects.
    pub value: AudioSource,
}

impl SourceOption {
    fn new(label: impl Into<String>, value: AudioSource) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Builds the dropdown options for a set of live source descriptors.
///
/// Sources owned by the host client process are excluded. The result contains
/// the fixed "Entire system" and "Discord" entries, one
/// `"<node name> (<media name>)"` entry per live source, and one entry per
/// distinct node name (matching every stream of that node), deduplicated.
///
/// The first entry is always "Entire system"; the remainder is sorted
/// lexicographically by label.
pub fn selectable_options(descriptors: &[SourceDescriptor]) -> Vec<SourceOption> {
    let visible: Vec<&SourceDescriptor> = descriptors
        .iter()
        .filter(|d| d.process_binary != HOST_PROCESS_BINARY)
        .collect();

    let mut options = vec![
        SourceOption::new("Entire system", AudioSource::EntireSystem),
        SourceOption::new("Discord", AudioSource::DiscordOutput),
    ];

    for descriptor in &visible {
        options.push(SourceOption::new(
            format!("{} ({})", descriptor.node_name, descriptor.media_name),
            AudioSource::node_with_object(&descriptor.node_name, &descriptor.object_id),
        ));
    }

    let mut seen_nodes = HashSet::new();
    for descriptor in &visible {
        if seen_nodes.insert(descriptor.node_name.as_str()) {
            options.push(SourceOption::new(
                descriptor.node_name.clone(),
                AudioSource::node(&descriptor.node_name),
            ));
        }
    }

    // "Entire system" stays first, everything else sorts by label.
    options[1..].sort_by(|a, b| a.label.cmp(&b.label));
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptors() -> Vec<SourceDescriptor> {
        vec![
            SourceDescriptor::new("Firefox", "A Video", "12", "firefox"),
            SourceDescriptor::new("Firefox", "Other Tab", "34", "firefox"),
            SourceDescriptor::new("Spotify", "Some Song", "56", "spotify"),
            SourceDescriptor::new("Chromium", "Voice", "78", "Discord"),
        ]
    }

    #[test]
    fn test_parse_value_sentinels() {
        assert_eq!(AudioSource::parse_value("system"), AudioSource::EntireSystem);
        assert_eq!(
            AudioSource::parse_value("discord"),
            AudioSource::DiscordOutput
        );
    }

    #[test]
    fn test_parse_value_node() {
        assert_eq!(
            AudioSource::parse_value("Firefox"),
            AudioSource::node("Firefox")
        );
        assert_eq!(
            AudioSource::parse_value("Firefox:12"),
            AudioSource::node_with_object("Firefox", "12")
        );
    }

    #[test]
    fn test_parse_value_splits_on_first_colon() {
        // Object ids don't contain colons, node names might.
        assert_eq!(
            AudioSource::parse_value("a:b:c"),
            AudioSource::node_with_object("a", "b:c")
        );
    }

    #[test]
    fn test_display_round_trip() {
        for value in ["system", "discord", "Firefox", "Firefox:12"] {
            assert_eq!(AudioSource::parse_value(value).to_string(), value);
        }
    }

    #[test]
    fn test_to_filter_entire_system() {
        assert_eq!(AudioSource::EntireSystem.to_filter(), None);
    }

    #[test]
    fn test_to_filter_discord_output() {
        let filter = AudioSource::DiscordOutput.to_filter().unwrap();
        assert_eq!(filter.process_binary.as_deref(), Some("Discord"));
        assert_eq!(filter.node_name.as_deref(), Some("Chromium"));
        assert_eq!(filter.object_id, None);
    }

    #[test]
    fn test_to_filter_node() {
        let filter = AudioSource::node_with_object("Firefox", "12")
            .to_filter()
            .unwrap();
        assert_eq!(filter.process_binary, None);
        assert_eq!(filter.node_name.as_deref(), Some("Firefox"));
        assert_eq!(filter.object_id.as_deref(), Some("12"));
    }

    #[test]
    fn test_filter_serializes_with_dotted_keys() {
        let json = serde_json::to_value(SourceFilter::host_output()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "application.process.binary": "Discord",
                "node.name": "Chromium",
            })
        );
    }

    #[test]
    fn test_filter_omits_unset_fields() {
        let json = serde_json::to_value(AudioSource::node("Firefox").to_filter().unwrap()).unwrap();
        assert_eq!(json, serde_json::json!({ "node.name": "Firefox" }));
    }

    #[test]
    fn test_options_entire_system_first() {
        let options = selectable_options(&descriptors());
        assert_eq!(options[0].label, "Entire system");
        assert_eq!(options[0].value, AudioSource::EntireSystem);
    }

    #[test]
    fn test_options_sorted_after_first() {
        let options = selectable_options(&descriptors());
        let labels: Vec<&str> = options[1..].iter().map(|o| o.label.as_str()).collect();
        let mut sorted = labels.clone();
        sorted.sort_unstable();
        assert_eq!(labels, sorted);
    }

    #[test]
    fn test_options_exclude_host_sources() {
        let options = selectable_options(&descriptors());
        assert!(options
            .iter()
            .all(|o| !o.label.contains("Voice") && o.label != "Chromium"));
    }

    #[test]
    fn test_options_dedupe_node_names() {
        let options = selectable_options(&descriptors());
        let firefox_nodes = options
            .iter()
            .filter(|o| o.value == AudioSource::node("Firefox"))
            .count();
        assert_eq!(firefox_nodes, 1);
    }

    #[test]
    fn test_options_include_per_stream_entries() {
        let options = selectable_options(&descriptors());
        assert!(options.iter().any(|o| {
            o.label == "Firefox (A Video)" && o.value == AudioSource::node_with_object("Firefox", "12")
        }));
        assert!(options.iter().any(|o| {
            o.label == "Spotify (Some Song)"
                && o.value == AudioSource::node_with_object("Spotify", "56")
        }));
    }

    #[test]
    fn test_options_with_no_live_sources() {
        let options = selectable_options(&[]);
        let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Entire system", "Discord"]);
    }
}
