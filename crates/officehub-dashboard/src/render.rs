//! Presence renderer: snapshot + capability mode → dashboard document.

use chrono::Local;

use officehub_backend::{BackendError, Occupant, PresenceSnapshot, SnapshotStatus};
use officehub_core::types::document::colors;
use officehub_core::types::{CapabilityMode, Control, ControlAction, ControlStyle, Document};

/// Field values longer than this are split across continuation fields.
const MAX_FIELD_CHARS: usize = 1024;

/// Stable control identifiers. Buttons keep working across restarts because
/// the platform echoes these back.
pub mod custom_ids {
    /// Leave button on control surfaces.
    pub const CONTROL_LEAVE: &str = "ctrl_leave_button";
    /// Refresh button on control surfaces.
    pub const CONTROL_REFRESH: &str = "ctrl_refresh_button";
    /// Refresh button on read-only surfaces.
    pub const READ_ONLY_REFRESH: &str = "ro_refresh_button";
}

/// Renders presence snapshots. Output depends only on the inputs.
#[derive(Debug, Clone)]
pub struct PresenceRenderer {
    title: String,
}

impl PresenceRenderer {
    /// Create a renderer that stamps `title` on every document.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// Render a snapshot for a surface of the given mode.
    pub fn render(&self, snapshot: &PresenceSnapshot, mode: CapabilityMode) -> Document {
        let footer = format!(
            "Last update: {}",
            snapshot.fetched_at.with_timezone(&Local).format("%H:%M:%S")
        );

        let document = match &snapshot.status {
            SnapshotStatus::Failed(error) => self.error_document(error),
            SnapshotStatus::Ok if snapshot.occupants.is_empty() => Document::new(
                self.title.clone(),
                "Current occupancy status:",
                colors::GREY,
            )
            .field("Currently in office:", "No one is currently in the office.", false),
            SnapshotStatus::Ok => self.occupancy_document(&snapshot.occupants),
        };

        controls_for(mode)
            .into_iter()
            .fold(document.footer(footer), Document::control)
    }

    fn error_document(&self, error: &BackendError) -> Document {
        let headline = match error {
            BackendError::Connectivity(_) => "⚠️ **Server Connection Error**".to_string(),
            other => match other.status() {
                Some(status) => format!("⚠️ **Backend Error ({status})**"),
                None => "⚠️ **Backend Error**".to_string(),
            },
        };
        Document::new(self.title.clone(), headline, colors::RED).field(
            "Error:",
            format!("Unable to fetch data from server.\n```{error}```"),
            false,
        )
    }

    fn occupancy_document(&self, occupants: &[Occupant]) -> Document {
        let mut sorted: Vec<&Occupant> = occupants.iter().collect();
        sorted.sort_by(|a, b| {
            a.check_in
                .cmp(&b.check_in)
                .then_with(|| a.display_name.cmp(&b.display_name))
                .then_with(|| a.identity.cmp(&b.identity))
        });

        let lines: Vec<String> = sorted
            .iter()
            .map(|o| {
                format!(
                    "• **{}** (since {})",
                    o.display_name,
                    o.check_in.format("%H:%M")
                )
            })
            .collect();

        chunk_lines(&lines, MAX_FIELD_CHARS)
            .into_iter()
            .enumerate()
            .fold(
                Document::new(self.title.clone(), "Current occupancy status:", colors::GREEN),
                |doc, (i, chunk)| {
                    let name = if i == 0 {
                        "Currently in office:"
                    } else {
                        "Currently in office (cont.):"
                    };
                    doc.field(name, chunk, false)
                },
            )
    }
}

/// Controls exposed by a surface of the given mode.
pub fn controls_for(mode: CapabilityMode) -> Vec<Control> {
    match mode {
        CapabilityMode::Control => vec![
            Control::new(
                ControlAction::Leave,
                "Leaving 🟥",
                ControlStyle::Danger,
                custom_ids::CONTROL_LEAVE,
            ),
            Control::new(
                ControlAction::Refresh,
                "Refresh 🔄",
                ControlStyle::Secondary,
                custom_ids::CONTROL_REFRESH,
            ),
        ],
        CapabilityMode::ReadOnly => vec![Control::new(
            ControlAction::Refresh,
            "Refresh 🔄",
            ControlStyle::Secondary,
            custom_ids::READ_ONLY_REFRESH,
        )],
    }
}

/// Join lines with newlines, starting a new chunk before `limit` is exceeded.
fn chunk_lines(lines: &[String], limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    for line in lines {
        let extra = if current.is_empty() { 0 } else { 1 };
        if !current.is_empty() && current.chars().count() + extra + line.chars().count() > limit {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(line);
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use officehub_core::types::MemberId;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn occupant(id: &str, name: &str, check_in: NaiveDateTime) -> Occupant {
        Occupant {
            identity: MemberId::from(id),
            display_name: name.to_string(),
            check_in,
        }
    }

    fn renderer() -> PresenceRenderer {
        PresenceRenderer::new("Office")
    }

    fn listed_names(doc: &Document) -> Vec<String> {
        doc.fields
            .iter()
            .flat_map(|f| f.value.lines())
            .filter_map(|l| l.split("**").nth(1).map(str::to_string))
            .collect()
    }

    #[test]
    fn test_occupants_sorted_by_check_in() {
        let snapshot = PresenceSnapshot::ok(vec![
            occupant("3", "Carol", at(11, 0)),
            occupant("1", "Alice", at(8, 30)),
            occupant("2", "Bob", at(9, 45)),
        ]);
        let doc = renderer().render(&snapshot, CapabilityMode::ReadOnly);

        assert_eq!(listed_names(&doc), vec!["Alice", "Bob", "Carol"]);
        assert_eq!(doc.color, colors::GREEN);
        assert!(doc.fields[0].value.contains("(since 08:30)"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let snapshot = PresenceSnapshot::ok(vec![
            occupant("2", "Bob", at(9, 0)),
            occupant("1", "Alice", at(9, 0)),
        ]);
        let a = renderer().render(&snapshot, CapabilityMode::Control);
        let b = renderer().render(&snapshot, CapabilityMode::Control);
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_vec(&a).unwrap(),
            serde_json::to_vec(&b).unwrap()
        );
        assert_eq!(listed_names(&a), vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_every_occupant_listed_even_when_split() {
        let occupants: Vec<Occupant> = (0..120)
            .map(|i| {
                occupant(
                    &i.to_string(),
                    &format!("Member number {i:03} with a long name"),
                    at(8, 0) + chrono::Duration::minutes(i),
                )
            })
            .collect();
        let doc = renderer().render(&PresenceSnapshot::ok(occupants), CapabilityMode::ReadOnly);

        assert!(doc.fields.len() > 1);
        assert!(doc.fields.iter().all(|f| f.value.chars().count() <= MAX_FIELD_CHARS));
        assert_eq!(listed_names(&doc).len(), 120);
    }

    #[test]
    fn test_empty_differs_from_error() {
        let empty = renderer().render(&PresenceSnapshot::ok(Vec::new()), CapabilityMode::ReadOnly);
        let offline = renderer().render(
            &PresenceSnapshot::failed(BackendError::Connectivity("refused".into())),
            CapabilityMode::ReadOnly,
        );

        assert_eq!(empty.color, colors::GREY);
        assert!(empty.fields[0].value.contains("No one is currently in the office."));
        assert_eq!(offline.color, colors::RED);
        assert!(offline.description.contains("Server Connection Error"));
        assert_ne!(empty.content_hash(), offline.content_hash());
    }

    #[test]
    fn test_backend_error_shows_status() {
        let doc = renderer().render(
            &PresenceSnapshot::failed(BackendError::Backend {
                status: 503,
                message: "maintenance".into(),
            }),
            CapabilityMode::Control,
        );
        assert!(doc.description.contains("503"));
        assert!(doc.fields[0].value.contains("maintenance"));
    }

    #[test]
    fn test_controls_by_mode() {
        let snapshot = PresenceSnapshot::ok(Vec::new());
        let control = renderer().render(&snapshot, CapabilityMode::Control);
        let read_only = renderer().render(&snapshot, CapabilityMode::ReadOnly);

        let actions = |d: &Document| d.controls.iter().map(|c| c.action).collect::<Vec<_>>();
        assert_eq!(actions(&control), vec![ControlAction::Leave, ControlAction::Refresh]);
        assert_eq!(actions(&read_only), vec![ControlAction::Refresh]);
    }
}
