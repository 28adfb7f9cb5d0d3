//! Plain-text rendering of notifications.
//!
//! Used by the log sink and the CLI. The layout is informational only and
//! carries nothing the structured [`Notification`] does not.

use crate::catalog::{effect_type_name, value_type_name};
use crate::feeds::FeedKind;
use crate::notify::{Notification, Subject};
use crate::record::{FieldValue, Record};
use crate::shapes::WarEffect;

const UNKNOWN: &str = "UNK";

/// Render a compact multi-line summary of one notification.
pub fn render_summary(notification: &Notification) -> String {
    let mut out = format!(
        "{} {} on {}\n",
        notification.feed.label(),
        notification.kind,
        notification.api_type
    );

    match &notification.subject {
        Subject::Record { record } => render_record(&mut out, notification.feed, record),
        Subject::Change {
            after,
            changed_fields,
            ..
        } => {
            render_record(&mut out, notification.feed, after);
            out.push_str(notification.feed.changes_title());
            out.push('\n');
            for change in changed_fields {
                out.push_str(&format!(
                    "{}: {} → {}\n",
                    change.field,
                    display_opt(change.old.as_ref()),
                    display_opt(change.new.as_ref())
                ));
            }
        }
        Subject::Scalar { before, after } => {
            out.push_str(&format!("{} → {}\n", before, after));
        }
    }

    out
}

fn render_record(out: &mut String, feed: FeedKind, record: &Record) {
    if feed == FeedKind::Effects {
        if let Ok(effect) = WarEffect::from_record(record) {
            render_effect(out, &effect);
            return;
        }
    }
    for (name, value) in record.iter() {
        out.push_str(&format!("{}: {}\n", name, display(value)));
    }
}

fn render_effect(out: &mut String, effect: &WarEffect) {
    out.push_str(&format!(
        "{} {} {}\n",
        effect.id,
        effect_type_name(effect.effect_type).unwrap_or(UNKNOWN),
        effect.effect_type
    ));
    out.push_str(&format!("nameHash: {}\n", effect.name_hash));
    out.push_str(&format!("gameplayEffectId32: {}\n", effect.gameplay_effect_id32));
    for slot in 0..2 {
        if let Some((value_type, value)) = effect.value_slot(slot) {
            out.push_str(&format!(
                "Value {}: Type {} ({}): {}\n",
                slot + 1,
                value_type_name(value_type).unwrap_or(UNKNOWN),
                value_type,
                value
            ));
        }
    }
}

fn display(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(s) if s.is_empty() => "\"\"".to_string(),
        other => other.to_string(),
    }
}

fn display_opt(value: Option<&FieldValue>) -> String {
    value.map_or_else(|| "(absent)".to_string(), display)
}
