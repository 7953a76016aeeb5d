// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Analytics events.
//!
//! Events are emitted as structured logs on the `analytics` target, where a
//! subscriber layer can forward them to a real analytics backend.

/// Record a user interaction.
pub fn track_event(category: &str, action: &str, label: Option<&str>, value: Option<i64>) {
    tracing::info!(
        target: "analytics",
        category,
        action,
        label = label.unwrap_or_default(),
        value,
        "Event"
    );
}

/// Record a page view.
pub fn track_page_view(path: &str) {
    tracing::info!(target: "analytics", path, "Page view");
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::fmt;
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field, Visit};
    use tracing::{Event, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    /// Fields of one event on the `analytics` target, `message` included.
    pub(crate) type Recorded = BTreeMap<String, String>;

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<Recorded>>>);

    struct FieldVisitor<'a>(&'a mut Recorded);

    impl Visit for FieldVisitor<'_> {
        fn record_str(&mut self, field: &Field, value: &str) {
            self.0.insert(field.name().to_string(), value.to_string());
        }

        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.0.insert(field.name().to_string(), format!("{:?}", value));
        }
    }

    impl<S: Subscriber> Layer<S> for Recorder {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if event.metadata().target() != "analytics" {
                return;
            }
            let mut fields = Recorded::new();
            event.record(&mut FieldVisitor(&mut fields));
            self.0.lock().unwrap().push(fields);
        }
    }

    /// Run `f` and return the analytics events it emitted.
    pub(crate) fn capture_analytics(f: impl FnOnce()) -> Vec<Recorded> {
        let recorder = Recorder::default();
        let subscriber = tracing_subscriber::registry().with(recorder.clone());
        tracing::subscriber::with_default(subscriber, f);
        let events = recorder.0.lock().unwrap().clone();
        events
    }

    #[test]
    fn test_track_event_records_fields() {
        let events = capture_analytics(|| {
            track_event("weights", "lookup", Some("F"), Some(2012));
            track_event("auth", "login", None, None);
        });

        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["category"], "weights");
        assert_eq!(events[0]["action"], "lookup");
        assert_eq!(events[0]["label"], "F");
        assert_eq!(events[0]["value"], "2012");
        assert_eq!(events[1]["label"], "");
        assert!(!events[1].contains_key("value"));
    }

    #[test]
    fn test_track_page_view_records_path() {
        let events = capture_analytics(|| track_page_view("/events"));

        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["message"], "Page view");
        assert_eq!(events[0]["path"], "/events");
    }
}
