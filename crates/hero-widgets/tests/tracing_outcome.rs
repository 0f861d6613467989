//! The dialog's structured events reach a subscriber.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use hero_core::geometry::Size;
use hero_render::Pixmap;
use hero_widgets::HeroConfirmationDialog;
use tracing::Subscriber;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

#[derive(Debug, Default)]
struct Captured {
    messages: Vec<String>,
    outcomes: Vec<bool>,
    saw_render_span: bool,
}

struct HeroTraceCapture {
    state: Arc<Mutex<Captured>>,
}

impl<S> Layer<S> for HeroTraceCapture
where
    S: Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::Id,
        _ctx: Context<'_, S>,
    ) {
        if attrs.metadata().name() == "hero.render" {
            self.state.lock().expect("trace lock").saw_render_span = true;
        }
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        #[derive(Default)]
        struct Fields {
            message: Option<String>,
            user_confirmed: Option<bool>,
        }
        impl tracing::field::Visit for Fields {
            fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
                if field.name() == "user_confirmed" {
                    self.user_confirmed = Some(value);
                }
            }

            fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
                if field.name() == "message" {
                    self.message = Some(value.to_string());
                }
            }

            fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
                if field.name() == "message" {
                    self.message = Some(format!("{value:?}").trim_matches('"').to_string());
                }
            }
        }

        let mut fields = Fields::default();
        event.record(&mut fields);
        let mut state = self.state.lock().expect("trace lock");
        if fields.message.as_deref() == Some("hero.outcome")
            && let Some(confirmed) = fields.user_confirmed
        {
            state.outcomes.push(confirmed);
        }
        if let Some(message) = fields.message {
            state.messages.push(message);
        }
    }
}

#[test]
fn lifecycle_emits_named_events_and_one_outcome() {
    let captured = Arc::new(Mutex::new(Captured::default()));
    let subscriber = tracing_subscriber::registry().with(HeroTraceCapture {
        state: Arc::clone(&captured),
    });
    let _guard = tracing::subscriber::set_default(subscriber);

    let mut dialog = HeroConfirmationDialog::new();
    dialog.layout(Size::new(400.0, 800.0));
    let mut target = Pixmap::new(100, 200, 0.25).expect("pixmap");

    assert!(dialog.activate());
    assert!(!dialog.activate());
    for _ in 0..100 {
        dialog.tick(Duration::from_millis(16));
    }
    dialog.render(&mut target);
    assert!(dialog.dismiss(true));
    for _ in 0..100 {
        dialog.tick(Duration::from_millis(16));
    }

    let captured = captured.lock().expect("trace lock");
    for name in [
        "hero.activate",
        "hero.start",
        "hero.expanded",
        "hero.dismiss",
        "hero.cleanup",
        "hero.outcome",
        "hero.on_dismiss",
    ] {
        assert!(
            captured.messages.iter().any(|m| m == name),
            "missing {name}: {:?}",
            captured.messages
        );
    }
    assert_eq!(captured.outcomes, vec![true]);
    assert!(captured.saw_render_span);
}
