//! Paste view-model controller.
//!
//! Owns the single "current paste" (or none), the in-progress draft, and the
//! address-bar [`Location`]. All store I/O goes through generation-stamped
//! commands; [`PasteController::apply`] accepts only the completion matching
//! the one in-flight request, so responses arriving after a reset or a newer
//! operation are discarded instead of mutating state.

use sharebin_core::highlight::Highlighter;
use sharebin_core::models::paste::Paste;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use crate::{
    error::{ErrorKind, UiError},
    location::Location,
    protocol::{StoreCmd, StoreEvent},
};

/// A saved paste plus its client-side derived rendering.
#[derive(Debug, Clone)]
pub struct PasteView {
    pub paste: Paste,
    /// Derived markup; recomputed on load/create, never persisted.
    pub markup: String,
}

/// Intent of the one meaningful in-flight request.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Intent {
    Load { id: String },
    Submit,
    Delete { id: String },
}

#[derive(Debug, Clone)]
struct InFlight {
    generation: u64,
    intent: Intent,
}

/// View-model controller mediating between user input, the store worker, the
/// highlighter, and the address bar.
pub struct PasteController {
    cmd_tx: UnboundedSender<StoreCmd>,
    highlighter: Arc<Highlighter>,
    location: Location,
    current: Option<PasteView>,
    draft_title: String,
    draft_content: String,
    last_error: Option<UiError>,
    generation: u64,
    in_flight: Option<InFlight>,
}

impl PasteController {
    pub fn new(
        cmd_tx: UnboundedSender<StoreCmd>,
        highlighter: Arc<Highlighter>,
        location: Location,
    ) -> Self {
        Self {
            cmd_tx,
            highlighter,
            location,
            current: None,
            draft_title: String::new(),
            draft_content: String::new(),
            last_error: None,
            generation: 0,
            in_flight: None,
        }
    }

    /// Inspect the current path and load the paste it names, if any.
    ///
    /// No-op when the path is empty or already matches the loaded paste, so
    /// a freshly created paste is displayed without a second fetch.
    pub fn initialize(&mut self) {
        let Some(id) = self.location.paste_id().map(str::to_string) else {
            return;
        };
        if self
            .current
            .as_ref()
            .is_some_and(|view| view.paste.id == id)
        {
            return;
        }
        self.load(id);
    }

    /// Issue a read for `id`; the completion replaces the view wholesale.
    pub fn load(&mut self, id: impl Into<String>) {
        let id = id.into();
        if id.is_empty() {
            self.last_error = Some(UiError::new(
                ErrorKind::Validation,
                "paste id must not be empty",
            ));
            return;
        }
        let generation = self.begin(Intent::Load { id: id.clone() });
        self.send(StoreCmd::Load { generation, id });
    }

    /// Clear the current paste, draft fields, and error state unconditionally.
    ///
    /// Idempotent; also orphans any in-flight completion.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.in_flight = None;
        self.current = None;
        self.draft_title.clear();
        self.draft_content.clear();
        self.last_error = None;
    }

    pub fn set_draft_title(&mut self, title: &str) {
        self.draft_title = title.to_string();
    }

    pub fn set_draft_content(&mut self, content: &str) {
        self.draft_content = content.to_string();
    }

    /// Submit the draft: guess the language, then issue a create.
    ///
    /// Empty drafts are refused with a surfaced validation error and no
    /// network call.
    pub fn submit(&mut self) {
        if self.draft_content.trim().is_empty() {
            self.last_error = Some(UiError::new(
                ErrorKind::Validation,
                "paste content must not be empty",
            ));
            return;
        }

        let language = self.highlighter.highlight(&self.draft_content).language;
        let title = if self.draft_title.trim().is_empty() {
            None
        } else {
            Some(self.draft_title.clone())
        };
        let content = self.draft_content.clone();
        let generation = self.begin(Intent::Submit);
        self.send(StoreCmd::Create {
            generation,
            title,
            content,
            language,
        });
    }

    /// Delete the current paste.
    pub fn delete(&mut self) {
        let Some(id) = self.current.as_ref().map(|view| view.paste.id.clone()) else {
            self.last_error = Some(UiError::new(
                ErrorKind::Validation,
                "no paste loaded to delete",
            ));
            return;
        };
        let generation = self.begin(Intent::Delete { id: id.clone() });
        self.send(StoreCmd::Delete { generation, id });
    }

    /// Apply a store completion.
    ///
    /// Completions whose generation does not match the in-flight request are
    /// stale (superseded by a newer operation or a reset) and are discarded
    /// without touching state. Failures only set the surfaced error; the
    /// current paste and draft stay exactly as they were.
    pub fn apply(&mut self, event: StoreEvent) {
        let Some(in_flight) = self.in_flight.clone() else {
            debug!("discarding completion with no request in flight");
            return;
        };
        if event.generation() != in_flight.generation {
            debug!(
                "discarding stale completion (generation {} != {})",
                event.generation(),
                in_flight.generation
            );
            return;
        }
        self.in_flight = None;

        match (in_flight.intent, event) {
            (Intent::Submit, StoreEvent::Created { paste, .. }) => {
                self.location.navigate(&format!("/{}", paste.id));
                let markup = self
                    .highlighter
                    .rehighlight(&paste.content, paste.language.as_deref())
                    .markup;
                self.current = Some(PasteView { paste, markup });
                self.draft_title.clear();
                self.draft_content.clear();
                self.last_error = None;
            }
            (Intent::Load { id }, StoreEvent::Loaded { paste, .. }) if paste.id == id => {
                let markup = self
                    .highlighter
                    .rehighlight(&paste.content, paste.language.as_deref())
                    .markup;
                self.current = Some(PasteView { paste, markup });
                self.last_error = None;
            }
            (Intent::Delete { id }, StoreEvent::Deleted { id: deleted, .. }) if deleted == id => {
                self.reset();
            }
            (_, StoreEvent::Missing { id, .. }) => {
                self.last_error = Some(UiError::new(
                    ErrorKind::NotFound,
                    format!("paste '{}' was not found", id),
                ));
            }
            (_, StoreEvent::Failed { kind, message, .. }) => {
                self.last_error = Some(UiError::new(kind, message));
            }
            (intent, event) => {
                warn!(
                    "completion {:?} does not match in-flight intent {:?}",
                    event, intent
                );
            }
        }
    }

    pub fn current(&self) -> Option<&PasteView> {
        self.current.as_ref()
    }

    pub fn draft(&self) -> (&str, &str) {
        (&self.draft_title, &self.draft_content)
    }

    pub fn last_error(&self) -> Option<&UiError> {
        self.last_error.as_ref()
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// The URL with the paste-id path segment stripped, for shareable links.
    pub fn base_url(&self) -> &str {
        self.location.base_url()
    }

    /// Canonical shareable URL for the current paste, if one is loaded.
    pub fn share_url(&self) -> Option<String> {
        self.current
            .as_ref()
            .map(|view| self.location.share_url(&view.paste.id))
    }

    /// True when no request is outstanding.
    pub fn is_idle(&self) -> bool {
        self.in_flight.is_none()
    }

    fn begin(&mut self, intent: Intent) -> u64 {
        self.generation += 1;
        self.in_flight = Some(InFlight {
            generation: self.generation,
            intent,
        });
        self.generation
    }

    fn send(&mut self, cmd: StoreCmd) {
        if self.cmd_tx.send(cmd).is_err() {
            self.in_flight = None;
            self.last_error = Some(UiError::new(ErrorKind::Network, "store worker is gone"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

    fn controller() -> (PasteController, UnboundedReceiver<StoreCmd>) {
        let (tx, rx) = unbounded_channel();
        let location = Location::parse("http://127.0.0.1:38460/").expect("location");
        (
            PasteController::new(tx, Arc::new(Highlighter::new()), location),
            rx,
        )
    }

    fn saved_paste(id: &str, content: &str) -> Paste {
        Paste {
            id: id.to_string(),
            title: Some(format!("{}-title", id)),
            content: content.to_string(),
            language: None,
            created_at: Utc::now(),
        }
    }

    fn issued_generation(cmd: &StoreCmd) -> u64 {
        match cmd {
            StoreCmd::Create { generation, .. }
            | StoreCmd::Load { generation, .. }
            | StoreCmd::Delete { generation, .. } => *generation,
        }
    }

    fn load_and_apply(
        ctrl: &mut PasteController,
        rx: &mut UnboundedReceiver<StoreCmd>,
        paste: Paste,
    ) {
        ctrl.load(paste.id.clone());
        let cmd = rx.try_recv().expect("load command issued");
        ctrl.apply(StoreEvent::Loaded {
            generation: issued_generation(&cmd),
            paste,
        });
    }

    #[test]
    fn reset_is_idempotent() {
        let (mut ctrl, _rx) = controller();
        ctrl.set_draft_title("t");
        ctrl.set_draft_content("c");

        ctrl.reset();
        assert!(ctrl.current().is_none());
        assert_eq!(ctrl.draft(), ("", ""));
        assert!(ctrl.last_error().is_none());

        ctrl.reset();
        assert!(ctrl.current().is_none());
        assert_eq!(ctrl.draft(), ("", ""));
        assert!(ctrl.last_error().is_none());
    }

    #[test]
    fn load_replaces_the_view_wholesale() {
        let (mut ctrl, mut rx) = controller();
        load_and_apply(&mut ctrl, &mut rx, saved_paste("aaaa1111", "first body"));
        assert_eq!(ctrl.current().expect("loaded").paste.id, "aaaa1111");

        let mut second = saved_paste("bbbb2222", "second body");
        second.title = None;
        second.language = Some("rust".to_string());
        load_and_apply(&mut ctrl, &mut rx, second);

        let view = ctrl.current().expect("replaced");
        assert_eq!(view.paste.id, "bbbb2222");
        assert_eq!(view.paste.content, "second body");
        assert!(view.paste.title.is_none());
        assert_eq!(view.paste.language.as_deref(), Some("rust"));
    }

    #[test]
    fn stale_completion_after_reset_is_discarded() {
        let (mut ctrl, mut rx) = controller();
        ctrl.load("aaaa1111");
        let cmd = rx.try_recv().expect("load command issued");
        let stale_generation = issued_generation(&cmd);

        ctrl.reset();
        ctrl.apply(StoreEvent::Loaded {
            generation: stale_generation,
            paste: saved_paste("aaaa1111", "late arrival"),
        });

        assert!(ctrl.current().is_none());
        assert!(ctrl.last_error().is_none());
    }

    #[test]
    fn superseded_load_loses_to_the_newer_one() {
        let (mut ctrl, mut rx) = controller();
        ctrl.load("aaaa1111");
        let first = issued_generation(&rx.try_recv().expect("first load"));
        ctrl.load("bbbb2222");
        let second = issued_generation(&rx.try_recv().expect("second load"));

        // The first response arrives after being superseded.
        ctrl.apply(StoreEvent::Loaded {
            generation: first,
            paste: saved_paste("aaaa1111", "old"),
        });
        assert!(ctrl.current().is_none());

        ctrl.apply(StoreEvent::Loaded {
            generation: second,
            paste: saved_paste("bbbb2222", "new"),
        });
        assert_eq!(ctrl.current().expect("loaded").paste.id, "bbbb2222");
    }

    #[test]
    fn empty_submit_surfaces_validation_without_network() {
        let (mut ctrl, mut rx) = controller();
        ctrl.set_draft_content("   ");
        ctrl.submit();

        let err = ctrl.last_error().expect("validation error");
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(rx.try_recv().is_err());
        assert!(ctrl.is_idle());
    }

    #[test]
    fn submit_success_navigates_and_clears_the_draft() {
        let (mut ctrl, mut rx) = controller();
        ctrl.set_draft_title("demo");
        ctrl.set_draft_content("fn main() {\n    let x = 1;\n}\n");
        ctrl.submit();

        let cmd = rx.try_recv().expect("create command issued");
        let generation = issued_generation(&cmd);
        let language = match &cmd {
            StoreCmd::Create { language, .. } => language.clone(),
            other => panic!("unexpected command: {:?}", other),
        };
        assert_eq!(language.as_deref(), Some("rust"));

        let mut paste = saved_paste("cccc3333", "fn main() {\n    let x = 1;\n}\n");
        paste.language = language;
        ctrl.apply(StoreEvent::Created { generation, paste });

        assert_eq!(ctrl.location().path(), "/cccc3333");
        assert_eq!(ctrl.draft(), ("", ""));
        let view = ctrl.current().expect("created");
        assert_eq!(view.paste.id, "cccc3333");
        assert!(!view.markup.is_empty());
        assert_eq!(
            ctrl.share_url().as_deref(),
            Some("http://127.0.0.1:38460/cccc3333")
        );
    }

    #[test]
    fn failed_operation_leaves_state_untouched() {
        let (mut ctrl, mut rx) = controller();
        load_and_apply(&mut ctrl, &mut rx, saved_paste("aaaa1111", "kept"));

        ctrl.delete();
        let cmd = rx.try_recv().expect("delete command issued");
        ctrl.apply(StoreEvent::Failed {
            generation: issued_generation(&cmd),
            kind: ErrorKind::Network,
            message: "connection refused".to_string(),
        });

        let view = ctrl.current().expect("still loaded");
        assert_eq!(view.paste.content, "kept");
        let err = ctrl.last_error().expect("surfaced");
        assert_eq!(err.kind, ErrorKind::Network);
    }

    #[test]
    fn delete_success_resets_everything() {
        let (mut ctrl, mut rx) = controller();
        load_and_apply(&mut ctrl, &mut rx, saved_paste("aaaa1111", "doomed"));

        ctrl.delete();
        let cmd = rx.try_recv().expect("delete command issued");
        ctrl.apply(StoreEvent::Deleted {
            generation: issued_generation(&cmd),
            id: "aaaa1111".to_string(),
        });

        assert!(ctrl.current().is_none());
        assert_eq!(ctrl.draft(), ("", ""));
        assert!(ctrl.last_error().is_none());
    }

    #[test]
    fn delete_without_a_current_paste_is_refused() {
        let (mut ctrl, mut rx) = controller();
        ctrl.delete();
        assert_eq!(
            ctrl.last_error().expect("refused").kind,
            ErrorKind::Validation
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn missing_paste_surfaces_not_found() {
        let (mut ctrl, mut rx) = controller();
        load_and_apply(&mut ctrl, &mut rx, saved_paste("aaaa1111", "kept"));

        ctrl.load("gone0000");
        let cmd = rx.try_recv().expect("load command issued");
        ctrl.apply(StoreEvent::Missing {
            generation: issued_generation(&cmd),
            id: "gone0000".to_string(),
        });

        // Prior state stays; only the error is surfaced.
        assert_eq!(ctrl.current().expect("kept").paste.id, "aaaa1111");
        assert_eq!(
            ctrl.last_error().expect("surfaced").kind,
            ErrorKind::NotFound
        );
    }

    #[test]
    fn initialize_loads_the_paste_named_by_the_path() {
        let (tx, mut rx) = unbounded_channel();
        let location = Location::parse("http://127.0.0.1:38460/abcd1234").expect("location");
        let mut ctrl = PasteController::new(tx, Arc::new(Highlighter::new()), location);

        ctrl.initialize();
        match rx.try_recv().expect("load issued") {
            StoreCmd::Load { id, .. } => assert_eq!(id, "abcd1234"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn initialize_is_a_noop_for_the_already_loaded_paste() {
        let (mut ctrl, mut rx) = controller();
        load_and_apply(&mut ctrl, &mut rx, saved_paste("abcd1234", "body"));
        ctrl.initialize();
        // Root path: nothing to do.
        assert!(rx.try_recv().is_err());

        // Even with the matching path, no refetch is issued.
        let (tx, mut rx) = unbounded_channel();
        let location = Location::parse("http://127.0.0.1:38460/abcd1234").expect("location");
        let mut ctrl = PasteController::new(tx, Arc::new(Highlighter::new()), location);
        ctrl.load("abcd1234");
        let cmd = rx.try_recv().expect("load issued");
        ctrl.apply(StoreEvent::Loaded {
            generation: issued_generation(&cmd),
            paste: saved_paste("abcd1234", "body"),
        });
        ctrl.initialize();
        assert!(rx.try_recv().is_err());
    }
}
