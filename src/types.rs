//! Common types and data structures

/// A named URL the user may choose to view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub name: String,
    pub url: String,
}

impl Destination {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Lifecycle signal emitted by the content renderer for one load attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleSignal {
    Started,
    Finished(PageDocument),
    Failed,
}

/// A renderer signal tagged with the attempt that produced it. Events whose
/// attempt no longer matches the viewer's current attempt are dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadEvent {
    pub attempt: u64,
    pub signal: LifecycleSignal,
}

/// A load request handed to the content renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub attempt: u64,
    pub url: String,
}

/// Fetched page, reduced to what the viewer screen can display.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageDocument {
    pub final_url: String,
    pub content_type: String,
    pub text: String,
    pub truncated: bool,
}
