//! Host-side context handed to configurators during a render pass.

use serde::{Deserialize, Serialize};

/// The CRUD page being rendered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Index,
    Detail,
    Edit,
    New,
}

impl Page {
    /// Index and detail pages only show values; edit and new pages show forms.
    pub fn is_display(&self) -> bool {
        matches!(self, Page::Index | Page::Detail)
    }
}

/// Request-level context of the admin panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminContext {
    page: Option<Page>,
}

impl AdminContext {
    pub fn new(page: Page) -> Self {
        Self { page: Some(page) }
    }

    /// Context outside of any CRUD page, e.g. a dashboard widget.
    pub fn without_page() -> Self {
        Self { page: None }
    }

    pub fn current_page(&self) -> Option<Page> {
        self.page
    }

    pub fn is_display_page(&self) -> bool {
        self.page.is_some_and(|page| page.is_display())
    }
}

/// The entity whose field is being rendered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityContext {
    pub entity_type: String,
    /// Serialized instance, absent on `new` pages.
    pub instance: Option<serde_json::Value>,
}

impl EntityContext {
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            instance: None,
        }
    }

    pub fn with_instance(mut self, instance: serde_json::Value) -> Self {
        self.instance = Some(instance);
        self
    }
}
