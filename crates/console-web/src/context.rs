//! Settings, session and per-page handles shared through Leptos context

use console_client::{
    ClientResult, DataSource, DemoDataSource, HttpDataSource, ResourceController,
};
use console_protocol::ListView;
use console_types::{ConsoleSettings, Record, Session, SourceKind};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::Arc;
use tracing::{debug, warn};

/// Settings from `/config.json` plus the session read at startup
#[derive(Debug, Clone)]
pub struct ConsoleContext {
    /// Backends and endpoints
    pub settings: ConsoleSettings,
    /// Who is using the console
    pub session: Session,
}

impl ConsoleContext {
    /// Data source for an endpoint, demo or live as configured
    ///
    /// # Errors
    ///
    /// Fails when the endpoint cannot be resolved for the session.
    pub fn source<T: Record>(
        &self,
        key: &str,
        demo_seed: fn() -> Vec<T>,
    ) -> ClientResult<Arc<dyn DataSource<T>>> {
        let endpoint = self.settings.resolve(key, &self.session)?;
        Ok(match endpoint.source {
            SourceKind::Demo => Arc::new(DemoDataSource::new(demo_seed())),
            SourceKind::Live => Arc::new(HttpDataSource::new(endpoint)?),
        })
    }

    /// Page handle for an endpoint
    ///
    /// # Errors
    ///
    /// Same as [`Self::source`].
    pub fn handle<T: Record>(
        &self,
        key: &str,
        demo_seed: fn() -> Vec<T>,
    ) -> ClientResult<ResourceHandle<T>> {
        let page_size = self.settings.resolve(key, &self.session)?.page_size;
        let source = self.source(key, demo_seed)?;
        Ok(ResourceHandle::new(ResourceController::new(source, page_size)))
    }
}

/// The console context provided by [`crate::App`]
#[must_use]
pub fn use_console() -> ConsoleContext {
    expect_context::<ConsoleContext>()
}

/// Message shown above a page's table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Something finished
    Info(String),
    /// Something failed
    Error(String),
}

/// A page's controller plus the signals its views subscribe to
///
/// The list state lives behind the controller's lock; `version` is bumped
/// whenever it changes so derived views re-read it.
pub struct ResourceHandle<T: Record> {
    /// List state and data source
    pub controller: ResourceController<T>,
    /// Bumped after every state change
    pub version: RwSignal<u64>,
    /// Last mutation result
    pub notice: RwSignal<Option<Notice>>,
}

impl<T: Record> Clone for ResourceHandle<T> {
    fn clone(&self) -> Self {
        Self {
            controller: self.controller.clone(),
            version: self.version,
            notice: self.notice,
        }
    }
}

impl<T: Record> std::fmt::Debug for ResourceHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceHandle")
            .field("controller", &self.controller)
            .finish_non_exhaustive()
    }
}

impl<T: Record> ResourceHandle<T> {
    /// Wrap a controller
    #[must_use]
    pub fn new(controller: ResourceController<T>) -> Self {
        Self {
            controller,
            version: RwSignal::new(0),
            notice: RwSignal::new(None),
        }
    }

    /// Signal that the list state changed
    pub fn touch(&self) {
        self.version.try_update(|v| *v = v.wrapping_add(1));
    }

    /// Read the list state, subscribing the caller to changes
    pub fn read<R>(&self, read: impl FnOnce(&ListView<T>) -> R) -> R {
        self.version.track();
        self.controller.with_view(read)
    }

    /// Change the list state and notify subscribers
    pub fn update<R>(&self, update: impl FnOnce(&mut ListView<T>) -> R) -> R {
        let result = self.controller.update_view(update);
        self.touch();
        result
    }

    /// Whether the page shows placeholder data
    #[must_use]
    pub fn is_demo(&self) -> bool {
        self.controller.source_kind() == SourceKind::Demo
    }

    /// Show a message above the table
    pub fn notify(&self, notice: Notice) {
        self.notice.try_set(Some(notice));
    }

    /// Fetch the collection again
    ///
    /// A newer call supersedes an older one still in flight. Failures are
    /// shown in the page's error banner with the previous rows kept.
    pub fn reload(&self) {
        self.update(ListView::begin_load);
        let handle = self.clone();
        spawn_local(async move {
            match handle.controller.load().await {
                Ok(count) => debug!(entity = T::ENTITY, count, "Collection loaded"),
                Err(error) if error.is_aborted() => {}
                Err(error) => warn!(entity = T::ENTITY, %error, "Collection load failed"),
            }
            handle.touch();
        });
    }
}
