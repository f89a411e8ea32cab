//! Observable state containers for the posts and comments features.
//!
//! Each store owns its state exclusively. Every commit goes through
//! [`StateCell::patch`], which applies the change and notifies subscribers
//! before returning, so observers never see a half-applied transition.

mod comments;
mod favorite;
mod posts;

use tokio::sync::watch;

pub use self::{
    comments::{CommentsState, CommentsStore},
    favorite::{FavoriteMark, FavoriteToggle, TogglePhase, TouchedCopies},
    posts::{PostsState, PostsStore},
};
use crate::error::ApiError;

#[derive(Debug)]
pub struct StateCell<S> {
    tx: watch::Sender<S>,
}

impl<S: Clone> StateCell<S> {
    pub fn new(initial: S) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self {
            tx,
        }
    }

    pub fn snapshot(&self) -> S {
        self.tx.borrow().clone()
    }

    /// Read a projection without cloning the whole state.
    pub fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.tx.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.tx.subscribe()
    }

    pub fn patch(&self, f: impl FnOnce(&mut S)) {
        self.tx.send_modify(f);
    }
}

type DoneHook = Box<dyn FnOnce(String) + Send>;
type ErrorHook = Box<dyn FnOnce(ApiError) + Send>;

/// Optional callbacks for create and update. `on_done` receives the slug of
/// the saved article; `on_error` receives the raw failure so a form can pull
/// field messages out of it.
#[derive(Default)]
pub struct MutationHooks {
    on_done: Option<DoneHook>,
    on_error: Option<ErrorHook>,
}

impl MutationHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_done(mut self, hook: impl FnOnce(String) + Send + 'static) -> Self {
        self.on_done = Some(Box::new(hook));
        self
    }

    pub fn on_error(mut self, hook: impl FnOnce(ApiError) + Send + 'static) -> Self {
        self.on_error = Some(Box::new(hook));
        self
    }

    fn done(&mut self, slug: &str) {
        if let Some(hook) = self.on_done.take() {
            hook(slug.to_string());
        }
    }

    fn failed(&mut self, err: &ApiError) {
        if let Some(hook) = self.on_error.take() {
            hook(err.clone());
        }
    }
}

impl std::fmt::Debug for MutationHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MutationHooks")
            .field("on_done", &self.on_done.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}
