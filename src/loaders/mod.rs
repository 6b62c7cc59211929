//! Asset loading off the frame loop.
//!
//! Loads run on a worker thread and hand their result back through a oneshot
//! channel. The frame loop polls with [`AssetLoad::poll_ready`] and never blocks;
//! anything else can simply `.await` the load.

pub mod gltf;

pub use self::gltf::{load_character_rig, load_world_colliders, AnimationClip, CharacterRig};

use anyhow::{anyhow, Result};
use futures::channel::oneshot;
use futures::FutureExt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Pending result of a background load
pub struct AssetLoad<T> {
    label: String,
    receiver: oneshot::Receiver<Result<T>>,
}

impl<T: Send + 'static> AssetLoad<T> {
    /// Run `load` on a new thread
    pub fn spawn<F>(label: impl Into<String>, load: F) -> Self
    where
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        let label = label.into();
        let (sender, receiver) = oneshot::channel();
        let thread_label = label.clone();
        let spawned = std::thread::Builder::new()
            .name(format!("load-{thread_label}"))
            .spawn(move || {
                // receiver may be gone if the app shut down first
                let _ = sender.send(load());
            });
        if let Err(e) = spawned {
            log::error!("Could not start loader thread for {label}: {e}");
        }
        Self { label, receiver }
    }
}

impl<T> AssetLoad<T> {
    /// Already-finished load, handy for hosts that fetch assets themselves
    pub fn ready(label: impl Into<String>, value: Result<T>) -> Self {
        let (sender, receiver) = oneshot::channel();
        let _ = sender.send(value);
        Self {
            label: label.into(),
            receiver,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Non-blocking check; `Some` once the load has finished. Drop the handle after that.
    pub fn poll_ready(&mut self) -> Option<Result<T>> {
        (&mut self.receiver).now_or_never().map(|r| self.settle(r))
    }

    fn settle(&self, received: Result<Result<T>, oneshot::Canceled>) -> Result<T> {
        received.map_err(|_| anyhow!("loader for {} exited without a result", self.label))?
    }
}

impl<T> Future for AssetLoad<T> {
    type Output = Result<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.receiver.poll_unpin(cx) {
            Poll::Ready(received) => Poll::Ready(self.settle(received)),
            Poll::Pending => Poll::Pending,
        }
    }
}
